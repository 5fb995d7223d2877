//! Canvas rendering adapter for the network.
//!
//! Draws the graph on an HTML canvas with:
//! - Physics-based layout via the `force_graph` simulation, run until it
//!   settles and afterwards only on demand
//! - Click, drag, pan and zoom interactions reported as
//!   [`ViewEvent`](crate::network::ViewEvent)s
//! - Node and edge styling driven by
//!   [`ViewCommand`](crate::network::ViewCommand)s
//! - Configurable theming and visual scaling

mod component;
mod geometry;
mod pacing;
mod render;
pub mod scale;
mod state;
pub mod theme;

pub use component::ForceGraphCanvas;
pub use pacing::PhysicsPacer;
pub use state::ForceGraphState;
pub use theme::Theme;
