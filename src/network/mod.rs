//! Graph model and exploration logic.
//!
//! Nothing in this module touches the browser: the store, loader, cluster
//! catalog and explorer are plain Rust, and the explorer talks to the canvas
//! only through [`ViewCommand`] and [`ViewEvent`] values.
//!
//! # Example
//!
//! ```
//! use incentive_graph::config::ExplorerConfig;
//! use incentive_graph::network::{load_store, Session, ViewEvent};
//!
//! let store = load_store("ID,Label\na,A\nb,B\n", "ID,From,To,Label\ne1,a,b,funds\n").unwrap();
//! let mut session = Session::new(store, &ExplorerConfig::default());
//! let commands = session.handle_event(ViewEvent::NodeClicked("a".into()));
//! assert_eq!(commands.len(), 1);
//! ```

mod cluster;
mod commands;
mod editor;
mod explorer;
mod loader;
pub mod panel;
mod session;
mod store;
mod types;

pub use cluster::{Cluster, ClusterCatalog, build_path, clean_short_description, default_clusters};
pub use commands::{ViewCommand, ViewEvent};
pub use editor::{export_edges_csv, export_nodes_csv};
pub use explorer::{Explorer, PanelAction, PanelMode, ring_position, wrap_step};
pub use loader::{decode_evidence, load_store, load_tables, reload};
pub use panel::PanelView;
pub use session::Session;
pub use store::GraphStore;
pub use types::{Edge, ElementRef, Emphasis, Evidence, LayoutAnchor, Node, Point};
