//! Leptos components: the network canvas and the detail panel beside it.

mod detail_panel;
pub mod force_graph;

pub use detail_panel::DetailPanel;
pub use force_graph::ForceGraphCanvas;
