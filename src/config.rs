//! Runtime configuration.
//!
//! Every field has a built-in default, so a page can ship no configuration at
//! all or override just a few keys:
//!
//! ```json
//! { "nodesUrl": "data/Nodes.csv", "focusScale": 1.5 }
//! ```

use std::time::Duration;

use serde::Deserialize;

use crate::network::{Cluster, default_clusters};

/// Parameters handed to the `force_graph` simulation.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PhysicsConfig {
	pub force_charge: f32,
	pub force_spring: f32,
	pub force_max: f32,
	pub node_speed: f32,
	pub damping_factor: f32,
	/// Upper bound on simulation steps before the layout counts as settled.
	pub stabilization_iterations: u32,
	/// Steps run per animation frame while the initial layout settles.
	pub stabilization_steps_per_frame: u32,
	/// Largest per-step node movement (world units) still considered at rest.
	pub rest_threshold: f32,
}

impl Default for PhysicsConfig {
	fn default() -> Self {
		Self {
			force_charge: 400.0,
			force_spring: 0.04,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.85,
			stabilization_iterations: 1000,
			stabilization_steps_per_frame: 25,
			rest_threshold: 0.05,
		}
	}
}

/// Top-level configuration for the explorer.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExplorerConfig {
	pub nodes_url: String,
	pub edges_url: String,
	/// Page and idle panel heading.
	pub title: String,
	/// Idle panel text.
	pub intro: String,
	/// Zoom used when focusing a single node.
	pub focus_scale: f64,
	/// Physics stays on this long after a reset or cluster activation.
	pub settle_delay_ms: u64,
	/// Physics stays on this long after a node drag ends.
	pub drag_release_delay_ms: u64,
	pub physics: PhysicsConfig,
	pub clusters: Vec<Cluster>,
}

impl Default for ExplorerConfig {
	fn default() -> Self {
		Self {
			nodes_url: "Nodes.csv".into(),
			edges_url: "Edges.csv".into(),
			title: "COVID-19 Incentive Network".into(),
			intro: "This network visualizes key relationships between organizations, \
				individuals, and events related to COVID-19 vaccine development and \
				distribution in New Zealand."
				.into(),
			focus_scale: 1.2,
			settle_delay_ms: 1500,
			drag_release_delay_ms: 1000,
			physics: PhysicsConfig::default(),
			clusters: default_clusters(),
		}
	}
}

impl ExplorerConfig {
	pub fn settle_delay(&self) -> Duration {
		Duration::from_millis(self.settle_delay_ms)
	}

	pub fn drag_release_delay(&self) -> Duration {
		Duration::from_millis(self.drag_release_delay_ms)
	}

	/// Parses a JSON configuration document.
	pub fn from_json(text: &str) -> serde_json::Result<Self> {
		serde_json::from_str(text)
	}
}
