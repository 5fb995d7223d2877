//! Selection and cluster narrative state machine.
//!
//! The explorer owns the panel mode and the cluster catalog. Every transition
//! takes the store by `&mut`, updates its view fields (positions, pins,
//! emphasis) and returns the commands the canvas must apply to match, in the
//! order they must be applied.
//!
//! ```text
//!             node/edge click                   activate
//!   Idle  ─────────────────────▶  ItemDetail   ─────────▶  ClusterOverview
//!    ▲  ◀── background click ───  (any state)               │  ▲
//!    │                                            explore(i) │  │ back
//!    └──────────── background click ─────────────  ClusterStep(i) ◀─▶ (i ± 1) mod N
//! ```

use std::f64::consts::PI;
use std::time::Duration;

use log::debug;

use super::cluster::ClusterCatalog;
use super::commands::{ViewCommand, ViewEvent};
use super::panel::{self, PanelView};
use super::store::GraphStore;
use super::types::{ElementRef, Emphasis, LayoutAnchor, Point};
use crate::config::ExplorerConfig;

/// Share of the ring radius kept clear of free-floating nodes.
const ANCHOR_RADIUS_RATIO: f64 = 0.8;

/// What the detail panel is currently showing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PanelMode {
	#[default]
	Idle,
	ItemDetail(ElementRef),
	ClusterOverview(String),
	ClusterStep { cluster: String, index: usize },
}

/// A user action raised from the detail panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PanelAction {
	/// A related node link.
	ShowRelated(String),
	OpenCluster(String),
	Explore { cluster: String, index: usize },
	NextStep,
	PreviousStep,
	BackToOverview,
	Reset,
}

/// Position of member `index` of `count` on a ring of `radius` around the
/// origin. The first member sits at 12 o'clock and the rest follow clockwise
/// in canvas coordinates (y grows downwards).
pub fn ring_position(index: usize, count: usize, radius: f64) -> Point {
	let angle = 2.0 * PI * index as f64 / count as f64 - PI / 2.0;
	Point {
		x: radius * angle.cos(),
		y: radius * angle.sin(),
	}
}

/// Selection controller and cluster narrative engine.
#[derive(Clone, Debug)]
pub struct Explorer {
	mode: PanelMode,
	catalog: ClusterCatalog,
	title: String,
	intro: String,
	focus_scale: f64,
	settle_delay: Duration,
	drag_release_delay: Duration,
}

impl Explorer {
	pub fn new(config: &ExplorerConfig) -> Self {
		Self {
			mode: PanelMode::Idle,
			catalog: ClusterCatalog::new(config.clusters.clone()),
			title: config.title.clone(),
			intro: config.intro.clone(),
			focus_scale: config.focus_scale,
			settle_delay: config.settle_delay(),
			drag_release_delay: config.drag_release_delay(),
		}
	}

	pub fn mode(&self) -> &PanelMode {
		&self.mode
	}

	pub fn catalog(&self) -> &ClusterCatalog {
		&self.catalog
	}

	/// Render tree for the current mode.
	pub fn panel(&self, store: &GraphStore) -> PanelView {
		panel::render(&self.mode, store, &self.catalog, &self.title, &self.intro)
	}

	/// Routes a canvas event.
	pub fn handle_event(&mut self, store: &mut GraphStore, event: ViewEvent) -> Vec<ViewCommand> {
		match event {
			ViewEvent::NodeClicked(id) => self.select(store, ElementRef::Node(id)),
			ViewEvent::EdgeClicked(id) => self.select(store, ElementRef::Edge(id)),
			ViewEvent::BackgroundClicked => self.reset(store),
			ViewEvent::DragStarted => vec![ViewCommand::SetPhysicsEnabled(true)],
			ViewEvent::DragEnded => vec![ViewCommand::DisablePhysicsAfter(self.drag_release_delay)],
			ViewEvent::LayoutStabilized => {
				vec![ViewCommand::SetPhysicsEnabled(false), self.settled_fit(store)]
			}
		}
	}

	/// Frames the active cluster's members, or the whole graph outside a tour.
	fn settled_fit(&self, store: &GraphStore) -> ViewCommand {
		let cluster = match &self.mode {
			PanelMode::ClusterOverview(id) | PanelMode::ClusterStep { cluster: id, .. } => {
				self.catalog.get(id)
			}
			PanelMode::Idle | PanelMode::ItemDetail(_) => None,
		};
		match cluster.map(|c| c.present_members(store)) {
			Some(nodes) if !nodes.is_empty() => ViewCommand::FocusOn {
				nodes,
				scale: None,
				animated: false,
			},
			_ => ViewCommand::FitAll { animated: false },
		}
	}

	/// Routes a panel action.
	pub fn dispatch(&mut self, store: &mut GraphStore, action: PanelAction) -> Vec<ViewCommand> {
		match action {
			PanelAction::ShowRelated(id) => self.show_related(store, &id),
			PanelAction::OpenCluster(id) => self.activate_cluster(store, &id),
			PanelAction::Explore { cluster, index } => self.explore(store, &cluster, index),
			PanelAction::NextStep => self.next(store),
			PanelAction::PreviousStep => self.previous(store),
			PanelAction::BackToOverview => self.back_to_overview(),
			PanelAction::Reset => self.reset(store),
		}
	}

	/// Shows `target` in the panel and selects it exclusively on the canvas.
	pub fn select(&mut self, store: &GraphStore, target: ElementRef) -> Vec<ViewCommand> {
		if !store.contains(&target) {
			debug!("ignoring selection of unknown {target}");
			return Vec::new();
		}
		debug!("selecting {target}");
		self.mode = PanelMode::ItemDetail(target.clone());
		vec![ViewCommand::SelectExactly(Some(target))]
	}

	/// Follows a related-item link: selects the node and zooms onto it.
	pub fn show_related(&mut self, store: &GraphStore, node: &str) -> Vec<ViewCommand> {
		let mut commands = self.select(store, ElementRef::Node(node.to_string()));
		if !commands.is_empty() {
			commands.push(self.focus_node(node));
		}
		commands
	}

	/// Returns to the idle panel and reverts every visual override.
	pub fn reset(&mut self, store: &mut GraphStore) -> Vec<ViewCommand> {
		debug!("resetting view");
		self.mode = PanelMode::Idle;
		let mut commands = self.reset_view(store);
		commands.push(ViewCommand::SelectExactly(None));
		commands.push(ViewCommand::FitAll { animated: true });
		commands
	}

	/// Clears positions, pins and emphasis on every element and lets physics
	/// run briefly so the layout can settle.
	pub fn reset_view(&self, store: &mut GraphStore) -> Vec<ViewCommand> {
		store.clear_overrides();
		let mut commands = Vec::with_capacity(2 * store.nodes().len() + store.edges().len() + 3);
		commands.push(ViewCommand::SetLayoutAnchor(None));
		for node in store.nodes() {
			commands.push(ViewCommand::ClearNodePosition(node.id.clone()));
			commands.push(ViewCommand::SetNodeStyle {
				id: node.id.clone(),
				emphasis: Emphasis::Default,
			});
		}
		for edge in store.edges() {
			commands.push(ViewCommand::SetEdgeStyle {
				id: edge.id.clone(),
				emphasis: Emphasis::Default,
			});
		}
		commands.push(ViewCommand::SetPhysicsEnabled(true));
		commands.push(ViewCommand::DisablePhysicsAfter(self.settle_delay));
		commands
	}

	/// Arranges a cluster's members on a ring, highlights them and their
	/// connecting edges, and shows the cluster overview.
	pub fn activate_cluster(&mut self, store: &mut GraphStore, id: &str) -> Vec<ViewCommand> {
		let Some(cluster) = self.catalog.get(id).cloned() else {
			debug!("ignoring unknown cluster {id}");
			return Vec::new();
		};
		debug!("activating cluster {id}");
		self.catalog.path(store, id);

		let mut commands = self.reset_view(store);

		let anchor = LayoutAnchor {
			center: Point::default(),
			radius: cluster.radius * ANCHOR_RADIUS_RATIO,
		};
		store.set_layout_anchor(Some(anchor));
		commands.push(ViewCommand::SetLayoutAnchor(Some(anchor)));

		let members = cluster.present_members(store);
		let count = members.len();
		let mut placed = Vec::with_capacity(count);
		for (i, member) in members.iter().enumerate() {
			let Some(node) = store.node_mut(member) else {
				continue;
			};
			let point = ring_position(i, count, cluster.radius);
			node.position = Some(point);
			node.pinned = true;
			node.emphasis = Emphasis::Highlighted;
			commands.push(ViewCommand::SetNodePosition {
				id: member.clone(),
				x: point.x,
				y: point.y,
				pinned: true,
			});
			commands.push(ViewCommand::SetNodeStyle {
				id: member.clone(),
				emphasis: Emphasis::Highlighted,
			});
			placed.push(member.clone());
		}

		let inner: Vec<String> = store
			.edges()
			.iter()
			.filter(|e| cluster.contains(&e.from) && cluster.contains(&e.to))
			.map(|e| e.id.clone())
			.collect();
		for edge_id in inner {
			if let Some(edge) = store.edge_mut(&edge_id) {
				edge.emphasis = Emphasis::Highlighted;
			}
			commands.push(ViewCommand::SetEdgeStyle {
				id: edge_id,
				emphasis: Emphasis::Highlighted,
			});
		}

		commands.push(ViewCommand::FocusOn {
			nodes: placed,
			scale: None,
			animated: true,
		});
		self.mode = PanelMode::ClusterOverview(cluster.id);
		commands
	}

	/// Shows step `index` of a cluster's path. Out-of-range steps are ignored.
	pub fn explore(&mut self, store: &GraphStore, cluster: &str, index: usize) -> Vec<ViewCommand> {
		let Some(path) = self.catalog.path(store, cluster) else {
			debug!("ignoring unknown cluster {cluster}");
			return Vec::new();
		};
		let Some(step) = path.get(index).cloned() else {
			debug!("ignoring step {index} of {cluster}: path has {} steps", path.len());
			return Vec::new();
		};

		let focus = match &step {
			ElementRef::Node(id) if store.node(id).is_some() => self.focus_node(id),
			ElementRef::Edge(id) => match store.edge(id) {
				Some(edge) => ViewCommand::FocusOn {
					nodes: vec![edge.from.clone(), edge.to.clone()],
					scale: None,
					animated: true,
				},
				None => return Vec::new(),
			},
			ElementRef::Node(id) => {
				debug!("cluster {cluster} step {index} names unknown node {id}");
				return Vec::new();
			}
		};

		self.mode = PanelMode::ClusterStep {
			cluster: cluster.to_string(),
			index,
		};
		vec![ViewCommand::SelectExactly(Some(step)), focus]
	}

	/// Moves to the following step, wrapping past the end.
	pub fn next(&mut self, store: &GraphStore) -> Vec<ViewCommand> {
		self.step_by(store, 1)
	}

	/// Moves to the preceding step, wrapping past the start.
	pub fn previous(&mut self, store: &GraphStore) -> Vec<ViewCommand> {
		self.step_by(store, -1)
	}

	fn step_by(&mut self, store: &GraphStore, delta: isize) -> Vec<ViewCommand> {
		let PanelMode::ClusterStep { cluster, index } = &self.mode else {
			return Vec::new();
		};
		let (cluster, index) = (cluster.clone(), *index);
		let Some(total) = self.catalog.cached_path(&cluster).map(<[_]>::len) else {
			return Vec::new();
		};
		let target = wrap_step(index, total, delta);
		self.explore(store, &cluster, target)
	}

	/// Leaves the tour for the cluster overview. The canvas is left as is.
	pub fn back_to_overview(&mut self) -> Vec<ViewCommand> {
		if let PanelMode::ClusterStep { cluster, .. } = &self.mode {
			self.mode = PanelMode::ClusterOverview(cluster.clone());
		}
		Vec::new()
	}

	fn focus_node(&self, id: &str) -> ViewCommand {
		ViewCommand::FocusOn {
			nodes: vec![id.to_string()],
			scale: Some(self.focus_scale),
			animated: true,
		}
	}
}

/// `(index + delta) mod total`, for `total > 0`.
pub fn wrap_step(index: usize, total: usize, delta: isize) -> usize {
	let total = total as isize;
	(index as isize + delta).rem_euclid(total) as usize
}
