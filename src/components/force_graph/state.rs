//! Canvas-side view of the network: simulation, camera and pointer state.
//!
//! Wraps the `force_graph` physics simulation with per-element styling, the
//! pan/zoom camera, pointer handling and hover highlighting. The explorer
//! drives it through [`ViewCommand`]s; it reports back with [`ViewEvent`]s.

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::debug;

use super::geometry;
use super::pacing::PhysicsPacer;
use super::scale::{ScaleConfig, ScaledValues};
use super::theme::Theme;
use crate::config::PhysicsConfig;
use crate::network::{ElementRef, Emphasis, GraphStore, LayoutAnchor, ViewCommand, ViewEvent};

/// Pointer travel, in screen pixels, below which a press counts as a click.
pub const CLICK_TOLERANCE: f64 = 4.0;
/// Simulation step used while the initial layout settles.
const STABILIZATION_STEP: f32 = 0.016;
const MIN_ZOOM: f64 = 0.1;
const MAX_ZOOM: f64 = 10.0;
/// Fitting never zooms in past this.
const MAX_FIT_ZOOM: f64 = 1.5;
/// Screen margin kept around fitted nodes.
const FIT_PADDING: f64 = 60.0;
const CAMERA_SPEED: f64 = 6.0;
/// Screen pixels moved per arrow key press.
const KEY_PAN_STEP: f64 = 40.0;

/// What the renderer needs to know about a node besides its position.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	pub label: String,
	pub emphasis: Emphasis,
}

/// An edge as drawn on the canvas. The simulation only knows the spring.
#[derive(Clone, Debug)]
pub struct EdgeSlot {
	pub id: String,
	pub source: DefaultNodeIdx,
	pub target: DefaultNodeIdx,
	pub label: String,
	pub emphasis: Emphasis,
}

/// Camera: screen = world * k + (x, y).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom, kept within [MIN_ZOOM, MAX_ZOOM].
	pub k: f64,
}

/// A node being dragged.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	/// Set once the pointer has travelled far enough to count as a drag.
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

/// The background being dragged.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Copy, Debug)]
struct Press {
	start_x: f64,
	start_y: f64,
	/// Furthest distance from the start seen during this press.
	travel: f64,
}

/// Hover highlighting of a node and its neighbours.
///
/// The intensity eases in while a node is hovered and back out afterwards.
/// The last neighbourhood is kept until the fade-out completes.
#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	last: Option<DefaultNodeIdx>,
	neighbourhood: HashSet<DefaultNodeIdx>,
	intensity: f64,
}

impl HoverState {
	fn set(&mut self, node: Option<DefaultNodeIdx>, edges: &[EdgeSlot]) {
		if self.node == node {
			return;
		}
		self.node = node;
		let Some(idx) = node else {
			return;
		};
		self.last = Some(idx);
		self.neighbourhood.clear();
		self.neighbourhood.insert(idx);
		for edge in edges {
			if edge.source == idx {
				self.neighbourhood.insert(edge.target);
			} else if edge.target == idx {
				self.neighbourhood.insert(edge.source);
			}
		}
	}

	fn tick(&mut self, dt: f64) {
		const FADE_IN_SPEED: f64 = 6.0;
		const FADE_OUT_SPEED: f64 = 4.0;

		let (target, speed) = match self.node {
			Some(_) => (1.0, FADE_IN_SPEED),
			None => (0.0, FADE_OUT_SPEED),
		};
		self.intensity += (target - self.intensity) * (1.0 - (-speed * dt).exp());
		if self.node.is_none() && self.intensity < 0.005 {
			self.intensity = 0.0;
			self.last = None;
			self.neighbourhood.clear();
		}
	}

	pub fn intensity(&self) -> f64 {
		self.intensity
	}

	/// Opacity multiplier for a node, dimming those outside the neighbourhood.
	pub fn node_alpha(&self, idx: DefaultNodeIdx, dim: f64) -> f64 {
		if self.neighbourhood.contains(&idx) {
			1.0
		} else {
			1.0 - (1.0 - dim) * self.intensity
		}
	}

	/// Like [`node_alpha`](Self::node_alpha); an edge is in the neighbourhood
	/// when it touches the hovered node.
	pub fn edge_alpha(&self, edge: &EdgeSlot, dim: f64) -> f64 {
		match self.last {
			Some(idx) if edge.source == idx || edge.target == idx => 1.0,
			_ => 1.0 - (1.0 - dim) * self.intensity,
		}
	}

	/// How strongly an edge is emphasised by hovering, 0.0 to 1.0.
	pub fn edge_focus(&self, edge: &EdgeSlot) -> f64 {
		match self.last {
			Some(idx) if edge.source == idx || edge.target == idx => self.intensity,
			_ => 0.0,
		}
	}
}

/// Axis-aligned bounding box in world units.
#[derive(Clone, Copy, Debug)]
struct Bounds {
	min_x: f64,
	min_y: f64,
	max_x: f64,
	max_y: f64,
}

impl Bounds {
	fn around(x: f64, y: f64) -> Self {
		Self {
			min_x: x,
			min_y: y,
			max_x: x,
			max_y: y,
		}
	}

	fn include(&mut self, x: f64, y: f64) {
		self.min_x = self.min_x.min(x);
		self.min_y = self.min_y.min(y);
		self.max_x = self.max_x.max(x);
		self.max_y = self.max_y.max(y);
	}
}

/// Core graph state combining physics simulation with interaction tracking.
///
/// Created once when the canvas mounts, then mutated each frame by the
/// animation loop and by the commands the explorer emits.
pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub selection: Option<ElementRef>,
	pub anchor: Option<LayoutAnchor>,
	/// False until the initial layout has settled; the canvas is dimmed until then.
	pub stabilized: bool,
	camera_target: Option<ViewTransform>,
	press: Option<Press>,
	pacer: PhysicsPacer,
	/// Seconds of simulated time since mount.
	clock: f64,
	iterations: u32,
	max_iterations: u32,
	steps_per_frame: u32,
	rest_threshold: f32,
	edges: Vec<EdgeSlot>,
	node_index: HashMap<String, DefaultNodeIdx>,
	edge_index: HashMap<String, usize>,
}

impl ForceGraphState {
	pub fn new(store: &GraphStore, width: f64, height: f64, physics: &PhysicsConfig) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: physics.force_charge,
			force_spring: physics.force_spring,
			force_max: physics.force_max,
			node_speed: physics.node_speed,
			damping_factor: physics.damping_factor,
		});
		let mut node_index = HashMap::new();
		let mut edge_index = HashMap::new();
		let mut edges = Vec::new();

		let count = store.nodes().len().max(1);
		let spread = 40.0 * (count as f64).sqrt();
		for (i, node) in store.nodes().iter().enumerate() {
			let (x, y) = match node.position {
				Some(point) => (point.x, point.y),
				None => {
					let angle = (i as f64) * 2.0 * PI / count as f64;
					(spread * angle.cos(), spread * angle.sin())
				}
			};
			let idx = graph.add_node(NodeData {
				x: x as f32,
				y: y as f32,
				mass: 10.0,
				is_anchor: node.pinned,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.display_label().to_string(),
					emphasis: node.emphasis,
				},
			});
			node_index.insert(node.id.clone(), idx);
		}

		for edge in store.edges() {
			let (Some(&source), Some(&target)) = (node_index.get(&edge.from), node_index.get(&edge.to))
			else {
				continue;
			};
			// Self-loops are drawn but exert no spring force.
			if source != target {
				graph.add_edge(source, target, EdgeData::default());
			}
			edge_index.insert(edge.id.clone(), edges.len());
			edges.push(EdgeSlot {
				id: edge.id.clone(),
				source,
				target,
				label: edge.label.clone(),
				emphasis: edge.emphasis,
			});
		}

		Self {
			graph,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			selection: None,
			anchor: store.layout_anchor(),
			stabilized: false,
			camera_target: None,
			press: None,
			pacer: PhysicsPacer::new(true),
			clock: 0.0,
			iterations: 0,
			max_iterations: physics.stabilization_iterations,
			steps_per_frame: physics.stabilization_steps_per_frame.max(1),
			rest_threshold: physics.rest_threshold,
			edges,
			node_index,
			edge_index,
		}
	}

	pub fn edges(&self) -> &[EdgeSlot] {
		&self.edges
	}

	pub fn physics_enabled(&self) -> bool {
		self.pacer.is_enabled()
	}

	/// Applies one explorer command. Unknown ids are ignored.
	pub fn apply(&mut self, command: ViewCommand) {
		match command {
			ViewCommand::SetPhysicsEnabled(enabled) => self.pacer.set_enabled(enabled),
			ViewCommand::DisablePhysicsAfter(delay) => {
				self.pacer.disable_after(self.clock, delay.as_secs_f64())
			}
			ViewCommand::SetNodePosition { id, x, y, pinned } => self.with_node(&id, |node| {
				node.data.x = x as f32;
				node.data.y = y as f32;
				node.data.is_anchor = pinned;
			}),
			ViewCommand::ClearNodePosition(id) => {
				let dragged = self.drag.node_idx;
				self.with_node(&id, |node| {
					if Some(node.index()) != dragged {
						node.data.is_anchor = false;
					}
				})
			}
			ViewCommand::SetNodeStyle { id, emphasis } => {
				self.with_node(&id, |node| node.data.user_data.emphasis = emphasis)
			}
			ViewCommand::SetEdgeStyle { id, emphasis } => match self.edge_index.get(&id) {
				Some(&i) => self.edges[i].emphasis = emphasis,
				None => debug!("style for unknown edge {id}"),
			},
			ViewCommand::SetLayoutAnchor(anchor) => self.anchor = anchor,
			ViewCommand::SelectExactly(target) => {
				let target = target.filter(|t| self.resolves(t));
				self.selection = target;
			}
			ViewCommand::FocusOn {
				nodes,
				scale,
				animated,
			} => {
				let wanted: HashSet<DefaultNodeIdx> =
					nodes.iter().filter_map(|id| self.node_index.get(id).copied()).collect();
				if let Some(bounds) = self.bounds(|idx| wanted.contains(&idx)) {
					let target = self.frame(bounds, scale);
					self.move_camera(target, animated);
				}
			}
			ViewCommand::FitAll { animated } => {
				if let Some(bounds) = self.bounds(|_| true) {
					let target = self.frame(bounds, None);
					self.move_camera(target, animated);
				}
			}
		}
	}

	/// Advances the simulation by `dt` seconds.
	///
	/// Until the initial layout settles, each frame runs several simulation
	/// steps; the frame in which it settles returns
	/// [`ViewEvent::LayoutStabilized`]. Afterwards physics only runs while
	/// the pacer allows it.
	pub fn tick(&mut self, dt: f64) -> Option<ViewEvent> {
		self.clock += dt;
		self.hover.tick(dt);
		self.animate_camera(dt);

		if !self.stabilized {
			return self.stabilize_frame();
		}
		if self.pacer.poll(self.clock) {
			self.graph.update(dt as f32);
			self.enforce_anchor();
		}
		None
	}

	fn stabilize_frame(&mut self) -> Option<ViewEvent> {
		for _ in 0..self.steps_per_frame {
			let before = self.positions();
			self.graph.update(STABILIZATION_STEP);
			self.enforce_anchor();
			self.iterations += 1;

			let movement = before
				.iter()
				.zip(self.positions())
				.map(|(&(x0, y0), (x1, y1))| ((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt())
				.fold(0.0_f32, f32::max);
			if movement < self.rest_threshold || self.iterations >= self.max_iterations {
				debug!("layout stabilized after {} iterations", self.iterations);
				self.stabilized = true;
				return Some(ViewEvent::LayoutStabilized);
			}
		}
		None
	}

	fn positions(&self) -> Vec<(f32, f32)> {
		let mut out = Vec::new();
		self.graph.visit_nodes(|node| out.push((node.x(), node.y())));
		out
	}

	/// World position of every node, keyed by simulation index.
	pub fn position_map(&self) -> HashMap<DefaultNodeIdx, (f64, f64)> {
		let mut out = HashMap::new();
		self.graph.visit_nodes(|node| {
			out.insert(node.index(), (node.x() as f64, node.y() as f64));
		});
		out
	}

	pub fn node_position(&self, id: &str) -> Option<(f64, f64)> {
		let idx = *self.node_index.get(id)?;
		self.position_map().get(&idx).copied()
	}

	pub fn is_anchored(&self, id: &str) -> Option<bool> {
		let idx = *self.node_index.get(id)?;
		let mut anchored = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				anchored = Some(node.data.is_anchor);
			}
		});
		anchored
	}

	fn node_id(&self, idx: DefaultNodeIdx) -> Option<String> {
		let mut id = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				id = Some(node.data.user_data.id.clone());
			}
		});
		id
	}

	fn with_node(&mut self, id: &str, mut f: impl FnMut(&mut force_graph::Node<NodeInfo>)) {
		let Some(&idx) = self.node_index.get(id) else {
			debug!("command for unknown node {id}");
			return;
		};
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				f(node);
			}
		});
	}

	fn resolves(&self, target: &ElementRef) -> bool {
		match target {
			ElementRef::Node(id) => self.node_index.contains_key(id),
			ElementRef::Edge(id) => self.edge_index.contains_key(id),
		}
	}

	pub fn is_node_selected(&self, info: &NodeInfo) -> bool {
		matches!(&self.selection, Some(ElementRef::Node(id)) if *id == info.id)
	}

	pub fn is_edge_selected(&self, edge: &EdgeSlot) -> bool {
		matches!(&self.selection, Some(ElementRef::Edge(id)) if *id == edge.id)
	}

	/// Keeps free nodes outside the anchor disc so a cluster ring stays clear.
	fn enforce_anchor(&mut self) {
		let Some(anchor) = self.anchor else {
			return;
		};
		let (cx, cy) = (anchor.center.x as f32, anchor.center.y as f32);
		let radius = anchor.radius as f32;
		self.graph.visit_nodes_mut(|node| {
			if node.data.is_anchor {
				return;
			}
			let (dx, dy) = (node.data.x - cx, node.data.y - cy);
			let dist = (dx * dx + dy * dy).sqrt();
			if dist >= radius {
				return;
			}
			let (ux, uy) = if dist < 0.001 { (0.0, -1.0) } else { (dx / dist, dy / dist) };
			node.data.x = cx + ux * radius;
			node.data.y = cy + uy * radius;
		});
	}

	fn bounds(&self, include: impl Fn(DefaultNodeIdx) -> bool) -> Option<Bounds> {
		let mut bounds: Option<Bounds> = None;
		self.graph.visit_nodes(|node| {
			if !include(node.index()) {
				return;
			}
			let (x, y) = (node.x() as f64, node.y() as f64);
			match bounds.as_mut() {
				Some(b) => b.include(x, y),
				None => bounds = Some(Bounds::around(x, y)),
			}
		});
		bounds
	}

	/// Transform centring `bounds`, at `scale` or zoomed to fit.
	fn frame(&self, bounds: Bounds, scale: Option<f64>) -> ViewTransform {
		let k = match scale {
			Some(k) => k,
			None => {
				let w = (bounds.max_x - bounds.min_x).max(1.0);
				let h = (bounds.max_y - bounds.min_y).max(1.0);
				let kx = (self.width - 2.0 * FIT_PADDING).max(1.0) / w;
				let ky = (self.height - 2.0 * FIT_PADDING).max(1.0) / h;
				kx.min(ky).min(MAX_FIT_ZOOM)
			}
		}
		.clamp(MIN_ZOOM, MAX_ZOOM);
		let cx = (bounds.min_x + bounds.max_x) / 2.0;
		let cy = (bounds.min_y + bounds.max_y) / 2.0;
		ViewTransform {
			x: self.width / 2.0 - cx * k,
			y: self.height / 2.0 - cy * k,
			k,
		}
	}

	fn move_camera(&mut self, target: ViewTransform, animated: bool) {
		if animated {
			self.camera_target = Some(target);
		} else {
			self.transform = target;
			self.camera_target = None;
		}
	}

	fn animate_camera(&mut self, dt: f64) {
		let Some(target) = self.camera_target else {
			return;
		};
		let factor = 1.0 - (-CAMERA_SPEED * dt).exp();
		self.transform.x += (target.x - self.transform.x) * factor;
		self.transform.y += (target.y - self.transform.y) * factor;
		self.transform.k += (target.k - self.transform.k) * factor;
		let arrived = (target.x - self.transform.x).abs() < 0.5
			&& (target.y - self.transform.y).abs() < 0.5
			&& (target.k - self.transform.k).abs() < 0.001;
		if arrived {
			self.transform = target;
			self.camera_target = None;
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64, config: &ScaleConfig) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(config, self.transform.k);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < scale.hit_radius {
				found = Some(node.index());
			}
		});
		found
	}

	/// Closest edge within the hit tolerance of a screen position.
	pub fn edge_at_position(&self, sx: f64, sy: f64, config: &ScaleConfig, theme: &Theme) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(config, self.transform.k);
		let positions = self.position_map();
		let mut best: Option<(usize, f64)> = None;
		for (i, edge) in self.edges.iter().enumerate() {
			let (Some(&from), Some(&to)) = (positions.get(&edge.source), positions.get(&edge.target))
			else {
				continue;
			};
			let look = theme.edge_look(edge.emphasis);
			let tension = if look.curved { look.curve_tension } else { 0.0 };
			let distance = geometry::edge_distance(gx, gy, from, to, tension);
			let tolerance = scale.edge_hit_tolerance.max(look.width * scale.stroke);
			if distance <= tolerance && best.is_none_or(|(_, d)| distance < d) {
				best = Some((i, distance));
			}
		}
		best.map(|(i, _)| i)
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		self.hover.set(node, &self.edges);
	}

	pub fn pointer_down(&mut self, x: f64, y: f64, config: &ScaleConfig) {
		self.press = Some(Press {
			start_x: x,
			start_y: y,
			travel: 0.0,
		});
		if let Some(idx) = self.node_at_position(x, y, config) {
			let mut start = (0.0, 0.0);
			self.graph.visit_nodes(|node| {
				if node.index() == idx {
					start = (node.x(), node.y());
				}
			});
			self.drag = DragState {
				active: false,
				node_idx: Some(idx),
				node_start_x: start.0,
				node_start_y: start.1,
			};
		} else {
			self.pan = PanState {
				active: true,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
			};
			self.camera_target = None;
		}
	}

	/// Returns [`ViewEvent::DragStarted`] when a press on a node first
	/// travels past the click tolerance.
	pub fn pointer_move(&mut self, x: f64, y: f64, config: &ScaleConfig) -> Option<ViewEvent> {
		if !self.drag.active {
			let hovered = self.node_at_position(x, y, config);
			self.set_hover(hovered);
		}
		let press = self.press.as_mut()?;
		let (dx, dy) = (x - press.start_x, y - press.start_y);
		press.travel = press.travel.max((dx * dx + dy * dy).sqrt());
		let moved = press.travel >= CLICK_TOLERANCE;

		if let Some(idx) = self.drag.node_idx {
			if !moved {
				return None;
			}
			let started = !self.drag.active;
			self.drag.active = true;
			let k = self.transform.k;
			let (nx, ny) = (
				self.drag.node_start_x + (dx / k) as f32,
				self.drag.node_start_y + (dy / k) as f32,
			);
			self.graph.visit_nodes_mut(|node| {
				if node.index() == idx {
					node.data.x = nx;
					node.data.y = ny;
					node.data.is_anchor = true;
				}
			});
			return started.then_some(ViewEvent::DragStarted);
		}

		if self.pan.active {
			self.transform.x = self.pan.transform_start_x + dx;
			self.transform.y = self.pan.transform_start_y + dy;
		}
		None
	}

	/// Ends a press: a drag reports [`ViewEvent::DragEnded`], a short press
	/// reports a click on whatever lies under the pointer, a pan reports
	/// nothing.
	pub fn pointer_up(&mut self, x: f64, y: f64, config: &ScaleConfig, theme: &Theme) -> Option<ViewEvent> {
		let press = self.press.take();
		let dragged = self.drag.active;
		self.drag = DragState::default();
		self.pan.active = false;
		if dragged {
			return Some(ViewEvent::DragEnded);
		}
		if press?.travel >= CLICK_TOLERANCE {
			return None;
		}
		Some(self.click_at(x, y, config, theme))
	}

	pub fn pointer_leave(&mut self) -> Option<ViewEvent> {
		self.press = None;
		let dragged = self.drag.active;
		self.drag = DragState::default();
		self.pan.active = false;
		self.set_hover(None);
		dragged.then_some(ViewEvent::DragEnded)
	}

	fn click_at(&self, x: f64, y: f64, config: &ScaleConfig, theme: &Theme) -> ViewEvent {
		if let Some(id) = self.node_at_position(x, y, config).and_then(|idx| self.node_id(idx)) {
			return ViewEvent::NodeClicked(id);
		}
		if let Some(i) = self.edge_at_position(x, y, config, theme) {
			return ViewEvent::EdgeClicked(self.edges[i].id.clone());
		}
		ViewEvent::BackgroundClicked
	}

	/// Zooms around a screen position, one wheel notch at a time.
	pub fn zoom_at(&mut self, x: f64, y: f64, delta_y: f64) {
		self.camera_target = None;
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// Shifts the view by a screen offset.
	pub fn pan_by(&mut self, dx: f64, dy: f64) {
		self.camera_target = None;
		self.transform.x += dx;
		self.transform.y += dy;
	}

	/// One zoom step around the middle of the canvas.
	pub fn zoom_centered(&mut self, zoom_in: bool) {
		let delta_y = if zoom_in { -1.0 } else { 1.0 };
		self.zoom_at(self.width / 2.0, self.height / 2.0, delta_y);
	}

	/// Arrow keys pan, `+` and `-` zoom. Returns whether `key` was handled.
	pub fn key_navigate(&mut self, key: &str) -> bool {
		match key {
			"ArrowLeft" => self.pan_by(KEY_PAN_STEP, 0.0),
			"ArrowRight" => self.pan_by(-KEY_PAN_STEP, 0.0),
			"ArrowUp" => self.pan_by(0.0, KEY_PAN_STEP),
			"ArrowDown" => self.pan_by(0.0, -KEY_PAN_STEP),
			"+" | "=" => self.zoom_centered(true),
			"-" | "_" => self.zoom_centered(false),
			_ => return false,
		}
		true
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use super::*;
	use crate::network::{Edge, Node, Point};

	const W: f64 = 800.0;
	const H: f64 = 600.0;

	fn pinned(id: &str, x: f64, y: f64) -> Node {
		let mut node = Node::new(id, id.to_uppercase());
		node.position = Some(Point { x, y });
		node.pinned = true;
		node
	}

	/// Two pinned nodes either side of the origin and one free node.
	fn state() -> ForceGraphState {
		let store = GraphStore::from_parts(
			vec![pinned("a", -100.0, 0.0), pinned("b", 100.0, 0.0), Node::new("c", "C")],
			vec![Edge::new("ab", "a", "b"), Edge::new("bc", "b", "c")],
		);
		ForceGraphState::new(&store, W, H, &PhysicsConfig::default())
	}

	fn straight_theme() -> Theme {
		let mut theme = Theme::default();
		theme.edge.curved = false;
		theme
	}

	#[test]
	fn pinned_positions_come_from_the_store() {
		let state = state();
		assert_eq!(state.node_position("a"), Some((-100.0, 0.0)));
		assert_eq!(state.is_anchored("a"), Some(true));
		assert_eq!(state.is_anchored("c"), Some(false));
		assert_eq!(state.edges().len(), 2);
	}

	#[test]
	fn commands_update_nodes_and_ignore_unknown_ids() {
		let mut state = state();
		state.apply(ViewCommand::SetNodePosition {
			id: "c".into(),
			x: 5.0,
			y: 6.0,
			pinned: true,
		});
		assert_eq!(state.node_position("c"), Some((5.0, 6.0)));
		assert_eq!(state.is_anchored("c"), Some(true));

		state.apply(ViewCommand::ClearNodePosition("c".into()));
		assert_eq!(state.is_anchored("c"), Some(false));

		state.apply(ViewCommand::SetEdgeStyle {
			id: "bc".into(),
			emphasis: Emphasis::Highlighted,
		});
		assert_eq!(state.edges()[1].emphasis, Emphasis::Highlighted);

		state.apply(ViewCommand::SetNodeStyle {
			id: "ghost".into(),
			emphasis: Emphasis::Highlighted,
		});
		state.apply(ViewCommand::SelectExactly(Some(ElementRef::Edge("ghost".into()))));
		assert_eq!(state.selection, None);
		state.apply(ViewCommand::SelectExactly(Some(ElementRef::Edge("ab".into()))));
		assert!(state.is_edge_selected(&state.edges()[0]));
	}

	#[test]
	fn stabilization_is_reported_once() {
		let store = GraphStore::from_parts(
			vec![Node::new("a", "A"), Node::new("b", "B")],
			vec![Edge::new("ab", "a", "b")],
		);
		let physics = PhysicsConfig {
			stabilization_iterations: 5,
			stabilization_steps_per_frame: 2,
			rest_threshold: 0.0,
			..PhysicsConfig::default()
		};
		let mut state = ForceGraphState::new(&store, W, H, &physics);
		assert_eq!(state.tick(0.016), None);
		assert_eq!(state.tick(0.016), None);
		assert_eq!(state.tick(0.016), Some(ViewEvent::LayoutStabilized));
		assert!(state.stabilized);
		assert_eq!(state.tick(0.016), None);
	}

	#[test]
	fn delayed_disable_follows_the_simulation_clock() {
		let mut state = state();
		state.stabilized = true;
		state.apply(ViewCommand::SetPhysicsEnabled(true));
		state.apply(ViewCommand::DisablePhysicsAfter(Duration::from_millis(100)));
		state.tick(0.05);
		assert!(state.physics_enabled());
		state.tick(0.06);
		assert!(!state.physics_enabled());
	}

	#[test]
	fn anchor_pushes_free_nodes_out_of_the_ring() {
		let mut state = state();
		state.apply(ViewCommand::SetNodePosition {
			id: "c".into(),
			x: 10.0,
			y: 0.0,
			pinned: false,
		});
		state.apply(ViewCommand::SetLayoutAnchor(Some(LayoutAnchor {
			center: Point::default(),
			radius: 80.0,
		})));
		state.enforce_anchor();
		let (x, y) = state.node_position("c").unwrap();
		assert!(((x * x + y * y).sqrt() - 80.0).abs() < 1e-3);
		// Pinned nodes stay put.
		assert_eq!(state.node_position("a"), Some((-100.0, 0.0)));
	}

	#[test]
	fn short_press_on_node_is_a_click() {
		let mut state = state();
		let (config, theme) = (ScaleConfig::default(), Theme::default());
		// Node a sits at world (-100, 0), i.e. screen (300, 300).
		state.pointer_down(300.0, 300.0, &config);
		assert_eq!(state.pointer_move(302.0, 301.0, &config), None);
		assert_eq!(
			state.pointer_up(302.0, 301.0, &config, &theme),
			Some(ViewEvent::NodeClicked("a".into()))
		);
	}

	#[test]
	fn long_press_on_node_is_a_drag() {
		let mut state = state();
		let (config, theme) = (ScaleConfig::default(), Theme::default());
		state.pointer_down(300.0, 300.0, &config);
		assert_eq!(state.pointer_move(320.0, 300.0, &config), Some(ViewEvent::DragStarted));
		assert_eq!(state.pointer_move(340.0, 300.0, &config), None);
		assert_eq!(state.pointer_up(340.0, 300.0, &config, &theme), Some(ViewEvent::DragEnded));
		assert_eq!(state.node_position("a"), Some((-60.0, 0.0)));
		assert_eq!(state.is_anchored("a"), Some(true));
	}

	#[test]
	fn background_click_and_pan() {
		let mut state = state();
		let (config, theme) = (ScaleConfig::default(), Theme::default());
		state.pointer_down(20.0, 20.0, &config);
		assert_eq!(
			state.pointer_up(20.0, 20.0, &config, &theme),
			Some(ViewEvent::BackgroundClicked)
		);

		state.pointer_down(20.0, 20.0, &config);
		state.pointer_move(70.0, 40.0, &config);
		assert_eq!(state.pointer_up(70.0, 40.0, &config, &theme), None);
		assert_eq!(state.transform.x, W / 2.0 + 50.0);
		assert_eq!(state.transform.y, H / 2.0 + 20.0);
	}

	#[test]
	fn edge_hit_uses_distance_to_segment() {
		let mut state = state();
		let (config, theme) = (ScaleConfig::default(), straight_theme());
		// Midpoint of a-b is the world origin, the screen centre.
		assert_eq!(state.edge_at_position(W / 2.0, H / 2.0 + 3.0, &config, &theme), Some(0));
		assert_eq!(state.edge_at_position(W / 2.0, H / 2.0 + 40.0, &config, &theme), None);
		state.pointer_down(W / 2.0, H / 2.0, &config);
		assert_eq!(
			state.pointer_up(W / 2.0, H / 2.0, &config, &theme),
			Some(ViewEvent::EdgeClicked("ab".into()))
		);
	}

	#[test]
	fn focus_centres_node_at_requested_scale() {
		let mut state = state();
		state.apply(ViewCommand::FocusOn {
			nodes: vec!["b".into()],
			scale: Some(1.2),
			animated: false,
		});
		assert_eq!(state.transform.k, 1.2);
		assert!((state.transform.x - (W / 2.0 - 120.0)).abs() < 1e-9);
		assert!((state.transform.y - H / 2.0).abs() < 1e-9);
	}

	#[test]
	fn animated_fit_converges() {
		let mut state = state();
		state.stabilized = true;
		state.apply(ViewCommand::SetPhysicsEnabled(false));
		state.apply(ViewCommand::FocusOn {
			nodes: vec!["a".into(), "b".into()],
			scale: None,
			animated: true,
		});
		let start = state.transform;
		state.tick(0.016);
		assert_ne!(state.transform, start);
		for _ in 0..300 {
			state.tick(0.016);
		}
		// 200 world units across 680 usable pixels, capped at the fit maximum.
		assert_eq!(state.transform.k, 1.5);
		assert!((state.transform.x - W / 2.0).abs() < 1e-9);
	}

	#[test]
	fn wheel_zoom_is_clamped() {
		let mut state = state();
		for _ in 0..100 {
			state.zoom_at(W / 2.0, H / 2.0, -1.0);
		}
		assert_eq!(state.transform.k, 10.0);
		for _ in 0..200 {
			state.zoom_at(W / 2.0, H / 2.0, 1.0);
		}
		assert_eq!(state.transform.k, 0.1);
	}

	#[test]
	fn arrow_keys_pan_the_view() {
		let mut state = state();
		let start = state.transform;
		assert!(state.key_navigate("ArrowLeft"));
		assert!(state.key_navigate("ArrowUp"));
		assert_eq!(state.transform.x, start.x + 40.0);
		assert_eq!(state.transform.y, start.y + 40.0);
		assert!(state.key_navigate("ArrowRight"));
		assert!(state.key_navigate("ArrowDown"));
		assert_eq!(state.transform, start);
		assert!(!state.key_navigate("Enter"));
		assert_eq!(state.transform, start);
	}

	#[test]
	fn plus_and_minus_zoom_around_the_centre() {
		let mut state = state();
		let centre = state.screen_to_graph(W / 2.0, H / 2.0);
		assert!(state.key_navigate("+"));
		assert!(state.transform.k > 1.0);
		let after = state.screen_to_graph(W / 2.0, H / 2.0);
		assert!((after.0 - centre.0).abs() < 1e-9 && (after.1 - centre.1).abs() < 1e-9);

		for _ in 0..200 {
			state.key_navigate("-");
		}
		assert_eq!(state.transform.k, 0.1);
	}
}
