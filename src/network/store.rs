//! Authoritative in-memory node and edge collections.
//!
//! Records keep the order they were loaded in; lookups go through id indexes.
//! The store is owned by the session and passed by `&mut` into the explorer,
//! which is the only writer during a session.

use std::collections::HashMap;

use super::types::{Edge, ElementRef, Emphasis, LayoutAnchor, Node};

/// Node and edge collections plus transient layout state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphStore {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	node_index: HashMap<String, usize>,
	edge_index: HashMap<String, usize>,
	layout_anchor: Option<LayoutAnchor>,
}

impl GraphStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a store from already validated records.
	pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
		let mut store = Self::default();
		store.replace(nodes, edges);
		store
	}

	/// Replaces every record and drops any transient layout state.
	///
	/// Callers guarantee unique ids and existing edge endpoints; the loader
	/// enforces both before calling this.
	pub fn replace(&mut self, nodes: Vec<Node>, edges: Vec<Edge>) {
		self.node_index = nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id.clone(), i))
			.collect();
		self.edge_index = edges
			.iter()
			.enumerate()
			.map(|(i, e)| (e.id.clone(), i))
			.collect();
		self.nodes = nodes;
		self.edges = edges;
		self.layout_anchor = None;
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	pub fn node(&self, id: &str) -> Option<&Node> {
		self.node_index.get(id).map(|&i| &self.nodes[i])
	}

	pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
		self.node_index.get(id).map(|&i| &mut self.nodes[i])
	}

	pub fn edge(&self, id: &str) -> Option<&Edge> {
		self.edge_index.get(id).map(|&i| &self.edges[i])
	}

	pub fn edge_mut(&mut self, id: &str) -> Option<&mut Edge> {
		self.edge_index.get(id).map(|&i| &mut self.edges[i])
	}

	pub fn contains(&self, target: &ElementRef) -> bool {
		match target {
			ElementRef::Node(id) => self.node_index.contains_key(id),
			ElementRef::Edge(id) => self.edge_index.contains_key(id),
		}
	}

	/// Edges touching `node`, in load order.
	pub fn edges_touching<'a>(&'a self, node: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
		self.edges.iter().filter(move |e| e.touches(node))
	}

	/// First edge (in load order) joining `a` and `b` in either direction.
	pub fn connecting_edge(&self, a: &str, b: &str) -> Option<&Edge> {
		self.edges.iter().find(|e| e.joins(a, b))
	}

	pub fn layout_anchor(&self) -> Option<LayoutAnchor> {
		self.layout_anchor
	}

	pub fn set_layout_anchor(&mut self, anchor: Option<LayoutAnchor>) {
		self.layout_anchor = anchor;
	}

	/// Restores every node and edge to its default view state and removes the
	/// layout anchor.
	pub fn clear_overrides(&mut self) {
		self.layout_anchor = None;
		for node in &mut self.nodes {
			node.position = None;
			node.pinned = false;
			node.emphasis = Emphasis::Default;
		}
		for edge in &mut self.edges {
			edge.emphasis = Emphasis::Default;
		}
	}

	/// True when no node or edge carries a narrative override.
	pub fn is_default_view(&self) -> bool {
		self.layout_anchor.is_none()
			&& self.nodes.iter().all(Node::is_default_view)
			&& self.edges.iter().all(|e| e.emphasis == Emphasis::Default)
	}
}
