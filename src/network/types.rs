//! Records held by the graph store.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A citation attached to a node or edge: an image (local file or remote URL)
/// plus an optional link to where it came from.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub local_path: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub evidence_url: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub source_url: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub source_label: Option<String>,
}

impl Evidence {
	/// Drops empty strings and normalizes Windows separators in `local_path`.
	pub fn normalized(self) -> Self {
		fn present(value: Option<String>) -> Option<String> {
			value.filter(|v| !v.trim().is_empty())
		}
		Self {
			local_path: present(self.local_path).map(|p| p.replace('\\', "/")),
			evidence_url: present(self.evidence_url),
			source_url: present(self.source_url),
			source_label: present(self.source_label),
		}
	}

	/// Path the panel should load: `local_path` wins over `evidence_url`.
	///
	/// Remote URLs are used as-is; relative paths lose their leading slash so
	/// they resolve against the page. `None` means the item has nothing to show.
	pub fn display_path(&self) -> Option<String> {
		let raw = self.local_path.as_deref().or(self.evidence_url.as_deref())?;
		if raw.starts_with("http") {
			Some(raw.to_string())
		} else {
			Some(raw.trim_start_matches('/').replace('\\', "/"))
		}
	}
}

/// Visual state of a node or edge. The theme maps each to concrete colors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Emphasis {
	#[default]
	Default,
	Highlighted,
}

/// A 2-D position in graph (world) coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

/// A graph vertex: a person, organization or event.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub id: String,
	pub label: String,
	pub details: String,
	pub image_url: Option<String>,
	pub evidence: Vec<Evidence>,
	/// Forced position. `None` lets the layout engine place the node.
	pub position: Option<Point>,
	pub pinned: bool,
	pub emphasis: Emphasis,
}

impl Node {
	pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			label: label.into(),
			details: String::new(),
			image_url: None,
			evidence: Vec::new(),
			position: None,
			pinned: false,
			emphasis: Emphasis::Default,
		}
	}

	/// Label shown in the panel and on the canvas, falling back to the id.
	pub fn display_label(&self) -> &str {
		if self.label.is_empty() { &self.id } else { &self.label }
	}

	/// True when no narrative override is applied.
	pub fn is_default_view(&self) -> bool {
		self.position.is_none() && !self.pinned && self.emphasis == Emphasis::Default
	}
}

/// A directed relationship between two nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	pub id: String,
	pub from: String,
	pub to: String,
	pub label: String,
	pub details: String,
	pub evidence: Vec<Evidence>,
	pub emphasis: Emphasis,
}

impl Edge {
	pub fn new(id: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			from: from.into(),
			to: to.into(),
			label: String::new(),
			details: String::new(),
			evidence: Vec::new(),
			emphasis: Emphasis::Default,
		}
	}

	pub fn display_label(&self) -> &str {
		if self.label.is_empty() { &self.id } else { &self.label }
	}

	/// Whether this edge joins `a` and `b`, in either direction.
	pub fn joins(&self, a: &str, b: &str) -> bool {
		(self.from == a && self.to == b) || (self.from == b && self.to == a)
	}

	pub fn touches(&self, node: &str) -> bool {
		self.from == node || self.to == node
	}
}

/// Reference to a single node or edge, used for selection and cluster paths.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementRef {
	Node(String),
	Edge(String),
}

impl ElementRef {
	pub fn id(&self) -> &str {
		match self {
			ElementRef::Node(id) | ElementRef::Edge(id) => id,
		}
	}

	pub fn is_node(&self) -> bool {
		matches!(self, ElementRef::Node(_))
	}
}

impl fmt::Display for ElementRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ElementRef::Node(id) => write!(f, "node {id}"),
			ElementRef::Edge(id) => write!(f, "edge {id}"),
		}
	}
}

/// Transient helper that keeps free-floating nodes out of a cluster ring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutAnchor {
	pub center: Point,
	pub radius: f64,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn display_path_prefers_local_file() {
		let evidence = Evidence {
			local_path: Some("/public/images/a.png".into()),
			evidence_url: Some("https://example.org/a.png".into()),
			..Default::default()
		};
		assert_eq!(evidence.display_path().as_deref(), Some("public/images/a.png"));
	}

	#[test]
	fn display_path_keeps_remote_urls() {
		let evidence = Evidence {
			evidence_url: Some("https://example.org/a.png".into()),
			..Default::default()
		};
		assert_eq!(
			evidence.display_path().as_deref(),
			Some("https://example.org/a.png")
		);
	}

	#[test]
	fn normalized_drops_blank_fields() {
		let evidence = Evidence {
			local_path: Some("images\\x.png".into()),
			evidence_url: None,
			source_url: Some("".into()),
			source_label: Some("  ".into()),
		}
		.normalized();
		assert_eq!(evidence.local_path.as_deref(), Some("images/x.png"));
		assert_eq!(evidence.source_url, None);
		assert_eq!(evidence.source_label, None);
		assert_eq!(Evidence::default().display_path(), None);
	}
}
