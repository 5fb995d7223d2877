//! Detail panel render tree.
//!
//! [`render`] turns the explorer state into plain data; the Leptos panel
//! component is the only place that turns it into DOM. Every clickable entry
//! carries the [`PanelAction`] it raises.

use std::fmt;

use super::cluster::ClusterCatalog;
use super::explorer::{PanelAction, PanelMode};
use super::store::GraphStore;
use super::types::{ElementRef, Evidence};

/// Text shown for an element without details.
pub const NO_DESCRIPTION: &str = "(No description provided)";
/// Placeholder for an element with no related items.
pub const NO_CONNECTIONS: &str = "No direct connections found.";
/// Link text for evidence sources without a label.
pub const DEFAULT_SOURCE_LABEL: &str = "(View Source)";

/// Everything the detail panel shows.
#[derive(Clone, Debug, PartialEq)]
pub enum PanelView {
	Idle {
		title: String,
		intro: String,
		clusters: Vec<ClusterLink>,
	},
	Item(ItemView),
	ClusterOverview {
		title: String,
		description: String,
		start: PanelAction,
	},
	ClusterStep {
		navigation: StepNavigation,
		item: ItemView,
	},
}

/// Entry in the idle panel's cluster list.
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterLink {
	pub title: String,
	pub summary: String,
	pub action: PanelAction,
}

/// Detail view of a single node or edge.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemView {
	pub target: ElementRef,
	pub title: String,
	pub text: String,
	/// Only nodes carry an image.
	pub image: Option<String>,
	pub related: Vec<RelatedItem>,
	/// Renderable evidence; empty means the section is hidden.
	pub evidence: Vec<EvidenceView>,
}

/// How a related node is connected to the viewed element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relation {
	Outgoing,
	Incoming,
	From,
	To,
}

impl fmt::Display for Relation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Relation::Outgoing => "→",
			Relation::Incoming => "←",
			Relation::From => "From",
			Relation::To => "To",
		})
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct RelatedItem {
	pub relation: Relation,
	pub node_id: String,
	pub node_label: String,
	/// Label of the connecting edge, for node views.
	pub edge_label: Option<String>,
	pub action: PanelAction,
}

impl RelatedItem {
	/// Text shown next to the link, e.g. `→ (funds)`.
	pub fn annotation(&self) -> String {
		match &self.edge_label {
			Some(label) => format!("{} ({label})", self.relation),
			None => self.relation.to_string(),
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct EvidenceView {
	pub src: String,
	pub alt: String,
	pub source: Option<SourceLink>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SourceLink {
	pub href: String,
	pub label: String,
}

/// Navigation bar shown above a cluster step.
#[derive(Clone, Debug, PartialEq)]
pub struct StepNavigation {
	pub cluster: String,
	/// 1-based position of the current step.
	pub step: usize,
	pub total: usize,
	pub back: PanelAction,
	pub previous: PanelAction,
	pub next: PanelAction,
}

impl StepNavigation {
	pub fn counter(&self) -> String {
		format!("Step {} of {}", self.step, self.total)
	}
}

/// Builds the panel for `mode`. Modes that point at missing data fall back to
/// the idle panel.
pub fn render(
	mode: &PanelMode,
	store: &GraphStore,
	catalog: &ClusterCatalog,
	title: &str,
	intro: &str,
) -> PanelView {
	let idle = || PanelView::Idle {
		title: title.to_string(),
		intro: intro.to_string(),
		clusters: catalog
			.clusters()
			.iter()
			.map(|c| ClusterLink {
				title: c.title.clone(),
				summary: c.summary(),
				action: PanelAction::OpenCluster(c.id.clone()),
			})
			.collect(),
	};

	match mode {
		PanelMode::Idle => idle(),
		PanelMode::ItemDetail(target) => item_view(store, target).map_or_else(idle, PanelView::Item),
		PanelMode::ClusterOverview(id) => match catalog.get(id) {
			Some(cluster) => PanelView::ClusterOverview {
				title: cluster.title.clone(),
				description: cluster.description.clone(),
				start: PanelAction::Explore {
					cluster: cluster.id.clone(),
					index: 0,
				},
			},
			None => idle(),
		},
		PanelMode::ClusterStep { cluster, index } => {
			let step = catalog
				.cached_path(cluster)
				.and_then(|path| Some((path.len(), path.get(*index)?)));
			let Some((total, target)) = step else {
				return idle();
			};
			let Some(item) = item_view(store, target) else {
				return idle();
			};
			PanelView::ClusterStep {
				navigation: StepNavigation {
					cluster: cluster.clone(),
					step: index + 1,
					total,
					back: PanelAction::BackToOverview,
					previous: PanelAction::PreviousStep,
					next: PanelAction::NextStep,
				},
				item,
			}
		}
	}
}

/// Detail view of one element, or `None` if it is not in the store.
pub fn item_view(store: &GraphStore, target: &ElementRef) -> Option<ItemView> {
	match target {
		ElementRef::Node(id) => {
			let node = store.node(id)?;
			let related = store
				.edges_touching(id)
				.filter_map(|edge| {
					let (relation, other) = if edge.from == *id {
						(Relation::Outgoing, &edge.to)
					} else {
						(Relation::Incoming, &edge.from)
					};
					let other = store.node(other)?;
					Some(RelatedItem {
						relation,
						node_id: other.id.clone(),
						node_label: other.display_label().to_string(),
						edge_label: Some(edge.label.clone()).filter(|l| !l.is_empty()),
						action: PanelAction::ShowRelated(other.id.clone()),
					})
				})
				.collect();
			Some(ItemView {
				target: target.clone(),
				title: node.display_label().to_string(),
				text: description(&node.details),
				image: node.image_url.clone(),
				related,
				evidence: evidence_views(&node.evidence),
			})
		}
		ElementRef::Edge(id) => {
			let edge = store.edge(id)?;
			let related = [(Relation::From, &edge.from), (Relation::To, &edge.to)]
				.into_iter()
				.filter_map(|(relation, node)| {
					let node = store.node(node)?;
					Some(RelatedItem {
						relation,
						node_id: node.id.clone(),
						node_label: node.display_label().to_string(),
						edge_label: None,
						action: PanelAction::ShowRelated(node.id.clone()),
					})
				})
				.collect();
			Some(ItemView {
				target: target.clone(),
				title: edge.display_label().to_string(),
				text: description(&edge.details),
				image: None,
				related,
				evidence: evidence_views(&edge.evidence),
			})
		}
	}
}

fn description(details: &str) -> String {
	if details.is_empty() {
		NO_DESCRIPTION.to_string()
	} else {
		details.to_string()
	}
}

/// Evidence items that have something to display. Items without a path are
/// skipped; numbering follows each item's position in the full list.
pub fn evidence_views(evidence: &[Evidence]) -> Vec<EvidenceView> {
	evidence
		.iter()
		.enumerate()
		.filter_map(|(i, item)| {
			let src = item.display_path()?;
			Some(EvidenceView {
				src,
				alt: format!("Evidence {}", i + 1),
				source: item.source_url.as_ref().map(|href| SourceLink {
					href: href.clone(),
					label: item
						.source_label
						.clone()
						.unwrap_or_else(|| DEFAULT_SOURCE_LABEL.to_string()),
				}),
			})
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::network::cluster::Cluster;
	use crate::network::types::{Edge, Node};

	fn store() -> GraphStore {
		let mut a = Node::new("a", "Alpha");
		a.image_url = Some("img/a.png".into());
		a.details = "First".into();
		let mut e1 = Edge::new("e1", "a", "b");
		e1.label = "funds".into();
		GraphStore::from_parts(
			vec![a, Node::new("b", ""), Node::new("lonely", "Lonely")],
			vec![e1, Edge::new("e2", "b", "a")],
		)
	}

	#[test]
	fn node_view_lists_directions() {
		let view = item_view(&store(), &ElementRef::Node("a".into())).unwrap();
		assert_eq!(view.title, "Alpha");
		assert_eq!(view.text, "First");
		assert_eq!(view.image.as_deref(), Some("img/a.png"));
		let annotations: Vec<_> = view.related.iter().map(RelatedItem::annotation).collect();
		assert_eq!(annotations, ["→ (funds)", "←"]);
		assert_eq!(view.related[0].node_label, "b");
		assert_eq!(view.related[0].action, PanelAction::ShowRelated("b".into()));
	}

	#[test]
	fn edge_view_lists_endpoints() {
		let view = item_view(&store(), &ElementRef::Edge("e2".into())).unwrap();
		assert_eq!(view.title, "e2");
		assert_eq!(view.text, NO_DESCRIPTION);
		assert_eq!(view.image, None);
		let relations: Vec<_> = view.related.iter().map(|r| (r.relation, r.node_id.as_str())).collect();
		assert_eq!(relations, [(Relation::From, "b"), (Relation::To, "a")]);
	}

	#[test]
	fn isolated_node_has_no_related_items() {
		let view = item_view(&store(), &ElementRef::Node("lonely".into())).unwrap();
		assert!(view.related.is_empty());
	}

	#[test]
	fn evidence_without_path_is_skipped() {
		let evidence = vec![
			Evidence {
				local_path: Some("images/1.png".into()),
				source_url: Some("https://one".into()),
				..Default::default()
			},
			Evidence {
				source_url: Some("https://orphan".into()),
				..Default::default()
			},
			Evidence {
				evidence_url: Some("https://three/3.png".into()),
				source_url: Some("https://three".into()),
				source_label: Some("Three".into()),
				..Default::default()
			},
		];
		let views = evidence_views(&evidence);
		assert_eq!(views.len(), 2);
		assert_eq!(views[0].alt, "Evidence 1");
		assert_eq!(views[0].source.as_ref().map(|s| s.label.as_str()), Some(DEFAULT_SOURCE_LABEL));
		assert_eq!(views[1].alt, "Evidence 3");
		assert_eq!(views[1].src, "https://three/3.png");
		assert_eq!(views[1].source.as_ref().map(|s| s.label.as_str()), Some("Three"));
	}

	#[test]
	fn idle_lists_clusters_with_clean_summaries() {
		let catalog = ClusterCatalog::new(vec![Cluster {
			id: "k".into(),
			members: vec!["a".into(), "b".into()],
			radius: 10.0,
			title: "K".into(),
			short_description: "Shows how A pays B".into(),
			description: "Long".into(),
		}]);
		let view = render(&PanelMode::Idle, &store(), &catalog, "Title", "Intro");
		let PanelView::Idle { title, clusters, .. } = view else {
			panic!("expected idle panel");
		};
		assert_eq!(title, "Title");
		assert_eq!(clusters[0].summary, "A pays B");
		assert_eq!(clusters[0].action, PanelAction::OpenCluster("k".into()));
	}

	#[test]
	fn step_panel_carries_step_actions() {
		let store = store();
		let mut catalog = ClusterCatalog::new(vec![Cluster {
			id: "k".into(),
			members: vec!["a".into(), "b".into()],
			radius: 10.0,
			title: "K".into(),
			short_description: String::new(),
			description: "Long".into(),
		}]);
		catalog.path(&store, "k");
		let mode = PanelMode::ClusterStep { cluster: "k".into(), index: 0 };
		let PanelView::ClusterStep { navigation, item } = render(&mode, &store, &catalog, "", "") else {
			panic!("expected step panel");
		};
		assert_eq!(navigation.counter(), "Step 1 of 4");
		assert_eq!(navigation.previous, PanelAction::PreviousStep);
		assert_eq!(navigation.next, PanelAction::NextStep);
		assert_eq!(item.target, ElementRef::Node("a".into()));
	}

	#[test]
	fn dangling_modes_fall_back_to_idle() {
		let catalog = ClusterCatalog::default();
		let mode = PanelMode::ItemDetail(ElementRef::Node("ghost".into()));
		assert!(matches!(render(&mode, &store(), &catalog, "", ""), PanelView::Idle { .. }));
		let mode = PanelMode::ClusterOverview("ghost".into());
		assert!(matches!(render(&mode, &store(), &catalog, "", ""), PanelView::Idle { .. }));
	}
}
