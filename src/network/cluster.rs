//! Curated clusters and their guided-tour paths.
//!
//! A cluster is an ordered ring of member nodes. Its path visits each member
//! and, between consecutive members (wrapping last to first), the edge that
//! joins them:
//!
//! ```text
//! members: [a, b, c]
//! path:    [a, a-b, b, b-c, c, c-a]
//! ```
//!
//! Paths are built on first use and cached for the lifetime of the catalog.

use std::collections::HashMap;

use log::{debug, warn};
use serde::Deserialize;

use super::store::GraphStore;
use super::types::ElementRef;

/// Static definition of a narrative cluster.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
	pub id: String,
	/// Member node ids in tour order.
	pub members: Vec<String>,
	/// Ring radius in world units.
	#[serde(default = "default_radius")]
	pub radius: f64,
	pub title: String,
	#[serde(default)]
	pub short_description: String,
	#[serde(default)]
	pub description: String,
}

fn default_radius() -> f64 {
	250.0
}

impl Cluster {
	pub fn contains(&self, node: &str) -> bool {
		self.members.iter().any(|m| m == node)
	}

	/// Members that exist in `store`, in tour order.
	pub fn present_members(&self, store: &GraphStore) -> Vec<String> {
		self.members
			.iter()
			.filter(|m| store.node(m).is_some())
			.cloned()
			.collect()
	}

	/// Short description with leading boilerplate ("Shows how", "Illustrates
	/// the", ...) removed, for the cluster list.
	pub fn summary(&self) -> String {
		clean_short_description(&self.short_description)
	}
}

const LEAD_VERBS: &[&str] = &["Shows how ", "Shows the ", "Shows ", "Demonstrates ", "Illustrates "];
const LEAD_NOUNS: &[&str] = &["relationship ", "connection ", "pathway "];

/// Strips a leading verb phrase and then a leading relationship noun.
pub fn clean_short_description(text: &str) -> String {
	let mut rest = text.trim();
	if let Some(stripped) = LEAD_VERBS.iter().find_map(|p| rest.strip_prefix(p)) {
		rest = stripped;
		if let Some(stripped) = rest.strip_prefix("the ") {
			rest = stripped;
		}
	}
	if let Some(stripped) = LEAD_NOUNS.iter().find_map(|p| rest.strip_prefix(p)) {
		rest = stripped;
	}
	rest.to_string()
}

/// Computes the alternating node/edge path for a member ring.
///
/// A pair of consecutive members with no connecting edge contributes only its
/// node step.
pub fn build_path(store: &GraphStore, members: &[String]) -> Vec<ElementRef> {
	let n = members.len();
	let mut path = Vec::with_capacity(2 * n);
	for (i, current) in members.iter().enumerate() {
		path.push(ElementRef::Node(current.clone()));
		let next = &members[(i + 1) % n];
		match store.connecting_edge(current, next) {
			Some(edge) => path.push(ElementRef::Edge(edge.id.clone())),
			None => debug!("no edge between {current} and {next}, skipping step"),
		}
	}
	path
}

/// The set of clusters available in a session, with memoized paths.
#[derive(Clone, Debug, Default)]
pub struct ClusterCatalog {
	clusters: Vec<Cluster>,
	paths: HashMap<String, Vec<ElementRef>>,
}

impl ClusterCatalog {
	/// Keeps clusters with at least two members and a unique id.
	pub fn new(clusters: Vec<Cluster>) -> Self {
		let mut kept: Vec<Cluster> = Vec::with_capacity(clusters.len());
		for cluster in clusters {
			if cluster.members.len() < 2 {
				warn!("ignoring cluster {}: needs at least two members", cluster.id);
			} else if kept.iter().any(|c| c.id == cluster.id) {
				warn!("ignoring duplicate cluster {}", cluster.id);
			} else {
				kept.push(cluster);
			}
		}
		Self {
			clusters: kept,
			paths: HashMap::new(),
		}
	}

	pub fn clusters(&self) -> &[Cluster] {
		&self.clusters
	}

	pub fn get(&self, id: &str) -> Option<&Cluster> {
		self.clusters.iter().find(|c| c.id == id)
	}

	/// Path for `id`, built against `store` on first request.
	pub fn path(&mut self, store: &GraphStore, id: &str) -> Option<&[ElementRef]> {
		let cluster = self.clusters.iter().find(|c| c.id == id)?;
		if !self.paths.contains_key(id) {
			for member in cluster.members.iter().filter(|m| store.node(m).is_none()) {
				warn!("cluster {id} references unknown node {member}, leaving it out");
			}
			let path = build_path(store, &cluster.present_members(store));
			self.paths.insert(id.to_string(), path);
		}
		self.paths.get(id).map(Vec::as_slice)
	}

	/// Already computed path, if any.
	pub fn cached_path(&self, id: &str) -> Option<&[ElementRef]> {
		self.paths.get(id).map(Vec::as_slice)
	}

	/// Forgets memoized paths; required after the store is reloaded.
	pub fn invalidate(&mut self) {
		self.paths.clear();
	}
}

/// Clusters shipped with the default configuration.
pub fn default_clusters() -> Vec<Cluster> {
	fn ids(members: &[&str]) -> Vec<String> {
		members.iter().map(|m| m.to_string()).collect()
	}

	vec![
		Cluster {
			id: "political-chain".into(),
			members: ids(&["ja", "vax", "biontech", "bmgf", "mg", "pv"]),
			radius: 250.0,
			title: "Jacinda Ardern Cluster".into(),
			short_description: "How Melinda Gates, Jacinda Ardern, BioNTech, and vaccine revenues \
				form a closed loop."
				.into(),
			description: "This network cluster shows how a small group of people and \
				organizations are connected in promoting and profiting from the Pfizer-BioNTech \
				COVID-19 vaccine. Melinda Gates owns both Pivotal Ventures and the Bill & Melinda \
				Gates Foundation. Pivotal Ventures provides funding to Jacinda Ardern, who in turn \
				promotes the Pfizer-BioNTech vaccine. That vaccine was invented by BioNTech, a \
				company partly owned by the Gates Foundation, and revenue from vaccine sales flows \
				back into BioNTech and ultimately benefits the Foundation: a loop of ownership, \
				invention, promotion and funding."
				.into(),
		},
		Cluster {
			id: "research-chain".into(),
			members: ids(&["sw", "vax", "biontech", "bmgf", "itbc"]),
			radius: 250.0,
			title: "Siouxsie Wiles Cluster".into(),
			short_description: "How an older TB consortium grant to Siouxsie Wiles links back to \
				Gates ownership of BioNTech and vaccine profits."
				.into(),
			description: "This network cluster traces a chain from the Bill & Melinda Gates \
				Foundation to the promotion and profit of the Pfizer-BioNTech COVID-19 vaccine. \
				The Foundation owns part of BioNTech, which invented the vaccine; vaccine revenue \
				flows back to BioNTech and the Foundation. More than a decade ago the Foundation \
				also funded the Imaging TB Consortium, which in turn funded Siouxsie Wiles, who \
				has since promoted the vaccine. The consortium relationship is older and less \
				directly tied to current promotion activities."
				.into(),
		},
		Cluster {
			id: "advisory-chain".into(),
			members: ids(&["hph", "vax", "biontech", "bmgf", "gvdn"]),
			radius: 250.0,
			title: "Helen Petousis-Harris Cluster".into(),
			short_description: "How Gates funding of GVDN and Petousis-Harris's analyses feed into \
				promoting and profiting from BioNTech's vaccine."
				.into(),
			description: "This network cluster shows how the Bill & Melinda Gates Foundation's \
				funding and ownership tie into the promotion and revenue flow of the \
				Pfizer-BioNTech COVID-19 vaccine. The Foundation owns a stake in BioNTech, which \
				invented the vaccine, and it also funds the Global Vaccine Data Network. The GVDN \
				analyses the vaccine and is directed by Helen Petousis-Harris, who publicly \
				promotes it, while vaccine revenues cycle back to the Foundation."
				.into(),
		},
	]
}
