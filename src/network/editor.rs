//! Evidence curation and table export.
//!
//! Edits apply to the in-memory store; exporting writes the two tables back in
//! the format the loader reads, so an export re-loads to an equal store.

use log::info;
use serde::Serialize;

use super::store::GraphStore;
use super::types::{ElementRef, Evidence};
use crate::error::{EditError, Table};

type Result<T> = std::result::Result<T, EditError>;

#[derive(Serialize)]
struct NodeRow<'a> {
	#[serde(rename = "ID")]
	id: &'a str,
	#[serde(rename = "Label")]
	label: &'a str,
	#[serde(rename = "Details")]
	details: &'a str,
	#[serde(rename = "ImageUrl")]
	image_url: &'a str,
	#[serde(rename = "EvidenceData")]
	evidence: String,
}

#[derive(Serialize)]
struct EdgeRow<'a> {
	#[serde(rename = "ID")]
	id: &'a str,
	#[serde(rename = "From")]
	from: &'a str,
	#[serde(rename = "To")]
	to: &'a str,
	#[serde(rename = "Label")]
	label: &'a str,
	#[serde(rename = "Details")]
	details: &'a str,
	#[serde(rename = "EvidenceData")]
	evidence: String,
}

impl GraphStore {
	fn evidence_mut(&mut self, target: &ElementRef) -> Result<&mut Vec<Evidence>> {
		let list = match target {
			ElementRef::Node(id) => self.node_mut(id).map(|n| &mut n.evidence),
			ElementRef::Edge(id) => self.edge_mut(id).map(|e| &mut e.evidence),
		};
		list.ok_or_else(|| EditError::UnknownElement(target.clone()))
	}

	/// Appends an evidence item to a node or edge.
	pub fn add_evidence(&mut self, target: &ElementRef, evidence: Evidence) -> Result<()> {
		self.evidence_mut(target)?.push(evidence.normalized());
		info!("added evidence to {target}");
		Ok(())
	}

	/// Removes and returns the evidence item at `index`.
	pub fn remove_evidence(&mut self, target: &ElementRef, index: usize) -> Result<Evidence> {
		let list = self.evidence_mut(target)?;
		if index >= list.len() {
			return Err(EditError::EvidenceIndex {
				target: target.clone(),
				index,
			});
		}
		info!("removed evidence {index} from {target}");
		Ok(list.remove(index))
	}

	/// Replaces the label and details of a node or edge. A blank node label
	/// falls back to the node's id, as it does when the table is loaded.
	pub fn update_text(&mut self, target: &ElementRef, label: &str, details: &str) -> Result<()> {
		let label = label.trim();
		let details = details.trim().to_string();
		match target {
			ElementRef::Node(id) => {
				let node = self
					.node_mut(id)
					.ok_or_else(|| EditError::UnknownElement(target.clone()))?;
				node.label = if label.is_empty() { node.id.clone() } else { label.to_string() };
				node.details = details;
			}
			ElementRef::Edge(id) => {
				let edge = self
					.edge_mut(id)
					.ok_or_else(|| EditError::UnknownElement(target.clone()))?;
				edge.label = label.to_string();
				edge.details = details;
			}
		}
		Ok(())
	}
}

fn encode_evidence(evidence: &[Evidence]) -> Result<String> {
	Ok(serde_json::to_string(evidence)?)
}

fn finish(writer: csv::Writer<Vec<u8>>, table: Table) -> Result<String> {
	let bytes = writer.into_inner().map_err(|e| EditError::Csv {
		table,
		source: e.into_error().into(),
	})?;
	String::from_utf8(bytes).map_err(|_| EditError::Encoding(table))
}

/// Writes the node table.
pub fn export_nodes_csv(store: &GraphStore) -> Result<String> {
	let mut writer = csv::Writer::from_writer(Vec::new());
	for node in store.nodes() {
		writer
			.serialize(NodeRow {
				id: &node.id,
				label: &node.label,
				details: &node.details,
				image_url: node.image_url.as_deref().unwrap_or_default(),
				evidence: encode_evidence(&node.evidence)?,
			})
			.map_err(|source| EditError::Csv {
				table: Table::Nodes,
				source,
			})?;
	}
	finish(writer, Table::Nodes)
}

/// Writes the edge table.
pub fn export_edges_csv(store: &GraphStore) -> Result<String> {
	let mut writer = csv::Writer::from_writer(Vec::new());
	for edge in store.edges() {
		writer
			.serialize(EdgeRow {
				id: &edge.id,
				from: &edge.from,
				to: &edge.to,
				label: &edge.label,
				details: &edge.details,
				evidence: encode_evidence(&edge.evidence)?,
			})
			.map_err(|source| EditError::Csv {
				table: Table::Edges,
				source,
			})?;
	}
	finish(writer, Table::Edges)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::network::loader::load_store;

	const NODES: &str = "ID,Label,Details,ImageUrl,EvidenceData\n\
		a,\"Alpha, Inc.\",\"multi\nline\",,\n\
		b,Beta,,img/b.png,\"[{\"\"evidenceUrl\"\":\"\"https://x/1.png\"\"}]\"\n";
	const EDGES: &str = "ID,From,To,Label,Details,EvidenceData\ne1,a,b,owns,,\n";

	#[test]
	fn export_reloads_to_an_equal_store() {
		let mut store = load_store(NODES, EDGES).unwrap();
		store
			.add_evidence(
				&ElementRef::Edge("e1".into()),
				Evidence {
					local_path: Some("public\\images\\e1.png".into()),
					source_url: Some("https://source".into()),
					..Default::default()
				},
			)
			.unwrap();

		let nodes = export_nodes_csv(&store).unwrap();
		let edges = export_edges_csv(&store).unwrap();
		assert!(nodes.starts_with("ID,Label,Details,ImageUrl,EvidenceData\n"));
		assert_eq!(load_store(&nodes, &edges).unwrap(), store);
	}

	#[test]
	fn add_and_remove_evidence() {
		let mut store = load_store(NODES, EDGES).unwrap();
		let b = ElementRef::Node("b".into());
		store
			.add_evidence(&b, Evidence { evidence_url: Some("https://x/2.png".into()), ..Default::default() })
			.unwrap();
		assert_eq!(store.node("b").unwrap().evidence.len(), 2);

		let removed = store.remove_evidence(&b, 0).unwrap();
		assert_eq!(removed.evidence_url.as_deref(), Some("https://x/1.png"));
		assert!(matches!(
			store.remove_evidence(&b, 5),
			Err(EditError::EvidenceIndex { index: 5, .. })
		));
		assert!(matches!(
			store.add_evidence(&ElementRef::Node("zz".into()), Evidence::default()),
			Err(EditError::UnknownElement(_))
		));
	}

	#[test]
	fn update_text_trims_input() {
		let mut store = load_store(NODES, EDGES).unwrap();
		store
			.update_text(&ElementRef::Edge("e1".into()), " controls ", " since 2020 ")
			.unwrap();
		let edge = store.edge("e1").unwrap();
		assert_eq!(edge.label, "controls");
		assert_eq!(edge.details, "since 2020");
	}

	#[test]
	fn blank_node_label_falls_back_to_id() {
		let mut store = load_store(NODES, EDGES).unwrap();
		store.update_text(&ElementRef::Node("a".into()), "  ", "").unwrap();
		assert_eq!(store.node("a").unwrap().label, "a");

		let nodes = export_nodes_csv(&store).unwrap();
		let edges = export_edges_csv(&store).unwrap();
		assert_eq!(load_store(&nodes, &edges).unwrap(), store);
	}
}
