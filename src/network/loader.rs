//! CSV table parsing and record normalization.
//!
//! Two tables feed the store:
//!
//! - nodes: `ID, Label, Details, ImageUrl, EvidenceData`
//! - edges: `ID, From, To, Label, Details, EvidenceData`
//!
//! `EvidenceData` holds a JSON array of evidence objects. A malformed payload
//! only costs that record its evidence; a malformed table fails the load.

use std::collections::HashSet;

use log::{debug, warn};
use serde::Deserialize;

use super::store::GraphStore;
use super::types::{Edge, Emphasis, Evidence, Node};
use crate::error::{LoadError, Result, Table};

#[derive(Debug, Deserialize)]
struct NodeRecord {
	#[serde(rename = "ID", default)]
	id: String,
	#[serde(rename = "Label", default)]
	label: String,
	#[serde(rename = "Details", default)]
	details: String,
	#[serde(rename = "ImageUrl", default)]
	image_url: String,
	#[serde(rename = "EvidenceData", default)]
	evidence: String,
}

#[derive(Debug, Deserialize)]
struct EdgeRecord {
	#[serde(rename = "ID", default)]
	id: String,
	#[serde(rename = "From", default)]
	from: String,
	#[serde(rename = "To", default)]
	to: String,
	#[serde(rename = "Label", default)]
	label: String,
	#[serde(rename = "Details", default)]
	details: String,
	#[serde(rename = "EvidenceData", default)]
	evidence: String,
}

/// Parses both tables into a fresh store.
pub fn load_store(nodes_csv: &str, edges_csv: &str) -> Result<GraphStore> {
	let (nodes, edges) = load_tables(nodes_csv, edges_csv)?;
	Ok(GraphStore::from_parts(nodes, edges))
}

/// Parses both tables and replaces the store contents. On error the store is
/// left untouched.
pub fn reload(store: &mut GraphStore, nodes_csv: &str, edges_csv: &str) -> Result<()> {
	let (nodes, edges) = load_tables(nodes_csv, edges_csv)?;
	store.replace(nodes, edges);
	Ok(())
}

/// Parses and validates both tables.
pub fn load_tables(nodes_csv: &str, edges_csv: &str) -> Result<(Vec<Node>, Vec<Edge>)> {
	let nodes = parse_nodes(nodes_csv)?;
	let known: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
	let edges = parse_edges(edges_csv)?
		.into_iter()
		.filter(|edge| {
			let ok = known.contains(edge.from.as_str()) && known.contains(edge.to.as_str());
			if !ok {
				warn!(
					"dropping edge {}: endpoint {} -> {} is not a known node",
					edge.id, edge.from, edge.to
				);
			}
			ok
		})
		.collect();
	Ok((nodes, edges))
}

fn reader(text: &str) -> csv::Reader<&[u8]> {
	csv::ReaderBuilder::new()
		.has_headers(true)
		.flexible(true)
		.from_reader(text.trim_start_matches('\u{feff}').as_bytes())
}

fn parse_nodes(text: &str) -> Result<Vec<Node>> {
	let mut seen = HashSet::new();
	let mut nodes = Vec::new();
	for row in reader(text).deserialize::<NodeRecord>() {
		let record = row.map_err(|source| LoadError::Csv {
			table: Table::Nodes,
			source,
		})?;
		let id = record.id.trim().to_string();
		if id.is_empty() {
			warn!("skipping node row without an ID");
			continue;
		}
		if !seen.insert(id.clone()) {
			return Err(LoadError::DuplicateId {
				table: Table::Nodes,
				id,
			});
		}
		let evidence = decode_evidence(&id, &record.evidence);
		let label = match record.label.trim() {
			"" => id.clone(),
			label => label.to_string(),
		};
		let image_url = Some(record.image_url.trim().to_string()).filter(|u| !u.is_empty());
		nodes.push(Node {
			label,
			details: record.details.trim().to_string(),
			image_url,
			evidence,
			position: None,
			pinned: false,
			emphasis: Emphasis::Default,
			id,
		});
	}
	debug!("parsed {} nodes", nodes.len());
	Ok(nodes)
}

fn parse_edges(text: &str) -> Result<Vec<Edge>> {
	let mut seen = HashSet::new();
	let mut edges = Vec::new();
	for row in reader(text).deserialize::<EdgeRecord>() {
		let record = row.map_err(|source| LoadError::Csv {
			table: Table::Edges,
			source,
		})?;
		let id = record.id.trim().to_string();
		if id.is_empty() {
			warn!("skipping edge row without an ID");
			continue;
		}
		if !seen.insert(id.clone()) {
			return Err(LoadError::DuplicateId {
				table: Table::Edges,
				id,
			});
		}
		let evidence = decode_evidence(&id, &record.evidence);
		edges.push(Edge {
			from: record.from.trim().to_string(),
			to: record.to.trim().to_string(),
			label: record.label.trim().to_string(),
			details: record.details.trim().to_string(),
			evidence,
			emphasis: Emphasis::Default,
			id,
		});
	}
	debug!("parsed {} edges", edges.len());
	Ok(edges)
}

/// Decodes an `EvidenceData` cell. Absent or malformed payloads yield an empty
/// list.
pub fn decode_evidence(owner: &str, payload: &str) -> Vec<Evidence> {
	if payload.trim().is_empty() {
		return Vec::new();
	}
	match serde_json::from_str::<Vec<Evidence>>(payload) {
		Ok(items) => items.into_iter().map(Evidence::normalized).collect(),
		Err(e) => {
			warn!("could not parse EvidenceData for {owner}: {e}");
			Vec::new()
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const NODES: &str = "ID,Label,Details,ImageUrl,EvidenceData\n\
		a,Alpha,  first node  ,img/a.png,\"[{\"\"localPath\"\":\"\"images\\\\a.png\"\",\"\"sourceUrl\"\":\"\"https://src\"\"}]\"\n\
		b,,second,,not json\n\
		\n\
		c,Gamma,third,,\n";

	const EDGES: &str = "ID,From,To,Label,Details,EvidenceData\n\
		e1,a,b,funds,,\n\
		e2,b,c,owns,,\"{\"\"localPath\"\":\"\"x\"\"}\"\n\
		e3,a,zz,dangling,,\n";

	#[test]
	fn normalizes_nodes() {
		let (nodes, _) = load_tables(NODES, EDGES).unwrap();
		assert_eq!(nodes.len(), 3);

		let a = &nodes[0];
		assert_eq!(a.label, "Alpha");
		assert_eq!(a.details, "first node");
		assert_eq!(a.image_url.as_deref(), Some("img/a.png"));
		assert_eq!(a.evidence.len(), 1);
		assert_eq!(a.evidence[0].local_path.as_deref(), Some("images/a.png"));
		assert_eq!(a.evidence[0].source_url.as_deref(), Some("https://src"));

		let b = &nodes[1];
		assert_eq!(b.label, "b");
		assert!(b.evidence.is_empty());
		assert_eq!(b.image_url, None);
	}

	#[test]
	fn evidence_is_always_a_list() {
		let (nodes, edges) = load_tables(NODES, EDGES).unwrap();
		assert!(nodes[2].evidence.is_empty());
		// An object instead of an array is malformed.
		let e2 = edges.iter().find(|e| e.id == "e2").unwrap();
		assert!(e2.evidence.is_empty());
	}

	#[test]
	fn drops_edges_with_unknown_endpoints() {
		let (_, edges) = load_tables(NODES, EDGES).unwrap();
		let ids: Vec<_> = edges.iter().map(|e| e.id.as_str()).collect();
		assert_eq!(ids, ["e1", "e2"]);
	}

	#[test]
	fn missing_optional_columns_default_to_empty() {
		let (nodes, edges) = load_tables("ID\nx\ny\n", "ID,From,To\nk,x,y\n").unwrap();
		assert_eq!(nodes[0].label, "x");
		assert!(nodes[0].evidence.is_empty());
		assert_eq!(edges[0].label, "");
	}

	#[test]
	fn duplicate_ids_fail_the_load() {
		let err = load_tables("ID,Label\na,A\na,B\n", "ID,From,To\n").unwrap_err();
		assert!(matches!(
			err,
			LoadError::DuplicateId { table: Table::Nodes, ref id } if id == "a"
		));
	}

	#[test]
	fn loading_twice_is_idempotent() {
		let first = load_store(NODES, EDGES).unwrap();
		let mut second = load_store(NODES, EDGES).unwrap();
		assert_eq!(first, second);

		reload(&mut second, NODES, EDGES).unwrap();
		assert_eq!(first, second);
	}

	#[test]
	fn failed_reload_keeps_previous_contents() {
		let mut store = load_store(NODES, EDGES).unwrap();
		let before = store.clone();
		assert!(reload(&mut store, "ID\nq\nq\n", EDGES).is_err());
		assert_eq!(store, before);
	}

	#[test]
	fn decode_evidence_rejects_wrong_shapes() {
		assert!(decode_evidence("x", "[\"just a string\"]").is_empty());
		assert!(decode_evidence("x", "[{\"localPath\": 3}]").is_empty());
		assert_eq!(decode_evidence("x", "[{}, {\"evidenceUrl\": \"u\"}]").len(), 2);
	}
}
