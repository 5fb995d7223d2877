//! Error types for loading and editing the graph tables.

use thiserror::Error;

use crate::network::ElementRef;

/// Result alias for table loading.
pub type Result<T> = std::result::Result<T, LoadError>;

/// Which of the two input tables an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Table {
	Nodes,
	Edges,
}

impl std::fmt::Display for Table {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(match self {
			Table::Nodes => "nodes",
			Table::Edges => "edges",
		})
	}
}

/// Failure to obtain or parse the input tables. Always fatal to startup.
#[derive(Debug, Error)]
pub enum LoadError {
	#[error("request failed: {0}")]
	Fetch(#[from] gloo_net::Error),

	#[error("{url} returned HTTP {status}")]
	Status { url: String, status: u16 },

	#[error("malformed {table} table: {source}")]
	Csv {
		table: Table,
		#[source]
		source: csv::Error,
	},

	#[error("duplicate ID '{id}' in {table} table")]
	DuplicateId { table: Table, id: String },
}

/// Failure of an editing or export operation on the store.
#[derive(Debug, Error)]
pub enum EditError {
	#[error("{0} does not exist")]
	UnknownElement(ElementRef),

	#[error("{target} has no evidence item at index {index}")]
	EvidenceIndex { target: ElementRef, index: usize },

	#[error("failed to write {table} table: {source}")]
	Csv {
		table: Table,
		#[source]
		source: csv::Error,
	},

	#[error("failed to encode evidence: {0}")]
	Evidence(#[from] serde_json::Error),

	#[error("exported {0} table is not valid UTF-8")]
	Encoding(Table),
}
