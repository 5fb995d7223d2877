//! Fetching the two input tables over HTTP.

use futures::future::join;
use gloo_net::http::Request;
use log::info;

use crate::config::ExplorerConfig;
use crate::error::{LoadError, Result};
use crate::network::{GraphStore, load_store};

/// Appends a cache-busting query parameter so every load sees fresh tables.
pub fn cache_busted(url: &str, stamp: u64) -> String {
	let separator = if url.contains('?') { '&' } else { '?' };
	format!("{url}{separator}_={stamp}")
}

async fn fetch_text(url: &str) -> Result<String> {
	let response = Request::get(url).send().await?;
	if !response.ok() {
		return Err(LoadError::Status {
			url: url.to_string(),
			status: response.status(),
		});
	}
	Ok(response.text().await?)
}

/// Downloads and parses both tables.
pub async fn fetch_store(config: &ExplorerConfig) -> Result<GraphStore> {
	let stamp = js_sys::Date::now() as u64;
	let nodes_url = cache_busted(&config.nodes_url, stamp);
	let edges_url = cache_busted(&config.edges_url, stamp);
	let (nodes, edges) = join(fetch_text(&nodes_url), fetch_text(&edges_url)).await;
	let store = load_store(&nodes?, &edges?)?;
	info!(
		"incentive-graph: loaded {} nodes, {} edges",
		store.nodes().len(),
		store.edges().len()
	);
	Ok(store)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn cache_buster_respects_existing_query() {
		assert_eq!(cache_busted("Nodes.csv", 42), "Nodes.csv?_=42");
		assert_eq!(cache_busted("data?v=1", 7), "data?v=1&_=7");
	}
}
