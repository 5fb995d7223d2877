//! incentive-graph: interactive explorer for an evidence-backed network of
//! organisations, people and the relationships between them.
//!
//! The [`network`] module holds the data model and all exploration logic in
//! plain Rust. [`components`] renders it with Leptos: a force-directed canvas
//! and a detail panel with guided cluster tours.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::either::EitherOf3;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::*;
use log::{Level, error, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;
pub mod config;
pub mod error;
pub mod fetch;
pub mod network;

pub use components::{DetailPanel, ForceGraphCanvas};

use config::ExplorerConfig;
use network::{GraphStore, PanelAction, Session};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("incentive-graph: logging initialized");
}

/// Load the explorer configuration from a script element with
/// id="explorer-config". Without one, the built-in defaults apply.
fn load_config() -> ExplorerConfig {
	let Some(json_text) = config_text() else {
		return ExplorerConfig::default();
	};
	match ExplorerConfig::from_json(&json_text) {
		Ok(config) => {
			info!(
				"incentive-graph: loaded config with {} clusters",
				config.clusters.len()
			);
			config
		}
		Err(e) => {
			warn!("incentive-graph: failed to parse explorer config: {}", e);
			ExplorerConfig::default()
		}
	}
}

fn config_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("explorer-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Every visit starts from the published tables, never from cached state.
fn clear_local_storage() {
	let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
	if let Some(storage) = storage {
		if storage.clear().is_err() {
			warn!("incentive-graph: could not clear localStorage");
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
enum LoadState {
	Loading,
	Ready(GraphStore),
	Failed(String),
}

/// Canvas and detail panel for a loaded store.
#[component]
fn NetworkExplorer(store: GraphStore, config: ExplorerConfig) -> impl IntoView {
	let session = Session::new(store, &config);
	let panel = RwSignal::new(session.panel());
	let actions = RwSignal::new(None::<PanelAction>);
	let session = Rc::new(RefCell::new(session));

	view! {
		<div class="explorer">
			<div class="graph-area">
				<ForceGraphCanvas
					session=session
					panel=panel
					actions=actions
					physics=config.physics.clone()
				/>
			</div>
			<DetailPanel panel=panel actions=actions />
		</div>
	}
}

/// Main application component.
/// Fetches both tables, then renders the explorer or a single error message.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();
	clear_local_storage();

	let config = load_config();
	let state = RwSignal::new(LoadState::Loading);

	let fetch_config = config.clone();
	spawn_local(async move {
		match fetch::fetch_store(&fetch_config).await {
			Ok(store) => state.set(LoadState::Ready(store)),
			Err(e) => {
				error!("incentive-graph: failed to load data: {}", e);
				state.set(LoadState::Failed(e.to_string()));
			}
		}
	});

	let title = config.title.clone();
	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text=title />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		{move || match state.get() {
			LoadState::Loading => EitherOf3::A(view! { <p class="loading">"Loading network…"</p> }),
			LoadState::Failed(message) => {
				EitherOf3::B(
					view! { <p class="load-error">{format!("Error loading data: {message}")}</p> },
				)
			}
			LoadState::Ready(store) => {
				EitherOf3::C(view! { <NetworkExplorer store=store config=config.clone() /> })
			}
		}}
	}
}
