//! A loaded graph together with the explorer driving it.

use super::commands::{ViewCommand, ViewEvent};
use super::explorer::{Explorer, PanelAction};
use super::panel::PanelView;
use super::store::GraphStore;
use crate::config::ExplorerConfig;

/// Single owner of the store and the explorer for one page session.
#[derive(Clone, Debug)]
pub struct Session {
	store: GraphStore,
	explorer: Explorer,
}

impl Session {
	pub fn new(store: GraphStore, config: &ExplorerConfig) -> Self {
		Self {
			store,
			explorer: Explorer::new(config),
		}
	}

	pub fn store(&self) -> &GraphStore {
		&self.store
	}

	pub fn explorer(&self) -> &Explorer {
		&self.explorer
	}

	pub fn handle_event(&mut self, event: ViewEvent) -> Vec<ViewCommand> {
		self.explorer.handle_event(&mut self.store, event)
	}

	pub fn dispatch(&mut self, action: PanelAction) -> Vec<ViewCommand> {
		self.explorer.dispatch(&mut self.store, action)
	}

	pub fn panel(&self) -> PanelView {
		self.explorer.panel(&self.store)
	}
}
