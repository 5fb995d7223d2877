//! Messages exchanged with the rendering adapter.

use std::time::Duration;

use super::types::{ElementRef, Emphasis, LayoutAnchor};

/// Interaction reported by the canvas.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewEvent {
	NodeClicked(String),
	EdgeClicked(String),
	BackgroundClicked,
	DragStarted,
	DragEnded,
	/// The initial physics layout has settled.
	LayoutStabilized,
}

/// Instruction for the canvas, applied in emission order.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewCommand {
	/// Turns the physics simulation on or off, cancelling any pending disable.
	SetPhysicsEnabled(bool),
	/// Turns physics off after a delay, superseding any earlier request.
	DisablePhysicsAfter(Duration),
	SetNodePosition {
		id: String,
		x: f64,
		y: f64,
		pinned: bool,
	},
	/// Releases a forced position back to the layout engine.
	ClearNodePosition(String),
	SetNodeStyle {
		id: String,
		emphasis: Emphasis,
	},
	SetEdgeStyle {
		id: String,
		emphasis: Emphasis,
	},
	SetLayoutAnchor(Option<LayoutAnchor>),
	/// Selects exactly this element, or nothing.
	SelectExactly(Option<ElementRef>),
	/// Centers on the given nodes. `scale: None` zooms to fit them all.
	FocusOn {
		nodes: Vec<String>,
		scale: Option<f64>,
		animated: bool,
	},
	FitAll {
		animated: bool,
	},
}
