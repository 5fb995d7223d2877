//! Canvas rendering for the network.
//!
//! Draw order, back to front:
//! 1. Background (screen space)
//! 2. Edges with arrows, then edge labels (world space)
//! 3. Default nodes, then highlighted and selected nodes on top
//!
//! Until the initial layout settles everything is drawn at the theme's
//! loading opacity.

use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::DefaultNodeIdx;
use web_sys::CanvasRenderingContext2d;

use super::geometry;
use super::scale::{ScaleConfig, ScaledValues};
use super::state::{EdgeSlot, ForceGraphState, NodeInfo};
use super::theme::Theme;
use crate::network::Emphasis;

type Positions = HashMap<DefaultNodeIdx, (f64, f64)>;

/// Hermite ease for hover fades.
fn smooth_step(t: f64) -> f64 {
	t * t * (3.0 - 2.0 * t)
}

fn unit(from: (f64, f64), to: (f64, f64)) -> Option<(f64, f64)> {
	let (dx, dy) = (to.0 - from.0, to.1 - from.1);
	let dist = (dx * dx + dy * dy).sqrt();
	(dist > 0.001).then(|| (dx / dist, dy / dist))
}

/// Draws one frame.
pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, config: &ScaleConfig, theme: &Theme) {
	let scale = ScaledValues::new(config, state.transform.k);
	let base_alpha = if state.stabilized { 1.0 } else { theme.loading_alpha };

	ctx.set_global_alpha(1.0);
	ctx.set_fill_style_str(&theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	let positions = state.position_map();
	draw_edges(state, ctx, &scale, theme, &positions, base_alpha);
	draw_nodes(state, ctx, &scale, theme, base_alpha);

	ctx.restore();
	ctx.set_global_alpha(1.0);
}

fn draw_edges(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	positions: &Positions,
	base_alpha: f64,
) {
	for edge in state.edges() {
		let (Some(&from), Some(&to)) = (positions.get(&edge.source), positions.get(&edge.target)) else {
			continue;
		};
		draw_edge(state, ctx, scale, theme, edge, from, to, base_alpha);
	}

	if scale.edge_label_alpha <= 0.01 {
		return;
	}
	ctx.set_font(&scale.edge_label_font);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	for edge in state.edges().iter().filter(|e| !e.label.is_empty()) {
		let (Some(&from), Some(&to)) = (positions.get(&edge.source), positions.get(&edge.target)) else {
			continue;
		};
		let look = theme.edge_look(edge.emphasis);
		let (x, y) = if look.curved {
			let control = geometry::curve_control(from, to, look.curve_tension);
			geometry::quadratic_point(from, control, to, 0.5)
		} else {
			((from.0 + to.0) / 2.0, (from.1 + to.1) / 2.0)
		};
		let alpha = base_alpha * scale.edge_label_alpha * state.hover.edge_alpha(edge, theme.dim_alpha);
		ctx.set_global_alpha(alpha);
		ctx.set_stroke_style_str(&theme.label_halo.to_css());
		ctx.set_line_width(4.0 * scale.stroke);
		let _ = ctx.stroke_text(&edge.label, x, y);
		ctx.set_fill_style_str(&theme.label.to_css());
		let _ = ctx.fill_text(&edge.label, x, y);
	}
	ctx.set_global_alpha(1.0);
}

#[allow(clippy::too_many_arguments)]
fn draw_edge(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	edge: &EdgeSlot,
	from: (f64, f64),
	to: (f64, f64),
	base_alpha: f64,
) {
	let look = theme.edge_look(edge.emphasis);
	let selected = state.is_edge_selected(edge);
	let focus = smooth_step(state.hover.edge_focus(edge));
	let color = if selected {
		look.selected
	} else {
		look.color.lerp(theme.edge_hover, 0.5 * focus)
	};
	let width = look.width * scale.stroke * if selected { 1.5 } else { 1.0 } * (1.0 + 0.4 * focus);

	ctx.set_global_alpha(base_alpha * state.hover.edge_alpha(edge, theme.dim_alpha));
	ctx.set_stroke_style_str(&color.to_css());
	ctx.set_fill_style_str(&color.to_css());
	ctx.set_line_width(width);

	let Some(direction) = unit(from, to) else {
		// Self-loop: a small circle above the node.
		let r = scale.node_radius;
		ctx.begin_path();
		let _ = ctx.arc(from.0, from.1 - r * 1.5, r * 0.9, 0.0, 2.0 * PI);
		ctx.stroke();
		return;
	};

	let control = if look.curved {
		geometry::curve_control(from, to, look.curve_tension)
	} else {
		((from.0 + to.0) / 2.0, (from.1 + to.1) / 2.0)
	};
	let start_dir = unit(from, control).unwrap_or(direction);
	let end_dir = unit(control, to).unwrap_or(direction);

	let r = scale.node_radius;
	let start = (from.0 + start_dir.0 * r, from.1 + start_dir.1 * r);
	let tip = (to.0 - end_dir.0 * r, to.1 - end_dir.1 * r);
	let end = (tip.0 - end_dir.0 * scale.arrow_size, tip.1 - end_dir.1 * scale.arrow_size);

	ctx.begin_path();
	ctx.move_to(start.0, start.1);
	if look.curved {
		let _ = ctx.quadratic_curve_to(control.0, control.1, end.0, end.1);
	} else {
		ctx.line_to(end.0, end.1);
	}
	ctx.stroke();

	let (px, py) = (-end_dir.1 * scale.arrow_size * 0.5, end_dir.0 * scale.arrow_size * 0.5);
	ctx.begin_path();
	ctx.move_to(tip.0, tip.1);
	ctx.line_to(end.0 + px, end.1 + py);
	ctx.line_to(end.0 - px, end.1 - py);
	ctx.close_path();
	ctx.fill();
}

fn draw_nodes(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	base_alpha: f64,
) {
	// Pass 1: plain nodes
	state.graph.visit_nodes(|node| {
		let info = &node.data.user_data;
		if info.emphasis == Emphasis::Default && !state.is_node_selected(info) {
			draw_node(state, ctx, node, scale, theme, base_alpha);
		}
	});

	// Pass 2: highlighted and selected nodes on top
	state.graph.visit_nodes(|node| {
		let info = &node.data.user_data;
		if info.emphasis == Emphasis::Highlighted || state.is_node_selected(info) {
			draw_node(state, ctx, node, scale, theme, base_alpha);
		}
	});

	ctx.set_global_alpha(1.0);
}

fn draw_node(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	node: &force_graph::Node<NodeInfo>,
	scale: &ScaledValues,
	theme: &Theme,
	base_alpha: f64,
) {
	let (x, y) = (node.x() as f64, node.y() as f64);
	let info = &node.data.user_data;
	let selected = state.is_node_selected(info);
	let colors = theme.node_colors(info.emphasis, selected);
	let hovered = if state.hover.node == Some(node.index()) {
		smooth_step(state.hover.intensity())
	} else {
		0.0
	};
	let radius = scale.node_radius * (1.0 + 0.25 * hovered);
	let alpha = base_alpha * state.hover.node_alpha(node.index(), theme.dim_alpha);

	ctx.set_global_alpha(alpha);
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&colors.background.to_css());
	ctx.fill();
	ctx.set_stroke_style_str(&colors.border.to_css());
	ctx.set_line_width(theme.node_border_width * scale.stroke);
	ctx.stroke();

	if selected {
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius + scale.ring_offset, 0.0, 2.0 * PI);
		ctx.set_stroke_style_str(&colors.border.with_alpha(0.8).to_css());
		ctx.set_line_width(scale.ring_width);
		ctx.stroke();
	}

	if scale.label_alpha > 0.01 {
		ctx.set_global_alpha(alpha * scale.label_alpha);
		ctx.set_font(&scale.label_font);
		ctx.set_text_align("center");
		ctx.set_text_baseline("top");
		ctx.set_fill_style_str(&theme.label.to_css());
		let _ = ctx.fill_text(&info.label, x, y + radius + 4.0 * scale.stroke);
	}
}
