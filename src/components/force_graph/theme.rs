//! Visual theming for the network canvas.
//!
//! Maps each [`Emphasis`] state to concrete colors and stroke settings, so the
//! explorer only ever deals in "default" and "highlighted".

use crate::network::Emphasis;

/// An sRGB color with alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Blends toward `other`; `t` is clamped to 0..=1.
	pub fn lerp(self, other: Color, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * (1.0 - t) + other.r as f64 * t) as u8,
			g: (self.g as f64 * (1.0 - t) + other.g as f64 * t) as u8,
			b: (self.b as f64 * (1.0 - t) + other.b as f64 * t) as u8,
			a: self.a * (1.0 - t) + other.a * t,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Fill and stroke of a node dot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeColors {
	pub background: Color,
	pub border: Color,
}

/// Stroke settings for one edge state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeLook {
	pub color: Color,
	/// Color while the edge is selected.
	pub selected: Color,
	/// Line width in screen pixels.
	pub width: f64,
	/// Curved edges bow counter-clockwise around the ring.
	pub curved: bool,
	/// Bend of curved edges, 0 draws a straight line.
	pub curve_tension: f64,
}

/// Colors and stroke widths for the canvas.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub background: Color,
	pub label: Color,
	/// Halo drawn behind edge labels.
	pub label_halo: Color,
	pub node: NodeColors,
	pub node_highlighted: NodeColors,
	/// Applied on top of either state while a node is selected.
	pub node_selected: NodeColors,
	pub node_border_width: f64,
	pub edge: EdgeLook,
	pub edge_highlighted: EdgeLook,
	/// Color hovered edges fade towards.
	pub edge_hover: Color,
	/// Opacity of elements outside the hovered neighbourhood.
	pub dim_alpha: f64,
	/// Canvas opacity until the first layout settles.
	pub loading_alpha: f64,
}

impl Theme {
	/// Light theme with blue nodes and amber cluster highlights (default)
	pub fn light() -> Self {
		Self {
			name: "light",
			background: Color::rgb(255, 255, 255),
			label: Color::rgb(0x33, 0x33, 0x33),
			label_halo: Color::rgb(255, 255, 255),
			node: NodeColors {
				background: Color::rgb(0x97, 0xc2, 0xfc),
				border: Color::rgb(0x2b, 0x7c, 0xe9),
			},
			node_highlighted: NodeColors {
				background: Color::rgb(0xff, 0xeb, 0x3b),
				border: Color::rgb(0xfb, 0xc0, 0x2d),
			},
			node_selected: NodeColors {
				background: Color::rgb(0xd2, 0xe5, 0xff),
				border: Color::rgb(0x2b, 0x7c, 0xe9),
			},
			node_border_width: 2.0,
			edge: EdgeLook {
				color: Color::rgb(0x2b, 0x7c, 0xe9),
				selected: Color::rgb(0, 0, 0),
				width: 1.5,
				curved: true,
				curve_tension: 0.2,
			},
			edge_highlighted: EdgeLook {
				color: Color::rgb(0xfb, 0xc0, 0x2d),
				selected: Color::rgb(0xf5, 0x7f, 0x17),
				width: 2.0,
				curved: true,
				curve_tension: 0.6,
			},
			edge_hover: Color::rgb(0x84, 0x84, 0x84),
			dim_alpha: 0.35,
			loading_alpha: 0.3,
		}
	}

	/// Node colors for an emphasis state, with the selection overlay applied.
	pub fn node_colors(&self, emphasis: Emphasis, selected: bool) -> NodeColors {
		match (emphasis, selected) {
			(_, true) => NodeColors {
				background: self.node_selected.background,
				border: match emphasis {
					Emphasis::Default => self.node_selected.border,
					Emphasis::Highlighted => self.node_highlighted.border,
				},
			},
			(Emphasis::Default, false) => self.node,
			(Emphasis::Highlighted, false) => self.node_highlighted,
		}
	}

	pub fn edge_look(&self, emphasis: Emphasis) -> &EdgeLook {
		match emphasis {
			Emphasis::Default => &self.edge,
			Emphasis::Highlighted => &self.edge_highlighted,
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::light()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn emphasis_maps_to_distinct_colors() {
		let theme = Theme::default();
		assert_ne!(
			theme.node_colors(Emphasis::Default, false),
			theme.node_colors(Emphasis::Highlighted, false)
		);
		assert_eq!(theme.node_colors(Emphasis::Default, false).background.to_css(), "#97c2fc");
		assert!(theme.edge_look(Emphasis::Highlighted).width > theme.edge_look(Emphasis::Default).width);
	}

	#[test]
	fn css_output() {
		assert_eq!(Color::rgb(255, 0, 16).to_css(), "#ff0010");
		assert_eq!(Color::rgb(0, 0, 0).with_alpha(0.5).to_css(), "rgba(0, 0, 0, 0.5)");
	}
}
