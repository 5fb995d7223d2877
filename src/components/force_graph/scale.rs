//! How node, edge and label sizes follow the zoom factor `k`.
//!
//! Cluster rings and the simulation live in world units centred on the
//! origin; the canvas is in pixels. Drawing happens after the view transform
//! is applied, so every value in [`ScaledValues`] is in world units.

/// Rule for converting a base size into world units at a given zoom.
#[derive(Clone, Debug)]
pub enum ScaleBehavior {
	/// Same pixel size at every zoom.
	Screen,
	/// Grows with zoom, kept between two pixel sizes.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// World-space value for `base` at zoom `k`.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// Fades text out when zoomed far out.
#[derive(Clone, Debug)]
pub struct LabelFade {
	/// Zoom at which labels disappear.
	pub zero_alpha_k: f64,
	/// Zoom at which labels are fully opaque.
	pub full_alpha_k: f64,
}

impl LabelFade {
	pub fn apply(&self, k: f64) -> f64 {
		if self.zero_alpha_k >= self.full_alpha_k {
			return 1.0;
		}
		((k - self.zero_alpha_k) / (self.full_alpha_k - self.zero_alpha_k)).clamp(0.0, 1.0)
	}
}

#[derive(Clone, Debug)]
pub struct NodeScaleConfig {
	/// Dot radius in world units.
	pub radius: f64,
	pub radius_behavior: ScaleBehavior,
	/// Pointer radius that still picks the node.
	pub hit_radius: f64,
	pub hit_behavior: ScaleBehavior,
	/// Label font size in world units, never smaller than this on screen
	/// once `k` drops below `label_min_k`.
	pub label_size: f64,
	pub label_min_k: f64,
	pub label_fade: LabelFade,
}

#[derive(Clone, Debug)]
pub struct EdgeScaleConfig {
	/// Pointer distance, in screen pixels, that still counts as a hit.
	pub hit_tolerance: f64,
	pub label_size: f64,
	pub label_fade: LabelFade,
}

#[derive(Clone, Debug)]
pub struct ArrowScaleConfig {
	/// Arrowhead length.
	pub size: f64,
	pub size_behavior: ScaleBehavior,
}

/// Ring drawn around the selected node.
#[derive(Clone, Debug)]
pub struct RingScaleConfig {
	/// Stroke width in screen pixels.
	pub width: f64,
	/// Gap between the node and the ring in screen pixels.
	pub offset: f64,
}

/// Sizing rules for everything drawn on the canvas.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	pub node: NodeScaleConfig,
	pub edge: EdgeScaleConfig,
	pub arrow: ArrowScaleConfig,
	pub ring: RingScaleConfig,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node: NodeScaleConfig {
				radius: 10.0,
				radius_behavior: ScaleBehavior::Clamped {
					min_screen: 4.0,
					max_screen: f64::INFINITY,
				},
				hit_radius: 14.0,
				hit_behavior: ScaleBehavior::Clamped {
					min_screen: 8.0,
					max_screen: f64::INFINITY,
				},
				label_size: 12.0,
				label_min_k: 0.5,
				label_fade: LabelFade {
					zero_alpha_k: 0.2,
					full_alpha_k: 0.45,
				},
			},
			edge: EdgeScaleConfig {
				hit_tolerance: 6.0,
				label_size: 11.0,
				label_fade: LabelFade {
					zero_alpha_k: 0.35,
					full_alpha_k: 0.7,
				},
			},
			arrow: ArrowScaleConfig {
				size: 8.0,
				size_behavior: ScaleBehavior::Clamped {
					min_screen: 3.0,
					max_screen: 18.0,
				},
			},
			ring: RingScaleConfig {
				width: 2.0,
				offset: 3.0,
			},
		}
	}
}

/// Sizes resolved for one zoom level, built once per frame.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	pub k: f64,
	pub node_radius: f64,
	pub hit_radius: f64,
	pub label_font: String,
	pub label_alpha: f64,
	/// Multiplier turning screen-pixel stroke widths into world units.
	pub stroke: f64,
	pub edge_hit_tolerance: f64,
	pub edge_label_font: String,
	pub edge_label_alpha: f64,
	pub arrow_size: f64,
	pub ring_width: f64,
	pub ring_offset: f64,
}

impl ScaledValues {
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let node_label = config.node.label_size * (config.node.label_min_k / k).max(1.0);
		let edge_label = config.edge.label_size * (config.node.label_min_k / k).max(1.0);
		Self {
			k,
			node_radius: config.node.radius_behavior.apply(config.node.radius, k),
			hit_radius: config.node.hit_behavior.apply(config.node.hit_radius, k),
			label_font: format!("{node_label}px arial, sans-serif"),
			label_alpha: config.node.label_fade.apply(k),
			stroke: 1.0 / k,
			edge_hit_tolerance: config.edge.hit_tolerance / k,
			edge_label_font: format!("{edge_label}px arial, sans-serif"),
			edge_label_alpha: config.edge.label_fade.apply(k),
			arrow_size: config.arrow.size_behavior.apply(config.arrow.size, k),
			ring_width: config.ring.width / k,
			ring_offset: config.ring.offset / k,
		}
	}
}
