//! Edge geometry shared by the renderer and hit testing.

/// Segments used to approximate a curved edge when hit testing.
const CURVE_SAMPLES: usize = 12;

/// Distance from `(px, py)` to the segment `a`–`b`.
pub fn point_segment_distance(px: f64, py: f64, a: (f64, f64), b: (f64, f64)) -> f64 {
	let (dx, dy) = (b.0 - a.0, b.1 - a.1);
	let len_sq = dx * dx + dy * dy;
	let t = if len_sq < f64::EPSILON {
		0.0
	} else {
		(((px - a.0) * dx + (py - a.1) * dy) / len_sq).clamp(0.0, 1.0)
	};
	let (cx, cy) = (a.0 + t * dx, a.1 + t * dy);
	((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
}

/// Control point of the quadratic curve between two node centres.
///
/// The curve bows to the left of the direction of travel, so two edges in
/// opposite directions between the same pair never overlap.
pub fn curve_control(from: (f64, f64), to: (f64, f64), tension: f64) -> (f64, f64) {
	let (dx, dy) = (to.0 - from.0, to.1 - from.1);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return from;
	}
	let (ux, uy) = (dx / dist, dy / dist);
	let offset = dist * tension * 0.3;
	(
		(from.0 + to.0) / 2.0 + uy * offset,
		(from.1 + to.1) / 2.0 - ux * offset,
	)
}

/// Point at `t` on the quadratic Bézier `from`–`control`–`to`.
pub fn quadratic_point(from: (f64, f64), control: (f64, f64), to: (f64, f64), t: f64) -> (f64, f64) {
	let u = 1.0 - t;
	(
		u * u * from.0 + 2.0 * u * t * control.0 + t * t * to.0,
		u * u * from.1 + 2.0 * u * t * control.1 + t * t * to.1,
	)
}

/// Distance from `(px, py)` to an edge drawn with the given curve tension.
pub fn edge_distance(px: f64, py: f64, from: (f64, f64), to: (f64, f64), tension: f64) -> f64 {
	if tension <= 0.0 {
		return point_segment_distance(px, py, from, to);
	}
	let control = curve_control(from, to, tension);
	let mut prev = from;
	let mut best = f64::INFINITY;
	for i in 1..=CURVE_SAMPLES {
		let next = quadratic_point(from, control, to, i as f64 / CURVE_SAMPLES as f64);
		best = best.min(point_segment_distance(px, py, prev, next));
		prev = next;
	}
	best
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn segment_distance_clamps_to_endpoints() {
		let (a, b) = ((0.0, 0.0), (10.0, 0.0));
		assert_eq!(point_segment_distance(5.0, 3.0, a, b), 3.0);
		assert_eq!(point_segment_distance(-4.0, 3.0, a, b), 5.0);
		assert_eq!(point_segment_distance(13.0, 4.0, a, b), 5.0);
		// Degenerate segment.
		assert_eq!(point_segment_distance(3.0, 4.0, a, a), 5.0);
	}

	#[test]
	fn opposite_edges_bow_to_opposite_sides() {
		let (a, b) = ((0.0, 0.0), (100.0, 0.0));
		let forward = curve_control(a, b, 0.5);
		let backward = curve_control(b, a, 0.5);
		assert!(forward.1 * backward.1 < 0.0);
	}

	#[test]
	fn curved_hit_follows_the_bow() {
		let (a, b) = ((0.0, 0.0), (100.0, 0.0));
		let control = curve_control(a, b, 0.5);
		let apex = quadratic_point(a, control, b, 0.5);
		assert!(edge_distance(apex.0, apex.1, a, b, 0.5) < 1.0);
		assert!(edge_distance(50.0, 0.0, a, b, 0.5) > 5.0);
	}
}
