//! Physics on/off pacing on the simulation clock.
//!
//! A delayed disable is a deadline, not a timer callback: a newer request
//! replaces it and an explicit enable or disable cancels it. So a burst of
//! resets cannot switch physics off in the middle of a later settle period.

/// Tracks whether physics runs and when it is due to stop.
#[derive(Clone, Debug, Default)]
pub struct PhysicsPacer {
	enabled: bool,
	disable_at: Option<f64>,
}

impl PhysicsPacer {
	pub fn new(enabled: bool) -> Self {
		Self {
			enabled,
			disable_at: None,
		}
	}

	/// Switches physics immediately and drops any pending disable.
	pub fn set_enabled(&mut self, enabled: bool) {
		self.enabled = enabled;
		self.disable_at = None;
	}

	/// Schedules physics to stop `delay` seconds after `now`.
	pub fn disable_after(&mut self, now: f64, delay: f64) {
		self.disable_at = Some(now + delay);
	}

	/// Applies a due deadline and reports whether physics should run at `now`.
	pub fn poll(&mut self, now: f64) -> bool {
		if self.disable_at.is_some_and(|at| now >= at) {
			self.enabled = false;
			self.disable_at = None;
		}
		self.enabled
	}

	pub fn is_enabled(&self) -> bool {
		self.enabled
	}

	pub fn pending(&self) -> Option<f64> {
		self.disable_at
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn disables_once_deadline_passes() {
		let mut pacer = PhysicsPacer::new(false);
		pacer.set_enabled(true);
		pacer.disable_after(0.0, 1.5);
		assert!(pacer.poll(1.0));
		assert!(!pacer.poll(1.5));
		assert_eq!(pacer.pending(), None);
	}

	#[test]
	fn later_reset_supersedes_earlier_deadline() {
		let mut pacer = PhysicsPacer::new(false);
		// First reset at t=0.
		pacer.set_enabled(true);
		pacer.disable_after(0.0, 1.5);
		// Second reset at t=1.0 must keep physics on until t=2.5.
		pacer.set_enabled(true);
		pacer.disable_after(1.0, 1.5);
		assert!(pacer.poll(1.6));
		assert!(pacer.poll(2.4));
		assert!(!pacer.poll(2.5));
	}

	#[test]
	fn explicit_enable_cancels_pending_disable() {
		let mut pacer = PhysicsPacer::new(true);
		pacer.disable_after(0.0, 1.0);
		// Drag starts before the deadline.
		pacer.set_enabled(true);
		assert!(pacer.poll(5.0));
		assert!(pacer.is_enabled());
	}
}
