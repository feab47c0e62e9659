//! Rolling frame-rate estimate over a fixed window of frame deltas.

use std::collections::VecDeque;

/// Window length used when none is configured
pub const DEFAULT_WINDOW: usize = 10;

#[derive(Debug, Clone)]
pub struct FpsEstimator {
    frame_times: VecDeque<f64>,
    capacity: usize,
    visible: bool,
}

impl Default for FpsEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl FpsEstimator {
    /// Create an estimator averaging `capacity` deltas (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            frame_times: VecDeque::with_capacity(capacity),
            capacity,
            visible: true,
        }
    }

    /// Record one frame delta in seconds. Missing, zero, negative or
    /// non-finite deltas are ignored.
    pub fn record(&mut self, delta_s: Option<f64>) {
        let Some(delta) = delta_s else {
            return;
        };
        if !(delta.is_finite() && delta > 0.0) {
            return;
        }

        self.frame_times.push_back(delta);
        while self.frame_times.len() > self.capacity {
            self.frame_times.pop_front();
        }
    }

    /// Resize the window, keeping the most recent deltas that still fit.
    pub fn set_capacity(&mut self, capacity: usize) {
        let capacity = capacity.max(1);
        if capacity == self.capacity {
            return;
        }
        let skip = self.frame_times.len().saturating_sub(capacity);
        let mut rebuilt = VecDeque::with_capacity(capacity);
        rebuilt.extend(self.frame_times.iter().skip(skip).copied());
        self.frame_times = rebuilt;
        self.capacity = capacity;
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.frame_times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frame_times.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.frame_times.len() == self.capacity
    }

    /// Frames per second over the window; `None` until the window is full.
    pub fn rate(&self) -> Option<f64> {
        if !self.is_full() {
            return None;
        }
        let total: f64 = self.frame_times.iter().sum();
        (total > 0.0).then(|| self.frame_times.len() as f64 / total)
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the overlay should currently be drawn.
    pub fn is_shown(&self) -> bool {
        self.visible && self.rate().is_some()
    }

    /// Overlay text, present only while shown.
    pub fn label(&self) -> Option<String> {
        if !self.visible {
            return None;
        }
        self.rate().map(|fps| format!("FPS: {:.1}", fps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn filled(n: usize, delta: f64) -> FpsEstimator {
        let mut fps = FpsEstimator::new(10);
        for _ in 0..n {
            fps.record(Some(delta));
        }
        fps
    }

    #[test]
    fn test_not_ready_until_full() {
        let fps = filled(9, 0.1);
        assert_eq!(fps.rate(), None);
        assert!(!fps.is_shown());
        assert_eq!(fps.label(), None);
    }

    #[test]
    fn test_rate_once_full() {
        let fps = filled(10, 0.1);
        assert_relative_eq!(fps.rate().unwrap(), 10.0, epsilon = 1e-9);
        assert!(fps.is_shown());
        assert_eq!(fps.label().as_deref(), Some("FPS: 10.0"));
    }

    #[test]
    fn test_oldest_delta_is_evicted() {
        let mut fps = filled(10, 0.1);
        fps.record(Some(0.05));
        assert_eq!(fps.len(), 10);
        // nine 0.1s and one 0.05
        assert_relative_eq!(fps.rate().unwrap(), 10.0 / 0.95, epsilon = 1e-9);
    }

    #[test]
    fn test_invalid_deltas_are_ignored() {
        let mut fps = FpsEstimator::new(3);
        fps.record(None);
        fps.record(Some(0.0));
        fps.record(Some(-0.1));
        fps.record(Some(f64::NAN));
        fps.record(Some(f64::INFINITY));
        assert!(fps.is_empty());
    }

    #[test]
    fn test_visibility_toggle() {
        let mut fps = filled(10, 0.02);
        fps.set_visible(false);
        assert!(!fps.is_shown());
        assert_eq!(fps.label(), None);
        fps.set_visible(true);
        assert!(fps.is_shown());

        let mut partial = filled(4, 0.02);
        partial.set_visible(false);
        partial.set_visible(true);
        assert!(!partial.is_shown());
    }

    #[test]
    fn test_shrinking_window_keeps_latest() {
        let mut fps = FpsEstimator::new(4);
        for d in [0.1, 0.2, 0.3, 0.4] {
            fps.record(Some(d));
        }
        fps.set_capacity(2);
        assert_eq!(fps.len(), 2);
        assert!(fps.is_full());
        assert_relative_eq!(fps.rate().unwrap(), 2.0 / 0.7, epsilon = 1e-9);
    }

    #[test]
    fn test_growing_window_waits_for_fill() {
        let mut fps = filled(10, 0.1);
        fps.set_capacity(20);
        assert_eq!(fps.len(), 10);
        assert_eq!(fps.rate(), None);
        assert_eq!(fps.capacity(), 20);
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let mut fps = FpsEstimator::new(0);
        assert_eq!(fps.capacity(), 1);
        fps.record(Some(0.5));
        assert_relative_eq!(fps.rate().unwrap(), 2.0);
    }
}
