use glam::Vec2;

/// Turns absolute pointer positions into per-sample deltas.
///
/// Window coordinates grow downward; deltas are reported with positive `y`
/// meaning the pointer moved up on screen.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    last: Option<Vec2>,
    invert: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// A tracker that negates both axes of every delta.
    pub fn inverted(invert: bool) -> Self {
        Self { last: None, invert }
    }

    /// Record a pointer position. Returns `None` for the first sample after
    /// construction or [`reset`](Self::reset).
    pub fn sample(&mut self, x: f32, y: f32) -> Option<Vec2> {
        let current = Vec2::new(x, y);
        let previous = self.last.replace(current)?;
        Some(self.relative(current.x - previous.x, current.y - previous.y))
    }

    /// Convert a relative motion in window orientation (y grows downward),
    /// such as a raw mouse-motion event, into a look delta.
    pub fn relative(&self, dx: f32, dy: f32) -> Vec2 {
        let delta = Vec2::new(dx, -dy);
        if self.invert { -delta } else { delta }
    }

    /// Forget the last position so the next sample does not produce a jump.
    pub fn reset(&mut self) {
        if self.last.take().is_some() {
            tracing::trace!("pointer tracker reset");
        }
    }

    pub fn last_position(&self) -> Option<Vec2> {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_has_no_delta() {
        let mut tracker = PointerTracker::new();
        assert_eq!(tracker.sample(100.0, 100.0), None);
        assert_eq!(tracker.last_position(), Some(Vec2::new(100.0, 100.0)));
    }

    #[test]
    fn upward_motion_is_positive_y() {
        let mut tracker = PointerTracker::new();
        tracker.sample(10.0, 50.0);
        let delta = tracker.sample(14.0, 40.0).unwrap();
        assert_eq!(delta, Vec2::new(4.0, 10.0));
    }

    #[test]
    fn reset_suppresses_jump() {
        let mut tracker = PointerTracker::new();
        tracker.sample(0.0, 0.0);
        tracker.reset();
        assert_eq!(tracker.sample(500.0, 500.0), None);
        assert_eq!(tracker.sample(501.0, 500.0), Some(Vec2::new(1.0, 0.0)));
    }

    #[test]
    fn relative_motion_flips_y() {
        let tracker = PointerTracker::new();
        assert_eq!(tracker.relative(3.0, -5.0), Vec2::new(3.0, 5.0));
        assert_eq!(tracker.last_position(), None);
        assert_eq!(
            PointerTracker::inverted(true).relative(3.0, -5.0),
            Vec2::new(-3.0, -5.0)
        );
    }

    #[test]
    fn inverted_negates_both_axes() {
        let mut tracker = PointerTracker::inverted(true);
        tracker.sample(0.0, 0.0);
        assert_eq!(tracker.sample(2.0, 3.0), Some(Vec2::new(-2.0, 3.0)));
    }
}
