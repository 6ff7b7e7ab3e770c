use freelook_common::Direction;
use std::collections::BTreeSet;

/// Movement directions whose keys are currently held down.
///
/// Only consulted for time-scaled movement; per-event movement reacts to
/// key-down events directly.
#[derive(Debug, Clone, Default)]
pub struct HeldDirections {
    held: BTreeSet<Direction>,
}

impl HeldDirections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update from a key transition. Returns true if the set changed.
    pub fn set(&mut self, direction: Direction, pressed: bool) -> bool {
        if pressed {
            self.held.insert(direction)
        } else {
            self.held.remove(&direction)
        }
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        self.held.contains(&direction)
    }

    /// Held directions in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        self.held.iter().copied()
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release() {
        let mut held = HeldDirections::new();
        assert!(held.set(Direction::Forward, true));
        assert!(!held.set(Direction::Forward, true));
        assert!(held.is_held(Direction::Forward));
        assert!(held.set(Direction::Forward, false));
        assert!(held.is_empty());
    }

    #[test]
    fn iteration_is_ordered() {
        let mut held = HeldDirections::new();
        held.set(Direction::Down, true);
        held.set(Direction::Left, true);
        let dirs: Vec<_> = held.iter().collect();
        assert_eq!(dirs, vec![Direction::Left, Direction::Down]);
    }

    #[test]
    fn clear_releases_everything() {
        let mut held = HeldDirections::new();
        for dir in Direction::ALL {
            held.set(dir, true);
        }
        held.clear();
        assert!(held.is_empty());
    }
}
