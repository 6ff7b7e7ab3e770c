use freelook_common::Direction;

/// A high-level input action, decoupled from the windowing library.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Move a distance in a direction relative to the current orientation.
    Move(Direction, f32),
    /// Pointer displacement since the previous sample. Positive `dy` is up.
    Look { dx: f32, dy: f32 },
    /// Input with no binding.
    Noop,
}

/// Anything that can be driven by movement and look input.
pub trait InputConsumer {
    /// Move `distance` world units in `direction`.
    fn on_move(&mut self, direction: Direction, distance: f32);

    /// Rotate by a pointer delta.
    fn on_look(&mut self, dx: f32, dy: f32);
}

impl Action {
    /// Apply this action to `consumer`.
    pub fn apply<C: InputConsumer + ?Sized>(self, consumer: &mut C) {
        match self {
            Action::Move(direction, distance) => consumer.on_move(direction, distance),
            Action::Look { dx, dy } => consumer.on_look(dx, dy),
            Action::Noop => {}
        }
    }

    /// Build a move of `distance` from an optional binding lookup.
    pub fn from_binding(direction: Option<Direction>, distance: f32) -> Self {
        direction.map_or(Action::Noop, |direction| Action::Move(direction, distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        moves: Vec<(Direction, f32)>,
        looks: Vec<(f32, f32)>,
    }

    impl InputConsumer for Recorder {
        fn on_move(&mut self, direction: Direction, distance: f32) {
            self.moves.push((direction, distance));
        }

        fn on_look(&mut self, dx: f32, dy: f32) {
            self.looks.push((dx, dy));
        }
    }

    #[test]
    fn move_reaches_consumer_with_distance() {
        let mut rec = Recorder::default();
        Action::Move(Direction::Forward, 1.5).apply(&mut rec);
        assert_eq!(rec.moves, vec![(Direction::Forward, 1.5)]);
        assert!(rec.looks.is_empty());
    }

    #[test]
    fn look_reaches_consumer() {
        let mut rec = Recorder::default();
        Action::Look { dx: 3.0, dy: -2.0 }.apply(&mut rec);
        assert!(rec.moves.is_empty());
        assert_eq!(rec.looks, vec![(3.0, -2.0)]);
    }

    #[test]
    fn unbound_input_is_noop() {
        let mut rec = Recorder::default();
        Action::from_binding(None, 1.0).apply(&mut rec);
        assert!(rec.moves.is_empty());
        assert!(rec.looks.is_empty());
    }

    #[test]
    fn binding_maps_to_move() {
        assert_eq!(
            Action::from_binding(Some(Direction::Up), 2.0),
            Action::Move(Direction::Up, 2.0)
        );
    }
}
