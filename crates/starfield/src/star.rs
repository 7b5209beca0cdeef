//! A single shooting star and the rule for when it has left the canvas.

use crate::{canvas::Canvas, vector::Vector, Position};

/// A single shooting star. Only its position changes after it has been created.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    /// Where the star currently is.
    position: Position,
    /// Diameter when rendered.
    size: u8,
    /// The direction of travel, applied every tick.
    direction: Vector,
    /// How far along `direction` the star moves per tick.
    speed: f32,
}

impl Star {
    /// Make a star.
    #[must_use]
    pub const fn new(position: Position, size: u8, direction: Vector, speed: f32) -> Self {
        Self {
            position,
            size,
            direction,
            speed,
        }
    }

    /// Where the star currently is.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Diameter when rendered.
    #[must_use]
    pub const fn size(&self) -> u8 {
        self.size
    }

    /// The direction of travel.
    #[must_use]
    pub const fn direction(&self) -> Vector {
        self.direction
    }

    /// Distance covered per tick, in units of `direction`.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Where the star will be after one more tick.
    #[must_use]
    pub fn next_position(&self) -> Position {
        self.position + self.direction.as_vec2() * self.speed
    }

    /// Move the star one tick along its direction.
    pub fn advance(&mut self) {
        self.position = self.next_position();
    }

    /// Has this star left the canvas for good?
    #[must_use]
    pub fn is_off_canvas(&self, canvas: &Canvas) -> bool {
        is_off_canvas(self.position, self.direction, canvas)
    }
}

/// The removal rule. On each axis the star has to be outside the canvas with its direction
/// pointing back across it: left of the canvas heading right, or right of it heading left, and
/// the same vertically. Only when both axes agree is the star gone, so a star that is outside on
/// just one axis is kept.
#[must_use]
pub fn is_off_canvas(position: Position, direction: Vector, canvas: &Canvas) -> bool {
    is_axis_off_canvas(position.x, direction.x(), canvas.width)
        && is_axis_off_canvas(position.y, direction.y(), canvas.height)
}

/// A single axis of the removal rule.
fn is_axis_off_canvas(coordinate: f32, direction: f32, extent: f32) -> bool {
    (coordinate < 0.0 && direction > 0.0) || (coordinate > extent && direction < 0.0)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests aren't so strict")]
mod test {
    use super::*;

    fn canvas() -> Canvas {
        Canvas::new(100.0, 100.0).unwrap()
    }

    #[test]
    fn advancing_adds_direction_times_speed() {
        let mut star = Star::new(Position::new(1.5, -2.0), 2, Vector::new(0.3, 0.7), 12.5);
        star.advance();
        assert_eq!(
            star.position(),
            Position::new(1.5 + 0.3 * 12.5, -2.0 + 0.7 * 12.5)
        );
        assert_eq!(star.size(), 2);
        assert_eq!(star.direction(), Vector::new(0.3, 0.7));
        assert_eq!(star.speed(), 12.5);
    }

    #[test]
    fn off_canvas_needs_both_axes() {
        let canvas = canvas();
        assert!(is_off_canvas(
            Position::new(-5.0, -5.0),
            Vector::new(0.5, 0.5),
            &canvas
        ));
        assert!(is_off_canvas(
            Position::new(105.0, 105.0),
            Vector::new(-0.5, -0.5),
            &canvas
        ));
        assert!(is_off_canvas(
            Position::new(-5.0, 105.0),
            Vector::new(0.5, -0.5),
            &canvas
        ));
    }

    #[test]
    fn one_axis_outside_is_not_enough() {
        let canvas = canvas();
        assert!(!is_off_canvas(
            Position::new(-20.0, 50.0),
            Vector::new(1.0, 0.0),
            &canvas
        ));
        assert!(!is_off_canvas(
            Position::new(50.0, 120.0),
            Vector::new(-1.0, -1.0),
            &canvas
        ));
    }

    #[test]
    fn direction_has_to_match_the_side() {
        let canvas = canvas();
        // Left of and above the canvas, heading further out.
        assert!(!is_off_canvas(
            Position::new(-5.0, -5.0),
            Vector::new(-0.5, -0.5),
            &canvas
        ));
        // Exactly on the edges counts as inside.
        assert!(!is_off_canvas(
            Position::new(100.0, 0.0),
            Vector::new(-0.5, 0.5),
            &canvas
        ));
    }

    #[test]
    fn star_delegates_to_the_rule() {
        let canvas = canvas();
        let star = Star::new(Position::new(-1.0, -1.0), 1, Vector::new(0.1, 0.1), 1.0);
        assert!(star.is_off_canvas(&canvas));
    }
}
