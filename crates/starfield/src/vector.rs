//! A free 2D direction, as opposed to a position.

use glam::Vec2;

/// A direction and magnitude. Stars fly along one of these.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Vector(Vec2);

impl Vector {
    /// Make a vector from its components.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    /// The horizontal component.
    #[must_use]
    pub const fn x(self) -> f32 {
        self.0.x
    }

    /// The vertical component.
    #[must_use]
    pub const fn y(self) -> f32 {
        self.0.y
    }

    /// Multiply both components by the same factor.
    #[must_use]
    pub fn scaled(self, factor: f32) -> Self {
        Self(self.0 * factor)
    }

    /// The underlying `glam` vector, for doing maths with positions.
    #[must_use]
    pub const fn as_vec2(self) -> Vec2 {
        self.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn scaling_multiplies_both_components() {
        let vector = Vector::new(0.25, -0.5).scaled(-2.0);
        assert_eq!(vector, Vector::new(-0.5, 1.0));
    }

    #[test]
    fn scaling_leaves_the_original_alone() {
        let vector = Vector::new(1.0, 2.0);
        let _scaled = vector.scaled(3.0);
        assert_eq!(vector.x(), 1.0);
        assert_eq!(vector.y(), 2.0);
    }
}
