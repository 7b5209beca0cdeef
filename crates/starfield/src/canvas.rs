//! The visible area that stars fly across.

use crate::errors::{InvalidCanvasSnafu, StarfieldError};

/// The size of the visible area. It's fixed for the lifetime of a simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub struct Canvas {
    /// Width in canvas units.
    pub width: f32,
    /// Height in canvas units.
    pub height: f32,
}

impl Canvas {
    /// Make a canvas, rejecting dimensions that can't contain anything.
    ///
    /// # Errors
    /// When either dimension is zero, negative, infinite or `NaN`.
    pub fn new(width: f32, height: f32) -> Result<Self, StarfieldError> {
        let is_valid = |extent: f32| extent.is_finite() && extent > 0.0;
        snafu::ensure!(
            is_valid(width) && is_valid(height),
            InvalidCanvasSnafu { width, height }
        );

        Ok(Self { width, height })
    }

    /// Is the point inside the canvas, edges included?
    #[must_use]
    pub fn contains(&self, position: crate::Position) -> bool {
        (0.0..=self.width).contains(&position.x) && (0.0..=self.height).contains(&position.y)
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests aren't so strict")]
mod test {
    use super::*;

    #[test]
    fn accepts_positive_dimensions() {
        let canvas = Canvas::new(1280.0, 960.0).unwrap();
        assert_eq!(canvas.width, 1280.0);
        assert_eq!(canvas.height, 960.0);
    }

    #[test]
    fn rejects_empty_or_broken_dimensions() {
        for (width, height) in [
            (0.0, 10.0),
            (10.0, 0.0),
            (-1.0, 10.0),
            (10.0, f32::NAN),
            (f32::INFINITY, 10.0),
        ] {
            let result = Canvas::new(width, height);
            assert!(
                matches!(result, Err(StarfieldError::InvalidCanvas { .. })),
                "{width}x{height} should be rejected"
            );
        }
    }

    #[test]
    fn error_message_names_the_dimensions() {
        let error = Canvas::new(0.0, 5.0).unwrap_err();
        assert_eq!(error.to_string(), "Invalid canvas dimensions: 0x5");
    }

    #[test]
    fn contains_includes_edges() {
        let canvas = Canvas::new(100.0, 50.0).unwrap();
        assert!(canvas.contains(crate::Position::new(0.0, 0.0)));
        assert!(canvas.contains(crate::Position::new(100.0, 50.0)));
        assert!(!canvas.contains(crate::Position::new(-0.1, 10.0)));
        assert!(!canvas.contains(crate::Position::new(10.0, 50.1)));
    }
}
