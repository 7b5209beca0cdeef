//! Map the simulation's canvas onto the terminal's pixels.

use starfield::{canvas::Canvas, star::Star};

/// How canvas coordinates are stretched over the terminal's pixel grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Viewport {
    /// Terminal pixels per canvas unit, horizontally.
    scale_x: f32,
    /// Terminal pixels per canvas unit, vertically.
    scale_y: f32,
    /// The width of the pixel grid.
    pixel_width: i64,
    /// The height of the pixel grid.
    pixel_height: i64,
}

impl Viewport {
    /// Stretch the whole canvas over a grid of the given pixel dimensions.
    #[expect(
        clippy::as_conversions,
        clippy::cast_precision_loss,
        reason = "Terminal dimensions are far below f32's exact integer range"
    )]
    pub fn new(canvas: &Canvas, pixel_width: usize, pixel_height: usize) -> Self {
        Self {
            scale_x: pixel_width as f32 / canvas.width,
            scale_y: pixel_height as f32 / canvas.height,
            pixel_width: i64::try_from(pixel_width).unwrap_or(i64::MAX),
            pixel_height: i64::try_from(pixel_height).unwrap_or(i64::MAX),
        }
    }

    /// All the pixels covered by the star, drawn as a filled circle of diameter `size`.
    ///
    /// The circle's bounding box has its top-left corner at `round(position) + size / 2`, using
    /// integer halving of the size. A star of size 0 has no pixels, any other star has at least
    /// one, however small it has been scaled. Only pixels inside the grid are returned.
    pub fn star_pixels(&self, star: &Star) -> Vec<(i64, i64)> {
        let size = star.size();
        if size == 0 {
            return Vec::new();
        }

        let offset = f32::from(size / 2);
        let position = star.position();
        let corner_x = (position.x.round() + offset) * self.scale_x;
        let corner_y = (position.y.round() + offset) * self.scale_y;
        let diameter = f32::from(size);

        circle_pixels(
            (to_pixel(corner_x), to_pixel(corner_y)),
            (
                to_diameter(diameter * self.scale_x),
                to_diameter(diameter * self.scale_y),
            ),
            (self.pixel_width, self.pixel_height),
        )
    }
}

/// Rasterise a filled ellipse that fits a `width` x `height` box with its top-left at `(x, y)`.
/// A pixel is covered when its centre is inside the ellipse. Only the part of the box that
/// overlaps the `bounds` grid is visited.
#[expect(
    clippy::as_conversions,
    clippy::cast_precision_loss,
    reason = "Only the on-grid part of a star is visited, which is tiny"
)]
fn circle_pixels(
    (x, y): (i64, i64),
    (width, height): (i64, i64),
    (bounds_width, bounds_height): (i64, i64),
) -> Vec<(i64, i64)> {
    let columns = x.saturating_neg().max(0)..width.min(bounds_width.saturating_sub(x));
    let rows = y.saturating_neg().max(0)..height.min(bounds_height.saturating_sub(y));

    let mut pixels = Vec::new();
    let radius_x = width as f32 / 2.0;
    let radius_y = height as f32 / 2.0;
    for row in rows {
        for col in columns.clone() {
            let dx = (col as f32 + 0.5 - radius_x) / radius_x;
            let dy = (row as f32 + 0.5 - radius_y) / radius_y;
            if dx * dx + dy * dy <= 1.0 {
                pixels.push((x + col, y + row));
            }
        }
    }
    pixels
}

/// The pixel that contains the given scaled coordinate.
#[expect(
    clippy::as_conversions,
    clippy::cast_possible_truncation,
    reason = "Saturating float to int conversion is what we want for far off-screen stars"
)]
fn to_pixel(coordinate: f32) -> i64 {
    coordinate.floor() as i64
}

/// A scaled diameter in whole pixels, never less than one.
#[expect(
    clippy::as_conversions,
    clippy::cast_possible_truncation,
    reason = "Star diameters are tiny"
)]
fn to_diameter(diameter: f32) -> i64 {
    (diameter.round() as i64).max(1)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests aren't so strict")]
mod test {
    use starfield::{vector::Vector, Position};

    use super::*;

    fn star(x: f32, y: f32, size: u8) -> Star {
        Star::new(Position::new(x, y), size, Vector::new(1.0, 1.0), 1.0)
    }

    fn one_to_one() -> Viewport {
        let canvas = Canvas::new(100.0, 100.0).unwrap();
        Viewport::new(&canvas, 100, 100)
    }

    #[test]
    fn size_zero_stars_are_invisible() {
        assert!(one_to_one().star_pixels(&star(10.0, 10.0, 0)).is_empty());
    }

    #[test]
    fn size_one_is_a_single_pixel_at_the_rounded_position() {
        let pixels = one_to_one().star_pixels(&star(10.4, 19.6, 1));
        assert_eq!(pixels, vec![(10, 20)]);
    }

    #[test]
    fn corner_is_offset_by_half_the_size() {
        let pixels = one_to_one().star_pixels(&star(10.0, 10.0, 2));
        assert_eq!(pixels, vec![(11, 11), (12, 11), (11, 12), (12, 12)]);
    }

    #[test]
    fn larger_stars_are_round() {
        let pixels = one_to_one().star_pixels(&star(0.0, 0.0, 4));
        // The corners of the 4x4 box are cut off.
        assert_eq!(pixels.len(), 12);
        assert!(!pixels.contains(&(2, 2)));
        assert!(pixels.contains(&(3, 2)));
        assert!(pixels.contains(&(4, 4)));
    }

    #[test]
    fn pixels_off_the_grid_are_not_visited() {
        let pixels = one_to_one().star_pixels(&star(96.0, -3.0, 4));
        assert!(!pixels.is_empty());
        assert!(pixels
            .iter()
            .all(|(x, y)| (0..100).contains(x) && (0..100).contains(y)));
        assert!(one_to_one().star_pixels(&star(500.0, 500.0, 4)).is_empty());
        assert!(one_to_one().star_pixels(&star(-500.0, -500.0, 4)).is_empty());
    }

    #[test]
    fn huge_scales_only_cover_the_grid() {
        let canvas = Canvas::new(0.01, 10.0).unwrap();
        let viewport = Viewport::new(&canvas, 80, 48);
        let pixels = viewport.star_pixels(&star(0.0, 0.0, 1));

        assert!(!pixels.is_empty());
        assert!(pixels.len() <= 80 * 48);
        assert!(pixels
            .iter()
            .all(|(x, y)| (0..80).contains(x) && (0..48).contains(y)));
    }

    #[test]
    fn tiny_scales_still_draw_a_pixel() {
        let canvas = Canvas::new(1280.0, 960.0).unwrap();
        let viewport = Viewport::new(&canvas, 128, 48);
        let pixels = viewport.star_pixels(&star(640.0, 480.0, 3));
        assert_eq!(pixels, vec![(64, 24)]);
    }
}
