//! A frame of half-block "pixels" that can be turned into terminal cells.
//!
//! Every terminal cell holds 2 pixels stacked vertically. The upper pixel is rendered as the
//! foreground colour of a "▀" and the lower pixel as that cell's background colour.

use color_eyre::eyre::bail;
use color_eyre::eyre::Result;
use termwiz::surface::Change as TermwizChange;
use termwiz::surface::Position as TermwizPosition;

/// An RGBA colour
pub(crate) type Colour = (f32, f32, f32, f32);

/// A default pure white.
pub const WHITE: Colour = (1.0, 1.0, 1.0, 1.0);

/// A default pure black.
pub const BLACK: Colour = (0.0, 0.0, 0.0, 1.0);

/// A default pure red.
#[cfg(test)]
pub const RED: Colour = (1.0, 0.0, 0.0, 1.0);

/// The character used to render a pair of pixels.
const UPPER_HALF_BLOCK: &str = "▀";

/// `Surface`
#[derive(Clone, Debug)]
pub(crate) struct Surface {
    /// The terminal's width
    pub width: usize,
    /// The terminal's height
    pub height: usize,
    /// The colour that every pixel starts as.
    background: Colour,
    /// Row-major pixels, twice as many rows as the terminal has.
    pixels: Vec<Colour>,
}

impl Surface {
    /// Create an empty surface filled with the background colour.
    #[must_use]
    pub fn new(width: usize, height: usize, background: Colour) -> Self {
        Self {
            width,
            height,
            background,
            pixels: vec![background; width * height * 2],
        }
    }

    /// The height in pixels, rather than in terminal rows.
    #[must_use]
    pub const fn pixel_height(&self) -> usize {
        self.height * 2
    }

    /// Paint a single pixel.
    pub fn add_pixel(&mut self, x: usize, y: usize, colour: Colour) -> Result<()> {
        if x >= self.width {
            bail!("Tried to add pixel to column: {x}")
        }
        if y >= self.pixel_height() {
            bail!("Tried to add pixel to row: {}", y.div_euclid(2))
        }

        let index = y * self.width + x;
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = colour;
        }

        Ok(())
    }

    /// The colour of the pixel at the given coordinates.
    #[must_use]
    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Colour> {
        if x >= self.width {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }

    /// Convert the pixels to terminal cells. The whole screen is first cleared to the background
    /// colour, then only cells with a non-background pixel get a half block.
    #[must_use]
    pub fn to_termwiz(&self) -> termwiz::surface::Surface {
        let mut surface = termwiz::surface::Surface::new(self.width, self.height);
        surface.add_change(TermwizChange::ClearScreen(Self::make_colour_attribute(
            self.background,
        )));

        for row in 0..self.height {
            for col in 0..self.width {
                let upper = self.get_pixel(col, row * 2).unwrap_or(self.background);
                let lower = self.get_pixel(col, row * 2 + 1).unwrap_or(self.background);
                if upper == self.background && lower == self.background {
                    continue;
                }

                surface.add_changes(vec![
                    TermwizChange::CursorPosition {
                        x: TermwizPosition::Absolute(col),
                        y: TermwizPosition::Absolute(row),
                    },
                    Self::make_fg_colour(upper),
                    Self::make_bg_colour(lower),
                ]);
                surface.add_change(UPPER_HALF_BLOCK);
            }
        }

        surface
    }

    /// Make a Termwiz colour attribute
    #[must_use]
    pub const fn make_colour_attribute(colour: Colour) -> termwiz::color::ColorAttribute {
        termwiz::color::ColorAttribute::TrueColorWithDefaultFallback(termwiz::color::SrgbaTuple(
            colour.0, colour.1, colour.2, colour.3,
        ))
    }

    /// Make a Termwiz background colour
    #[must_use]
    pub const fn make_bg_colour(colour: Colour) -> TermwizChange {
        let colour_attribute = Self::make_colour_attribute(colour);
        TermwizChange::Attribute(termwiz::cell::AttributeChange::Background(colour_attribute))
    }

    /// Make a Termwiz foreground colour
    #[must_use]
    pub const fn make_fg_colour(colour: Colour) -> TermwizChange {
        let colour_attribute = Self::make_colour_attribute(colour);
        TermwizChange::Attribute(termwiz::cell::AttributeChange::Foreground(colour_attribute))
    }
}

#[cfg(test)]
#[expect(
    clippy::indexing_slicing,
    clippy::unwrap_used,
    reason = "Tests aren't so strict"
)]
mod test {
    use super::*;

    const GREY: Colour = (0.5, 0.5, 0.5, 1.0);

    #[test]
    fn empty_surface_is_all_background() {
        let surface = Surface::new(2, 2, BLACK);
        let mut termwiz_surface = surface.to_termwiz();
        let cells = termwiz_surface.screen_cells();

        let cell = &cells[1][1];
        assert_eq!(cell.str(), " ");
        assert_eq!(
            cell.attrs().background(),
            Surface::make_colour_attribute(BLACK)
        );
    }

    #[test]
    fn upper_pixel_is_the_foreground() {
        let mut surface = Surface::new(2, 2, BLACK);
        surface.add_pixel(1, 2, WHITE).unwrap();
        let mut termwiz_surface = surface.to_termwiz();
        let cells = termwiz_surface.screen_cells();

        let cell = &cells[1][1];
        assert_eq!(cell.str(), "▀");
        assert_eq!(
            cell.attrs().foreground(),
            Surface::make_colour_attribute(WHITE)
        );
        assert_eq!(
            cell.attrs().background(),
            Surface::make_colour_attribute(BLACK)
        );
        assert_eq!(cells[0][0].str(), " ");
    }

    #[test]
    fn lower_pixel_is_the_background() {
        let mut surface = Surface::new(1, 1, BLACK);
        surface.add_pixel(0, 1, GREY).unwrap();
        let mut termwiz_surface = surface.to_termwiz();
        let cells = termwiz_surface.screen_cells();

        let cell = &cells[0][0];
        assert_eq!(cell.str(), "▀");
        assert_eq!(
            cell.attrs().foreground(),
            Surface::make_colour_attribute(BLACK)
        );
        assert_eq!(
            cell.attrs().background(),
            Surface::make_colour_attribute(GREY)
        );
    }

    #[test]
    fn both_pixels_share_a_cell() {
        let mut surface = Surface::new(1, 1, BLACK);
        surface.add_pixel(0, 1, WHITE).unwrap();
        surface.add_pixel(0, 0, RED).unwrap();
        let mut termwiz_surface = surface.to_termwiz();
        let cells = termwiz_surface.screen_cells();

        let cell = &cells[0][0];
        assert_eq!(
            cell.attrs().foreground(),
            Surface::make_colour_attribute(RED)
        );
        assert_eq!(
            cell.attrs().background(),
            Surface::make_colour_attribute(WHITE)
        );
    }

    #[test]
    fn out_of_bounds_pixels_are_errors() {
        let mut surface = Surface::new(2, 2, BLACK);
        let result = surface.add_pixel(1, 4, WHITE).unwrap_err();
        assert_eq!(
            format!("{}", result.root_cause()),
            "Tried to add pixel to row: 2"
        );
        let result = surface.add_pixel(2, 0, WHITE).unwrap_err();
        assert_eq!(
            format!("{}", result.root_cause()),
            "Tried to add pixel to column: 2"
        );
    }
}
