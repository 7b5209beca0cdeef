//! Render the stars to the user's terminal

use color_eyre::eyre::Result;
use termwiz::surface::Change as TermwizChange;
use termwiz::terminal::buffered::BufferedTerminal;
use termwiz::terminal::Terminal as TermwizTerminal;

use starfield::{canvas::Canvas, star::Star};

use crate::config::Colours;
use crate::surface::Surface;
use crate::viewport::Viewport;

/// `Renderer`
pub(crate) struct Renderer<T: TermwizTerminal> {
    /// The user's terminal, with Termwiz's diffing buffer in front of it.
    terminal: BufferedTerminal<T>,
    /// The terminal's width
    width: usize,
    /// The terminal's height
    height: usize,
    /// The colours to paint with.
    colours: Colours,
}

/// We need this just because I can't figure out how to pass `Box<dyn Terminal>` to
/// `BufferedTerminal::new()`
pub(crate) fn get_termwiz_terminal() -> Result<impl TermwizTerminal> {
    let capabilities = termwiz::caps::Capabilities::new_from_env()?;
    Ok(termwiz::terminal::new_terminal(capabilities)?)
}

impl<T: TermwizTerminal> Renderer<T> {
    /// Take over the user's terminal: raw mode, alternate screen and a hidden cursor.
    pub fn new(mut terminal: T, colours: Colours) -> Result<Self> {
        tracing::debug!("Putting user's terminal into raw mode");
        terminal.set_raw_mode()?;
        terminal.enter_alternate_screen()?;

        let mut buffered = BufferedTerminal::new(terminal)?;
        buffered.add_change(TermwizChange::CursorVisibility(
            termwiz::surface::CursorVisibility::Hidden,
        ));
        buffered.flush()?;

        let (width, height) = buffered.dimensions();
        tracing::debug!("Rendering to a {width}x{height} terminal");

        Ok(Self {
            terminal: buffered,
            width,
            height,
            colours,
        })
    }

    /// Follow any changes to the size of the user's terminal.
    fn handle_resize(&mut self) -> Result<()> {
        let is_resized = self.terminal.check_for_resize()?;
        if !is_resized {
            return Ok(());
        }

        self.terminal.repaint()?;
        let (width, height) = self.terminal.dimensions();
        tracing::debug!("Terminal resized to {width}x{height}");
        self.width = width;
        self.height = height;

        Ok(())
    }

    /// Do a single render to the user's actual terminal. It uses a diffing algorithm to make
    /// the minimum number of changes.
    pub fn render(&mut self, stars: &[Star], canvas: &Canvas) -> Result<()> {
        self.handle_resize()?;

        let frame = build_frame(stars, canvas, self.width, self.height, self.colours);
        self.terminal.draw_from_screen(&frame.to_termwiz(), 0, 0);

        // This is where we actually render to the user's real terminal.
        self.terminal.flush()?;

        Ok(())
    }

    /// Give the terminal back to the user how we found it.
    pub fn restore(mut self) -> Result<()> {
        tracing::debug!("Setting user's terminal to cooked mode");
        self.terminal.add_change(TermwizChange::CursorVisibility(
            termwiz::surface::CursorVisibility::Visible,
        ));
        self.terminal.flush()?;
        self.terminal.terminal().exit_alternate_screen()?;
        self.terminal.terminal().set_cooked_mode()?;

        Ok(())
    }
}

/// Paint the background and then every star onto a fresh frame. Pixels that fall outside the
/// terminal are skipped.
pub(crate) fn build_frame(
    stars: &[Star],
    canvas: &Canvas,
    width: usize,
    height: usize,
    colours: Colours,
) -> Surface {
    let mut frame = Surface::new(width, height, colours.background);
    let viewport = Viewport::new(canvas, frame.width, frame.pixel_height());

    for star in stars {
        for (x, y) in viewport.star_pixels(star) {
            let (Ok(x_usize), Ok(y_usize)) = (usize::try_from(x), usize::try_from(y)) else {
                continue;
            };
            if x_usize >= frame.width || y_usize >= frame.pixel_height() {
                continue;
            }

            if let Err(error) = frame.add_pixel(x_usize, y_usize, colours.star) {
                tracing::warn!("Couldn't draw star pixel: {error:?}");
            }
        }
    }

    frame
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests aren't so strict")]
mod test {
    use starfield::{vector::Vector, Position};

    use super::*;
    use crate::surface::{BLACK, WHITE};

    fn colours() -> Colours {
        Colours {
            background: BLACK,
            star: WHITE,
        }
    }

    fn star(x: f32, y: f32, size: u8) -> Star {
        Star::new(Position::new(x, y), size, Vector::new(1.0, 1.0), 1.0)
    }

    #[test]
    fn stars_are_painted_over_the_background() {
        let canvas = Canvas::new(10.0, 10.0).unwrap();
        let frame = build_frame(&[star(3.0, 4.0, 1)], &canvas, 10, 5, colours());

        assert_eq!(frame.get_pixel(3, 4), Some(WHITE));
        assert_eq!(frame.get_pixel(4, 4), Some(BLACK));
        assert_eq!(frame.get_pixel(0, 0), Some(BLACK));
    }

    #[test]
    fn off_screen_stars_are_clipped() {
        let canvas = Canvas::new(10.0, 10.0).unwrap();
        let stars = [star(-16.0, 5.0, 4), star(25.0, 25.0, 4), star(9.0, 9.0, 4)];
        let frame = build_frame(&stars, &canvas, 10, 5, colours());

        assert_eq!(frame.get_pixel(0, 5), Some(BLACK));
        assert_eq!(frame.get_pixel(9, 9), Some(BLACK));
    }

    #[test]
    fn the_frame_fills_the_terminal() {
        let canvas = Canvas::new(1280.0, 960.0).unwrap();
        let frame = build_frame(&[], &canvas, 80, 24, colours());
        assert_eq!(frame.width, 80);
        assert_eq!(frame.pixel_height(), 48);
    }
}
