//! Make new stars just outside the canvas.

use rand::Rng;

use crate::{
    border::Border, canvas::Canvas, config::Config, errors::StarfieldError, star::Star,
    vector::Vector,
};

/// Generates new stars for a given canvas.
#[derive(Debug, Clone)]
pub struct Spawner {
    /// The canvas that stars are spawned around.
    canvas: Canvas,
    /// Exclusive upper bound of star sizes.
    max_size: u8,
    /// Exclusive upper bound of star speeds.
    max_speed: f32,
}

impl Spawner {
    /// Instantiate
    ///
    /// # Errors
    /// When the config's size or speed ranges can't be sampled from.
    pub fn new(canvas: Canvas, config: &Config) -> Result<Self, StarfieldError> {
        config.validate()?;
        Ok(Self {
            canvas,
            max_size: config.max_size,
            max_speed: config.max_speed,
        })
    }

    /// Make a new star at a random border.
    pub fn spawn<R: Rng + ?Sized>(&self, rng: &mut R) -> Star {
        let border = Border::random(rng);
        self.spawn_from(border, rng)
    }

    /// Make a new star at the given border.
    ///
    /// Random values are always drawn in the same order: spawn point x then y, direction x then
    /// y, speed and finally size.
    pub fn spawn_from<R: Rng + ?Sized>(&self, border: Border, rng: &mut R) -> Star {
        let position = border.interval(&self.canvas).sample(rng);
        let direction =
            Vector::new(rng.gen::<f32>(), rng.gen::<f32>()).scaled(border.direction_sign());
        let speed = rng.gen::<f32>() * self.max_speed;
        let size = rng.gen_range(0..self.max_size);

        tracing::trace!(
            "Spawned star from {border:?} at {position:?}, direction: {direction:?}, \
             speed: {speed}, size: {size}"
        );

        Star::new(position, size, direction, speed)
    }
}
