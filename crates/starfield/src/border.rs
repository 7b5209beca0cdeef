//! The four strips just outside the canvas that new stars are spawned in.

use rand::Rng;

use crate::{canvas::Canvas, vector::Vector, Position};

/// How far the side strips reach out past the canvas' left and right edges.
pub const HORIZONTAL_MARGIN: f32 = 16.0;

/// How far the strips reach out past the canvas' top and bottom edges.
pub const VERTICAL_MARGIN: f32 = 9.0;

/// A sampling rectangle: every point `anchor + span * u` where `u` is in `[0, 1)` on each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub struct Interval {
    /// One corner of the rectangle.
    pub anchor: Position,
    /// The extent of the rectangle from the anchor.
    pub span: Vector,
}

impl Interval {
    /// Make an interval.
    #[must_use]
    pub const fn new(anchor: Position, span: Vector) -> Self {
        Self { anchor, span }
    }

    /// Pick a uniformly random point inside the interval. Each axis is sampled independently.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        let scale = Position::new(rng.gen::<f32>(), rng.gen::<f32>());
        self.anchor + self.span.as_vec2() * scale
    }

    /// Whether the point lies between the anchor and the far corner, boundaries included.
    #[must_use]
    pub fn contains(&self, point: Position) -> bool {
        let far = self.anchor + self.span.as_vec2();
        let within = |value: f32, start: f32, end: f32| {
            value >= start.min(end) && value <= start.max(end)
        };
        within(point.x, self.anchor.x, far.x) && within(point.y, self.anchor.y, far.y)
    }
}

/// One of the canvas' edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Border {
    /// The strip to the left of the canvas
    Left,
    /// The strip above the canvas
    Top,
    /// The strip to the right of the canvas
    Right,
    /// The strip below the canvas
    Bottom,
}

impl Border {
    /// All borders in their canonical order.
    pub const ALL: [Self; 4] = [Self::Left, Self::Top, Self::Right, Self::Bottom];

    /// Choose a border with equal probability.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        match rng.gen_range(0..4u8) {
            0 => Self::Left,
            1 => Self::Top,
            2 => Self::Right,
            _ => Self::Bottom,
        }
    }

    /// The region, relative to the given canvas, that stars spawn in.
    ///
    /// The right and bottom spans are as wide as the canvas itself plus the margin, so those
    /// strips reach far beyond the canvas.
    #[must_use]
    pub fn interval(self, canvas: &Canvas) -> Interval {
        let width = canvas.width;
        let height = canvas.height;
        match self {
            Self::Left => Interval::new(
                Position::new(-HORIZONTAL_MARGIN, -VERTICAL_MARGIN),
                Vector::new(0.0, height + VERTICAL_MARGIN),
            ),
            Self::Top => Interval::new(
                Position::new(0.0, -VERTICAL_MARGIN),
                Vector::new(width, 0.0),
            ),
            Self::Right => Interval::new(
                Position::new(width, -VERTICAL_MARGIN),
                Vector::new(width + HORIZONTAL_MARGIN, height + VERTICAL_MARGIN),
            ),
            Self::Bottom => Interval::new(
                Position::new(0.0, height),
                Vector::new(width, height + VERTICAL_MARGIN),
            ),
        }
    }

    /// The sign applied to a new star's direction. Stars from the right and bottom fly towards
    /// negative coordinates, stars from the left and top towards positive ones.
    #[must_use]
    pub const fn direction_sign(self) -> f32 {
        match self {
            Self::Left | Self::Top => 1.0,
            Self::Right | Self::Bottom => -1.0,
        }
    }
}

#[cfg(test)]
#[expect(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    reason = "Tests aren't so strict"
)]
mod test {
    use rand::SeedableRng as _;

    use super::*;

    fn canvas() -> Canvas {
        Canvas::new(1280.0, 960.0).unwrap()
    }

    #[test]
    fn intervals_match_the_canvas() {
        let canvas = canvas();
        assert_eq!(
            Border::Left.interval(&canvas),
            Interval::new(Position::new(-16.0, -9.0), Vector::new(0.0, 969.0))
        );
        assert_eq!(
            Border::Top.interval(&canvas),
            Interval::new(Position::new(0.0, -9.0), Vector::new(1280.0, 0.0))
        );
        assert_eq!(
            Border::Right.interval(&canvas),
            Interval::new(Position::new(1280.0, -9.0), Vector::new(1296.0, 969.0))
        );
        assert_eq!(
            Border::Bottom.interval(&canvas),
            Interval::new(Position::new(0.0, 960.0), Vector::new(1280.0, 969.0))
        );
    }

    #[test]
    fn samples_stay_inside_every_interval() {
        let canvas = canvas();
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        for border in Border::ALL {
            let interval = border.interval(&canvas);
            for _ in 0..1000 {
                let point = interval.sample(&mut rng);
                assert!(
                    interval.contains(point),
                    "{point:?} escaped the {border:?} interval"
                );
            }
        }
    }

    #[test]
    fn zero_width_spans_pin_their_axis() {
        let canvas = canvas();
        let mut rng = rand::rngs::StdRng::seed_from_u64(3);
        for _ in 0..100 {
            assert_eq!(Border::Left.interval(&canvas).sample(&mut rng).x, -16.0);
            assert_eq!(Border::Top.interval(&canvas).sample(&mut rng).y, -9.0);
        }
    }

    #[test]
    fn every_border_gets_chosen() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(11);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let index = Border::ALL
                .iter()
                .position(|border| *border == Border::random(&mut rng))
                .unwrap();
            seen[index] = true;
        }
        assert_eq!(seen, [true; 4]);
    }

    #[test]
    fn only_right_and_bottom_flip_direction() {
        assert_eq!(Border::Left.direction_sign(), 1.0);
        assert_eq!(Border::Top.direction_sign(), 1.0);
        assert_eq!(Border::Right.direction_sign(), -1.0);
        assert_eq!(Border::Bottom.direction_sign(), -1.0);
    }
}
