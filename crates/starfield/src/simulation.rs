//! Advance the whole field of stars one tick at a time.

use rand::Rng;

use crate::{
    canvas::Canvas, config::Config, errors::StarfieldError, spawner::Spawner, star::Star,
};

/// What happened during a single tick.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct TickReport {
    /// Whether a new star was added.
    pub spawned: bool,
    /// How many stars were dropped for having left the canvas.
    pub removed: usize,
    /// How many stars are left after the tick.
    pub alive: usize,
}

/// The simulation. It owns every live star.
#[derive(Debug, Clone)]
pub struct Simulation {
    /// The visible area.
    canvas: Canvas,
    /// Tunables.
    config: Config,
    /// Makes new stars.
    spawner: Spawner,
    /// All the live stars, in the order they were added.
    stars: Vec<Star>,
    /// How many ticks have run.
    ticks: u64,
}

impl Simulation {
    /// Instantiate
    ///
    /// # Errors
    /// When the config can't be sampled from.
    pub fn new(canvas: Canvas, config: Config) -> Result<Self, StarfieldError> {
        let spawner = Spawner::new(canvas, &config)?;
        tracing::debug!("New simulation for {canvas:?} with {config:?}");

        Ok(Self {
            canvas,
            spawner,
            config,
            stars: Vec::new(),
            ticks: 0,
        })
    }

    /// The visible area.
    #[must_use]
    pub const fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// The generator used for new stars.
    #[must_use]
    pub const fn spawner(&self) -> &Spawner {
        &self.spawner
    }

    /// A read-only view of all the live stars. It's only valid until the next tick.
    #[must_use]
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// The number of ticks run so far.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Add a star without running a tick.
    pub fn insert(&mut self, star: Star) {
        self.stars.push(star);
    }

    /// Run one tick: maybe spawn a new star, then move or drop every star.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> TickReport {
        let spawned = self.should_spawn(rng).then(|| self.spawner.spawn(rng));
        self.advance(spawned)
    }

    /// The roll for whether this tick gets a new star.
    fn should_spawn<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        rng.gen::<f32>() > self.config.spawn_threshold
    }

    /// The deterministic part of a tick. Any new star is added first, so it gets moved in the same
    /// tick. Then every star is visited exactly once, either being dropped if it's off the canvas
    /// or moved. Survivors keep their order.
    pub fn advance(&mut self, spawned: Option<Star>) -> TickReport {
        let is_spawned = spawned.is_some();
        if let Some(star) = spawned {
            self.stars.push(star);
        }

        let before = self.stars.len();
        let canvas = self.canvas;
        self.stars = std::mem::take(&mut self.stars)
            .into_iter()
            .filter_map(|mut star| {
                if star.is_off_canvas(&canvas) {
                    return None;
                }
                star.advance();
                Some(star)
            })
            .collect();
        self.ticks += 1;

        let report = TickReport {
            spawned: is_spawned,
            removed: before - self.stars.len(),
            alive: self.stars.len(),
        };
        tracing::trace!("Tick {}: {report:?}", self.ticks);
        report
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
    use crate::{vector::Vector, Position};

    fn simulation(width: f32, height: f32) -> Simulation {
        let canvas = Canvas::new(width, height).unwrap();
        Simulation::new(canvas, Config::default()).unwrap()
    }

    #[test]
    fn rejects_bad_config() {
        let canvas = Canvas::new(10.0, 10.0).unwrap();
        let config = Config {
            max_size: 0,
            ..Config::default()
        };
        assert!(Simulation::new(canvas, config).is_err());
    }

    #[test]
    fn stars_move_by_direction_times_speed() {
        let mut simulation = simulation(100.0, 100.0);
        let star = Star::new(Position::new(10.0, 20.0), 2, Vector::new(0.25, 0.5), 8.0);
        simulation.insert(star.clone());
        let report = simulation.advance(None);

        assert_eq!(report.alive, 1);
        assert_eq!(report.removed, 0);
        assert!(!report.spawned);
        assert_eq!(simulation.stars()[0].position(), star.next_position());
        assert_eq!(simulation.stars()[0].position(), Position::new(12.0, 24.0));
    }

    #[test]
    fn off_canvas_stars_are_dropped_and_order_is_kept() {
        let mut simulation = simulation(100.0, 100.0);
        let staying_a = Star::new(Position::new(1.0, 1.0), 1, Vector::new(1.0, 1.0), 1.0);
        let leaving = Star::new(Position::new(-5.0, -5.0), 1, Vector::new(1.0, 1.0), 1.0);
        let staying_b = Star::new(Position::new(2.0, 2.0), 1, Vector::new(1.0, 1.0), 1.0);
        simulation.insert(staying_a);
        simulation.insert(leaving.clone());
        simulation.insert(leaving);
        simulation.insert(staying_b);

        let report = simulation.advance(None);
        assert_eq!(report.removed, 2);
        assert_eq!(report.alive, 2);
        assert_eq!(simulation.stars()[0].position(), Position::new(2.0, 2.0));
        assert_eq!(simulation.stars()[1].position(), Position::new(3.0, 3.0));
    }

    #[test]
    fn a_spawned_star_moves_in_its_first_tick() {
        let mut simulation = simulation(100.0, 100.0);
        let star = Star::new(Position::new(50.0, -9.0), 1, Vector::new(0.5, 0.5), 4.0);
        let report = simulation.advance(Some(star.clone()));

        assert!(report.spawned);
        assert_eq!(simulation.stars(), &[Star::new(
            star.next_position(),
            1,
            Vector::new(0.5, 0.5),
            4.0
        )]);
    }

    #[test]
    fn count_grows_by_at_most_one_per_tick() {
        let mut simulation = simulation(1280.0, 960.0);
        let mut rng = rand::rngs::StdRng::seed_from_u64(5);
        let mut previous = 0;
        let mut spawned_count = 0;
        for _ in 0..5000 {
            let report = simulation.tick(&mut rng);
            assert!(report.alive <= previous + 1);
            assert_eq!(report.alive, previous + usize::from(report.spawned) - report.removed);
            spawned_count += usize::from(report.spawned);
            previous = report.alive;
        }
        assert_eq!(simulation.ticks(), 5000);
        assert!(spawned_count > 0);
    }

    #[test]
    fn never_spawns_at_threshold_one() {
        let canvas = Canvas::new(100.0, 100.0).unwrap();
        let config = Config {
            spawn_threshold: 1.0,
            ..Config::default()
        };
        let mut simulation = Simulation::new(canvas, config).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(8);
        for _ in 0..1000 {
            assert!(!simulation.tick(&mut rng).spawned);
        }
        assert!(simulation.stars().is_empty());
    }
}
