//! # Starfield
//! A field of "shooting stars": point particles that spawn just outside the edges of a
//! rectangular canvas, fly in a straight line at a constant speed and are dropped once they've
//! left the canvas.
//!
//! The [`simulation::Simulation`] owns every live [`star::Star`] and is advanced one tick at a
//! time by whatever clock the caller has. All randomness is passed in, so a seeded random source
//! gives a fully reproducible simulation.
//!
//! ```
//! use rand::SeedableRng as _;
//!
//! let canvas = starfield::canvas::Canvas::new(1280.0, 960.0).unwrap();
//! let mut simulation =
//!     starfield::simulation::Simulation::new(canvas, starfield::config::Config::default())
//!         .unwrap();
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! for _ in 0..100 {
//!     simulation.tick(&mut rng);
//! }
//! assert!(simulation.stars().len() <= 100);
//! ```

pub mod border;
pub mod canvas;
pub mod config;
pub mod errors;
pub mod simulation;
pub mod spawner;
pub mod star;
pub mod vector;

/// A point on, or near, the canvas.
pub type Position = glam::Vec2;
