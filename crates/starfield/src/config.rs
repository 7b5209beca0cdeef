//! All the variables that can be configured for the simulation

use crate::errors::{InvalidConfigSnafu, StarfieldError};

/// All the config for the simulation
#[derive(serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// A new star is spawned on a tick when a uniform random draw in `[0, 1)` is bigger than
    /// this. So `0.95` gives a 5% chance per tick.
    pub spawn_threshold: f32,
    /// Speeds are picked uniformly from `[0, max_speed)`, in canvas units per tick.
    pub max_speed: f32,
    /// Sizes are picked uniformly from `[0, max_size)`.
    pub max_size: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spawn_threshold: 0.95,
            max_speed: 30.0,
            max_size: 5,
        }
    }
}

impl Config {
    /// Make sure all the values can actually be sampled from.
    ///
    /// # Errors
    /// When any of the settings are out of range.
    pub fn validate(&self) -> Result<(), StarfieldError> {
        snafu::ensure!(
            (0.0..=1.0).contains(&self.spawn_threshold),
            InvalidConfigSnafu {
                field: "spawn_threshold",
                reason: format!("{} is not between 0 and 1", self.spawn_threshold),
            }
        );
        snafu::ensure!(
            self.max_speed.is_finite() && self.max_speed >= 0.0,
            InvalidConfigSnafu {
                field: "max_speed",
                reason: format!("{} is not a positive number", self.max_speed),
            }
        );
        snafu::ensure!(
            self.max_size > 0,
            InvalidConfigSnafu {
                field: "max_size",
                reason: "must be at least 1",
            }
        );

        Ok(())
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests aren't so strict")]
mod test {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn threshold_must_be_a_probability() {
        let config = Config {
            spawn_threshold: 1.5,
            ..Config::default()
        };
        let error = config.validate().unwrap_err();
        assert_eq!(
            error.to_string(),
            "Invalid simulation config `spawn_threshold`: 1.5 is not between 0 and 1"
        );
    }

    #[test]
    fn speed_must_be_finite_and_positive() {
        for max_speed in [-1.0, f32::NAN, f32::INFINITY] {
            let config = Config {
                max_speed,
                ..Config::default()
            };
            assert!(matches!(
                config.validate(),
                Err(StarfieldError::InvalidConfig { .. })
            ));
        }
    }

    #[test]
    fn size_range_cannot_be_empty() {
        let config = Config {
            max_size: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(StarfieldError::InvalidConfig { field, .. }) if field == "max_size"
        ));
    }
}
