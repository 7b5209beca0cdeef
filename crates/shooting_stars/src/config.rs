//! All of the user config for Shooting Stars.

use color_eyre::eyre::ContextCompat as _;
use color_eyre::eyre::Result;

/// A copy of the default config file. It gets copied to the user's config folder the first time
/// they start Shooting Stars.
static DEFAULT_CONFIG: &str = include_str!("../default_config.toml");

/// The name of the directory, inside the standard config and state directories, that we use.
const APP_DIRECTORY_NAME: &str = "shooting-stars";

/// The name of the main config file.
const DEFAULT_CONFIG_FILE_NAME: &str = "config.toml";

/// The valid log levels. Based on our `tracing` crate.
#[derive(serde::Deserialize, clap::ValueEnum, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub(crate) enum LogLevel {
    /// Error
    Error,
    /// Warnings
    Warn,
    /// Info
    Info,
    /// Debug
    Debug,
    /// Trace
    Trace,
    /// No logging
    Off,
}

/// Managing user config.
#[derive(serde::Deserialize, Debug, Clone)]
#[serde(default)]
pub(crate) struct Config {
    /// The maximum log level
    pub log_level: LogLevel,
    /// The location of the log file.
    pub log_path: std::path::PathBuf,
    /// Ticks, and therefore renders, per second.
    pub frame_rate: u32,
    /// The size of the simulated sky.
    pub canvas: CanvasSize,
    /// Colours to render with.
    pub colours: Colours,
    /// The simulation's own settings.
    pub simulation: starfield::config::Config,
}

impl Default for Config {
    fn default() -> Self {
        let log_directory = match dirs::state_dir() {
            Some(directory) => directory,
            None => std::path::PathBuf::new().join("./"),
        };
        let log_path = log_directory
            .join(APP_DIRECTORY_NAME)
            .join("shooting-stars.log");

        Self {
            log_level: LogLevel::Off,
            log_path,
            frame_rate: 60,
            canvas: CanvasSize::default(),
            colours: Colours::default(),
            simulation: starfield::config::Config::default(),
        }
    }
}

/// The dimensions of the canvas, in canvas units.
#[derive(serde::Deserialize, Debug, Clone, Copy)]
#[serde(default)]
pub(crate) struct CanvasSize {
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 960.0,
        }
    }
}

/// The colours of the night sky.
#[derive(serde::Deserialize, Debug, Clone, Copy)]
#[serde(default)]
pub(crate) struct Colours {
    /// Painted over the whole terminal before every frame.
    pub background: crate::surface::Colour,
    /// The colour of every star.
    pub star: crate::surface::Colour,
}

impl Default for Colours {
    fn default() -> Self {
        Self {
            background: crate::surface::BLACK,
            star: crate::surface::WHITE,
        }
    }
}

impl Config {
    /// Get the stable location of our config directory on the user's system.
    pub fn default_directory() -> Result<std::path::PathBuf> {
        Ok(dirs::config_dir()
            .context("Couldn't get standard config directory")?
            .join(APP_DIRECTORY_NAME))
    }

    /// Load the config from the given path, or from the standard location when no path is given.
    /// The bundled default config is written to the standard location if nothing is there yet.
    pub fn load(maybe_custom_path: Option<std::path::PathBuf>) -> Result<Self> {
        let path = match maybe_custom_path {
            Some(path) => path,
            None => {
                let directory = Self::default_directory()?;
                std::fs::create_dir_all(&directory)?;
                let path = directory.join(DEFAULT_CONFIG_FILE_NAME);
                if !path.exists() {
                    std::fs::write(&path, DEFAULT_CONFIG)?;
                }
                path
            }
        };

        match std::fs::read_to_string(&path) {
            Ok(data) => Self::parse(&data),
            Err(err) => {
                color_eyre::eyre::bail!("Couldn't load config at {path:?}: {err}");
            }
        }
    }

    /// Parse and check a TOML config.
    pub fn parse(data: &str) -> Result<Self> {
        let config = toml::from_str::<Self>(data)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the settings that the app itself relies on. The simulation settings are checked
    /// when the simulation is built.
    fn validate(&self) -> Result<()> {
        if self.frame_rate == 0 {
            color_eyre::eyre::bail!("`frame_rate` must be at least 1");
        }
        Ok(())
    }

    /// The canvas that the simulation runs on.
    pub fn canvas(&self) -> Result<starfield::canvas::Canvas> {
        Ok(starfield::canvas::Canvas::new(
            self.canvas.width,
            self.canvas.height,
        )?)
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests aren't so strict")]
mod test {
    use super::*;

    #[test]
    fn bundled_default_matches_the_defaults() {
        let bundled = Config::parse(DEFAULT_CONFIG).unwrap();
        let defaults = Config::default();

        assert_eq!(bundled.log_level, defaults.log_level);
        assert_eq!(bundled.frame_rate, defaults.frame_rate);
        assert_eq!(bundled.canvas.width, defaults.canvas.width);
        assert_eq!(bundled.canvas.height, defaults.canvas.height);
        assert_eq!(bundled.colours.background, defaults.colours.background);
        assert_eq!(bundled.colours.star, defaults.colours.star);
        assert_eq!(bundled.simulation, defaults.simulation);
    }

    #[test]
    fn missing_settings_fall_back_to_defaults() {
        let config = Config::parse(
            "
            frame_rate = 30
            [simulation]
            max_speed = 5.0
            ",
        )
        .unwrap();

        assert_eq!(config.frame_rate, 30);
        assert_eq!(config.simulation.max_speed, 5.0);
        assert_eq!(config.simulation.spawn_threshold, 0.95);
        assert_eq!(config.canvas.width, 1280.0);
    }

    #[test]
    fn zero_frame_rate_is_rejected() {
        let error = Config::parse("frame_rate = 0").unwrap_err();
        assert_eq!(error.to_string(), "`frame_rate` must be at least 1");
    }

    #[test]
    fn bad_canvas_is_rejected() {
        let config = Config::parse("[canvas]\nwidth = -3.0").unwrap();
        let error = config.canvas().unwrap_err();
        assert_eq!(error.to_string(), "Invalid canvas dimensions: -3x960");
    }

    #[test]
    fn loads_from_a_custom_path() {
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        std::fs::write(file.path(), "log_level = \"debug\"\n[colours]\nstar = [1.0, 0.0, 0.0, 1.0]")
            .unwrap();

        let config = Config::load(Some(file.path().into())).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.colours.star, crate::surface::RED);
    }

    #[test]
    fn missing_custom_path_is_an_error() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("nope.toml");
        let error = Config::load(Some(path)).unwrap_err();
        assert!(error.to_string().starts_with("Couldn't load config at"));
    }
}
