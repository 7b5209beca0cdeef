//! All the CLI arguments for Shooting Stars

/// Watch shooting stars fly across your terminal. Press `q` or `Esc` to quit.
#[derive(clap::Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
#[non_exhaustive]
pub(crate) struct CliArgs {
    /// Path to a config file. Defaults to `config.toml` in the standard config directory.
    #[arg(short, long)]
    pub config: Option<std::path::PathBuf>,

    /// Seed the random number generator so that a run can be repeated exactly.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Run this many ticks without a terminal, print a summary and exit.
    #[arg(long, value_name = "TICKS")]
    pub headless: Option<u64>,

    /// Override the log level from the config file.
    #[arg(long)]
    pub log_level: Option<crate::config::LogLevel>,

    /// Override the log path from the config file.
    #[arg(long)]
    pub log_path: Option<std::path::PathBuf>,
}
