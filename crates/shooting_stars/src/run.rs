//! Main entrypoint for running Shooting Stars

use clap::Parser as _;
use color_eyre::eyre::{ContextCompat as _, Result, WrapErr as _};
use rand::{Rng as _, SeedableRng as _};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _, Layer as _};

use starfield::simulation::Simulation;

use crate::cli_args::CliArgs;
use crate::config::{Config, LogLevel};
use crate::input::Input;
use crate::renderer::Renderer;
use crate::ticker::Ticker;

/// The environment variable for setting custom log filters.
const LOG_FILTERS_ENV: &str = "SHOOTING_STARS_LOG";

/// Commands to control the various tasks/threads
#[non_exhaustive]
#[derive(Clone, Debug)]
pub(crate) enum Protocol {
    /// The entire application is exiting.
    End,
}

/// Where, if anywhere, the logs are going. `main()` uses this to tell the user where to look.
#[derive(Default, Debug)]
pub(crate) struct Logging {
    /// Is the application logging?
    pub is_enabled: bool,
    /// The log file.
    pub path: std::path::PathBuf,
}

/// Main entrypoint
pub(crate) async fn run(logging: &mut Logging) -> Result<()> {
    let cli_args = CliArgs::parse();
    let config = Config::load(cli_args.config.clone()).wrap_err("Bad config file")?;
    setup_logging(&cli_args, &config, logging)?;

    tracing::info!("Starting Shooting Stars");
    tracing::debug!("Loaded config: {config:?}");

    let canvas = config.canvas()?;
    let simulation = Simulation::new(canvas, config.simulation.clone())?;

    let seed = cli_args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    tracing::info!("Using random seed: {seed}");
    let rng = rand::rngs::StdRng::seed_from_u64(seed);

    match cli_args.headless {
        Some(ticks) => {
            print_headless_summary(simulation, rng, ticks);
            Ok(())
        }
        None => run_terminal(simulation, rng, &config).await,
    }
}

/// Print the summary of a headless run, it's the only output such a run has.
#[expect(
    clippy::print_stdout,
    reason = "The summary is the whole point of a headless run"
)]
fn print_headless_summary(mut simulation: Simulation, mut rng: rand::rngs::StdRng, ticks: u64) {
    let summary = run_headless(&mut simulation, &mut rng, ticks);
    tracing::info!("{summary}");
    println!("{summary}");
}

/// What a headless run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct HeadlessSummary {
    /// The number of ticks run.
    pub ticks: u64,
    /// Stars added over the whole run.
    pub spawned: u64,
    /// Stars dropped over the whole run.
    pub removed: usize,
    /// Stars left at the end.
    pub alive: usize,
    /// Stars left at the end that are on the canvas itself.
    pub visible: usize,
}

impl std::fmt::Display for HeadlessSummary {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "Ran {} ticks: {} stars spawned, {} removed, {} alive ({} on the canvas)",
            self.ticks, self.spawned, self.removed, self.alive, self.visible
        )
    }
}

/// Run the simulation as fast as possible without a terminal.
pub(crate) fn run_headless<R: rand::Rng + ?Sized>(
    simulation: &mut Simulation,
    rng: &mut R,
    ticks: u64,
) -> HeadlessSummary {
    tracing::debug!("Running {ticks} headless ticks");

    let mut spawned: u64 = 0;
    let mut removed: usize = 0;
    for _ in 0..ticks {
        let report = simulation.tick(rng);
        spawned += u64::from(report.spawned);
        removed += report.removed;
    }

    let canvas = *simulation.canvas();
    let visible = simulation
        .stars()
        .iter()
        .filter(|star| canvas.contains(star.position()))
        .count();

    HeadlessSummary {
        ticks,
        spawned,
        removed,
        alive: simulation.stars().len(),
        visible,
    }
}

/// Animate the stars in the user's terminal until they quit.
async fn run_terminal(
    mut simulation: Simulation,
    mut rng: rand::rngs::StdRng,
    config: &Config,
) -> Result<()> {
    let (protocol_tx, _) = tokio::sync::broadcast::channel(16);
    let mut protocol_rx = protocol_tx.subscribe();

    let terminal = crate::renderer::get_termwiz_terminal()?;
    let mut renderer = Renderer::new(terminal, config.colours)?;
    let input_thread_handle = Input::start(protocol_tx.clone());
    let mut ticker = Ticker::new(config.frame_rate);
    tracing::debug!("Ticking every {:?}", ticker.interval());

    // The terminal has to be restored even when the loop fails.
    let result = tick_loop(
        &mut simulation,
        &mut rng,
        &mut renderer,
        &mut ticker,
        &mut protocol_rx,
    )
    .await;
    let restored = renderer.restore();
    result?;
    restored?;

    if input_thread_handle.is_finished() {
        // The STDIN loop blocks on reading, so it can't hear the protocol's `End` message.
        // Therefore we should only join it if it finished of its own accord.
        input_thread_handle
            .join()
            .map_err(|err| color_eyre::eyre::eyre!("STDIN handle: {err:?}"))??;
    }

    tracing::trace!("Leaving the terminal run");
    Ok(())
}

/// Tick the simulation and render every tick, until the protocol says to stop.
async fn tick_loop<T: termwiz::terminal::Terminal>(
    simulation: &mut Simulation,
    rng: &mut rand::rngs::StdRng,
    renderer: &mut Renderer<T>,
    ticker: &mut Ticker,
    protocol_rx: &mut tokio::sync::broadcast::Receiver<Protocol>,
) -> Result<()> {
    tracing::debug!("Starting tick loop");

    #[expect(
        clippy::integer_division_remainder_used,
        reason = "This is caused by the `tokio::select!`"
    )]
    loop {
        tokio::select! {
            () = ticker.sleep_until_next_tick() => {
                simulation.tick(rng);
                renderer.render(simulation.stars(), simulation.canvas())?;
            },
            Ok(message) = protocol_rx.recv() => {
                if matches!(message, Protocol::End) {
                    break;
                }
            }
        }
    }

    tracing::debug!("Tick loop finished after {} ticks", simulation.ticks());
    Ok(())
}

/// Signal all task/thread loops to exit.
///
/// We keep it in its own function because we need to handle the error separately. If the error
/// were to be bubbled with `?` as usual, there's a chance it would never be logged.
pub(crate) fn broadcast_protocol_end(protocol_tx: &tokio::sync::broadcast::Sender<Protocol>) {
    tracing::debug!("Broadcasting the protocol `End` message to all listeners");
    let result = protocol_tx.send(Protocol::End);
    if let Err(error) = result {
        tracing::error!("{error:?}");
    }
}

/// Setup logging
fn setup_logging(cli_args: &CliArgs, config: &Config, logging: &mut Logging) -> Result<()> {
    let are_log_filters_manually_set = std::env::var(LOG_FILTERS_ENV).is_ok();

    let path = cli_args
        .log_path
        .clone()
        .unwrap_or_else(|| config.log_path.clone());
    let level = cli_args
        .log_level
        .clone()
        .unwrap_or_else(|| config.log_level.clone());
    let level_as_string = format!("{level:?}").to_lowercase();

    let is_loggable = !matches!(level, LogLevel::Off) || are_log_filters_manually_set;
    if !is_loggable {
        return Ok(());
    }

    let directory = path.parent().context("Couldn't get log path's parent")?;
    std::fs::create_dir_all(directory)?;
    let file = std::fs::File::create(&path)?;

    let filters = if are_log_filters_manually_set {
        if let Ok(user_filters) = std::env::var(LOG_FILTERS_ENV) {
            std::env::set_var("RUST_LOG", user_filters);
        }

        tracing_subscriber::EnvFilter::builder()
            .with_default_directive("error".parse()?)
            .from_env_lossy()
    } else {
        tracing_subscriber::EnvFilter::builder()
            .with_default_directive("off".parse()?)
            .from_env_lossy()
            .add_directive(format!("shooting_stars={level_as_string}").parse()?)
            .add_directive(format!("starfield={level_as_string}").parse()?)
    };

    let logfile_layer = tracing_subscriber::fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_filter(filters);
    tracing_subscriber::registry().with(logfile_layer).init();

    logging.is_enabled = true;
    logging.path = path;

    Ok(())
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests aren't so strict")]
mod test {
    use rand::SeedableRng as _;

    use super::*;

    fn simulation() -> Simulation {
        let canvas = starfield::canvas::Canvas::new(1280.0, 960.0).unwrap();
        Simulation::new(canvas, starfield::config::Config::default()).unwrap()
    }

    #[test]
    fn headless_counts_add_up() {
        let mut simulation = simulation();
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let summary = run_headless(&mut simulation, &mut rng, 3000);

        assert_eq!(summary.ticks, 3000);
        assert_eq!(simulation.ticks(), 3000);
        assert!(summary.spawned > 0);
        assert_eq!(
            summary.alive,
            usize::try_from(summary.spawned).unwrap() - summary.removed
        );
        assert_eq!(summary.alive, simulation.stars().len());
        assert!(summary.visible <= summary.alive);
    }

    #[test]
    fn seeded_headless_run_is_pinned() {
        let mut simulation = simulation();
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let summary = run_headless(&mut simulation, &mut rng, 20_000);

        assert_eq!(
            summary.to_string(),
            "Ran 20000 ticks: 993 stars spawned, 2 removed, 991 alive (11 on the canvas)"
        );
    }

    #[test]
    fn zero_ticks_does_nothing() {
        let mut simulation = simulation();
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let summary = run_headless(&mut simulation, &mut rng, 0);

        assert_eq!(
            summary,
            HeadlessSummary {
                ticks: 0,
                spawned: 0,
                removed: 0,
                alive: 0,
                visible: 0,
            }
        );
    }
}
