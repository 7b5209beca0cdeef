//! Just `main()`. Keep as small as possible.

pub mod cli_args;
pub mod config;
pub mod input;
pub mod renderer;
pub mod run;
pub mod surface;
pub mod ticker;
pub mod viewport;

use color_eyre::eyre::Result;

#[expect(
    clippy::print_stdout,
    clippy::print_stderr,
    reason = "It's our central place for communicating with the user on CLI"
)]
#[expect(clippy::exit, reason = "Errors have already been reported, just the exit code remains")]
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let mut logging = run::Logging::default();
    let result = run::run(&mut logging).await;
    tracing::debug!("Shooting Stars is exiting");

    match result {
        Ok(()) => {
            if logging.is_enabled {
                println!("Logs saved to {}", logging.path.display());
            }
            Ok(())
        }
        Err(error) => {
            tracing::error!("{error:?}");
            eprintln!("Error: {error:?}");
            if logging.is_enabled {
                eprintln!("See {} for more details", logging.path.display());
            }
            std::process::exit(1);
        }
    }
}
