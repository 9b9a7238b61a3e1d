//! recipe-runner CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use console::style;
use recipe_runner::cli::{Cli, CommandDispatcher};
use recipe_runner::config::RunnerConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("recipe_runner=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("recipe_runner=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(cli: &Cli) -> recipe_runner::Result<i32> {
    let config = RunnerConfig::load(cli.config.as_deref(), cli.overrides())?;
    tracing::debug!("Resolved configuration: {:?}", config);

    let dispatcher = CommandDispatcher::new(config)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = dispatcher.dispatch(cli, &mut out)?;
    Ok(result.exit_code)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("recipe-runner {} starting", env!("CARGO_PKG_VERSION"));

    match run(&cli) {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}
