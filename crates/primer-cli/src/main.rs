//! `primer`: one-shot setup of a fresh copy of the template repository.
//!
//! Exit status is 0 on success, 1 for internal failures, 2 for unusable
//! input, 3 when something the run needs is missing (such as the `origin`
//! remote) and 4 for configuration problems.

use std::io::{self, IsTerminal as _};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, warn};

use crate::{
    cli::{Cli, Commands, GlobalArgs},
    config::AppConfig,
    error::{CliResult, ResultExt},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;
mod prompt;

fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version land here too, with exit code 0.
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(2));
        }
    };

    if let Err(e) = init_logging(&cli.global) {
        eprintln!("primer: {e:#}");
        return ExitCode::FAILURE;
    }
    if let Some(e) = dotenv_problem(dotenv) {
        warn!(error = %e, "Ignoring .env");
    }

    let verbose = cli.global.verbose > 0;
    let color = !cli.global.no_color && std::io::stderr().is_terminal();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            err.log();
            eprint!("{}", err.render(verbose, color));
            ExitCode::from(err.exit_code())
        }
    }
}

/// A missing `.env` is normal; anything else is worth a warning.
fn dotenv_problem(result: Result<PathBuf, dotenvy::Error>) -> Option<dotenvy::Error> {
    match result {
        Ok(_) => None,
        Err(dotenvy::Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => Some(e),
    }
}

fn run(cli: Cli) -> CliResult<()> {
    debug!(command = ?cli.command, "dispatching");

    match cli.command {
        Commands::Setup(args) => {
            let repository = commands::open_repository(args.path.as_deref())?;
            let (config, output) = settings(&cli.global, &repository.root())?;
            commands::setup::execute(args, repository, config, output)
        }
        Commands::Guess(args) => {
            let dir = args.path.clone().unwrap_or_else(|| PathBuf::from("."));
            let (_, output) = settings(&cli.global, &dir)?;
            commands::guess::execute(args, output)
        }
        Commands::Config(cmd) => {
            let (config, output) = settings(&cli.global, Path::new("."))?;
            commands::config::execute(cmd, config, output)
        }
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

/// Configuration with its local layer read from `local_dir`, and the output
/// it selects.
fn settings(global: &GlobalArgs, local_dir: &Path) -> CliResult<(AppConfig, OutputManager)> {
    let config = AppConfig::load(local_dir, global.config.as_ref())
        .or_cli(|| "Failed to load configuration")?;
    let output = OutputManager::new(global, &config);
    Ok((config, output))
}
