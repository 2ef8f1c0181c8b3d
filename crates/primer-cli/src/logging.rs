//! Log setup for the `primer` binary.
//!
//! The library crates only emit events; this is the one place a subscriber
//! is installed. Logs go to stderr so they never mix with command output.
//! `RUST_LOG`, when set, replaces the level chosen by `-v`/`-q` entirely.

use std::io::{self, IsTerminal as _};

use anyhow::Context as _;
use tracing_subscriber::{
    EnvFilter,
    filter::{Directive, LevelFilter},
    fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::cli::GlobalArgs;

/// The binary and its workspace crates.
const TARGETS: [&str; 3] = ["primer", "primer_core", "primer_adapters"];

pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(from_env) => from_env,
        Err(_) => default_filter(level_for(args))?,
    };

    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(!args.no_color && io::stderr().is_terminal())
        .with_target(args.verbose >= 2)
        .without_time();

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .context("a tracing subscriber is already installed")
}

/// `-q` wins; otherwise each `-v` raises the level one step from WARN.
fn level_for(args: &GlobalArgs) -> LevelFilter {
    if args.quiet {
        return LevelFilter::ERROR;
    }
    match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Everything outside [`TARGETS`] stays off.
fn default_filter(level: LevelFilter) -> anyhow::Result<EnvFilter> {
    TARGETS.iter().try_fold(EnvFilter::new("off"), |filter, target| {
        let directive = format!("{target}={level}")
            .parse::<Directive>()
            .with_context(|| format!("bad log directive for {target}"))?;
        Ok(filter.add_directive(directive))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    fn args(verbose: u8, quiet: bool) -> GlobalArgs {
        GlobalArgs {
            verbose,
            quiet,
            no_color: true,
            config: None,
            output_format: OutputFormat::Auto,
        }
    }

    #[test]
    fn each_flag_raises_the_level() {
        let levels: Vec<_> = (0..5).map(|v| level_for(&args(v, false))).collect();
        assert_eq!(
            levels,
            [
                LevelFilter::WARN,
                LevelFilter::INFO,
                LevelFilter::DEBUG,
                LevelFilter::TRACE,
                LevelFilter::TRACE,
            ]
        );
    }

    #[test]
    fn quiet_means_errors_only() {
        assert_eq!(level_for(&args(0, true)), LevelFilter::ERROR);
    }

    #[test]
    fn default_filter_names_every_target() {
        let rendered = default_filter(LevelFilter::DEBUG).unwrap().to_string();
        for target in TARGETS {
            assert!(rendered.contains(target), "{rendered}");
        }
    }
}
