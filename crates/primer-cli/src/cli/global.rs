//! Flags accepted before or after any subcommand.

use std::path::PathBuf;

use clap::{ArgAction, Args, ValueEnum, builder::FalseyValueParser};

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// More log output: -v shows setup steps, -vv every file, -vvv everything.
    /// RUST_LOG takes precedence when set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print errors and requested results only.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Never emit ANSI colors.
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Configuration file layered above the global and repository ones.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Auto)]
    pub output_format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human on a terminal, plain when piped.
    #[default]
    Auto,
    /// Colors and status symbols.
    Human,
    /// Status symbols, no colors.
    Plain,
    /// Results as one JSON document, no progress lines.
    Json,
}
