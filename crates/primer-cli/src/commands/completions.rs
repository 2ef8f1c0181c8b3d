//! Shell completion generation.

use std::io;

use clap::CommandFactory;
use clap_complete::{Generator, generate, shells};

use crate::cli::{Cli, CompletionsArgs, Shell};
use crate::error::CliResult;

const BIN_NAME: &str = "primer";

pub fn execute(args: CompletionsArgs) -> CliResult<()> {
    let mut out = io::stdout();
    match args.shell {
        Shell::Bash => write_completions(shells::Bash, &mut out),
        Shell::Zsh => write_completions(shells::Zsh, &mut out),
        Shell::Fish => write_completions(shells::Fish, &mut out),
        Shell::PowerShell => write_completions(shells::PowerShell, &mut out),
        Shell::Elvish => write_completions(shells::Elvish, &mut out),
    }
    Ok(())
}

fn write_completions<G: Generator>(shell: G, out: &mut dyn io::Write) {
    generate(shell, &mut Cli::command(), BIN_NAME, out);
}
