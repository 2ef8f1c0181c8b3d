//! Everything the CLI writes to stdout goes through [`OutputManager`].
//!
//! Progress lines are tagged with a [`Tone`] and dropped in quiet or JSON
//! mode. Command results go out through [`OutputManager::print`] or
//! [`OutputManager::json`].

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::{OwoColorize, Style};
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Kind of progress line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Something changed.
    Done,
    /// A step had nothing to do or was left out.
    Skipped,
    /// Bookkeeping, such as a commit.
    Note,
    /// Start or end of a run.
    Heading,
}

impl Tone {
    fn symbol(self) -> Option<&'static str> {
        match self {
            Self::Done => Some("\u{2713}"),
            Self::Skipped => Some("\u{26a0}"),
            Self::Note => Some("\u{2139}"),
            Self::Heading => None,
        }
    }

    fn style(self) -> Style {
        match self {
            Self::Done => Style::new().green(),
            Self::Skipped => Style::new().yellow(),
            Self::Note => Style::new().blue(),
            Self::Heading => Style::new().cyan().bold(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OutputManager {
    format: OutputFormat,
    quiet: bool,
    color: bool,
    term: Term,
}

/// `Auto` becomes `Human` on a terminal and `Plain` otherwise.
fn resolve_format(requested: OutputFormat, stdout_is_tty: bool) -> OutputFormat {
    match requested {
        OutputFormat::Auto if stdout_is_tty => OutputFormat::Human,
        OutputFormat::Auto => OutputFormat::Plain,
        other => other,
    }
}

impl OutputManager {
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let format = resolve_format(args.output_format, io::stdout().is_terminal());
        Self {
            format,
            quiet: args.quiet,
            color: format == OutputFormat::Human && !args.no_color && !config.output.no_color,
            term: Term::stdout(),
        }
    }

    /// A progress line. Silent when quiet or when emitting JSON.
    pub fn say(&self, tone: Tone, msg: &str) -> io::Result<()> {
        if self.quiet || self.is_json() {
            return Ok(());
        }
        self.term.write_line(&self.decorate(tone, msg))
    }

    fn decorate(&self, tone: Tone, msg: &str) -> String {
        let text = match tone.symbol() {
            Some(symbol) => format!("{symbol} {msg}"),
            None => msg.to_owned(),
        };
        if self.color {
            text.style(tone.style()).to_string()
        } else {
            text
        }
    }

    /// Undecorated result text; suppressed by `--quiet`.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Pretty-printed JSON result, written even when quiet.
    pub fn json<T: Serialize>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }
}
