//! Errors surfaced by the `primer` binary and how they reach the terminal.
//!
//! Every failure carries a [`FailureKind`], which picks the process exit code,
//! and a list of hints printed under the message.

use std::error::Error as StdError;
use std::io;

use owo_colors::{OwoColorize, Style};
use thiserror::Error;

use primer_core::error::{ErrorCategory, PrimerError};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// A flag value or prompt reply that cannot be used.
    #[error("Invalid {what}: {reason}")]
    BadArgument { what: &'static str, reason: String },

    /// Configuration could not be loaded, serialised or written.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    #[error("Setup failed: {0}")]
    Core(#[from] PrimerError),

    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// The binary was built without a cargo feature the command needs.
    #[error("'{feature}' support was not compiled into this binary")]
    FeatureNotAvailable { feature: &'static str },
}

impl From<io::Error> for CliError {
    fn from(source: io::Error) -> Self {
        Self::Io {
            context: format!("I/O error: {source}"),
            source,
        }
    }
}

/// Coarse classification of a failure, one exit code each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Usage,
    Missing,
    Config,
    Internal,
}

impl FailureKind {
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Internal => 1,
            Self::Usage => 2,
            Self::Missing => 3,
            Self::Config => 4,
        }
    }
}

impl CliError {
    pub fn bad_argument(what: &'static str, reason: impl Into<String>) -> Self {
        Self::BadArgument {
            what,
            reason: reason.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Self::BadArgument { .. } => FailureKind::Usage,
            Self::Config { .. } | Self::FeatureNotAvailable { .. } => FailureKind::Config,
            Self::Io { .. } => FailureKind::Internal,
            Self::Core(core) => match core.category() {
                ErrorCategory::Validation => FailureKind::Usage,
                ErrorCategory::NotFound => FailureKind::Missing,
                ErrorCategory::Internal => FailureKind::Internal,
            },
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.kind().exit_code()
    }

    /// What the user can try next.
    pub fn hints(&self) -> Vec<String> {
        match self {
            Self::BadArgument { what, .. } => vec![
                format!("Pass a different {what}"),
                "Run 'primer setup --help' for the accepted values".into(),
            ],
            Self::Config { .. } => vec![
                "Check .primer.toml and the file shown by 'primer config path'".into(),
                "PRIMER__* environment variables override both files".into(),
                "'primer config init --force' writes a fresh default".into(),
            ],
            Self::Core(core) => core.suggestions(),
            Self::Io { .. } => vec!["Check that the path exists and is writable".into()],
            Self::FeatureNotAvailable { feature } => vec![
                format!("Reinstall with: cargo install primer-cli --features {feature}"),
                "Or pass every value as a flag: primer setup --repo-url <URL> --package-name <NAME>"
                    .into(),
            ],
        }
    }

    /// Render the message, its causes when `verbose`, and the hints.
    ///
    /// Without `color` the text carries no ANSI escapes.
    pub fn render(&self, verbose: bool, color: bool) -> String {
        let paint = |text: &str, style: Style| {
            if color {
                text.style(style).to_string()
            } else {
                text.to_string()
            }
        };

        let marker = if color { "\u{2717} " } else { "" };
        let mut out = format!(
            "\n{}{}\n",
            paint(&format!("{marker}Error:"), Style::new().red().bold()),
            paint(&format!(" {self}"), Style::new().red()),
        );

        if verbose {
            let mut cause = self.source();
            while let Some(err) = cause {
                out.push_str(&paint(&format!("  caused by: {err}\n"), Style::new().dimmed()));
                cause = err.source();
            }
        }

        let hints = self.hints();
        if !hints.is_empty() {
            out.push_str(&format!("\n{}\n", paint("Try:", Style::new().yellow().bold())));
            for hint in &hints {
                out.push_str(&format!("  - {hint}\n"));
            }
        }

        if !verbose && self.source().is_some() {
            out.push_str(&paint(
                "\n(run with -v to see the underlying error)\n",
                Style::new().dimmed(),
            ));
        }

        out
    }

    /// Record the failure in the log before it is printed.
    pub fn log(&self) {
        let kind = self.kind();
        match kind {
            FailureKind::Usage | FailureKind::Missing => {
                tracing::warn!(?kind, error = %self, "command failed")
            }
            FailureKind::Config | FailureKind::Internal => {
                tracing::error!(?kind, error = %self, "command failed")
            }
        }
        if let Some(cause) = self.source() {
            tracing::debug!(%cause, "underlying error");
        }
    }
}

/// Attach context to foreign errors where they cross into the CLI.
pub trait ResultExt<T> {
    fn or_cli<S: Into<String>>(self, context: impl FnOnce() -> S) -> CliResult<T>;
}

impl<T> ResultExt<T> for Result<T, io::Error> {
    fn or_cli<S: Into<String>>(self, context: impl FnOnce() -> S) -> CliResult<T> {
        self.map_err(|source| CliError::Io {
            context: context().into(),
            source,
        })
    }
}

/// Configuration loading reports through `anyhow`; the whole chain goes into
/// the message.
impl<T> ResultExt<T> for anyhow::Result<T> {
    fn or_cli<S: Into<String>>(self, context: impl FnOnce() -> S) -> CliResult<T> {
        self.map_err(|e| CliError::config(format!("{}: {e:#}", context().into())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use primer_core::application::ApplicationError;

    fn missing_remote() -> CliError {
        PrimerError::from(ApplicationError::RemoteUrlNotFound {
            remote: "origin".into(),
        })
        .into()
    }

    fn failed_write() -> CliError {
        Err::<(), _>(io::Error::other("disk full"))
            .or_cli(|| "writing config")
            .unwrap_err()
    }

    #[test]
    fn exit_codes_follow_kind() {
        assert_eq!(CliError::bad_argument("package name", "empty").exit_code(), 2);
        assert_eq!(missing_remote().exit_code(), 3);
        assert_eq!(CliError::config("broken").exit_code(), 4);
        assert_eq!(
            CliError::FeatureNotAvailable {
                feature: "interactive"
            }
            .exit_code(),
            4
        );
        assert_eq!(failed_write().exit_code(), 1);
    }

    #[test]
    fn core_filesystem_failure_is_internal() {
        let err: CliError = PrimerError::from(ApplicationError::FilesystemError {
            path: "Cargo.toml".into(),
            reason: "denied".into(),
        })
        .into();
        assert_eq!(err.kind(), FailureKind::Internal);
    }

    #[test]
    fn missing_remote_hints_at_flag() {
        assert!(missing_remote().hints().iter().any(|h| h.contains("--repo-url")));
    }

    #[test]
    fn feature_hint_names_feature() {
        let err = CliError::FeatureNotAvailable {
            feature: "interactive",
        };
        assert!(err.hints().iter().any(|h| h.contains("--features interactive")));
    }

    #[test]
    fn plain_render_has_no_escapes() {
        let text = missing_remote().render(false, false);
        assert!(text.starts_with("\nError: Setup failed:"));
        assert!(text.contains("Try:"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn verbose_render_walks_causes() {
        let err = failed_write();

        let terse = err.render(false, false);
        assert!(!terse.contains("disk full"));
        assert!(terse.contains("-v"));

        let verbose = err.render(true, false);
        assert!(verbose.contains("caused by: disk full"));
        assert!(!verbose.contains("run with -v"));
    }

    #[test]
    fn anyhow_chain_becomes_config_message() {
        let err = Err::<(), _>(anyhow::anyhow!("bad toml"))
            .or_cli(|| "loading configuration")
            .unwrap_err();
        match err {
            CliError::Config { message, .. } => {
                assert_eq!(message, "loading configuration: bad toml")
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
