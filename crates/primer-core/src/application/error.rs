//! Failures of a setup run: I/O through the ports, git, missing input.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A port could not read or write a file.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The version-control collaborator failed.
    #[error("Version control failed to {operation}: {reason}")]
    VersionControl { operation: String, reason: String },

    /// No repository URL was given and none could be guessed.
    #[error("No repository URL given and no '{remote}' remote found")]
    RemoteUrlNotFound { remote: String },

    /// Reading a reply from the user failed.
    #[error("Prompt failed: {reason}")]
    PromptFailed { reason: String },

    /// In-memory adapter state was poisoned.
    #[error("Adapter state lock poisoned")]
    LockPoisoned,
}

impl ApplicationError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that the file exists and is UTF-8 text".into(),
                "Check that you have write permissions".into(),
            ],
            Self::VersionControl { operation, .. } => vec![
                format!("git could not {}", operation),
                "Run `git status` to inspect the repository state".into(),
                "The run is not rolled back; fix the issue and finish by hand".into(),
            ],
            Self::RemoteUrlNotFound { remote } => vec![
                format!("Add a remote: git remote add {} <URL>", remote),
                "Or pass it explicitly: primer setup --repo-url <URL>".into(),
                "Or run interactively: primer setup --interactive".into(),
            ],
            Self::PromptFailed { .. } => vec![
                "Interactive input is unavailable".into(),
                "Pass --repo-url and --package-name instead".into(),
            ],
            Self::LockPoisoned => vec!["This is a bug in a test adapter".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } | Self::VersionControl { .. } => ErrorCategory::Internal,
            Self::RemoteUrlNotFound { .. } => ErrorCategory::NotFound,
            Self::PromptFailed { .. } => ErrorCategory::Validation,
            Self::LockPoisoned => ErrorCategory::Internal,
        }
    }
}
