use thiserror::Error;

use crate::error::ErrorCategory;

/// Failures of the pure rules. They carry only strings, so they are cheap to
/// clone into reports.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("git config is not parseable (line {line}): {reason}")]
    UnparseableConfig { line: usize, reason: String },

    #[error("no url configured for remote '{remote}'")]
    MissingRemote { remote: String },
}

impl DomainError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnparseableConfig { .. } => vec![
                "The repository's .git/config could not be read as a git config file".into(),
                "Pass the URL explicitly: primer setup --repo-url <URL>".into(),
            ],
            Self::MissingRemote { remote } => vec![
                format!("Add the remote with: git remote add {remote} <URL>"),
                "Or pass it explicitly: primer setup --repo-url <URL>".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnparseableConfig { .. } => ErrorCategory::Validation,
            Self::MissingRemote { .. } => ErrorCategory::NotFound,
        }
    }
}
