//! The error type every core operation returns.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

#[derive(Debug, Error, Clone)]
pub enum PrimerError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Application(#[from] ApplicationError),
}

impl PrimerError {
    /// Next steps for the user, most specific first.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category(),
            Self::Application(e) => e.category(),
        }
    }
}

/// How a failure should be treated by a front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The input was wrong; retrying with other input can succeed.
    Validation,
    /// Something the run needs does not exist.
    NotFound,
    /// An I/O or git failure, or a bug.
    Internal,
}

pub type PrimerResult<T> = Result<T, PrimerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_not_found_is_not_found() {
        let err: PrimerError = ApplicationError::RemoteUrlNotFound {
            remote: "origin".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(err.suggestions().iter().any(|s| s.contains("--repo-url")));
    }

    #[test]
    fn domain_errors_keep_their_message() {
        let err: PrimerError = DomainError::MissingRemote {
            remote: "origin".into(),
        }
        .into();
        assert_eq!(err.to_string(), "no url configured for remote 'origin'");
    }
}
