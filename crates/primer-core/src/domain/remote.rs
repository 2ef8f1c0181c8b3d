//! Remote URL guesses, and reading one out of git config text for
//! repositories libgit2 does not open.
//!
//! Only the subset of the git config syntax needed to find
//! `[remote "<name>"] url = ...` is understood: section headers, `key = value`
//! entries, bare boolean keys, comments and blank lines.

use std::fmt;

use super::error::DomainError;

/// Remote whose URL the setup tool guesses.
pub const DEFAULT_REMOTE: &str = "origin";

/// Shown in place of a guess when no remote URL could be found.
pub const MSG_GIT_URL_NOT_FOUND: &str = "<no remote url found, please enter one>";

/// Best-effort remote URL, shown to the user before they confirm it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoUrlGuess {
    Found(String),
    NotFound,
}

impl RepoUrlGuess {
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Found(url) => Some(url),
            Self::NotFound => None,
        }
    }
}

impl fmt::Display for RepoUrlGuess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found(url) => f.write_str(url),
            Self::NotFound => f.write_str(MSG_GIT_URL_NOT_FOUND),
        }
    }
}

impl From<Result<String, DomainError>> for RepoUrlGuess {
    fn from(result: Result<String, DomainError>) -> Self {
        match result {
            Ok(url) => Self::Found(url),
            Err(_) => Self::NotFound,
        }
    }
}

/// Find the `url` of `[remote "<remote>"]` in git config text.
pub fn remote_url_from_config(text: &str, remote: &str) -> Result<String, DomainError> {
    let mut in_remote = false;
    let mut seen_section = false;

    for (idx, raw) in text.lines().enumerate() {
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let header = header
                .strip_suffix(']')
                .ok_or_else(|| DomainError::UnparseableConfig {
                    line: idx + 1,
                    reason: format!("unterminated section header: {line}"),
                })?;
            seen_section = true;
            in_remote = section_matches(header, remote);
            continue;
        }

        if !seen_section {
            return Err(DomainError::UnparseableConfig {
                line: idx + 1,
                reason: "entry outside of any section".into(),
            });
        }

        if !in_remote {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            if key.trim().eq_ignore_ascii_case("url") {
                let value = value.trim().trim_matches('"');
                if !value.is_empty() {
                    return Ok(value.to_string());
                }
            }
        }
    }

    Err(DomainError::MissingRemote {
        remote: remote.to_string(),
    })
}

/// Shorthand for [`remote_url_from_config`] on the `origin` remote.
pub fn origin_url_from_config(text: &str) -> Result<String, DomainError> {
    remote_url_from_config(text, DEFAULT_REMOTE)
}

fn section_matches(header: &str, remote: &str) -> bool {
    let mut parts = header.trim().splitn(2, char::is_whitespace);
    let section = parts.next().unwrap_or_default();
    let subsection = parts.next().map(|s| s.trim().trim_matches('"'));
    section.eq_ignore_ascii_case("remote") && subsection == Some(remote)
}

// Comments start at `#` or `;` outside of quotes.
fn strip_comment(line: &str) -> &str {
    let mut quoted = false;
    for (i, ch) in line.char_indices() {
        match ch {
            '"' => quoted = !quoted,
            '#' | ';' if !quoted => return &line[..i],
            _ => {}
        }
    }
    line
}
