//! Resolving setup inputs by asking the user.
//!
//! Each helper asks exactly one question through the [`Prompter`] port and
//! shows the best guess in the prompt. An empty reply keeps the guess.

use std::fmt::Display;

use tracing::debug;

use crate::{
    application::ports::{Prompter, VersionControl},
    domain::{DEFAULT_REMOTE, RepoUrlGuess, get_package_name},
    error::PrimerResult,
};

pub const RETIRE_PROMPT: &str = "Remove the setup tool's own files now? [y/N]";

/// Prompt asking for the repository URL.
pub fn remote_repo_prompt(guess: &impl Display) -> String {
    format!("Repository URL (enter to accept) [{guess}]")
}

/// Prompt asking for the package name.
pub fn package_name_prompt(guess: &impl Display) -> String {
    format!("Package name (enter to accept) [{guess}]")
}

/// Guess the repository URL from the `origin` remote of `repository`.
///
/// A missing or unreadable config, or one without an `origin` url, degrades
/// to [`RepoUrlGuess::NotFound`] instead of failing.
pub fn guess_repo_url(repository: &dyn VersionControl) -> RepoUrlGuess {
    let guess = match repository.remote_url(DEFAULT_REMOTE) {
        Ok(url) => RepoUrlGuess::Found(url),
        Err(e) => {
            debug!(error = %e, remote = DEFAULT_REMOTE, "No remote url");
            RepoUrlGuess::NotFound
        }
    };
    debug!(guess = %guess, "Repository URL guessed");
    guess
}

/// Ask for the repository URL, offering `guess`.
///
/// Returns `None` only when the user accepted a guess that was not found.
pub fn resolve_repo_url(
    guess: &RepoUrlGuess,
    prompter: &dyn Prompter,
) -> PrimerResult<Option<String>> {
    let reply = prompter.ask(&remote_repo_prompt(guess))?;
    let reply = reply.trim();
    if reply.is_empty() {
        Ok(guess.url().map(str::to_string))
    } else {
        Ok(Some(reply.to_string()))
    }
}

/// Ask for the package name, offering the one derived from `repo_url`.
pub fn resolve_package_name(repo_url: &str, prompter: &dyn Prompter) -> PrimerResult<String> {
    let guess = get_package_name(repo_url);
    let reply = prompter.ask(&package_name_prompt(&guess))?;
    let reply = reply.trim();
    if reply.is_empty() {
        Ok(guess)
    } else {
        Ok(reply.to_string())
    }
}

/// Ask whether the tool may delete its own files. Only `y`/`Y` confirms.
pub fn confirm_retire(prompter: &dyn Prompter) -> PrimerResult<bool> {
    let reply = prompter.ask(RETIRE_PROMPT)?;
    Ok(reply.trim().eq_ignore_ascii_case("y"))
}
