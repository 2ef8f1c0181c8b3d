//! Package and project names derived from a repository URL.
//!
//! Every function here is a pure string transform: no I/O, no validation
//! beyond what is documented. Callers accept whatever comes out, including an
//! empty string for empty input.

use std::path::{Component, Path};

/// Makes a string safe to use as a package name.
///
/// Lowercases the input and turns every space and hyphen into an underscore.
/// Applying it twice gives the same result as applying it once.
pub fn make_name_safe(name: &str) -> String {
    name.to_lowercase().replace([' ', '-'], "_")
}

/// Guesses the package name from the repo URL.
///
/// Takes the stem of the final path segment (`good-idea.git` -> `good-idea`)
/// and normalizes it with [`make_name_safe`].
pub fn get_package_name(repo_url: &str) -> String {
    make_name_safe(&rtd_project_guess(repo_url))
}

/// Guesses the Read the Docs project name: the final path segment without
/// its extension.
pub fn rtd_project_guess(repo_url: &str) -> String {
    Path::new(repo_url)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Guesses the codecov project (`org/repo`) from the last two path segments.
pub fn codecov_project_guess(repo_url: &str) -> String {
    let segments: Vec<_> = Path::new(repo_url)
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    let tail = &segments[segments.len().saturating_sub(2)..];
    let joined = tail.join("/");
    joined
        .strip_suffix(".git")
        .map(str::to_string)
        .unwrap_or(joined)
}
