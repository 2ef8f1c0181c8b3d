//! What the setup run rewrites, and what it removes afterwards.
//!
//! The defaults describe this template repository. They are plain data so the
//! CLI can override any of them from its configuration file.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::filter::FileFilter;

/// Name of the tool's own configuration file at the repository root.
pub const CONFIG_FILE_NAME: &str = ".primer.toml";

pub const TEMPLATE_PACKAGE_NAME: &str = "package_name";
pub const TEMPLATE_REPO_URL: &str = "https://github.com/primer-rs/base-template";
pub const TEMPLATE_RTD: &str = "primer-rs-base-template";
pub const TEMPLATE_CODECOV: &str = "primer-rs/base-template";

/// Canonical tokens of the template that a derived project replaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateIdentity {
    pub url: String,
    pub rtd_name: String,
    pub codecov_name: String,
    /// Placeholder package directory, also the bare token in file contents.
    pub package_name: String,
}

impl Default for TemplateIdentity {
    fn default() -> Self {
        Self {
            url: TEMPLATE_REPO_URL.into(),
            rtd_name: TEMPLATE_RTD.into(),
            codecov_name: TEMPLATE_CODECOV.into(),
            package_name: TEMPLATE_PACKAGE_NAME.into(),
        }
    }
}

/// Instructions for running the tool; retired with it so the project's
/// README never points at a tool that is gone.
pub const SETUP_GUIDE: &str = "SETUP.md";

/// The tool's own footprint, removed once setup succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetirePlan {
    /// Files or directories to delete, relative to the repository root.
    pub paths: Vec<PathBuf>,
    /// Dependency manifests to prune.
    pub manifests: Vec<PathBuf>,
    /// Lines of a manifest containing any of these markers are dropped.
    pub prune: Vec<String>,
}

impl Default for RetirePlan {
    fn default() -> Self {
        Self {
            paths: vec![
                PathBuf::from(CONFIG_FILE_NAME),
                PathBuf::from(SETUP_GUIDE),
                PathBuf::from("crates/primer-core"),
                PathBuf::from("crates/primer-adapters"),
                PathBuf::from("crates/primer-cli"),
            ],
            manifests: vec![PathBuf::from("Cargo.toml")],
            prune: vec!["crates/primer-".into(), "git2".into()],
        }
    }
}

impl RetirePlan {
    /// Remove every line that mentions one of the prune markers.
    ///
    /// Returns `None` when nothing matched, so callers can skip the write.
    pub fn prune_manifest(&self, content: &str) -> Option<String> {
        let markers: Vec<&str> = self
            .prune
            .iter()
            .map(String::as_str)
            .filter(|m| !m.is_empty())
            .collect();

        let mut dropped = false;
        let mut kept = String::with_capacity(content.len());
        for line in content.split_inclusive('\n') {
            if markers.iter().any(|m| line.contains(m)) {
                dropped = true;
            } else {
                kept.push_str(line);
            }
        }

        dropped.then_some(kept)
    }
}

/// Everything a setup run needs besides the chosen URL and name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupPlan {
    pub identity: TemplateIdentity,
    /// Build manifest carrying the repository URL.
    pub manifest: PathBuf,
    /// Readme carrying URL, docs and coverage badges.
    pub readme: PathBuf,
    pub filter: FileFilter,
    pub retire: RetirePlan,
}

impl Default for SetupPlan {
    fn default() -> Self {
        Self {
            identity: TemplateIdentity::default(),
            manifest: PathBuf::from("Cargo.toml"),
            readme: PathBuf::from("README.md"),
            filter: FileFilter::default(),
            retire: RetirePlan::default(),
        }
    }
}

impl SetupPlan {
    /// The filter actually used for the rewrite: configured rules plus the
    /// tool's own paths.
    pub fn effective_filter(&self) -> FileFilter {
        self.filter.clone().skipping(self.retire.paths.iter().cloned())
    }
}
