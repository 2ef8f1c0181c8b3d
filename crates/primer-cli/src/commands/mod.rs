//! Subcommand handlers. Each module turns parsed arguments into calls on
//! the core and adapters, and prints the result.

use std::path::{Path, PathBuf};

use tracing::warn;

use primer_adapters::{DirectoryTree, GitRepository};
use primer_core::application::ports::VersionControl;

use crate::error::{CliResult, ResultExt};

pub mod completions;
pub mod config;
pub mod guess;
pub mod setup;

/// Open the git repository containing `path` (the current directory when
/// unset), or treat the directory as a plain tree when there is none.
pub fn open_repository(path: Option<&Path>) -> CliResult<Box<dyn VersionControl>> {
    let start = path.map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    match GitRepository::discover(&start) {
        Ok(repo) => Ok(Box::new(repo)),
        Err(e) => {
            warn!(error = %e, "No git repository found, changes will not be tracked");
            let root = start
                .canonicalize()
                .or_cli(|| format!("Cannot open directory '{}'", start.display()))?;
            Ok(Box::new(DirectoryTree::new(root)))
        }
    }
}
