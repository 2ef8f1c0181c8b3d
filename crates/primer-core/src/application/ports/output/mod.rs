//! What a setup run needs from the outside world. `primer-adapters`
//! implements the filesystem and version-control ports; the CLI implements
//! the reporter and the prompter.

use std::path::{Path, PathBuf};

use crate::application::SetupEvent;
use crate::error::PrimerResult;

/// Text file access. Paths are absolute (already joined onto the repository root).
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Read a whole file as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> PrimerResult<String>;

    /// Replace a file's content.
    fn write_file(&self, path: &Path, content: &str) -> PrimerResult<()>;

    /// Check if a file or directory exists at path.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for the repository the tool runs in.
///
/// Implemented by:
/// - `primer_adapters::vcs::GitRepository` (libgit2, preserves history)
/// - `primer_adapters::vcs::DirectoryTree` (plain directory, no history)
/// - `primer_adapters::vcs::MemoryRepository` (testing)
///
/// Apart from [`VersionControl::root`], paths are relative to the root.
#[cfg_attr(test, mockall::automock)]
pub trait VersionControl: Send + Sync {
    /// Absolute working directory.
    fn root(&self) -> PathBuf;

    /// Every tracked file, excluding version-control internals.
    fn tracked_files(&self) -> PrimerResult<Vec<PathBuf>>;

    /// Move a file or directory, keeping it tracked under the new path.
    fn move_path(&self, from: &Path, to: &Path) -> PrimerResult<()>;

    /// Delete a file or directory and stop tracking it.
    fn remove_path(&self, path: &Path) -> PrimerResult<()>;

    /// Record every tracked change with the given message.
    fn commit(&self, message: &str) -> PrimerResult<()>;

    /// URL of the named remote.
    ///
    /// Fails with `DomainError::MissingRemote` when the remote or its url is
    /// absent and `DomainError::UnparseableConfig` when the configuration
    /// cannot be read.
    fn remote_url(&self, remote: &str) -> PrimerResult<String>;
}

/// Port for progress output of a setup run.
#[cfg_attr(test, mockall::automock)]
pub trait SetupReporter: Send + Sync {
    fn report(&self, event: &SetupEvent);
}

/// Port for asking the user a question.
#[cfg_attr(test, mockall::automock)]
pub trait Prompter: Send + Sync {
    /// Show `prompt` and return the raw reply. An empty reply means "accept
    /// the default shown in the prompt".
    fn ask(&self, prompt: &str) -> PrimerResult<String>;
}
