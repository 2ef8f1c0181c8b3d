//! In-memory repository adapter for testing.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use primer_core::{
    application::{ApplicationError, ports::VersionControl},
    domain::{DomainError, VCS_DIR, remote_url_from_config},
    error::PrimerResult,
};

use crate::filesystem::MemoryFilesystem;

/// Repository view over a [`MemoryFilesystem`] rooted at `root`.
///
/// Every file below the root is tracked, except VCS metadata. Commits are
/// recorded and can be inspected with [`MemoryRepository::commits`].
#[derive(Debug, Clone)]
pub struct MemoryRepository {
    root: PathBuf,
    filesystem: MemoryFilesystem,
    commits: Arc<RwLock<Vec<String>>>,
}

impl MemoryRepository {
    pub fn new(root: impl Into<PathBuf>, filesystem: MemoryFilesystem) -> Self {
        Self {
            root: root.into(),
            filesystem,
            commits: Arc::default(),
        }
    }

    /// Commit messages recorded so far, oldest first.
    pub fn commits(&self) -> Vec<String> {
        self.commits
            .read()
            .map(|c| c.clone())
            .unwrap_or_default()
    }
}

impl VersionControl for MemoryRepository {
    fn root(&self) -> PathBuf {
        self.root.clone()
    }

    fn tracked_files(&self) -> PrimerResult<Vec<PathBuf>> {
        Ok(self
            .filesystem
            .list_files()
            .into_iter()
            .filter_map(|p| p.strip_prefix(&self.root).ok().map(Path::to_path_buf))
            .filter(|p| !p.starts_with(VCS_DIR))
            .collect())
    }

    fn move_path(&self, from: &Path, to: &Path) -> PrimerResult<()> {
        let dst = self.root.join(to);
        if self.filesystem.list_files().iter().any(|p| p.starts_with(&dst)) {
            return Err(ApplicationError::FilesystemError {
                path: dst,
                reason: "Destination already exists".into(),
            }
            .into());
        }

        let src = self.root.join(from);
        match self.filesystem.rename_prefix(&src, &dst)? {
            0 => Err(ApplicationError::FilesystemError {
                path: src,
                reason: "No such file or directory".into(),
            }
            .into()),
            _ => Ok(()),
        }
    }

    fn remove_path(&self, path: &Path) -> PrimerResult<()> {
        self.filesystem.remove_prefix(&self.root.join(path))?;
        Ok(())
    }

    fn commit(&self, message: &str) -> PrimerResult<()> {
        self.commits
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?
            .push(message.to_string());
        Ok(())
    }

    fn remote_url(&self, remote: &str) -> PrimerResult<String> {
        let config = self.root.join(VCS_DIR).join("config");
        match self.filesystem.read_file(&config) {
            Some(text) => Ok(remote_url_from_config(&text, remote)?),
            None => Err(DomainError::MissingRemote {
                remote: remote.to_string(),
            }
            .into()),
        }
    }
}
