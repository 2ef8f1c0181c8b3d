//! Plain directory adapter, for a template copied without git metadata.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};
use walkdir::WalkDir;

use primer_core::{
    application::{ApplicationError, ports::VersionControl},
    domain::{DomainError, VCS_DIR, remote_url_from_config},
    error::PrimerResult,
};

use crate::filesystem::map_io_error;

/// Directory names never descended into when listing files.
const IGNORED_DIRS: &[&str] = &[VCS_DIR, "target"];

/// Treats every file under a directory as tracked.
///
/// Moves and removals go straight to disk and commits are no-ops.
#[derive(Debug, Clone)]
pub struct DirectoryTree {
    root: PathBuf,
}

impl DirectoryTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl VersionControl for DirectoryTree {
    fn root(&self) -> PathBuf {
        self.root.clone()
    }

    #[instrument(skip_all, fields(root = %self.root.display()))]
    fn tracked_files(&self) -> PrimerResult<Vec<PathBuf>> {
        let mut files = Vec::new();

        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                !(entry.file_type().is_dir()
                    && IGNORED_DIRS.iter().any(|d| entry.file_name() == *d))
            });

        for entry in walker {
            let entry = entry.map_err(|e| ApplicationError::FilesystemError {
                path: self.root.clone(),
                reason: format!("directory walk error: {e}"),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Ok(relative) = entry.path().strip_prefix(&self.root) {
                files.push(relative.to_path_buf());
            }
        }

        debug!(count = files.len(), "Files listed");
        Ok(files)
    }

    fn move_path(&self, from: &Path, to: &Path) -> PrimerResult<()> {
        let src = self.root.join(from);
        let dst = self.root.join(to);
        if dst.exists() {
            return Err(ApplicationError::FilesystemError {
                path: dst,
                reason: "Destination already exists".into(),
            }
            .into());
        }
        std::fs::rename(&src, &dst).map_err(|e| map_io_error(&src, e, "rename"))
    }

    fn remove_path(&self, path: &Path) -> PrimerResult<()> {
        remove_from_disk(&self.root.join(path))
    }

    fn commit(&self, message: &str) -> PrimerResult<()> {
        debug!(commit_message = message, "No version control, commit skipped");
        Ok(())
    }

    /// Best effort: reads `.git/config` as text when the directory has one
    /// that libgit2 could not open.
    fn remote_url(&self, remote: &str) -> PrimerResult<String> {
        let config = self.root.join(VCS_DIR).join("config");
        match std::fs::read_to_string(&config) {
            Ok(text) => Ok(remote_url_from_config(&text, remote)?),
            Err(e) => {
                debug!(error = %e, path = %config.display(), "No git config");
                Err(DomainError::MissingRemote {
                    remote: remote.to_string(),
                }
                .into())
            }
        }
    }
}

/// Delete a file or a whole directory.
pub(super) fn remove_from_disk(path: &Path) -> PrimerResult<()> {
    let result = if path.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };
    result.map_err(|e| map_io_error(path, e, "remove"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scaffold() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("pkg/src")).unwrap();
        std::fs::create_dir_all(root.join(".git")).unwrap();
        std::fs::create_dir_all(root.join("target/debug")).unwrap();
        std::fs::write(root.join("pkg/src/lib.rs"), "").unwrap();
        std::fs::write(root.join("Cargo.toml"), "").unwrap();
        std::fs::write(root.join(".git/config"), "").unwrap();
        std::fs::write(root.join("target/debug/out"), "").unwrap();
        dir
    }

    #[test]
    fn lists_files_outside_ignored_dirs() {
        let dir = scaffold();
        let tree = DirectoryTree::new(dir.path());
        assert_eq!(
            tree.tracked_files().unwrap(),
            vec![PathBuf::from("Cargo.toml"), PathBuf::from("pkg/src/lib.rs")]
        );
    }

    #[test]
    fn move_and_remove() {
        let dir = scaffold();
        let tree = DirectoryTree::new(dir.path());

        tree.move_path(Path::new("pkg"), Path::new("amazing")).unwrap();
        assert!(dir.path().join("amazing/src/lib.rs").exists());

        tree.remove_path(Path::new("amazing")).unwrap();
        tree.remove_path(Path::new("Cargo.toml")).unwrap();
        assert!(!dir.path().join("amazing").exists());
        assert!(!dir.path().join("Cargo.toml").exists());
    }

    #[test]
    fn move_onto_existing_is_error() {
        let dir = scaffold();
        let tree = DirectoryTree::new(dir.path());
        std::fs::create_dir_all(dir.path().join("taken")).unwrap();
        assert!(tree.move_path(Path::new("pkg"), Path::new("taken")).is_err());
    }

    #[test]
    fn remote_url_from_leftover_git_config() {
        let dir = scaffold();
        std::fs::write(
            dir.path().join(".git/config"),
            "[remote \"origin\"]\n\turl = https://github.com/good-org/amazing-project.git\n",
        )
        .unwrap();
        let tree = DirectoryTree::new(dir.path());
        assert_eq!(
            tree.remote_url("origin").unwrap(),
            "https://github.com/good-org/amazing-project.git"
        );
        assert!(tree.remote_url("upstream").is_err());
    }

    #[test]
    fn remote_url_without_git_dir_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            DirectoryTree::new(dir.path()).remote_url("origin"),
            Err(primer_core::error::PrimerError::Domain(DomainError::MissingRemote { .. }))
        ));
    }

    #[test]
    fn commit_is_noop() {
        let dir = scaffold();
        assert!(DirectoryTree::new(dir.path()).commit("anything").is_ok());
    }
}
