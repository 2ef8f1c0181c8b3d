//! A filesystem held in a map, for tests and dry runs.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use primer_core::{
    application::{ApplicationError, ports::Filesystem},
    error::PrimerResult,
};

/// Directories are implicit: a path "exists" when a file lives at or below
/// it. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<BTreeMap<PathBuf, String>>>,
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file (testing helper).
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        if let Ok(mut files) = self.inner.write() {
            files.insert(path.into(), content.into());
        }
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let files = self.inner.read().ok()?;
        files.get(path).cloned()
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|files| files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Move every file at or below `from` to the same place below `to`.
    ///
    /// Returns how many files moved.
    pub fn rename_prefix(&self, from: &Path, to: &Path) -> PrimerResult<usize> {
        let mut files = self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?;

        let moving: Vec<PathBuf> = files
            .keys()
            .filter(|p| p.starts_with(from))
            .cloned()
            .collect();

        for old in &moving {
            let rest = old.strip_prefix(from).unwrap_or(Path::new(""));
            let new = if rest.as_os_str().is_empty() {
                to.to_path_buf()
            } else {
                to.join(rest)
            };
            if let Some(content) = files.remove(old) {
                files.insert(new, content);
            }
        }

        Ok(moving.len())
    }

    /// Delete every file at or below `path`. Returns how many were removed.
    pub fn remove_prefix(&self, path: &Path) -> PrimerResult<usize> {
        let mut files = self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?;
        let before = files.len();
        files.retain(|p, _| !p.starts_with(path));
        Ok(before - files.len())
    }
}

impl Filesystem for MemoryFilesystem {
    fn read_to_string(&self, path: &Path) -> PrimerResult<String> {
        let files = self
            .inner
            .read()
            .map_err(|_| ApplicationError::LockPoisoned)?;

        files.get(path).cloned().ok_or_else(|| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "No such file".into(),
            }
            .into()
        })
    }

    fn write_file(&self, path: &Path, content: &str) -> PrimerResult<()> {
        let mut files = self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?;

        files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|files| files.keys().any(|p| p.starts_with(path)))
            .unwrap_or(false)
    }
}
