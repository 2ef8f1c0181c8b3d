//! Git repository adapter.
//!
//! Uses libgit2 so renames and deletions land in the index the same way
//! `git mv` and `git rm` would, and checkpoints become real commits.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use git2::{Commit, ErrorCode, ObjectType, Repository, TreeWalkMode, TreeWalkResult};
use tracing::{debug, instrument};

use primer_core::{
    application::{ApplicationError, ports::VersionControl},
    domain::DomainError,
    error::{PrimerError, PrimerResult},
};

use super::directory::remove_from_disk;
use crate::filesystem::map_io_error;

/// A non-bare git working tree.
pub struct GitRepository {
    // git2::Repository is Send but not Sync.
    repo: Mutex<Repository>,
    root: PathBuf,
}

impl std::fmt::Debug for GitRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitRepository")
            .field("root", &self.root)
            .finish()
    }
}

impl GitRepository {
    /// Open the repository containing `path`, searching parent directories.
    pub fn discover(path: &Path) -> PrimerResult<Self> {
        let repo = Repository::discover(path).map_err(git_error("open repository"))?;
        let root = repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| ApplicationError::VersionControl {
                operation: "open repository".into(),
                reason: format!("{} is a bare repository", path.display()),
            })?;
        debug!(root = %root.display(), "Opened git repository");
        Ok(Self {
            repo: Mutex::new(repo),
            root,
        })
    }

    fn lock(&self) -> PrimerResult<MutexGuard<'_, Repository>> {
        self.repo
            .lock()
            .map_err(|_| ApplicationError::LockPoisoned.into())
    }

    /// Index entries at or below `path`, relative to the root.
    fn indexed_under(repo: &Repository, path: &Path) -> PrimerResult<Vec<PathBuf>> {
        let index = repo.index().map_err(git_error("read index"))?;
        Ok(index
            .iter()
            .map(|entry| PathBuf::from(String::from_utf8_lossy(&entry.path).into_owned()))
            .filter(|p| p.starts_with(path))
            .collect())
    }
}

impl VersionControl for GitRepository {
    fn root(&self) -> PathBuf {
        self.root.clone()
    }

    #[instrument(skip_all)]
    fn tracked_files(&self) -> PrimerResult<Vec<PathBuf>> {
        let repo = self.lock()?;

        let head = match repo.head() {
            Ok(head) => head,
            Err(e) => {
                // Unborn HEAD: nothing committed yet, the index is all we have.
                debug!(error = %e, "No HEAD, listing index");
                return Self::indexed_under(&repo, Path::new(""));
            }
        };

        let tree = head.peel_to_tree().map_err(git_error("read HEAD tree"))?;
        let mut files = Vec::new();
        tree.walk(TreeWalkMode::PreOrder, |dir, entry| {
            if entry.kind() == Some(ObjectType::Blob) {
                if let Some(name) = entry.name() {
                    files.push(PathBuf::from(format!("{dir}{name}")));
                }
            }
            TreeWalkResult::Ok
        })
        .map_err(git_error("walk HEAD tree"))?;

        debug!(count = files.len(), "Tracked files listed");
        Ok(files)
    }

    #[instrument(skip_all, fields(from = %from.display(), to = %to.display()))]
    fn move_path(&self, from: &Path, to: &Path) -> PrimerResult<()> {
        let repo = self.lock()?;
        let src = self.root.join(from);
        let dst = self.root.join(to);

        if dst.exists() {
            return Err(ApplicationError::FilesystemError {
                path: dst,
                reason: "Destination already exists".into(),
            }
            .into());
        }

        let tracked = Self::indexed_under(&repo, from)?;
        std::fs::rename(&src, &dst).map_err(|e| map_io_error(&src, e, "rename"))?;

        let mut index = repo.index().map_err(git_error("read index"))?;
        for old in &tracked {
            let rest = old.strip_prefix(from).unwrap_or(Path::new(""));
            let new = if rest.as_os_str().is_empty() {
                to.to_path_buf()
            } else {
                to.join(rest)
            };
            index.remove_path(old).map_err(git_error("unstage old path"))?;
            index.add_path(&new).map_err(git_error("stage new path"))?;
        }
        index.write().map_err(git_error("write index"))?;

        debug!(moved = tracked.len(), "Path moved");
        Ok(())
    }

    #[instrument(skip_all, fields(path = %path.display()))]
    fn remove_path(&self, path: &Path) -> PrimerResult<()> {
        let repo = self.lock()?;

        let tracked = Self::indexed_under(&repo, path)?;
        let mut index = repo.index().map_err(git_error("read index"))?;
        for old in &tracked {
            index.remove_path(old).map_err(git_error("unstage path"))?;
        }
        index.write().map_err(git_error("write index"))?;

        remove_from_disk(&self.root.join(path))?;
        debug!(removed = tracked.len(), "Path removed");
        Ok(())
    }

    #[instrument(skip(self))]
    fn commit(&self, message: &str) -> PrimerResult<()> {
        let repo = self.lock()?;

        let mut index = repo.index().map_err(git_error("read index"))?;
        // Stage modifications and deletions of tracked files, like `commit -a`.
        index
            .update_all(["*"], None)
            .map_err(git_error("stage changes"))?;
        index.write().map_err(git_error("write index"))?;

        let tree_id = index.write_tree().map_err(git_error("write tree"))?;
        let tree = repo.find_tree(tree_id).map_err(git_error("find tree"))?;
        let signature = repo.signature().map_err(git_error("resolve signature"))?;

        let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<&Commit<'_>> = parent.iter().collect();

        let id = repo
            .commit(
                Some("HEAD"),
                &signature,
                &signature,
                message,
                &tree,
                &parents,
            )
            .map_err(git_error("commit"))?;

        debug!(commit = %id, "Committed");
        Ok(())
    }

    /// Resolved by libgit2, so linked worktrees, submodules and config
    /// includes all work.
    #[instrument(skip(self))]
    fn remote_url(&self, remote: &str) -> PrimerResult<String> {
        let repo = self.lock()?;
        let missing = || DomainError::MissingRemote {
            remote: remote.to_string(),
        };

        let found = match repo.find_remote(remote) {
            Ok(found) => found,
            Err(e) if e.code() == ErrorCode::NotFound => return Err(missing().into()),
            Err(e) => {
                return Err(DomainError::UnparseableConfig {
                    line: 0,
                    reason: e.message().to_string(),
                }
                .into());
            }
        };

        let url = found
            .url()
            .filter(|url| !url.is_empty())
            .ok_or_else(missing)?;
        debug!(url, "Remote found");
        Ok(url.to_string())
    }
}

fn git_error(operation: &'static str) -> impl Fn(git2::Error) -> PrimerError {
    move |e| {
        ApplicationError::VersionControl {
            operation: operation.into(),
            reason: e.message().to_string(),
        }
        .into()
    }
}
