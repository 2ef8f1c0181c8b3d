//! Setup Service - main application orchestrator.
//!
//! This service rewrites a fresh copy of the template into a named project:
//! 1. Point the manifest and readme at the new repository
//! 2. Replace the placeholder package name in every eligible file
//! 3. Rename the placeholder package directory
//! 4. Retire the tool's own files
//!
//! Every step mutates the working tree in place. There is no rollback: a
//! failure part way leaves the tree partially migrated.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::ports::{Filesystem, SetupReporter, VersionControl},
    domain::{
        RetirePlan, SetupPlan, Substitutions, codecov_project_guess, rtd_project_guess,
    },
    error::PrimerResult,
};

/// One observable step of a setup run, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupEvent {
    ManifestUpdated { path: PathBuf },
    ManifestUnchanged { path: PathBuf },
    ReadmeUpdated { path: PathBuf },
    ReadmeUnchanged { path: PathBuf },
    FileUpdated {
        path: PathBuf,
        placeholder: String,
        package_name: String,
    },
    DirectoryRenamed { from: PathBuf, to: PathBuf },
    RenameSkipped { name: String },
    Committed { message: String },
    Retired { path: PathBuf },
    RetireSkipped { path: PathBuf },
    ManifestPruned { path: PathBuf },
    Completed { package_name: String },
}

impl SetupEvent {
    /// Whether the event describes a change on disk.
    pub fn is_change(&self) -> bool {
        !matches!(
            self,
            Self::ManifestUnchanged { .. }
                | Self::ReadmeUnchanged { .. }
                | Self::RenameSkipped { .. }
                | Self::RetireSkipped { .. }
        )
    }
}

impl fmt::Display for SetupEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ManifestUpdated { path } => {
                write!(f, "{} repository URL updated \u{2705}", path.display())
            }
            Self::ManifestUnchanged { path } => {
                write!(f, "{} has no template URL, left unchanged", path.display())
            }
            Self::ReadmeUpdated { path } => write!(
                f,
                "Updated {} \u{2705}, but you need to add a token to the codecov badge!",
                path.display()
            ),
            Self::ReadmeUnchanged { path } => {
                write!(f, "{} has no template tokens, left unchanged", path.display())
            }
            Self::FileUpdated {
                path,
                placeholder,
                package_name,
            } => write!(
                f,
                "Updated {placeholder} to {package_name} in {} \u{2705}",
                path.display()
            ),
            Self::DirectoryRenamed { from, to } => {
                write!(f, "Renamed {} to {} \u{2705}", from.display(), to.display())
            }
            Self::RenameSkipped { name } => {
                write!(f, "Package directory already named {name}, not renamed")
            }
            Self::Committed { message } => write!(f, "Committed: {message}"),
            Self::Retired { path } => write!(f, "Removed {}", path.display()),
            Self::RetireSkipped { path } => {
                write!(f, "{} not found, nothing to remove", path.display())
            }
            Self::ManifestPruned { path } => {
                write!(f, "Pruned setup dependencies from {} \u{2705}", path.display())
            }
            Self::Completed { package_name } => {
                write!(f, "{package_name} setup complete! \u{1f389}\u{1f389}\u{1f389}")
            }
        }
    }
}

/// Switches for a setup run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetupOptions {
    /// Commit after each step instead of leaving changes in the worktree.
    pub commit_as_you_go: bool,
    /// Remove the tool's own files once everything else succeeded.
    pub retire: bool,
}

impl Default for SetupOptions {
    fn default() -> Self {
        Self {
            commit_as_you_go: false,
            retire: true,
        }
    }
}

/// What a finished run changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupSummary {
    pub manifest_updated: bool,
    pub readme_updated: bool,
    /// Repository-relative paths whose content changed in the rewrite pass.
    pub updated_files: Vec<PathBuf>,
    pub renamed: bool,
    pub retired: Vec<PathBuf>,
}

/// Replaces the contents of a file.
///
/// Applies every pair in order and writes back only when the content
/// changed. Returns `true` if the file was modified.
pub fn replace_file_contents(
    filesystem: &dyn Filesystem,
    substitutions: &Substitutions,
    path: &Path,
) -> PrimerResult<bool> {
    let content = filesystem.read_to_string(path)?;
    let new_content = substitutions.apply(&content);

    if new_content == content {
        return Ok(false);
    }

    filesystem.write_file(path, &new_content)?;
    Ok(true)
}

/// Main setup service.
pub struct SetupService {
    filesystem: Box<dyn Filesystem>,
    repository: Box<dyn VersionControl>,
    reporter: Box<dyn SetupReporter>,
}

impl SetupService {
    /// Create a new setup service with the given adapters.
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        repository: Box<dyn VersionControl>,
        reporter: Box<dyn SetupReporter>,
    ) -> Self {
        Self {
            filesystem,
            repository,
            reporter,
        }
    }

    /// Rewrite the template into the project `package_name` hosted at
    /// `repo_url`.
    #[instrument(skip_all, fields(repo_url = %repo_url, package = %package_name))]
    pub fn run_setup(
        &self,
        plan: &SetupPlan,
        repo_url: &str,
        package_name: &str,
        options: SetupOptions,
    ) -> PrimerResult<SetupSummary> {
        let root = self.repository.root();
        let identity = &plan.identity;
        let mut summary = SetupSummary::default();
        info!(root = %root.display(), "Setting up project");

        // 1. Manifest
        let manifest_subs = Substitutions::new().then(&identity.url, repo_url);
        summary.manifest_updated =
            replace_file_contents(&*self.filesystem, &manifest_subs, &root.join(&plan.manifest))?;
        self.emit(if summary.manifest_updated {
            SetupEvent::ManifestUpdated {
                path: plan.manifest.clone(),
            }
        } else {
            SetupEvent::ManifestUnchanged {
                path: plan.manifest.clone(),
            }
        });

        // 2. Readme
        let readme_subs = Substitutions::new()
            .then(&identity.url, repo_url)
            .then(&identity.rtd_name, rtd_project_guess(repo_url))
            .then(&identity.codecov_name, codecov_project_guess(repo_url));
        summary.readme_updated =
            replace_file_contents(&*self.filesystem, &readme_subs, &root.join(&plan.readme))?;
        self.emit(if summary.readme_updated {
            SetupEvent::ReadmeUpdated {
                path: plan.readme.clone(),
            }
        } else {
            SetupEvent::ReadmeUnchanged {
                path: plan.readme.clone(),
            }
        });

        self.checkpoint(options, "updated manifest and readme")?;

        // 3. Candidates
        let filter = plan.effective_filter();
        let candidates: Vec<PathBuf> = self
            .repository
            .tracked_files()?
            .into_iter()
            .filter(|path| filter.is_eligible(path))
            .collect();
        debug!(count = candidates.len(), "Eligible files collected");

        // 4. Package name, bracketed token first
        let name_subs = Substitutions::package_name(&identity.package_name, package_name);
        for relative in candidates {
            if replace_file_contents(&*self.filesystem, &name_subs, &root.join(&relative))? {
                self.emit(SetupEvent::FileUpdated {
                    path: relative.clone(),
                    placeholder: identity.package_name.clone(),
                    package_name: package_name.to_string(),
                });
                summary.updated_files.push(relative);
            }
        }
        info!(updated = summary.updated_files.len(), "Package name replaced");

        // 5. Directory
        if identity.package_name == package_name {
            self.emit(SetupEvent::RenameSkipped {
                name: package_name.to_string(),
            });
        } else {
            let from = PathBuf::from(&identity.package_name);
            let to = PathBuf::from(package_name);
            self.repository.move_path(&from, &to)?;
            summary.renamed = true;
            self.emit(SetupEvent::DirectoryRenamed { from, to });
        }

        self.checkpoint(
            options,
            &format!("renamed dir {} to {}", identity.package_name, package_name),
        )?;

        // 6. Retire
        if options.retire {
            summary.retired = self.retire(&plan.retire, &root)?;
            self.checkpoint(options, "removed template setup files")?;
        } else {
            debug!("Keeping setup files");
        }

        // 7. Done
        self.emit(SetupEvent::Completed {
            package_name: package_name.to_string(),
        });
        info!("Setup completed successfully");
        Ok(summary)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Delete the tool's own paths, then prune its dependencies.
    fn retire(&self, plan: &RetirePlan, root: &Path) -> PrimerResult<Vec<PathBuf>> {
        let mut removed = Vec::new();

        for relative in &plan.paths {
            if !self.filesystem.exists(&root.join(relative)) {
                warn!(path = %relative.display(), "Setup path missing, skipping");
                self.emit(SetupEvent::RetireSkipped {
                    path: relative.clone(),
                });
                continue;
            }
            self.repository.remove_path(relative)?;
            self.emit(SetupEvent::Retired {
                path: relative.clone(),
            });
            removed.push(relative.clone());
        }

        for manifest in &plan.manifests {
            let path = root.join(manifest);
            if !self.filesystem.exists(&path) {
                warn!(path = %manifest.display(), "Dependency manifest missing, skipping");
                continue;
            }
            let content = self.filesystem.read_to_string(&path)?;
            if let Some(pruned) = plan.prune_manifest(&content) {
                self.filesystem.write_file(&path, &pruned)?;
                self.emit(SetupEvent::ManifestPruned {
                    path: manifest.clone(),
                });
            }
        }

        Ok(removed)
    }

    fn checkpoint(&self, options: SetupOptions, message: &str) -> PrimerResult<()> {
        if !options.commit_as_you_go {
            return Ok(());
        }
        self.repository.commit(message)?;
        self.emit(SetupEvent::Committed {
            message: message.to_string(),
        });
        Ok(())
    }

    fn emit(&self, event: SetupEvent) {
        debug!(event = ?event, "Setup event");
        self.reporter.report(&event);
    }
}
