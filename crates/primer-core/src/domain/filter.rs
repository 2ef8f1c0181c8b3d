//! File eligibility for the package-name rewrite.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Directory name of git's internal metadata.
pub const VCS_DIR: &str = ".git";

/// OS metadata file that never belongs to the project.
pub const OS_METADATA_FILE: &str = ".DS_Store";

/// Decides which repository files the rewrite may touch.
///
/// A file is rejected when its extension is denylisted, its name is
/// denylisted, it sits under one of the skipped paths (the tool's own files),
/// or any of its components is the VCS metadata directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileFilter {
    /// Extensions without the leading dot, compared case-insensitively.
    pub skip_extensions: Vec<String>,
    pub skip_names: Vec<String>,
    /// Repository-relative paths; everything at or below them is skipped.
    pub skip_paths: Vec<PathBuf>,
}

impl Default for FileFilter {
    fn default() -> Self {
        Self {
            skip_extensions: vec!["png".into(), "jpg".into(), "jpeg".into()],
            skip_names: vec![OS_METADATA_FILE.into(), super::plan::CONFIG_FILE_NAME.into()],
            skip_paths: Vec::new(),
        }
    }
}

impl FileFilter {
    /// Add paths whose contents must never be rewritten.
    pub fn skipping<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        for path in paths {
            let path = normalize(&path.into());
            if !self.skip_paths.contains(&path) {
                self.skip_paths.push(path);
            }
        }
        self
    }

    /// Checks if a file is valid for modification.
    pub fn is_eligible(&self, path: &Path) -> bool {
        let path = normalize(path);

        if path
            .components()
            .any(|c| matches!(c, Component::Normal(s) if s == VCS_DIR))
        {
            return false;
        }

        let extension_ok = path
            .extension()
            .map(|ext| {
                let ext = ext.to_string_lossy().to_lowercase();
                !self.skip_extensions.iter().any(|skip| skip.to_lowercase() == ext)
            })
            .unwrap_or(true);

        let name_ok = path
            .file_name()
            .map(|name| !self.skip_names.iter().any(|skip| name == skip.as_str()))
            .unwrap_or(true);

        let outside_skipped = !self.skip_paths.iter().any(|skip| path.starts_with(skip));

        extension_ok && name_ok && outside_skipped
    }
}

/// Drop `.` components so `./a/b` and `a/b` compare equal.
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> FileFilter {
        FileFilter::default().skipping(["crates/primer-cli", "tests/setup.rs"])
    }

    #[test]
    fn rejects_denylisted_and_own_files() {
        let f = filter();
        for path in [
            "./.git/",
            ".git/config",
            "test.png",
            "test.jpg",
            "test.jpeg",
            "assets/LOGO.PNG",
            ".DS_Store",
            "docs/.DS_Store",
            ".primer.toml",
            "crates/primer-cli/src/main.rs",
            "./crates/primer-cli/Cargo.toml",
            "tests/setup.rs",
        ] {
            assert!(!f.is_eligible(Path::new(path)), "should reject {path}");
        }
    }

    #[test]
    fn accepts_ordinary_text_files() {
        let f = filter();
        for path in [
            "great_idea.rs",
            "science.txt",
            "new_ideas.md",
            "package_name/src/lib.rs",
            "crates/primer-client/src/lib.rs",
            "Cargo.toml",
        ] {
            assert!(f.is_eligible(Path::new(path)), "should accept {path}");
        }
    }

    #[test]
    fn skipping_does_not_duplicate() {
        let f = FileFilter::default().skipping(["a", "./a"]);
        assert_eq!(f.skip_paths, vec![PathBuf::from("a")]);
    }
}
