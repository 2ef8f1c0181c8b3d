//! End-to-end setup runs against every repository adapter.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use git2::{IndexAddOption, Repository};
use primer_adapters::{
    DirectoryTree, GitRepository, LocalFilesystem, MemoryFilesystem, MemoryRepository,
};
use primer_core::application::{SetupSummary, guess_repo_url};
use primer_core::domain::RepoUrlGuess;
use primer_core::prelude::*;

const REPO_URL: &str = "https://github.com/good-org/amazing-project.git";
const PACKAGE: &str = "amazing_project";

const SCAFFOLD: &[(&str, &str)] = &[
    (
        "Cargo.toml",
        "[workspace]\nmembers = [\n    \"crates/primer-core\",\n    \"crates/primer-cli\",\n    \"package_name\",\n]\n\n[workspace.package]\nrepository = \"https://github.com/primer-rs/base-template\"\n\n[workspace.dependencies]\nprimer-core = { path = \"crates/primer-core\" }\ngit2 = \"0.20.3\"\nserde = \"1.0\"\n",
    ),
    (
        "README.md",
        "# <package_name>\n\n[![Docs](https://readthedocs.org/projects/primer-rs-base-template/badge/)](https://primer-rs-base-template.readthedocs.io)\n[![codecov](https://codecov.io/gh/primer-rs/base-template/branch/main/graph/badge.svg)](https://codecov.io/gh/primer-rs/base-template)\n\nSource: https://github.com/primer-rs/base-template\n",
    ),
    (
        "package_name/Cargo.toml",
        "[package]\nname = \"package_name\"\nversion = \"0.1.0\"\n",
    ),
    (
        "package_name/src/main.rs",
        "fn main() {\n    package_name::run();\n}\n",
    ),
    ("package_name/src/util.rs", "pub fn helper() -> u8 {\n    7\n}\n"),
    ("package_name/logo.png", "package_name"),
    (".primer.toml", "[identity]\npackage_name = \"package_name\"\n"),
    (
        "crates/primer-cli/src/main.rs",
        "// rewrites package_name\nfn main() {}\n",
    ),
];

#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<SetupEvent>>>);

impl Recorder {
    fn events(&self) -> Vec<SetupEvent> {
        self.0.lock().unwrap().clone()
    }
}

impl SetupReporter for Recorder {
    fn report(&self, event: &SetupEvent) {
        self.0.lock().unwrap().push(event.clone());
    }
}

fn memory_scaffold(root: &Path) -> MemoryFilesystem {
    SCAFFOLD
        .iter()
        .fold(MemoryFilesystem::new(), |fs, (path, content)| {
            fs.with_file(root.join(path), *content)
        })
}

fn disk_scaffold(root: &Path) {
    for (path, content) in SCAFFOLD {
        let path = root.join(path);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }
}

fn read(fs: &dyn Filesystem, root: &Path, path: &str) -> String {
    fs.read_to_string(&root.join(path)).unwrap()
}

/// The outcome every adapter combination must produce.
fn assert_migrated(fs: &dyn Filesystem, root: &Path, summary: &SetupSummary) {
    let manifest = read(fs, root, "Cargo.toml");
    assert!(!manifest.contains("https://github.com/primer-rs/base-template"));
    assert!(manifest.contains(REPO_URL));
    assert!(manifest.contains("\"amazing_project\""));
    assert!(!manifest.contains("crates/primer-"));
    assert!(!manifest.contains("git2"));
    assert!(manifest.contains("serde = \"1.0\""));

    let readme = read(fs, root, "README.md");
    assert!(!readme.contains("https://github.com/primer-rs/base-template"));
    assert!(readme.contains(REPO_URL));
    assert!(readme.contains("projects/amazing-project/badge"));
    assert!(readme.contains("codecov.io/gh/good-org/amazing-project"));
    assert!(readme.starts_with("# amazing_project\n"));

    assert!(fs.exists(&root.join("amazing_project")));
    assert!(!fs.exists(&root.join("package_name")));

    let main = read(fs, root, "amazing_project/src/main.rs");
    assert!(main.contains("amazing_project::run()"));
    assert!(!main.contains("package_name"));

    assert_eq!(
        read(fs, root, "amazing_project/src/util.rs"),
        "pub fn helper() -> u8 {\n    7\n}\n"
    );
    assert_eq!(read(fs, root, "amazing_project/logo.png"), "package_name");

    assert!(!fs.exists(&root.join(".primer.toml")));
    assert!(!fs.exists(&root.join("crates/primer-cli")));

    assert!(summary.manifest_updated);
    assert!(summary.readme_updated);
    assert!(summary.renamed);
}

#[test]
fn memory_repository_end_to_end() {
    let root = PathBuf::from("/repo");
    let fs = memory_scaffold(&root);
    let repo = MemoryRepository::new(&root, fs.clone());
    let recorder = Recorder::default();

    let service = SetupService::new(
        Box::new(fs.clone()),
        Box::new(repo.clone()),
        Box::new(recorder.clone()),
    );
    let summary = service
        .run_setup(
            &SetupPlan::default(),
            REPO_URL,
            PACKAGE,
            SetupOptions {
                commit_as_you_go: true,
                retire: true,
            },
        )
        .unwrap();

    assert_migrated(&fs, &root, &summary);
    assert_eq!(
        repo.commits(),
        vec![
            "updated manifest and readme",
            "renamed dir package_name to amazing_project",
            "removed template setup files",
        ]
    );

    let mut updated = summary.updated_files.clone();
    updated.sort();
    assert_eq!(
        updated,
        vec![
            PathBuf::from("Cargo.toml"),
            PathBuf::from("README.md"),
            PathBuf::from("package_name/Cargo.toml"),
            PathBuf::from("package_name/src/main.rs"),
        ]
    );

    let events = recorder.events();
    assert_eq!(
        events.last(),
        Some(&SetupEvent::Completed {
            package_name: PACKAGE.into()
        })
    );
}

#[test]
fn keep_setup_files_leaves_tool_untouched() {
    let root = PathBuf::from("/repo");
    let fs = memory_scaffold(&root);
    let repo = MemoryRepository::new(&root, fs.clone());

    let service = SetupService::new(
        Box::new(fs.clone()),
        Box::new(repo.clone()),
        Box::new(Recorder::default()),
    );
    let summary = service
        .run_setup(
            &SetupPlan::default(),
            REPO_URL,
            PACKAGE,
            SetupOptions {
                commit_as_you_go: false,
                retire: false,
            },
        )
        .unwrap();

    assert!(summary.retired.is_empty());
    assert!(repo.commits().is_empty());
    assert_eq!(
        read(&fs, &root, ".primer.toml"),
        "[identity]\npackage_name = \"package_name\"\n"
    );
    assert_eq!(
        read(&fs, &root, "crates/primer-cli/src/main.rs"),
        "// rewrites package_name\nfn main() {}\n"
    );
    assert!(read(&fs, &root, "Cargo.toml").contains("git2"));
}

#[test]
fn plain_directory_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    disk_scaffold(root);

    let fs = LocalFilesystem::new();
    let service = SetupService::new(
        Box::new(fs),
        Box::new(DirectoryTree::new(root)),
        Box::new(Recorder::default()),
    );
    let summary = service
        .run_setup(&SetupPlan::default(), REPO_URL, PACKAGE, SetupOptions::default())
        .unwrap();

    assert_migrated(&fs, root, &summary);
    assert!(!root.join("crates").join("primer-cli").exists());
}

#[test]
fn git_repository_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    disk_scaffold(root);

    let repo = Repository::init(root).unwrap();
    {
        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Primer Test").unwrap();
        config.set_str("user.email", "primer@example.com").unwrap();
    }
    repo.remote("origin", REPO_URL).unwrap();
    {
        let mut index = repo.index().unwrap();
        index.add_all(["*"], IndexAddOption::DEFAULT, None).unwrap();
        index.write().unwrap();
        let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
        let sig = repo.signature().unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, "template", &tree, &[])
            .unwrap();
    }

    let fs = LocalFilesystem::new();
    let git = GitRepository::discover(root).unwrap();
    assert_eq!(guess_repo_url(&git), RepoUrlGuess::Found(REPO_URL.into()));

    let service = SetupService::new(
        Box::new(fs),
        Box::new(git),
        Box::new(Recorder::default()),
    );
    let summary = service
        .run_setup(
            &SetupPlan::default(),
            REPO_URL,
            PACKAGE,
            SetupOptions {
                commit_as_you_go: true,
                retire: true,
            },
        )
        .unwrap();

    assert_migrated(&fs, root, &summary);

    let head = repo.head().unwrap().peel_to_commit().unwrap();
    assert_eq!(head.message(), Some("removed template setup files"));
    let tree = head.tree().unwrap();
    assert!(tree.get_path(Path::new("amazing_project/src/main.rs")).is_ok());
    assert!(tree.get_path(Path::new("package_name")).is_err());
    assert!(tree.get_path(Path::new(".primer.toml")).is_err());

    let mut walk = repo.revwalk().unwrap();
    walk.push_head().unwrap();
    assert_eq!(walk.count(), 4);
}
