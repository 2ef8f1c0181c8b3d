use std::path::{Path, PathBuf};

/// Directory holding this crate's manifest.
pub fn find_package_location() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Root of the repository the crate lives in.
pub fn find_repo_location() -> PathBuf {
    let package = find_package_location();
    package
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or(package)
}
