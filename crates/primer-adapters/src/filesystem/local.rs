//! Files on disk.

use std::io;
use std::path::Path;

use primer_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{PrimerError, PrimerResult},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    pub fn new() -> Self {
        Self
    }
}

impl Filesystem for LocalFilesystem {
    fn read_to_string(&self, path: &Path) -> PrimerResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &str) -> PrimerResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

pub(crate) fn map_io_error(path: &Path, e: io::Error, operation: &str) -> PrimerError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_write_roundtrip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tmp.txt");
        let fs = LocalFilesystem::new();

        fs.write_file(&path, "This is a file\nwith old_text\n").unwrap();
        assert!(fs.exists(&path));
        assert_eq!(
            fs.read_to_string(&path).unwrap(),
            "This is a file\nwith old_text\n"
        );
    }

    #[test]
    fn missing_file_is_filesystem_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        let err = LocalFilesystem::new().read_to_string(&path).unwrap_err();
        match err {
            PrimerError::Application(ApplicationError::FilesystemError { path: p, reason }) => {
                assert_eq!(p, path);
                assert!(reason.starts_with("Failed to read file"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_utf8_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        assert!(LocalFilesystem::new().read_to_string(&path).is_err());
    }
}
