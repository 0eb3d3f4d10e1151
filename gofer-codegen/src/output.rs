//! Persistence of finalized files.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Destination for finalized files.
pub trait OutputWriter {
    /// Store `bytes` as `directory/filename`, returning the written path.
    fn write(&mut self, directory: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf>;
}

/// Writes files below a base directory, creating parent directories and
/// replacing existing files.
#[derive(Debug, Clone, Default)]
pub struct FsWriter {
    base: PathBuf,
}

impl FsWriter {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }
}

impl OutputWriter for FsWriter {
    fn write(&mut self, directory: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.base.join(directory).join(filename);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| Error::io(parent, source))?;
        }
        std::fs::write(&path, bytes).map_err(|source| Error::io(&path, source))?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote file");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_creates_directories() {
        let temp = TempDir::new().unwrap();
        let mut writer = FsWriter::new(temp.path());

        let path = writer
            .write(Path::new("internal/api"), "api.go", b"package api\n")
            .unwrap();

        assert_eq!(path, temp.path().join("internal/api/api.go"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "package api\n");
    }

    #[test]
    fn test_replaces_existing_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("main.go"), "old").unwrap();

        let mut writer = FsWriter::new(temp.path());
        writer.write(Path::new(""), "main.go", b"new").unwrap();

        assert_eq!(
            std::fs::read_to_string(temp.path().join("main.go")).unwrap(),
            "new"
        );
    }

    #[test]
    fn test_write_failure_is_io_error() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("blocker"), "").unwrap();

        let mut writer = FsWriter::new(temp.path());
        let err = writer
            .write(Path::new("blocker"), "main.go", b"")
            .unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }
}
