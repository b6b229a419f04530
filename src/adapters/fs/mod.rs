//! Filesystem adapter: Implementation of ReportStore.
//!
//! Reports are plain files in one directory, named by disease. Writes go to
//! a temporary sibling first and are renamed into place, so a failed write
//! never leaves a truncated report behind.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::ports::ReportStore;

/// Error type for report storage.
#[derive(Debug, thiserror::Error)]
pub enum ReportStoreError {
    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid report name: {0}")]
    InvalidName(String),
}

/// Stores reports under a single directory.
#[derive(Debug, Clone)]
pub struct FsReportStore {
    dir: PathBuf,
}

impl FsReportStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn checked_path(&self, name: &str) -> Result<PathBuf, ReportStoreError> {
        let valid = !name.is_empty()
            && !name.starts_with('.')
            && !name.contains(['/', '\\'])
            && name != "..";
        if !valid {
            return Err(ReportStoreError::InvalidName(name.to_string()));
        }
        Ok(self.dir.join(name))
    }
}

impl ReportStore for FsReportStore {
    type Error = ReportStoreError;

    fn save(&self, name: &str, bytes: &[u8]) -> Result<PathBuf, Self::Error> {
        let path = self.checked_path(name)?;
        let write_err = |source: std::io::Error| ReportStoreError::Write {
            path: path.clone(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(&write_err)?;

        let tmp = self.dir.join(format!(".{name}.tmp"));
        let result = fs::File::create(&tmp)
            .and_then(|mut f| {
                f.write_all(bytes)?;
                f.sync_all()
            })
            .and_then(|()| fs::rename(&tmp, &path));
        if let Err(e) = result {
            let _ = fs::remove_file(&tmp);
            return Err(write_err(e));
        }

        tracing::info!("Report written to {:?} ({} bytes)", path, bytes.len());
        Ok(path)
    }

    fn load(&self, name: &str) -> Result<Vec<u8>, Self::Error> {
        let path = self.checked_path(name)?;
        fs::read(&path).map_err(|source| ReportStoreError::Read { path, source })
    }

    fn location(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load() {
        let temp = tempdir().expect("tempdir");
        let store = FsReportStore::new(temp.path());

        let path = store.save("Heart_report.pdf", b"first").unwrap();
        assert_eq!(path, temp.path().join("Heart_report.pdf"));
        assert_eq!(store.load("Heart_report.pdf").unwrap(), b"first");
    }

    #[test]
    fn test_save_overwrites() {
        let temp = tempdir().expect("tempdir");
        let store = FsReportStore::new(temp.path());

        store.save("Liver_report.pdf", b"a much longer first version").unwrap();
        store.save("Liver_report.pdf", b"second").unwrap();
        assert_eq!(store.load("Liver_report.pdf").unwrap(), b"second");

        let leftovers: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_creates_missing_directory() {
        let temp = tempdir().expect("tempdir");
        let store = FsReportStore::new(temp.path().join("reports").join("2024"));
        assert!(store.save("Stroke_report.pdf", b"x").is_ok());
    }

    #[test]
    fn test_rejects_path_names() {
        let temp = tempdir().expect("tempdir");
        let store = FsReportStore::new(temp.path());
        assert!(matches!(
            store.save("../escape.pdf", b"x"),
            Err(ReportStoreError::InvalidName(_))
        ));
    }

    #[test]
    fn test_write_failure_reported() {
        let temp = tempdir().expect("tempdir");
        // A regular file where the directory should be.
        let blocker = temp.path().join("not_a_dir");
        fs::write(&blocker, b"").unwrap();

        let store = FsReportStore::new(&blocker);
        let err = store.save("Cancer_report.pdf", b"x").unwrap_err();
        assert!(matches!(err, ReportStoreError::Write { .. }));
    }

    #[test]
    fn test_load_missing() {
        let temp = tempdir().expect("tempdir");
        let store = FsReportStore::new(temp.path());
        assert!(matches!(
            store.load("Kidney_report.pdf"),
            Err(ReportStoreError::Read { .. })
        ));
    }
}
