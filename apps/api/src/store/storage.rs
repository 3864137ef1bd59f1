use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tempfile::NamedTempFile;
use thiserror::Error;

/// Fixed key the document is persisted under. File-backed storage appends `.json`.
pub const STORAGE_KEY: &str = "resumeData";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {location}: {source}")]
    Read {
        location: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {location}: {source}")]
    Write {
        location: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Durable home of the serialized document. Reads and writes are whole-blob.
pub trait DocumentStorage: Send + Sync {
    /// Returns `Ok(None)` when nothing has been persisted yet.
    fn read(&self) -> Result<Option<String>, StoreError>;

    fn write(&self, contents: &str) -> Result<(), StoreError>;

    /// Human-readable location, for logs.
    fn location(&self) -> String;
}

impl<T: DocumentStorage + ?Sized> DocumentStorage for std::sync::Arc<T> {
    fn read(&self) -> Result<Option<String>, StoreError> {
        (**self).read()
    }

    fn write(&self, contents: &str) -> Result<(), StoreError> {
        (**self).write(contents)
    }

    fn location(&self) -> String {
        (**self).location()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// File storage
// ────────────────────────────────────────────────────────────────────────────

/// Stores the document as a single JSON file.
///
/// Writes go to a temporary file in the same directory which is then renamed over
/// the target, so a crash mid-write leaves the previous document intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<dir>/resumeData.json`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(format!("{STORAGE_KEY}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }

    fn write_err(&self, source: io::Error) -> StoreError {
        StoreError::Write {
            location: self.location(),
            source,
        }
    }
}

impl DocumentStorage for FileStorage {
    fn read(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read {
                location: self.location(),
                source,
            }),
        }
    }

    fn write(&self, contents: &str) -> Result<(), StoreError> {
        let dir = self.parent_dir();
        fs::create_dir_all(dir).map_err(|e| self.write_err(e))?;

        let mut staged = NamedTempFile::new_in(dir).map_err(|e| self.write_err(e))?;
        staged
            .write_all(contents.as_bytes())
            .map_err(|e| self.write_err(e))?;
        staged.as_file().sync_all().map_err(|e| self.write_err(e))?;
        staged
            .persist(&self.path)
            .map_err(|e| self.write_err(e.error))?;
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory storage
// ────────────────────────────────────────────────────────────────────────────

/// Volatile storage, used when no durable location is wanted and in tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blob: Mutex<Option<String>>,
}

impl MemoryStorage {
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            blob: Mutex::new(Some(contents.into())),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.blob.lock().clone()
    }
}

impl DocumentStorage for MemoryStorage {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.blob.lock().clone())
    }

    fn write(&self, contents: &str) -> Result<(), StoreError> {
        *self.blob.lock() = Some(contents.to_string());
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_read_missing_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::in_dir(dir.path());
        assert!(storage.read().unwrap().is_none());
    }

    #[test]
    fn test_file_storage_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::in_dir(dir.path());
        storage.write("{\"a\":1}").unwrap();
        assert_eq!(storage.read().unwrap().as_deref(), Some("{\"a\":1}"));
        assert!(storage.path().ends_with("resumeData.json"));
    }

    #[test]
    fn test_file_storage_overwrite_replaces_contents() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::in_dir(dir.path());
        storage.write("first").unwrap();
        storage.write("second").unwrap();
        assert_eq!(storage.read().unwrap().as_deref(), Some("second"));
        // No staged temp files left behind.
        let entries = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_file_storage_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::in_dir(&dir.path().join("nested/data"));
        storage.write("x").unwrap();
        assert_eq!(storage.read().unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn test_memory_storage_starts_empty() {
        let storage = MemoryStorage::default();
        assert!(storage.read().unwrap().is_none());
        storage.write("doc").unwrap();
        assert_eq!(storage.contents().as_deref(), Some("doc"));
    }
}
