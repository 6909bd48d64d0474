use super::StorageBackend;
use crate::error::{Result, StoreError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File-backed storage: one `<key>.json` file per logical key under a
/// data directory.
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    fn ensure_root(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(StoreError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path).map_err(StoreError::Io)?;
        Ok(Some(raw))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_root()?;

        // Write to a sibling tmp file, then rename. A crash mid-write
        // leaves the previous value intact.
        let path = self.key_path(key);
        let tmp = self.root.join(format!("{key}.json.tmp"));
        fs::write(&tmp, value).map_err(StoreError::Io)?;
        fs::rename(&tmp, &path).map_err(StoreError::Io)?;

        debug!(key, bytes = value.len(), "wrote collection");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(&path).map_err(StoreError::Io)?;
            debug!(key, "removed collection");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_get_absent_key() {
        let dir = TempDir::new().unwrap();
        let backend = FileBackend::new(dir.path());
        assert_eq!(backend.get("projects").unwrap(), None);
    }

    #[test]
    fn test_set_then_get_roundtrip() {
        let dir = TempDir::new().unwrap();
        let backend = FileBackend::new(dir.path());

        backend.set("projects", "[]").unwrap();
        assert_eq!(backend.get("projects").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_set_replaces_whole_value() {
        let dir = TempDir::new().unwrap();
        let backend = FileBackend::new(dir.path());

        backend.set("notifications", "[1]").unwrap();
        backend.set("notifications", "[2]").unwrap();
        assert_eq!(
            backend.get("notifications").unwrap().as_deref(),
            Some("[2]")
        );
    }

    #[test]
    fn test_remove_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let backend = FileBackend::new(dir.path());

        backend.set("users", "[]").unwrap();
        backend.remove("users").unwrap();
        assert_eq!(backend.get("users").unwrap(), None);
        // Removing again is a no-op, not an error.
        backend.remove("users").unwrap();
    }

    #[test]
    fn test_creates_data_dir_on_first_write() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("portal").join("data");
        let backend = FileBackend::new(&nested);

        backend.set("projects", "[]").unwrap();
        assert!(nested.join("projects.json").exists());
    }
}
