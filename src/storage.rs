//! Key-value blob storage
//!
//! The lot is persisted as one opaque string blob under a single key. The
//! [`BlobStore`] trait is the seam: [`FileBlobStore`] keeps one file per key
//! inside a data directory, [`MemoryBlobStore`] keeps everything in a map and
//! is what tests and headless previews use.

use crate::error::{Result, SmartParkError};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Minimal key-value store holding whole serialized blobs.
///
/// Writes always replace the full value; there is no partial update.
pub trait BlobStore {
    /// Read the blob stored under `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, overwriting any previous blob.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove the blob under `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory blob store.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    entries: HashMap<String, String>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// File-backed blob store: each key is stored as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        debug!(dir = %dir.display(), "Opened file blob store");
        Ok(Self { dir })
    }

    /// Directory holding the blob files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        // Write next to the target and rename so a crash never leaves half a blob
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Keys become file names, so only a conservative character set is allowed.
fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(SmartParkError::storage("storage key must not be empty"));
    }
    if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(SmartParkError::storage(format!(
            "storage key {key:?} may only contain letters, digits, '_' and '-'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_get_set_remove() {
        let mut store = MemoryBlobStore::new();
        assert_eq!(store.get("lot").unwrap(), None);

        store.set("lot", "[]").unwrap();
        assert_eq!(store.get("lot").unwrap().as_deref(), Some("[]"));
        assert_eq!(store.len(), 1);

        store.remove("lot").unwrap();
        assert!(store.is_empty());
        // Removing twice is fine
        store.remove("lot").unwrap();
    }

    #[test]
    fn test_file_store_overwrites_whole_blob() {
        let dir = TempDir::new().unwrap();
        let mut store = FileBlobStore::open(dir.path()).unwrap();

        store.set("smartParkDemoData", "[1,2,3]").unwrap();
        store.set("smartParkDemoData", "[4]").unwrap();

        assert_eq!(
            store.get("smartParkDemoData").unwrap().as_deref(),
            Some("[4]")
        );
        assert!(dir.path().join("smartParkDemoData.json").exists());
        assert!(!dir.path().join("smartParkDemoData.json.tmp").exists());
    }

    #[test]
    fn test_file_store_missing_key_is_none() {
        let dir = TempDir::new().unwrap();
        let store = FileBlobStore::open(dir.path()).unwrap();
        assert_eq!(store.get("absent").unwrap(), None);
    }

    #[test]
    fn test_file_store_remove_missing_is_ok() {
        let dir = TempDir::new().unwrap();
        let mut store = FileBlobStore::open(dir.path()).unwrap();
        assert!(store.remove("absent").is_ok());
    }

    #[test]
    fn test_file_store_creates_nested_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileBlobStore::open(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(store.dir(), nested.as_path());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = TempDir::new().unwrap();
        let mut store = FileBlobStore::open(dir.path()).unwrap();

        for key in ["", "../escape", "a/b", "with space"] {
            let err = store.set(key, "x").unwrap_err();
            assert!(matches!(err, SmartParkError::Storage(_)), "key {key:?}");
        }
    }
}
