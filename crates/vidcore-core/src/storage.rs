// crates/vidcore-core/src/storage.rs
//
// Key-value persistence backends for VideoStore.
//
// The store only ever needs "read the whole value under a key" and "replace
// the whole value under a key", so that is the entire trait. Backends:
//
//   MemoryStorage      — HashMap behind a mutex; tests and throwaway sessions
//   FileStorage        — one JSON file per key under the app data directory
//   UnavailableStorage — every call fails; stands in for "no storage here"
//
// Backends report failures as anyhow errors. Deciding what a failure means
// for the collection is VideoStore's job, not the backend's.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use parking_lot::Mutex;
use tempfile::NamedTempFile;

pub trait KeyValueStorage {
    /// `Ok(None)` when the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for &T {
    fn get(&self, key: &str) -> Result<Option<String>> { (**self).get(key) }
    fn set(&self, key: &str, value: &str) -> Result<()> { (**self).set(key, value) }
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> { (**self).get(key) }
    fn set(&self, key: &str, value: &str) -> Result<()> { (**self).set(key, value) }
}

// ── MemoryStorage ─────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self { Self::default() }

    /// Seed a raw value, bypassing any encoding. Lets tests plant corrupt data.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage.entries.lock().insert(key.to_string(), value.to_string());
        storage
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ── FileStorage ───────────────────────────────────────────────────────────────

/// Stores each key as `<dir>/<key>.json`.
///
/// Writes land in a temp file inside `dir` first and are then renamed over the
/// target, so a reader never observes a half-written collection.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates `dir` if it does not exist yet.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("create storage dir {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path { &self.dir }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            bail!("invalid storage key {key:?}");
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("read {}", path.display())),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let mut tmp = NamedTempFile::new_in(&self.dir)
            .with_context(|| format!("temp file in {}", self.dir.display()))?;
        tmp.write_all(value.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&path)
            .with_context(|| format!("replace {}", path.display()))?;
        Ok(())
    }
}

// ── UnavailableStorage ────────────────────────────────────────────────────────

/// A backend that refuses every operation.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnavailableStorage;

impl KeyValueStorage for UnavailableStorage {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        bail!("storage unavailable")
    }

    fn set(&self, _key: &str, _value: &str) -> Result<()> {
        bail!("storage unavailable")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_get_missing_is_none() {
        let s = MemoryStorage::new();
        assert_eq!(s.get("k").unwrap(), None);
        s.set("k", "v").unwrap();
        assert_eq!(s.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn file_storage_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        {
            let s = FileStorage::open(dir.path()).unwrap();
            assert_eq!(s.get("uploadedVideos").unwrap(), None);
            s.set("uploadedVideos", "[]").unwrap();
        }
        let s = FileStorage::open(dir.path()).unwrap();
        assert_eq!(s.get("uploadedVideos").unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("uploadedVideos.json").exists());
    }

    #[test]
    fn file_storage_overwrites_whole_value() {
        let dir = tempfile::tempdir().unwrap();
        let s = FileStorage::open(dir.path().join("nested")).unwrap();
        s.set("k", "a much longer first value").unwrap();
        s.set("k", "short").unwrap();
        assert_eq!(s.get("k").unwrap().as_deref(), Some("short"));
    }

    #[test]
    fn file_storage_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let s = FileStorage::open(dir.path()).unwrap();
        assert!(s.set("../escape", "x").is_err());
        assert!(s.get("").is_err());
    }

    #[test]
    fn unavailable_storage_always_fails() {
        assert!(UnavailableStorage.get("k").is_err());
        assert!(UnavailableStorage.set("k", "v").is_err());
    }
}
