// crates/vidcore-core/src/blob.rs
//
// Session-scoped playable references.
//
// An uploaded file is never copied anywhere. Instead the uploader registers
// its path here and stores the returned `blob:vidcore/<uuid>` string as the
// record's `url`. The mapping lives only in memory, so after a restart every
// persisted url is dangling; the player reports those as unavailable rather
// than guessing at the original file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use uuid::Uuid;

pub const BLOB_SCHEME: &str = "blob:vidcore/";

#[derive(Default)]
pub struct BlobRegistry {
    entries: HashMap<String, PathBuf>,
}

impl BlobRegistry {
    pub fn new() -> Self { Self::default() }

    /// Register `path` and return a fresh reference to it. Registering the
    /// same path twice yields two independent references.
    pub fn create(&mut self, path: impl Into<PathBuf>) -> String {
        let url = format!("{BLOB_SCHEME}{}", Uuid::new_v4());
        self.entries.insert(url.clone(), path.into());
        url
    }

    /// `None` for references from another session, revoked references, and
    /// anything that is not a blob reference at all.
    pub fn resolve(&self, url: &str) -> Option<&Path> {
        if !is_blob_url(url) {
            return None;
        }
        self.entries.get(url).map(PathBuf::as_path)
    }

    /// Returns whether the reference was live. Anything that is not a blob
    /// reference (a url from a foreign writer, say) is left alone.
    pub fn revoke(&mut self, url: &str) -> bool {
        is_blob_url(url) && self.entries.remove(url).is_some()
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

pub fn is_blob_url(url: &str) -> bool {
    url.starts_with(BLOB_SCHEME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_resolve_revoke() {
        let mut reg = BlobRegistry::new();
        let url = reg.create("/videos/a.mp4");
        assert!(is_blob_url(&url));
        assert_eq!(reg.resolve(&url), Some(Path::new("/videos/a.mp4")));
        assert!(reg.revoke(&url));
        assert_eq!(reg.resolve(&url), None);
        assert!(!reg.revoke(&url));
    }

    #[test]
    fn references_are_unique_per_create() {
        let mut reg = BlobRegistry::new();
        let a = reg.create("/v/a.mp4");
        let b = reg.create("/v/a.mp4");
        assert_ne!(a, b);
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn foreign_references_do_not_resolve() {
        let mut reg = BlobRegistry::new();
        assert_eq!(reg.resolve("blob:http://localhost:3000/1234"), None);
        assert!(!is_blob_url("blob:http://localhost:3000/1234"));
        assert!(!reg.revoke("blob:http://localhost:3000/1234"));
        assert!(reg.is_empty());
    }
}
