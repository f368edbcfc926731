// crates/vidcore-core/src/store.rs
//
// VideoStore: CRUD over the single persisted collection.
//
// Every operation is a whole-collection read-modify-write against one key.
// There is no partial update and no locking: two writers interleaving their
// read and write steps resolve as last-write-wins. Fine for a personal
// library of a few hundred records; every mutation rewrites the whole array.
//
// Failure policy (nothing here returns an error):
//   backend read fails              → behaves as an empty collection
//   stored text is not a JSON array → behaves as an empty collection
//   one element does not decode     → that element is skipped, the rest load
//   backend write fails             → mutation is dropped, caller gets None / false
//   unknown id                      → no-op

use tracing::{debug, warn};
use uuid::Uuid;

use crate::blob::BlobRegistry;
use crate::state::{NewVideo, VideoRecord};
use crate::storage::KeyValueStorage;

/// The one key the whole collection lives under.
pub const VIDEO_STORAGE_KEY: &str = "uploadedVideos";

pub struct VideoStore<S: KeyValueStorage> {
    storage: S,
}

impl<S: KeyValueStorage> VideoStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Assign a fresh id, default the upload date, append, write back.
    /// Returns `None` when the collection could not be written.
    pub fn save(&self, video: NewVideo) -> Option<VideoRecord> {
        let mut videos = self.list();
        let record = video.into_record(Uuid::new_v4().to_string());
        videos.push(record.clone());
        if !self.write_all(&videos) {
            return None;
        }
        debug!(id = %record.id, name = %record.name, "saved video");
        Some(record)
    }

    /// The full collection in stored order. Never fails.
    pub fn list(&self) -> Vec<VideoRecord> {
        let raw = match self.storage.get(VIDEO_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("video store read failed: {e:#}");
                return Vec::new();
            }
        };
        if raw.is_empty() {
            return Vec::new();
        }
        let items = match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
            Ok(items) => items,
            Err(e) => {
                warn!("stored video collection is unreadable, treating as empty: {e}");
                return Vec::new();
            }
        };
        items.into_iter()
            .enumerate()
            .filter_map(|(i, item)| match serde_json::from_value::<VideoRecord>(item) {
                Ok(video) => Some(video),
                Err(e) => {
                    warn!("skipping stored video #{i}: {e}");
                    None
                }
            })
            .collect()
    }

    pub fn get_by_id(&self, id: &str) -> Option<VideoRecord> {
        self.list().into_iter().find(|v| v.id == id)
    }

    /// Replace the `name` of one record. Every other field and the order of
    /// the collection are left untouched.
    pub fn rename_by_id(&self, id: &str, new_name: &str) -> Option<VideoRecord> {
        let mut videos = self.list();
        let idx = videos.iter().position(|v| v.id == id)?;
        videos[idx].name = new_name.to_string();
        if !self.write_all(&videos) {
            return None;
        }
        debug!(id, new_name, "renamed video");
        Some(videos.swap_remove(idx))
    }

    /// Remove the record with `id`. Returns whether a record was removed and
    /// the shortened collection was written.
    pub fn delete_by_id(&self, id: &str) -> bool {
        let videos = self.list();
        let before = videos.len();
        let remaining: Vec<VideoRecord> = videos.into_iter().filter(|v| v.id != id).collect();
        let removed = remaining.len() != before;
        if !self.write_all(&remaining) {
            return false;
        }
        if removed {
            debug!(id, "deleted video");
        }
        removed
    }

    fn write_all(&self, videos: &[VideoRecord]) -> bool {
        let text = match serde_json::to_string(videos) {
            Ok(t) => t,
            Err(e) => {
                warn!("video collection encode failed: {e}");
                return false;
            }
        };
        match self.storage.set(VIDEO_STORAGE_KEY, &text) {
            Ok(()) => true,
            Err(e) => {
                warn!("video store write failed: {e:#}");
                false
            }
        }
    }
}

/// Delete a record and revoke its playable reference. Returns the removed
/// record, or `None` when nothing was deleted (unknown id, failed write), in
/// which case the reference is left alone.
pub fn delete_video<S: KeyValueStorage>(
    store: &VideoStore<S>,
    blobs: &mut BlobRegistry,
    id:    &str,
) -> Option<VideoRecord> {
    let record = store.get_by_id(id)?;
    if !store.delete_by_id(id) {
        return None;
    }
    blobs.revoke(&record.url);
    Some(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, UnavailableStorage};
    use chrono::{TimeZone, Utc};

    fn demo(name: &str) -> NewVideo {
        NewVideo {
            name:        name.into(),
            file_name:   format!("{name}.mp4"),
            url:         format!("blob:{name}"),
            size:        1000,
            duration:    0.0,
            upload_date: None,
            thumbnail:   None,
        }
    }

    #[test]
    fn save_rename_delete_scenario() {
        let store = VideoStore::new(MemoryStorage::new());
        let saved = store.save(NewVideo { url: "blob:1".into(), ..demo("demo") }).unwrap();

        let listed = store.list();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "demo");
        assert_eq!(listed[0].id, saved.id);
        assert!(!saved.id.is_empty());

        store.rename_by_id(&saved.id, "demo2").unwrap();
        assert_eq!(store.list()[0].name, "demo2");

        assert!(store.delete_by_id(&saved.id));
        assert!(store.list().is_empty());
    }

    #[test]
    fn save_preserves_fields_and_assigns_unique_ids() {
        let store = VideoStore::new(MemoryStorage::new());
        let date = Utc.with_ymd_and_hms(2023, 1, 2, 3, 4, 5).unwrap();
        let a = store.save(NewVideo {
            upload_date: Some(date),
            thumbnail:   Some("thumb.png".into()),
            size:        42,
            ..demo("a")
        }).unwrap();
        let b = store.save(demo("b")).unwrap();
        assert_ne!(a.id, b.id);

        let got = store.get_by_id(&a.id).unwrap();
        assert_eq!(got, a);
        assert_eq!(got.file_name, "a.mp4");
        assert_eq!(got.url, "blob:a");
        assert_eq!(got.size, 42);
        assert_eq!(got.upload_date, date);
        assert_eq!(got.thumbnail.as_deref(), Some("thumb.png"));
    }

    #[test]
    fn rename_touches_only_the_name() {
        let store = VideoStore::new(MemoryStorage::new());
        let a = store.save(demo("a")).unwrap();
        let b = store.save(demo("b")).unwrap();
        let c = store.save(demo("c")).unwrap();

        let renamed = store.rename_by_id(&b.id, "bee").unwrap();
        assert_eq!(renamed, VideoRecord { name: "bee".into(), ..b.clone() });

        let all = store.list();
        assert_eq!(all, vec![a, VideoRecord { name: "bee".into(), ..b }, c]);
    }

    #[test]
    fn rename_unknown_id_is_noop() {
        let store = VideoStore::new(MemoryStorage::new());
        let a = store.save(demo("a")).unwrap();
        assert_eq!(store.rename_by_id("missing", "x"), None);
        assert_eq!(store.list(), vec![a]);
    }

    #[test]
    fn delete_removes_exactly_one() {
        let store = VideoStore::new(MemoryStorage::new());
        let a = store.save(demo("a")).unwrap();
        let b = store.save(demo("b")).unwrap();
        let c = store.save(demo("c")).unwrap();
        assert!(store.delete_by_id(&b.id));
        assert_eq!(store.list(), vec![a.clone(), c.clone()]);

        assert!(!store.delete_by_id("missing"));
        assert_eq!(store.list(), vec![a, c]);
    }

    #[test]
    fn corrupt_collection_lists_empty() {
        let store = VideoStore::new(MemoryStorage::with_entry(VIDEO_STORAGE_KEY, "{not json"));
        assert!(store.list().is_empty());
        assert_eq!(store.get_by_id("anything"), None);
    }

    #[test]
    fn bad_date_keeps_neighbours_through_a_save() {
        let raw = r#"[
            {"id":"a","name":"a","fileName":"a.mp4","url":"u","size":1,"duration":0,
             "uploadDate":"2024-01-01T00:00:00.000Z"},
            {"id":"bad","name":"bad","fileName":"bad.mp4","url":"u","size":1,"duration":0,
             "uploadDate":"not a date"},
            {"id":"b","name":"b","fileName":"b.mp4","url":"u","size":1,"duration":0,
             "uploadDate":"2024-01-02T00:00:00.000Z"}
        ]"#;
        let store = VideoStore::new(MemoryStorage::with_entry(VIDEO_STORAGE_KEY, raw));
        let ids = |s: &VideoStore<MemoryStorage>| s.list().into_iter().map(|v| v.id).collect::<Vec<_>>();
        assert_eq!(ids(&store), ["a", "bad", "b"]);

        let new = store.save(demo("new")).unwrap();
        assert_eq!(ids(&store), vec!["a".to_string(), "bad".into(), "b".into(), new.id]);
        assert_eq!(store.get_by_id("bad").unwrap().upload_date.timestamp(), 0);
    }

    #[test]
    fn structurally_broken_element_is_skipped_alone() {
        let raw = r#"[{"id":"a","name":"a","fileName":"a.mp4","url":"u","size":1,"duration":0,
             "uploadDate":"2024-01-01T00:00:00.000Z"}, {"id":"half"}, 42]"#;
        let store = VideoStore::new(MemoryStorage::with_entry(VIDEO_STORAGE_KEY, raw));
        let listed = store.list();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, "a");
    }

    #[test]
    fn non_array_collection_lists_empty() {
        let store = VideoStore::new(MemoryStorage::with_entry(VIDEO_STORAGE_KEY, r#"{"id":"a"}"#));
        assert!(store.list().is_empty());
    }

    #[test]
    fn delete_video_revokes_reference_and_leaves_list_without_it() {
        let store = VideoStore::new(MemoryStorage::new());
        let mut blobs = BlobRegistry::new();
        let keep_url = blobs.create("/v/keep.mp4");
        let gone_url = blobs.create("/v/gone.mp4");
        let keep = store.save(NewVideo { url: keep_url.clone(), ..demo("keep") }).unwrap();
        let gone = store.save(NewVideo { url: gone_url.clone(), ..demo("gone") }).unwrap();

        assert_eq!(delete_video(&store, &mut blobs, &gone.id), Some(gone));
        assert_eq!(blobs.resolve(&gone_url), None);
        assert!(blobs.resolve(&keep_url).is_some());
        assert_eq!(store.list(), vec![keep]);
    }

    #[test]
    fn delete_video_without_a_record_keeps_reference() {
        let store = VideoStore::new(MemoryStorage::new());
        let mut blobs = BlobRegistry::new();
        let url = blobs.create("/v/a.mp4");
        assert_eq!(delete_video(&store, &mut blobs, "missing"), None);
        assert!(blobs.resolve(&url).is_some());

        let offline = VideoStore::new(UnavailableStorage);
        assert_eq!(delete_video(&offline, &mut blobs, "missing"), None);
        assert!(blobs.resolve(&url).is_some());
    }

    #[test]
    fn save_over_corrupt_collection_starts_fresh() {
        let store = VideoStore::new(MemoryStorage::with_entry(VIDEO_STORAGE_KEY, "garbage"));
        let a = store.save(demo("a")).unwrap();
        assert_eq!(store.list(), vec![a]);
    }

    #[test]
    fn reads_collection_written_by_other_writer() {
        let raw = r#"[{"id":"x1","name":"clip","fileName":"clip.webm","url":"blob:http://localhost/1",
            "size":2048,"duration":0,"uploadDate":"2024-02-29T08:30:00.250Z"}]"#;
        let store = VideoStore::new(MemoryStorage::with_entry(VIDEO_STORAGE_KEY, raw));
        let rec = store.get_by_id("x1").unwrap();
        assert_eq!(rec.size, 2048);
        assert_eq!(rec.upload_date.timestamp_millis(), 1_709_195_400_250);
    }

    #[test]
    fn unavailable_storage_degrades() {
        let store = VideoStore::new(UnavailableStorage);
        assert!(store.list().is_empty());
        assert_eq!(store.save(demo("a")), None);
        assert_eq!(store.rename_by_id("a", "b"), None);
        assert!(!store.delete_by_id("a"));
    }

    #[test]
    fn borrowed_backend_shares_state() {
        let backend = MemoryStorage::new();
        let writer = VideoStore::new(&backend);
        let reader = VideoStore::new(&backend);
        let a = writer.save(demo("a")).unwrap();
        assert_eq!(reader.list(), vec![a]);
    }
}
