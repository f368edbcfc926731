// crates/vidcore-ui/src/context.rs
//
// AppContext owns every runtime handle that is not part of the rendered
// record list. VidCoreApp holds one of these plus the views.
//
//   AppContext
//     ├── store           — VideoStore over the configured backend
//     ├── blobs           — session-scoped blob references (uploads only)
//     ├── media_worker    — thumbnail probes + playback decode thread
//     ├── thumbnail_cache — GPU textures keyed by record id
//     └── probed          — record ids already sent for a thumbnail

use std::collections::HashSet;
use std::path::PathBuf;

use eframe::egui;
use tracing::{info, warn};

use vidcore_core::{delete_video, BlobRegistry, FileStorage, KeyValueStorage, UnavailableStorage, VideoRecord, VideoStore};
use vidcore_media::{MediaResult, MediaWorker};

use crate::modules::ThumbnailCache;

pub type DynStorage = Box<dyn KeyValueStorage>;

pub struct AppContext {
    pub store:           VideoStore<DynStorage>,
    pub blobs:           BlobRegistry,
    pub media_worker:    MediaWorker,
    pub thumbnail_cache: ThumbnailCache,
    probed:              HashSet<String>,
}

impl AppContext {
    pub fn new(storage: DynStorage, media_worker: MediaWorker) -> Self {
        Self {
            store: VideoStore::new(storage),
            blobs: BlobRegistry::new(),
            media_worker,
            thumbnail_cache: ThumbnailCache::new(),
            probed: HashSet::new(),
        }
    }

    /// File-backed storage under `dir`, or the unavailable backend when the
    /// directory cannot be created. The app keeps running either way; with
    /// no storage every list is empty and every upload reports a failure.
    pub fn open_storage(dir: PathBuf) -> DynStorage {
        match FileStorage::open(&dir) {
            Ok(fs) => {
                info!("video collection at {}", fs.dir().display());
                Box::new(fs)
            }
            Err(e) => {
                warn!("storage unavailable: {e:#}");
                Box::new(UnavailableStorage)
            }
        }
    }

    /// The file behind a record's url, when it was uploaded this session.
    pub fn resolve(&self, record: &VideoRecord) -> Option<PathBuf> {
        self.blobs.resolve(&record.url).map(|p| p.to_path_buf())
    }

    /// Request thumbnails for playable records that have none yet.
    pub fn probe_new(&mut self, videos: &[VideoRecord]) {
        for v in videos {
            if self.probed.contains(&v.id) {
                continue;
            }
            if let Some(path) = self.resolve(v) {
                self.probed.insert(v.id.clone());
                self.media_worker.probe_clip(v.id.clone(), path);
            }
        }
    }

    /// Delete a record, revoking its blob reference and dropping its
    /// thumbnail. `None` when nothing was deleted.
    pub fn delete(&mut self, id: &str) -> Option<VideoRecord> {
        let record = delete_video(&self.store, &mut self.blobs, id)?;
        self.thumbnail_cache.remove(&record.id);
        self.probed.remove(&record.id);
        Some(record)
    }

    /// Drain worker results into the texture cache. Returns the number of a
    /// playback session that just reached its last frame, if any.
    pub fn ingest_media_results(&mut self, ctx: &egui::Context) -> Option<u64> {
        let mut ended = None;
        while let Ok(result) = self.media_worker.rx.try_recv() {
            match result {
                MediaResult::Thumbnail { id, width, height, data } => {
                    let image = egui::ColorImage::from_rgba_unmultiplied(
                        [width as usize, height as usize], &data);
                    let tex = ctx.load_texture(
                        format!("thumb-{id}"), image, egui::TextureOptions::LINEAR);
                    self.thumbnail_cache.insert(id, tex);
                }
                MediaResult::PlaybackEnded { session } => ended = Some(session),
                MediaResult::Error { id, msg } => {
                    warn!("[media] {id}: {msg}");
                }
            }
        }
        ended
    }
}
