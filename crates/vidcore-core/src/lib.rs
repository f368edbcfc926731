// crates/vidcore-core/src/lib.rs
//
// Pure library data: no egui, no ffmpeg, no runtime handles.
//
// The store is the only thing that touches persistence. Everything that
// renders or mutates the collection goes through `VideoStore` and then
// re-reads it with `list()`; nothing patches records in place.

pub mod blob;
pub mod commands;
pub mod edit;
pub mod helpers;
pub mod media_types;
pub mod pagination;
pub mod placeholder;
pub mod state;
pub mod storage;
pub mod store;
pub mod upload;

pub use blob::BlobRegistry;
pub use state::{NewVideo, VideoRecord, ViewMode};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, UnavailableStorage};
pub use store::{delete_video, VideoStore, VIDEO_STORAGE_KEY};
