// crates/vidcore-core/src/upload.rs
//
// Turning a picked or dropped file into a stored record.
//
//   select_upload  — extension filter, first accepted file wins
//   display_name   — file name minus its final extension
//   Uploader       — size lookup, blob reference, VideoStore::save
//
// Error strings are shown verbatim under the upload area.

use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;
use tracing::{info, warn};

use crate::blob::BlobRegistry;
use crate::state::{NewVideo, VideoRecord};
use crate::storage::KeyValueStorage;
use crate::store::VideoStore;

pub const ACCEPTED_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "mkv", "webm"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("Please upload a valid video file.")]
    NoFile,
    #[error("Failed to upload video. Please try again.")]
    SaveFailed,
}

pub fn is_accepted(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| ACCEPTED_EXTENSIONS.iter().any(|a| a.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

/// One file per operation: the first accepted path, everything else ignored.
pub fn select_upload(paths: &[PathBuf]) -> Result<&Path, UploadError> {
    paths.iter()
        .map(PathBuf::as_path)
        .find(|p| is_accepted(p))
        .ok_or(UploadError::NoFile)
}

/// `holiday.final.mp4` → `holiday.final`, `.mp4` → ``, `README` → `README`.
/// A trailing dot with nothing after it is kept.
pub fn display_name(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(idx) if idx + 1 < file_name.len() => &file_name[..idx],
        _ => file_name,
    }
}

pub struct Uploader<'a, S: KeyValueStorage> {
    store: &'a VideoStore<S>,
    blobs: &'a mut BlobRegistry,
}

impl<'a, S: KeyValueStorage> Uploader<'a, S> {
    pub fn new(store: &'a VideoStore<S>, blobs: &'a mut BlobRegistry) -> Self {
        Self { store, blobs }
    }

    /// Upload the first acceptable file in `paths`.
    pub fn upload_any(&mut self, paths: &[PathBuf]) -> Result<VideoRecord, UploadError> {
        let path = select_upload(paths)?;
        self.upload(path)
    }

    pub fn upload(&mut self, path: &Path) -> Result<VideoRecord, UploadError> {
        if !is_accepted(path) {
            return Err(UploadError::NoFile);
        }
        let file_name = path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or(UploadError::NoFile)?;

        let size = match std::fs::metadata(path) {
            Ok(meta) if meta.is_file() => meta.len(),
            Ok(_) => return Err(UploadError::NoFile),
            Err(e) => {
                warn!("upload: cannot stat {}: {e}", path.display());
                return Err(UploadError::SaveFailed);
            }
        };

        let url = self.blobs.create(path);
        let video = NewVideo {
            name:        display_name(&file_name).to_string(),
            file_name,
            url:         url.clone(),
            size,
            duration:    0.0,
            upload_date: Some(Utc::now()),
            thumbnail:   None,
        };

        match self.store.save(video) {
            Some(record) => {
                info!(id = %record.id, file = %record.file_name, size, "uploaded video");
                Ok(record)
            }
            None => {
                self.blobs.revoke(&url);
                Err(UploadError::SaveFailed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, UnavailableStorage};
    use std::io::Write;

    #[test]
    fn display_name_strips_final_extension() {
        assert_eq!(display_name("demo.mp4"), "demo");
        assert_eq!(display_name("holiday.final.mov"), "holiday.final");
        assert_eq!(display_name(".webm"), "");
        assert_eq!(display_name("README"), "README");
        assert_eq!(display_name("trailing."), "trailing.");
    }

    #[test]
    fn accepts_only_video_extensions() {
        assert!(is_accepted(Path::new("/a/b.mp4")));
        assert!(is_accepted(Path::new("B.MKV")));
        assert!(is_accepted(Path::new("c.WebM")));
        assert!(!is_accepted(Path::new("song.mp3")));
        assert!(!is_accepted(Path::new("noext")));
    }

    #[test]
    fn select_takes_first_accepted_only() {
        let paths = vec![
            PathBuf::from("notes.txt"),
            PathBuf::from("one.mov"),
            PathBuf::from("two.mp4"),
        ];
        assert_eq!(select_upload(&paths), Ok(Path::new("one.mov")));
        assert_eq!(select_upload(&[]), Err(UploadError::NoFile));
        assert_eq!(select_upload(&[PathBuf::from("x.png")]), Err(UploadError::NoFile));
    }

    #[test]
    fn error_messages_are_user_facing() {
        assert_eq!(UploadError::NoFile.to_string(), "Please upload a valid video file.");
        assert_eq!(UploadError::SaveFailed.to_string(), "Failed to upload video. Please try again.");
    }

    fn video_file(dir: &Path, name: &str, bytes: usize) -> PathBuf {
        let path = dir.join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(&vec![0u8; bytes]).unwrap();
        path
    }

    #[test]
    fn upload_saves_record_with_blob_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = video_file(dir.path(), "beach day.mp4", 1234);

        let store = VideoStore::new(MemoryStorage::new());
        let mut blobs = BlobRegistry::new();
        let rec = Uploader::new(&store, &mut blobs).upload(&path).unwrap();

        assert_eq!(rec.name, "beach day");
        assert_eq!(rec.file_name, "beach day.mp4");
        assert_eq!(rec.size, 1234);
        assert_eq!(rec.duration, 0.0);
        assert_eq!(blobs.resolve(&rec.url), Some(path.as_path()));
        assert_eq!(store.list(), vec![rec]);
    }

    #[test]
    fn upload_any_ignores_extra_files() {
        let dir = tempfile::tempdir().unwrap();
        let first  = video_file(dir.path(), "first.webm", 10);
        let second = video_file(dir.path(), "second.mp4", 20);

        let store = VideoStore::new(MemoryStorage::new());
        let mut blobs = BlobRegistry::new();
        let rec = Uploader::new(&store, &mut blobs).upload_any(&[first, second]).unwrap();
        assert_eq!(rec.name, "first");
        assert_eq!(store.list().len(), 1);
        assert_eq!(blobs.len(), 1);
    }

    #[test]
    fn missing_file_is_save_failure() {
        let dir = tempfile::tempdir().unwrap();
        let store = VideoStore::new(MemoryStorage::new());
        let mut blobs = BlobRegistry::new();
        let err = Uploader::new(&store, &mut blobs)
            .upload(&dir.path().join("gone.mp4"))
            .unwrap_err();
        assert_eq!(err, UploadError::SaveFailed);
        assert!(store.list().is_empty());
    }

    #[test]
    fn failed_save_revokes_reference() {
        let dir = tempfile::tempdir().unwrap();
        let path = video_file(dir.path(), "clip.mkv", 5);
        let store = VideoStore::new(UnavailableStorage);
        let mut blobs = BlobRegistry::new();
        let err = Uploader::new(&store, &mut blobs).upload(&path).unwrap_err();
        assert_eq!(err, UploadError::SaveFailed);
        assert!(blobs.is_empty());
    }
}
