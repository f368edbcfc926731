// crates/vidcore-core/src/media_types.rs
//
// Types that flow across the channel between vidcore-media and vidcore-ui.
// No egui, no ffmpeg. Plain data only. Ids are record ids.

/// Results sent from the MediaWorker background threads to the UI.
pub enum MediaResult {
    /// RGBA thumbnail for a library card.
    Thumbnail { id: String, width: u32, height: u32, data: Vec<u8> },
    /// The playback thread reached the last frame of `session`.
    PlaybackEnded { session: u64 },
    Error { id: String, msg: String },
}

/// A decoded frame from the playback pipeline.
pub struct PlaybackFrame {
    /// Returned by `start_playback`; frames of an older session are stale.
    pub session:   u64,
    /// Presentation time in seconds from the start of the file.
    pub timestamp: f64,
    pub width:     u32,
    pub height:    u32,
    pub data:      Vec<u8>, // RGBA
}
