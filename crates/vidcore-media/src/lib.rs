// crates/vidcore-media/src/lib.rs
//
// No egui dependency. Talks to vidcore-ui over channels only.

pub mod decode;
pub mod probe;
pub mod worker;

pub use worker::MediaWorker;
pub use vidcore_core::media_types::{MediaResult, PlaybackFrame};

/// Must run once before any other call into this crate.
pub fn init() -> anyhow::Result<()> {
    ffmpeg_the_third::init()?;
    Ok(())
}
