// crates/vidcore-media/src/probe.rs
//
// In-process FFmpeg thumbnail extraction for library cards.
//
// The container duration is read only to pick a representative seek point;
// it is not reported back and never lands in a record.

use std::path::Path;
use anyhow::{anyhow, Result};
use crossbeam_channel::Sender;
use tracing::{debug, warn};

use ffmpeg_the_third as ffmpeg;
use ffmpeg::format::{input, Pixel};
use ffmpeg::media::Type;
use ffmpeg::software::scaling::{context::Context as SwsContext, flag::Flags};

use vidcore_core::media_types::MediaResult;

use crate::decode::destripe;

pub const THUMB_WIDTH: u32 = 320;

/// Decode one frame near the start of `path` and send it as a thumbnail.
/// Failures are reported as `MediaResult::Error`; the card keeps its
/// placeholder.
pub fn probe_thumbnail(path: &Path, id: &str, tx: &Sender<MediaResult>) {
    if let Err(e) = extract_thumbnail(path, id, tx) {
        warn!("thumbnail {}: {e:#}", path.display());
        let _ = tx.send(MediaResult::Error { id: id.to_string(), msg: e.to_string() });
    }
}

fn extract_thumbnail(path: &Path, id: &str, tx: &Sender<MediaResult>) -> Result<()> {
    let mut ictx = input(path)?;

    let video_stream_idx = ictx.streams().best(Type::Video)
        .ok_or_else(|| anyhow!("no video stream"))?
        .index();

    // Skip black intro frames: 10% in, at least 1 s, only when the file is
    // long enough for that to matter.
    let container_secs = ictx.duration() as f64 / ffmpeg::ffi::AV_TIME_BASE as f64;
    let seek_ts = {
        let stream = ictx.stream(video_stream_idx).ok_or_else(|| anyhow!("stream gone"))?;
        let tb = stream.time_base();
        if container_secs > 2.0 {
            let t = (container_secs * 0.1).max(1.0);
            (t * tb.denominator() as f64 / tb.numerator().max(1) as f64) as i64
        } else {
            0i64
        }
    };
    let _ = ictx.seek(seek_ts, ..=seek_ts);

    // Second context to build the decoder (avoids borrow-after-seek conflict).
    let ictx2   = input(path)?;
    let stream2 = ictx2.stream(video_stream_idx).ok_or_else(|| anyhow!("stream gone"))?;
    let context = ffmpeg::codec::context::Context::from_parameters(stream2.parameters())?;
    let mut decoder = context.decoder().video()?;

    let raw_w = decoder.width();
    let raw_h = decoder.height();
    let thumb_h: u32 = ((THUMB_WIDTH as f64 * raw_h as f64 / raw_w.max(1) as f64) as u32)
        .max(2) & !1; // must be even

    let mut scaler = SwsContext::get(
        decoder.format(), raw_w, raw_h,
        Pixel::RGBA, THUMB_WIDTH, thumb_h, Flags::BILINEAR,
    )?;

    for (stream, packet) in ictx.packets().flatten() {
        if stream.index() != video_stream_idx { continue; }
        if decoder.send_packet(&packet).is_err() { continue; }
        let mut decoded = ffmpeg::util::frame::video::Video::empty();
        if decoder.receive_frame(&mut decoded).is_ok() {
            let mut rgba = ffmpeg::util::frame::video::Video::empty();
            scaler.run(&decoded, &mut rgba)?;
            let data = destripe(&rgba, THUMB_WIDTH, thumb_h);
            debug!("thumbnail {}x{} ← {}", THUMB_WIDTH, thumb_h, path.display());
            let _ = tx.send(MediaResult::Thumbnail {
                id: id.to_string(), width: THUMB_WIDTH, height: thumb_h, data,
            });
            return Ok(());
        }
    }
    Err(anyhow!("no frame decoded"))
}
