// crates/vidcore-media/src/decode.rs
//
// LiveDecoder: sequential RGBA frame decode for the player surface.
// One instance per playback session; restarting playback opens a new one.

use std::path::Path;
use anyhow::{anyhow, Result};

use ffmpeg_the_third as ffmpeg;
use ffmpeg::format::{input, Pixel};
use ffmpeg::media::Type;
use ffmpeg::software::scaling::{context::Context as SwsContext, flag::Flags};

/// Frames wider than this are scaled down before they cross the channel.
pub const MAX_OUTPUT_WIDTH: u32 = 1280;

pub struct LiveDecoder {
    ictx:          ffmpeg::format::context::Input,
    decoder:       ffmpeg::decoder::video::Video,
    video_idx:     usize,
    last_pts:      i64,
    tb_num:        i32,
    tb_den:        i32,
    pub out_w:     u32,
    pub out_h:     u32,
    scaler:        SwsContext,
    drained:       bool,
}

impl LiveDecoder {
    pub fn open(path: &Path) -> Result<Self> {
        let ictx = input(path)?;
        let video_idx = ictx.streams().best(Type::Video)
            .ok_or_else(|| anyhow!("no video stream"))?.index();

        let (tb_num, tb_den) = {
            let stream = ictx.stream(video_idx).ok_or_else(|| anyhow!("stream gone"))?;
            let tb = stream.time_base();
            (tb.numerator(), tb.denominator().max(1))
        };

        // Second context for decoder params (avoids borrow conflict with ictx).
        let ictx2   = input(path)?;
        let stream2 = ictx2.stream(video_idx).ok_or_else(|| anyhow!("stream gone"))?;
        let dec_ctx = ffmpeg::codec::context::Context::from_parameters(stream2.parameters())?;
        let decoder = dec_ctx.decoder().video()?;

        let (out_w, out_h) = output_size(decoder.width(), decoder.height(), MAX_OUTPUT_WIDTH);
        let scaler = SwsContext::get(
            decoder.format(), decoder.width(), decoder.height(),
            Pixel::RGBA, out_w, out_h, Flags::BILINEAR,
        )?;

        Ok(Self {
            ictx, decoder, video_idx,
            last_pts: 0, tb_num, tb_den, out_w, out_h, scaler,
            drained: false,
        })
    }

    pub fn pts_to_secs(&self, pts: i64) -> f64 {
        pts as f64 * self.tb_num as f64 / self.tb_den as f64
    }

    /// Decode the next frame. Returns `(pixels, w, h, ts_secs)` or None at EOF.
    pub fn next_frame(&mut self) -> Option<(Vec<u8>, u32, u32, f64)> {
        loop {
            let mut decoded = ffmpeg::util::frame::video::Video::empty();
            if self.decoder.receive_frame(&mut decoded).is_ok() {
                let pts = decoded.pts().unwrap_or(self.last_pts + 1);
                self.last_pts = pts;
                let ts_secs = self.pts_to_secs(pts);
                let mut out = ffmpeg::util::frame::video::Video::empty();
                if self.scaler.run(&decoded, &mut out).is_err() { return None; }
                let data = destripe(&out, self.out_w, self.out_h);
                return Some((data, self.out_w, self.out_h, ts_secs));
            }
            if self.drained { return None; }
            match self.next_video_packet() {
                Some(packet) => { let _ = self.decoder.send_packet(&packet); }
                None => {
                    // Flush the frames the decoder is still holding back.
                    let _ = self.decoder.send_eof();
                    self.drained = true;
                }
            }
        }
    }

    fn next_video_packet(&mut self) -> Option<ffmpeg::Packet> {
        let video_idx = self.video_idx;
        self.ictx.packets()
            .flatten()
            .find(|(stream, _)| stream.index() == video_idx)
            .map(|(_, packet)| packet)
    }
}

/// Keep the native size unless wider than `max_w`; heights stay even.
pub fn output_size(w: u32, h: u32, max_w: u32) -> (u32, u32) {
    if w == 0 || h == 0 {
        return (2, 2);
    }
    if w <= max_w {
        return (w.max(2) & !1, h.max(2) & !1);
    }
    let scaled_h = ((max_w as f64 * h as f64 / w as f64) as u32).max(2) & !1;
    (max_w, scaled_h)
}

/// Copy only visible pixels out of an RGBA frame, dropping stride padding.
pub(crate) fn destripe(frame: &ffmpeg::util::frame::video::Video, w: u32, h: u32) -> Vec<u8> {
    let stride    = frame.stride(0);
    let raw       = frame.data(0);
    let row_bytes = w as usize * 4;
    (0..h as usize)
        .flat_map(|row| &raw[row * stride..row * stride + row_bytes])
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_frames_keep_native_size() {
        assert_eq!(output_size(640, 360, 1280), (640, 360));
    }

    #[test]
    fn wide_frames_scale_to_max_width() {
        assert_eq!(output_size(3840, 2160, 1280), (1280, 720));
    }

    #[test]
    fn odd_dimensions_round_to_even() {
        assert_eq!(output_size(641, 361, 1280), (640, 360));
    }

    #[test]
    fn degenerate_size_is_clamped() {
        assert_eq!(output_size(0, 0, 1280), (2, 2));
    }
}
