// crates/vidcore-ui/src/modules/player.rs
//
// Detail page: one record resolved by id, a playback surface, and static
// decoration around it (view counts, channel block, comment box,
// recommendations). Only the player itself does anything.
//
// Playback frames arrive from MediaWorker::pb_rx ahead of time; poll() holds
// each one until the page clock reaches its presentation time, the same
// PTS-gating the decode thread's backpressure relies on.

use std::path::PathBuf;

use egui::{Color32, Rect, RichText, Sense, Stroke, TextureHandle, Ui, Vec2};
use rand::thread_rng;

use vidcore_core::commands::LibraryCommand;
use vidcore_core::helpers::format::format_size;
use vidcore_core::helpers::time::{format_clock, format_duration, format_upload_date};
use vidcore_core::media_types::PlaybackFrame;
use vidcore_core::placeholder::{group_thousands, DetailDecoration, SUBSCRIBER_LABEL};
use vidcore_core::VideoRecord;
use vidcore_media::MediaWorker;

use super::ThumbnailCache;
use crate::theme::{ACCENT, DARK_BG_3, DARK_BORDER, DARK_TEXT_DIM};

/// A frame may be shown this early (seconds).
const FRAME_SLACK: f64 = 0.010;

pub struct DetailPage {
    pub id:      String,
    /// `None` renders the not-found state.
    pub video:   Option<VideoRecord>,
    /// File behind the record's url. `None` once the reference is dead.
    source:      Option<PathBuf>,
    decoration:  DetailDecoration,

    // ── Playback ─────────────────────────────────────────────────────────────
    session:       u64,
    is_playing:    bool,
    /// Session started and not yet stopped by EOF.
    session_live:  bool,
    /// The worker reported EOF; remaining frames may still be queued.
    decode_ended:  bool,
    /// Seconds of playback elapsed on the page clock.
    position:      f64,
    /// Timestamp of the first frame of the session, so files whose PTS do not
    /// start at zero still play from the first frame.
    pts_origin:    Option<f64>,
    pending_frame: Option<PlaybackFrame>,
    current_frame: Option<TextureHandle>,
}

impl DetailPage {
    pub fn open(id: String, video: Option<VideoRecord>, source: Option<PathBuf>) -> Self {
        Self {
            id,
            video,
            source,
            decoration:    DetailDecoration::generate(&mut thread_rng()),
            session:       0,
            is_playing:    false,
            session_live:  false,
            decode_ended:  false,
            position:      0.0,
            pts_origin:    None,
            pending_frame: None,
            current_frame: None,
        }
    }

    pub fn play(&mut self, worker: &MediaWorker) {
        if self.source.is_none() || self.video.is_none() {
            return;
        }
        if !self.session_live {
            self.restart(worker);
            return;
        }
        self.is_playing = true;
    }

    pub fn pause(&mut self) {
        self.is_playing = false;
    }

    pub fn restart(&mut self, worker: &MediaWorker) {
        let Some(path) = self.source.clone() else { return };
        self.session       = worker.start_playback(path);
        self.is_playing    = true;
        self.session_live  = true;
        self.decode_ended  = false;
        self.position      = 0.0;
        self.pts_origin    = None;
        self.pending_frame = None;
    }

    pub fn stop(&mut self, worker: &MediaWorker) {
        if self.session_live {
            worker.stop_playback();
        }
        self.is_playing   = false;
        self.session_live = false;
    }

    pub fn on_decode_ended(&mut self, session: u64) {
        if session == self.session {
            self.decode_ended = true;
        }
    }

    /// Advance the page clock and show whichever queued frame is due.
    pub fn poll(&mut self, worker: &MediaWorker, ctx: &egui::Context) {
        if !self.is_playing {
            return;
        }
        self.position += ctx.input(|i| i.stable_dt as f64);

        let mut due: Option<PlaybackFrame> = None;
        loop {
            let frame = match self.pending_frame.take() {
                Some(f) => f,
                None => match worker.pb_rx.try_recv() {
                    Ok(f) => f,
                    Err(_) => break,
                },
            };
            if frame.session != self.session {
                continue;
            }
            let origin = *self.pts_origin.get_or_insert(frame.timestamp);
            if frame.timestamp - origin > self.position + FRAME_SLACK {
                self.pending_frame = Some(frame);
                break;
            }
            due = Some(frame);
        }

        if let Some(f) = due {
            let image = egui::ColorImage::from_rgba_unmultiplied(
                [f.width as usize, f.height as usize], &f.data);
            match &mut self.current_frame {
                Some(tex) => tex.set(image, egui::TextureOptions::LINEAR),
                None => {
                    self.current_frame = Some(ctx.load_texture(
                        "playback_frame", image, egui::TextureOptions::LINEAR));
                }
            }
        }

        if self.decode_ended && self.pending_frame.is_none() && worker.pb_rx.is_empty() {
            self.is_playing   = false;
            self.session_live = false;
        }
        ctx.request_repaint();
    }

    pub fn ui(&mut self, ui: &mut Ui, thumbs: &ThumbnailCache, cmd: &mut Vec<LibraryCommand>) {
        if ui.button("← Back").clicked() {
            cmd.push(LibraryCommand::ShowIndex);
        }
        ui.add_space(8.0);

        let Some(video) = self.video.clone() else {
            ui.vertical_centered(|ui| {
                ui.add_space(60.0);
                ui.label(RichText::new("404").size(40.0).strong());
                ui.label(RichText::new("Video not found").size(18.0));
                ui.label(RichText::new("It may have been deleted.").color(DARK_TEXT_DIM));
            });
            return;
        };

        let total_w = ui.available_width();
        let side_w  = (total_w * 0.3).clamp(220.0, 360.0);
        let main_w  = (total_w - side_w - 24.0).max(320.0);

        ui.horizontal_top(|ui| {
            ui.vertical(|ui| {
                ui.set_width(main_w);
                self.player_surface(ui, &video, thumbs, main_w);
                self.transport(ui, cmd);
                ui.add_space(8.0);
                self.info_block(ui, &video);
            });
            ui.add_space(24.0);
            ui.vertical(|ui| {
                ui.set_width(side_w);
                self.recommendations(ui);
            });
        });
    }

    fn player_surface(&self, ui: &mut Ui, video: &VideoRecord, thumbs: &ThumbnailCache, width: f32) {
        let height = width * 9.0 / 16.0;
        let (rect, _) = ui.allocate_exact_size(Vec2::new(width, height), Sense::hover());
        let painter = ui.painter();
        painter.rect_filled(rect, 6.0, Color32::BLACK);
        painter.rect_stroke(rect, 6.0,
            Stroke::new(1.0, if self.is_playing { ACCENT } else { DARK_BORDER }),
            egui::StrokeKind::Outside);

        let texture = self.current_frame.as_ref().or_else(|| thumbs.get(&video.id));
        if let Some(tex) = texture {
            let [w, h] = tex.size();
            let fitted = fit_rect(rect, w as f32 / h.max(1) as f32);
            painter.image(tex.id(), fitted,
                Rect::from_min_max(egui::Pos2::ZERO, egui::Pos2::new(1.0, 1.0)),
                Color32::WHITE);
        }

        if self.source.is_none() {
            painter.text(rect.center(), egui::Align2::CENTER_CENTER,
                "This video is no longer available in this session.\nUpload it again to play it.",
                egui::FontId::proportional(15.0), Color32::from_gray(170));
        } else if self.current_frame.is_none() && !self.is_playing {
            painter.text(rect.center(), egui::Align2::CENTER_CENTER, "▶",
                egui::FontId::proportional(48.0), Color32::from_gray(200));
        }
    }

    fn transport(&self, ui: &mut Ui, cmd: &mut Vec<LibraryCommand>) {
        let playable = self.source.is_some();
        ui.horizontal(|ui| {
            let (label, action) = if self.is_playing {
                ("⏸ Pause", LibraryCommand::Pause)
            } else {
                ("▶ Play", LibraryCommand::Play)
            };
            if ui.add_enabled(playable, egui::Button::new(label)).clicked() {
                cmd.push(action);
            }
            if ui.add_enabled(playable, egui::Button::new("⏮ Restart")).clicked() {
                cmd.push(LibraryCommand::Restart);
            }
            ui.label(RichText::new(format_clock(self.position)).monospace().color(DARK_TEXT_DIM));
        });
    }

    fn info_block(&self, ui: &mut Ui, video: &VideoRecord) {
        ui.label(RichText::new(video.name.as_str()).size(22.0).strong());
        ui.label(RichText::new(format!(
            "{} views • {}",
            group_thousands(self.decoration.views),
            format_upload_date(&video.upload_date),
        )).color(DARK_TEXT_DIM));
        ui.add_space(6.0);

        ui.horizontal(|ui| {
            let (rect, _) = ui.allocate_exact_size(Vec2::splat(40.0), Sense::hover());
            ui.painter().circle_filled(rect.center(), 20.0, ACCENT);
            ui.painter().text(rect.center(), egui::Align2::CENTER_CENTER, "V",
                egui::FontId::proportional(18.0), Color32::WHITE);
            ui.vertical(|ui| {
                ui.label(RichText::new("VidCore Channel").strong());
                ui.label(RichText::new(SUBSCRIBER_LABEL).size(11.0).color(DARK_TEXT_DIM));
            });
            ui.add_enabled(false, egui::Button::new("Subscribe"));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.add_enabled(false, egui::Button::new("⋯"));
                ui.add_enabled(false, egui::Button::new("➕ Save"));
                ui.add_enabled(false, egui::Button::new("↗ Share"));
                ui.add_enabled(false, egui::Button::new("👎"));
                ui.add_enabled(false, egui::Button::new("👍"));
            });
        });

        ui.add_space(8.0);
        egui::Frame::new()
            .fill(DARK_BG_3)
            .corner_radius(egui::CornerRadius::same(8))
            .inner_margin(egui::Margin::same(10))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(format!("File: {}", video.file_name)).size(12.0));
                ui.label(RichText::new(format!(
                    "Size: {}   Duration: {}",
                    format_size(video.size),
                    format_duration(video.duration),
                )).size(12.0).color(DARK_TEXT_DIM));
            });

        ui.add_space(12.0);
        ui.label(RichText::new("Comments").strong());
        let mut placeholder = String::new();
        ui.add_enabled(false, egui::TextEdit::multiline(&mut placeholder)
            .hint_text("Add a comment...")
            .desired_rows(2)
            .desired_width(f32::INFINITY));
    }

    fn recommendations(&self, ui: &mut Ui) {
        ui.label(RichText::new("Up next").strong());
        ui.add_space(4.0);
        for rec in &self.decoration.recommendations {
            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(egui::vec2(120.0, 68.0), Sense::hover());
                ui.painter().rect_filled(rect, 4.0, DARK_BG_3);
                ui.painter().text(rect.center(), egui::Align2::CENTER_CENTER, "🎬",
                    egui::FontId::proportional(20.0), Color32::from_gray(80));
                ui.vertical(|ui| {
                    ui.label(RichText::new(rec.title.as_str()).strong().size(12.0));
                    ui.label(RichText::new("VidCore Channel").size(11.0).color(DARK_TEXT_DIM));
                    ui.label(RichText::new(format!(
                        "{}K views • {} months ago", rec.views_k, rec.months_ago,
                    )).size(11.0).color(DARK_TEXT_DIM));
                });
            });
            ui.add_space(6.0);
        }
    }
}

/// Largest rect with `aspect` (w/h) centred inside `outer`.
fn fit_rect(outer: Rect, aspect: f32) -> Rect {
    let outer_aspect = outer.width() / outer.height().max(1.0);
    let size = if aspect >= outer_aspect {
        Vec2::new(outer.width(), outer.width() / aspect.max(0.01))
    } else {
        Vec2::new(outer.height() * aspect, outer.height())
    };
    Rect::from_center_size(outer.center(), size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_frame_letterboxes() {
        let outer = Rect::from_min_size(egui::Pos2::ZERO, Vec2::new(160.0, 90.0));
        let r = fit_rect(outer, 2.0);
        assert_eq!(r.width(), 160.0);
        assert_eq!(r.height(), 80.0);
        assert_eq!(r.center(), outer.center());
    }

    #[test]
    fn tall_frame_pillarboxes() {
        let outer = Rect::from_min_size(egui::Pos2::ZERO, Vec2::new(160.0, 90.0));
        let r = fit_rect(outer, 1.0);
        assert_eq!(r.width(), 90.0);
        assert_eq!(r.height(), 90.0);
    }

    #[test]
    fn missing_record_opens_not_found() {
        let page = DetailPage::open("gone".into(), None, None);
        assert!(page.video.is_none());
        assert_eq!(page.decoration.recommendations.len(), 6);
    }
}
