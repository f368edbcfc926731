// crates/vidcore-ui/src/modules/mod.rs
//
// Page sections. Every index-page section implements LibraryView: it reads
// the record slice the shell passes in and pushes LibraryCommands. It never
// calls the store and never edits records itself.

pub mod grid;
pub mod list;
pub mod player;
pub mod uploader;

use std::collections::HashMap;

use egui::{Color32, Sense, TextureHandle, Ui, Vec2};
use vidcore_core::commands::LibraryCommand;
use vidcore_core::VideoRecord;

/// GPU-resident thumbnail cache: record id → loaded texture.
pub type ThumbnailCache = HashMap<String, TextureHandle>;

pub trait LibraryView {
    fn name(&self) -> &str;
    fn ui(
        &mut self,
        ui:          &mut Ui,
        videos:      &[VideoRecord],
        thumb_cache: &ThumbnailCache,
        cmd:         &mut Vec<LibraryCommand>,
    );
}

/// Decoded thumbnail, else the record's own thumbnail image, else a dark
/// placeholder with a film icon. Returns the click response.
pub fn thumbnail(ui: &mut Ui, video: &VideoRecord, thumbs: &ThumbnailCache, size: Vec2) -> egui::Response {
    if let Some(texture) = thumbs.get(&video.id) {
        return ui.add(
            egui::Image::new((texture.id(), size))
                .corner_radius(egui::CornerRadius::same(4))
                .sense(Sense::click()),
        );
    }
    if let Some(thumb) = &video.thumbnail {
        return ui.add(
            egui::Image::new(format!("file://{thumb}"))
                .fit_to_exact_size(size)
                .corner_radius(egui::CornerRadius::same(4))
                .sense(Sense::click()),
        );
    }
    let (rect, resp) = ui.allocate_exact_size(size, Sense::click());
    ui.painter().rect_filled(rect, 4.0, Color32::from_rgb(14, 16, 22));
    ui.painter().text(
        rect.center(), egui::Align2::CENTER_CENTER, "🎬",
        egui::FontId::proportional((size.y * 0.35).clamp(12.0, 40.0)),
        Color32::from_gray(80),
    );
    resp
}
