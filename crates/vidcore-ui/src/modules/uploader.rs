// crates/vidcore-ui/src/modules/uploader.rs
//
// Drop zone + "Select Video" button. Emits LibraryCommand::Upload; the
// shell runs the actual upload and writes `busy` / `error` back here before
// the next frame, the same way it hands the player its current frame.

use egui::{Align, Layout, RichText, Stroke, Ui};
use rfd::FileDialog;

use vidcore_core::commands::LibraryCommand;
use vidcore_core::upload::ACCEPTED_EXTENSIONS;
use vidcore_core::VideoRecord;

use super::{LibraryView, ThumbnailCache};
use crate::theme::{ACCENT, DANGER, DARK_BORDER, DARK_TEXT_DIM};

#[derive(Default)]
pub struct UploaderPanel {
    /// True from the moment an upload is queued until it finishes.
    pub busy:  bool,
    /// Message from the last failed upload.
    pub error: Option<String>,
}

impl LibraryView for UploaderPanel {
    fn name(&self) -> &str { "Upload Videos" }

    fn ui(&mut self, ui: &mut Ui, _videos: &[VideoRecord], _thumbs: &ThumbnailCache, cmd: &mut Vec<LibraryCommand>) {
        let hovering = ui.ctx().input(|i| !i.raw.hovered_files.is_empty());
        let border   = if hovering { ACCENT } else { DARK_BORDER };

        egui::Frame::new()
            .stroke(Stroke::new(2.0, border))
            .corner_radius(egui::CornerRadius::same(8))
            .inner_margin(egui::Margin::same(24))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.with_layout(Layout::top_down(Align::Center), |ui| {
                    if self.busy {
                        ui.add(egui::Spinner::new().size(32.0));
                        ui.add_space(8.0);
                        ui.label("Uploading video...");
                        return;
                    }

                    ui.label(RichText::new("☁").size(44.0).color(ACCENT));
                    let prompt = if hovering {
                        "Drop the video here"
                    } else {
                        "Drag & drop a video file here, or click to select"
                    };
                    ui.label(RichText::new(prompt).size(16.0).strong());
                    ui.label(RichText::new(format!("Supported formats: {}", supported_formats()))
                        .size(12.0).color(DARK_TEXT_DIM));
                    ui.add_space(8.0);

                    if ui.button(RichText::new("Select Video").strong()).clicked() {
                        if let Some(path) = FileDialog::new()
                            .add_filter("Video", ACCEPTED_EXTENSIONS)
                            .pick_file()
                        {
                            cmd.push(LibraryCommand::Upload(vec![path]));
                        }
                    }
                });
            });

        if let Some(err) = &self.error {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label(RichText::new(err).color(DANGER));
                if ui.small_button("✕").clicked() {
                    cmd.push(LibraryCommand::DismissUploadError);
                }
            });
        }
    }
}

/// `MP4, MOV, AVI, MKV, WEBM`.
fn supported_formats() -> String {
    ACCEPTED_EXTENSIONS.iter()
        .map(|e| e.to_uppercase())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_label_lists_every_extension() {
        assert_eq!(supported_formats(), "MP4, MOV, AVI, MKV, WEBM");
    }
}
