// crates/vidcore-ui/src/modules/grid.rs
use super::{thumbnail, LibraryView, ThumbnailCache};
use vidcore_core::commands::LibraryCommand;
use vidcore_core::edit::InlineRename;
use vidcore_core::helpers::format::{format_size, truncate};
use vidcore_core::helpers::time::format_upload_date;
use vidcore_core::pagination::Paginator;
use vidcore_core::VideoRecord;
use crate::theme::{ACCENT, DARK_BG_3, DARK_BORDER, DARK_TEXT_DIM};
use egui::{RichText, Stroke, Ui};

const CARD_W:  f32 = 220.0;
const THUMB_H: f32 = 124.0;

pub struct GridView {
    pager:  Paginator,
    rename: InlineRename,
}

impl GridView {
    pub fn new() -> Self {
        Self { pager: Paginator::grid(), rename: InlineRename::default() }
    }
}

impl LibraryView for GridView {
    fn name(&self) -> &str { "Grid" }

    fn ui(&mut self, ui: &mut Ui, videos: &[VideoRecord], thumbs: &ThumbnailCache, cmd: &mut Vec<LibraryCommand>) {
        self.pager.clamp(videos.len());

        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing = egui::vec2(14.0, 14.0);

            for video in self.pager.slice(videos) {
                let editing = self.rename.is_editing(&video.id);

                egui::Frame::new()
                    .fill(DARK_BG_3)
                    .stroke(Stroke::new(if editing { 1.5 } else { 1.0 },
                        if editing { ACCENT } else { DARK_BORDER }))
                    .corner_radius(egui::CornerRadius::same(8))
                    .inner_margin(egui::Margin::same(8))
                    .show(ui, |ui| {
                        ui.set_width(CARD_W);
                        ui.vertical(|ui| {
                            let thumb = thumbnail(ui, video, thumbs, egui::vec2(CARD_W, THUMB_H));
                            if thumb.on_hover_cursor(egui::CursorIcon::PointingHand).clicked() {
                                cmd.push(LibraryCommand::OpenVideo(video.id.clone()));
                            }
                            ui.add_space(4.0);

                            // ── Name / inline rename ─────────────────────────
                            let mut save = false;
                            let mut cancel = false;
                            if let Some(buf) = self.rename.buffer_mut(&video.id) {
                                let resp = ui.add(egui::TextEdit::singleline(buf).desired_width(CARD_W));
                                if resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                                    save = true;
                                }
                                ui.horizontal(|ui| {
                                    if ui.button("💾 Save").clicked() { save = true; }
                                    if ui.button("✕ Cancel").clicked() { cancel = true; }
                                });
                            } else {
                                ui.horizontal(|ui| {
                                    let link = ui.link(RichText::new(truncate(&video.name, 28)).strong())
                                        .on_hover_text(video.name.as_str());
                                    if link.clicked() {
                                        cmd.push(LibraryCommand::OpenVideo(video.id.clone()));
                                    }
                                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                        if ui.small_button("✏").on_hover_text("Rename").clicked() {
                                            self.rename.start(video);
                                        }
                                    });
                                });
                            }
                            if save {
                                cmd.extend(self.rename.save());
                            } else if cancel {
                                self.rename.cancel();
                            }

                            ui.label(RichText::new(format_size(video.size))
                                .size(11.0).color(DARK_TEXT_DIM));
                            ui.label(RichText::new(format!("Uploaded on {}", format_upload_date(&video.upload_date)))
                                .size(11.0).color(DARK_TEXT_DIM));
                        });
                    });
            }
        });

        // ── Pager ────────────────────────────────────────────────────────────
        let pages = self.pager.page_count(videos.len());
        if pages > 1 {
            ui.add_space(12.0);
            ui.horizontal(|ui| {
                if ui.add_enabled(self.pager.page() > 0, egui::Button::new("‹")).clicked() {
                    self.pager.prev();
                }
                for p in 0..pages {
                    let current = p == self.pager.page();
                    let label = RichText::new((p + 1).to_string());
                    let label = if current { label.strong().color(ACCENT) } else { label };
                    if ui.selectable_label(current, label).clicked() {
                        self.pager.set_page(p, videos.len());
                    }
                }
                if ui.add_enabled(self.pager.page() + 1 < pages, egui::Button::new("›")).clicked() {
                    self.pager.next(videos.len());
                }
            });
        }
    }
}
