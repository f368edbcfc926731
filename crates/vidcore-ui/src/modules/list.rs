// crates/vidcore-ui/src/modules/list.rs
//
// Table view: thumbnail, name, file name, size, upload date, actions.
// The only view that can delete. A delete shows a short toast; the row
// itself disappears when the shell re-reads the collection next frame.

use std::time::{Duration, Instant};

use super::{thumbnail, LibraryView, ThumbnailCache};
use vidcore_core::commands::LibraryCommand;
use vidcore_core::edit::InlineRename;
use vidcore_core::helpers::format::format_size;
use vidcore_core::helpers::time::format_upload_date;
use vidcore_core::pagination::{Paginator, LIST_PAGE_SIZES};
use vidcore_core::VideoRecord;
use crate::theme::{ACCENT, DANGER, DARK_BG_4, DARK_TEXT_DIM};
use egui::{Align2, RichText, Ui};

const TOAST_FOR: Duration = Duration::from_secs(3);
const THUMB_SIZE: egui::Vec2 = egui::vec2(64.0, 36.0);

pub struct ListView {
    pager:      Paginator,
    rename:     InlineRename,
    toast_from: Option<Instant>,
}

impl ListView {
    pub fn new(page_size: usize) -> Self {
        let mut pager = Paginator::list();
        if LIST_PAGE_SIZES.contains(&page_size) {
            pager.set_page_size(page_size);
        }
        Self { pager, rename: InlineRename::default(), toast_from: None }
    }

    /// Persisted by the shell so the choice survives restarts.
    pub fn page_size(&self) -> usize { self.pager.page_size() }

    /// Called by the shell every frame, even when the delete just emptied the
    /// collection and the table is no longer drawn.
    pub fn show_toast(&mut self, ui: &Ui) {
        let Some(since) = self.toast_from else { return };
        let elapsed = since.elapsed();
        if elapsed >= TOAST_FOR {
            self.toast_from = None;
            return;
        }
        egui::Area::new(egui::Id::new("delete_toast"))
            .anchor(Align2::CENTER_BOTTOM, egui::vec2(0.0, -28.0))
            .order(egui::Order::Foreground)
            .show(ui.ctx(), |ui| {
                egui::Frame::new()
                    .fill(DARK_BG_4)
                    .corner_radius(egui::CornerRadius::same(6))
                    .inner_margin(egui::Margin::symmetric(16, 10))
                    .show(ui, |ui| {
                        ui.label("Video deleted successfully!");
                    });
            });
        ui.ctx().request_repaint_after(TOAST_FOR - elapsed);
    }
}

impl LibraryView for ListView {
    fn name(&self) -> &str { "List" }

    fn ui(&mut self, ui: &mut Ui, videos: &[VideoRecord], thumbs: &ThumbnailCache, cmd: &mut Vec<LibraryCommand>) {
        self.pager.clamp(videos.len());

        egui::ScrollArea::vertical().max_height(600.0).show(ui, |ui| {
            egui::Grid::new("video_table")
                .num_columns(6)
                .striped(true)
                .spacing(egui::vec2(18.0, 10.0))
                .min_col_width(40.0)
                .show(ui, |ui| {
                    for heading in ["Thumbnail", "Name", "File Name", "Size", "Upload Date", "Actions"] {
                        ui.label(RichText::new(heading).strong());
                    }
                    ui.end_row();

                    for video in self.pager.slice(videos) {
                        if thumbnail(ui, video, thumbs, THUMB_SIZE).clicked() {
                            cmd.push(LibraryCommand::OpenVideo(video.id.clone()));
                        }

                        let editing = self.rename.is_editing(&video.id);
                        let mut enter = false;
                        if let Some(buf) = self.rename.buffer_mut(&video.id) {
                            let resp = ui.add(egui::TextEdit::singleline(buf).desired_width(180.0));
                            enter = resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                        } else if ui.link(RichText::new(video.name.as_str()).color(ACCENT)).clicked() {
                            cmd.push(LibraryCommand::OpenVideo(video.id.clone()));
                        }

                        ui.label(RichText::new(video.file_name.as_str()).color(DARK_TEXT_DIM));
                        ui.label(RichText::new(format_size(video.size)).color(DARK_TEXT_DIM));
                        ui.label(RichText::new(format_upload_date(&video.upload_date)).color(DARK_TEXT_DIM));

                        ui.horizontal(|ui| {
                            if editing {
                                if ui.button("💾").on_hover_text("Save").clicked() || enter {
                                    cmd.extend(self.rename.save());
                                }
                                if ui.button(RichText::new("✕").color(DANGER)).on_hover_text("Cancel").clicked() {
                                    self.rename.cancel();
                                }
                            } else {
                                if ui.button("✏").on_hover_text("Edit").clicked() {
                                    self.rename.start(video);
                                }
                                if ui.button(RichText::new("🗑").color(DANGER)).on_hover_text("Delete").clicked() {
                                    cmd.push(LibraryCommand::Delete(video.id.clone()));
                                    self.toast_from = Some(Instant::now());
                                }
                            }
                        });
                        ui.end_row();
                    }
                });
        });

        // ── Footer: rows per page + range + prev/next ────────────────────────
        ui.separator();
        ui.horizontal(|ui| {
            ui.label(RichText::new("Rows per page:").color(DARK_TEXT_DIM));
            let mut size = self.pager.page_size();
            egui::ComboBox::from_id_salt("rows_per_page")
                .width(56.0)
                .selected_text(size.to_string())
                .show_ui(ui, |ui| {
                    for option in LIST_PAGE_SIZES {
                        ui.selectable_value(&mut size, option, option.to_string());
                    }
                });
            if size != self.pager.page_size() {
                self.pager.set_page_size(size);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let total = videos.len();
                let pages = self.pager.page_count(total);
                if ui.add_enabled(self.pager.page() + 1 < pages, egui::Button::new("›")).clicked() {
                    self.pager.next(total);
                }
                if ui.add_enabled(self.pager.page() > 0, egui::Button::new("‹")).clicked() {
                    self.pager.prev();
                }
                let (from, to) = self.pager.visible_range(total);
                ui.label(format!("{from}–{to} of {total}"));
            });
        });
    }
}
