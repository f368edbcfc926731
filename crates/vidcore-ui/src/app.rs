// src/app.rs (vidcore-ui)
use std::path::PathBuf;

use vidcore_core::commands::LibraryCommand;
use vidcore_core::helpers::format::pluralize;
use vidcore_core::pagination::LIST_PAGE_SIZES;
use vidcore_core::upload::Uploader;
use vidcore_core::{VideoRecord, ViewMode};
use vidcore_media::MediaWorker;
use crate::context::AppContext;
use crate::paths::app_data_dir;
use crate::theme::{configure_style, section_frame, ACCENT, DARK_TEXT_DIM};
use crate::modules::{
    LibraryView,
    grid::GridView,
    list::ListView,
    player::DetailPage,
    uploader::UploaderPanel,
};
use eframe::egui;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// UI preferences only. The collection itself lives in the store.
#[derive(Serialize, Deserialize)]
struct AppStorage {
    view_mode:      ViewMode,
    list_page_size: usize,
}

impl Default for AppStorage {
    fn default() -> Self {
        Self { view_mode: ViewMode::Grid, list_page_size: LIST_PAGE_SIZES[0] }
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct VidCoreApp {
    context:       AppContext,
    /// Full collection as of the last refresh. Views only ever see this.
    videos:        Vec<VideoRecord>,
    view_mode:     ViewMode,
    uploader:      UploaderPanel,
    grid:          GridView,
    list:          ListView,
    /// `Some` while the detail page is showing.
    detail:        Option<DetailPage>,
    /// Commands emitted by views each frame, processed after the UI pass
    pending_cmds:  Vec<LibraryCommand>,
    /// Queued by an Upload command and run one frame later, after the busy
    /// spinner has been painted.
    queued_upload: Option<Vec<PathBuf>>,
}

impl VidCoreApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        configure_style(&cc.egui_ctx);
        cc.egui_ctx.options_mut(|o| {
            o.theme_preference = egui::ThemePreference::Dark;
        });

        let prefs = cc.storage
            .and_then(|s| eframe::get_value::<AppStorage>(s, eframe::APP_KEY))
            .unwrap_or_default();

        let storage = AppContext::open_storage(app_data_dir());
        let context = AppContext::new(storage, MediaWorker::new());
        let videos  = context.store.list();
        info!("loaded {} video(s)", videos.len());

        Self {
            context,
            videos,
            view_mode:     prefs.view_mode,
            uploader:      UploaderPanel::default(),
            grid:          GridView::new(),
            list:          ListView::new(prefs.list_page_size),
            detail:        None,
            pending_cmds:  Vec::new(),
            queued_upload: None,
        }
    }

    fn refresh(&mut self) {
        self.videos = self.context.store.list();
    }

    fn process_command(&mut self, cmd: LibraryCommand, ctx: &egui::Context) {
        match cmd {
            // ── Upload ───────────────────────────────────────────────────────
            LibraryCommand::Upload(paths) => {
                if self.uploader.busy {
                    return;
                }
                self.uploader.busy  = true;
                self.uploader.error = None;
                self.queued_upload  = Some(paths);
                ctx.request_repaint();
            }
            LibraryCommand::DismissUploadError => {
                self.uploader.error = None;
            }

            // ── Records ──────────────────────────────────────────────────────
            LibraryCommand::Rename { id, name } => {
                if self.context.store.rename_by_id(&id, &name).is_some() {
                    info!("renamed {id} to {name:?}");
                }
                self.refresh();
            }
            LibraryCommand::Delete(id) => {
                if let Some(record) = self.context.delete(&id) {
                    info!("deleted {id} ({})", record.file_name);
                }
                self.refresh();
            }

            // ── Navigation ───────────────────────────────────────────────────
            LibraryCommand::OpenVideo(id) => {
                if let Some(mut page) = self.detail.take() {
                    page.stop(&self.context.media_worker);
                }
                let video  = self.context.store.get_by_id(&id);
                let source = video.as_ref().and_then(|v| self.context.resolve(v));
                if video.is_some() && source.is_none() {
                    info!("{id} has no file this session; playback unavailable");
                }
                self.detail = Some(DetailPage::open(id, video, source));
            }
            LibraryCommand::ShowIndex => {
                if let Some(mut page) = self.detail.take() {
                    page.stop(&self.context.media_worker);
                }
                self.refresh();
            }

            // ── View / UI ────────────────────────────────────────────────────
            LibraryCommand::SetViewMode(mode) => {
                self.view_mode = mode;
            }

            // ── Player ───────────────────────────────────────────────────────
            LibraryCommand::Play => {
                if let Some(page) = &mut self.detail {
                    page.play(&self.context.media_worker);
                }
            }
            LibraryCommand::Pause => {
                if let Some(page) = &mut self.detail {
                    page.pause();
                }
            }
            LibraryCommand::Restart => {
                if let Some(page) = &mut self.detail {
                    page.restart(&self.context.media_worker);
                }
            }
        }
    }

    fn run_queued_upload(&mut self) {
        let Some(paths) = self.queued_upload.take() else { return };
        let result = Uploader::new(&self.context.store, &mut self.context.blobs)
            .upload_any(&paths);
        self.uploader.busy = false;
        match result {
            Ok(_) => self.refresh(),
            Err(e) => {
                warn!("upload failed: {e}");
                self.uploader.error = Some(e.to_string());
            }
        }
    }

    fn handle_drag_and_drop(&mut self, ctx: &egui::Context) {
        let paths: Vec<PathBuf> = ctx.input(|i| {
            i.raw.dropped_files.iter().filter_map(|f| f.path.clone()).collect()
        });
        if !paths.is_empty() && self.detail.is_none() {
            self.pending_cmds.push(LibraryCommand::Upload(paths));
        }
    }

    fn index_ui(&mut self, ui: &mut egui::Ui) {
        section_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new("VidCore").size(26.0).strong().color(ACCENT));
            ui.label(egui::RichText::new("Upload and manage your video collection").color(DARK_TEXT_DIM));
        });
        ui.add_space(12.0);

        section_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(self.uploader.name()).size(18.0).strong());
            ui.add_space(8.0);
            self.uploader.ui(ui, &self.videos, &self.context.thumbnail_cache, &mut self.pending_cmds);
        });
        ui.add_space(12.0);

        section_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(format!(
                    "Your Videos ({})", pluralize(self.videos.len(), "item", "items"),
                )).size(18.0).strong());

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    for (mode, label) in [(ViewMode::List, "☰ List"), (ViewMode::Grid, "▦ Grid")] {
                        if ui.selectable_label(self.view_mode == mode, label).clicked()
                            && self.view_mode != mode
                        {
                            self.pending_cmds.push(LibraryCommand::SetViewMode(mode));
                        }
                    }
                });
            });
            ui.add_space(8.0);

            if self.videos.is_empty() {
                ui.vertical_centered(|ui| {
                    ui.add_space(24.0);
                    ui.label(egui::RichText::new("🎞").size(40.0).color(DARK_TEXT_DIM));
                    ui.label(egui::RichText::new("No videos yet").size(16.0).strong());
                    ui.label(egui::RichText::new("Upload your first video to get started.").color(DARK_TEXT_DIM));
                    ui.add_space(24.0);
                });
                return;
            }

            let view: &mut dyn LibraryView = match self.view_mode {
                ViewMode::Grid => &mut self.grid,
                ViewMode::List => &mut self.list,
            };
            view.ui(ui, &self.videos, &self.context.thumbnail_cache, &mut self.pending_cmds);
        });
    }
}

// ── eframe::App ───────────────────────────────────────────────────────────────

impl eframe::App for VidCoreApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &AppStorage {
            view_mode:      self.view_mode,
            list_page_size: self.list.page_size(),
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Some(page) = &mut self.detail {
            page.stop(&self.context.media_worker);
        }
        self.context.media_worker.shutdown();
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_drag_and_drop(ctx);

        // ── Dispatch MediaWorker results into caches / the player ────────────
        if let Some(ended) = self.context.ingest_media_results(ctx) {
            if let Some(page) = &mut self.detail {
                page.on_decode_ended(ended);
            }
        }
        self.context.probe_new(&self.videos);
        if let Some(page) = &mut self.detail {
            page.poll(&self.context.media_worker, ctx);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                if let Some(page) = &mut self.detail {
                    page.ui(ui, &self.context.thumbnail_cache, &mut self.pending_cmds);
                } else {
                    self.index_ui(ui);
                }
            });
            self.list.show_toast(ui);
        });

        // ── The spinner was painted above; now do the work it stands for ─────
        self.run_queued_upload();

        // ── Process commands emitted by views this frame ─────────────────────
        let cmds: Vec<LibraryCommand> = self.pending_cmds.drain(..).collect();
        for cmd in cmds {
            self.process_command(cmd, ctx);
        }
    }
}
