#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod context;
mod helpers;
mod modules;
mod paths;
mod theme;

use tracing::{error, info};

fn main() -> eframe::Result {
    helpers::log::init_logging();
    info!("vidcore {} starting, log at {}",
        env!("CARGO_PKG_VERSION"), helpers::log::log_file_path().display());

    // Without FFmpeg the library still works; only thumbnails and playback
    // are lost, and those failures are reported per file.
    if let Err(e) = vidcore_media::init() {
        error!("FFmpeg init failed: {e:#}");
    }

    let native_options = eframe::NativeOptions {
        centered: true,
        viewport: egui::ViewportBuilder::default()
            .with_title("VidCore")
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([720.0, 520.0])
            .with_resizable(true)
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "VidCore",
        native_options,
        Box::new(|cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(app::VidCoreApp::new(cc)))
        }),
    )
}
