// crates/vidcore-ui/src/helpers/log.rs
//
// Logging setup for the binary.
//
// In release builds with `windows_subsystem = "windows"` (double-click launch)
// there is no console attached, so stderr output is silently discarded. The
// tracing subscriber therefore writes to a file in the OS temp directory and
// only falls back to stderr when that file cannot be opened.
//
// File: %TEMP%\vidcore.log, append-only.
// Filter: `RUST_LOG` when set, otherwise `info` for everything.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Mutex, Once};

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

pub fn log_file_path() -> PathBuf {
    std::env::temp_dir().join("vidcore.log")
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info"));

        match OpenOptions::new().create(true).append(true).open(log_file_path()) {
            Ok(file) => {
                let _ = tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .try_init();
            }
            Err(_) => {
                let _ = tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .try_init();
            }
        }
    });
}
