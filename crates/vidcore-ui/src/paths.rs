// src/paths.rs
// Single source of truth for where VidCore keeps its video collection.

use std::path::PathBuf;

/// `VIDCORE_DATA_DIR` when set, else `%APPDATA%\VidCore` on Windows and
/// `~/.local/share/vidcore` elsewhere, else a folder in the temp dir.
pub fn app_data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("VIDCORE_DATA_DIR") {
        return PathBuf::from(dir);
    }
    #[cfg(target_os = "windows")]
    let base = std::env::var("APPDATA")
        .map(|a| PathBuf::from(a).join("VidCore"));
    #[cfg(not(target_os = "windows"))]
    let base = std::env::var("HOME")
        .map(|h| PathBuf::from(h).join(".local").join("share").join("vidcore"));
    base.unwrap_or_else(|_| std::env::temp_dir().join("vidcore"))
}
