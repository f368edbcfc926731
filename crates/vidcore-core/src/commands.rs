// crates/vidcore-core/src/commands.rs
//
// Every user action the views can request. Views read the record slice and
// push commands; the app shell applies them through VideoStore after the UI
// pass and then re-reads the whole collection.

use std::path::PathBuf;

use crate::state::ViewMode;

#[derive(Clone, Debug, PartialEq)]
pub enum LibraryCommand {
    // ── Upload ───────────────────────────────────────────────────────────────
    /// Files picked in the dialog or dropped on the window. Only the first
    /// acceptable one is uploaded.
    Upload(Vec<PathBuf>),
    /// Clear the error line under the upload area.
    DismissUploadError,

    // ── Records ──────────────────────────────────────────────────────────────
    Rename { id: String, name: String },
    Delete(String),

    // ── Navigation ───────────────────────────────────────────────────────────
    /// Open the detail page for a record.
    OpenVideo(String),
    /// Back to the index.
    ShowIndex,

    // ── View / UI ────────────────────────────────────────────────────────────
    SetViewMode(ViewMode),

    // ── Player ───────────────────────────────────────────────────────────────
    Play,
    Pause,
    /// Restart playback from the first frame.
    Restart,
}
