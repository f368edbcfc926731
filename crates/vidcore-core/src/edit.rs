// crates/vidcore-core/src/edit.rs
//
// Inline rename state shared by the grid and list views.
//
// The draft is purely local: typing never touches the store. Only `save`
// produces a command, and the view drops the draft either way.

use crate::commands::LibraryCommand;
use crate::state::VideoRecord;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InlineRename {
    draft: Option<(String, String)>,
}

impl InlineRename {
    /// Capture the record's current name. Starting on another record
    /// discards the previous draft.
    pub fn start(&mut self, record: &VideoRecord) {
        self.draft = Some((record.id.clone(), record.name.clone()));
    }

    pub fn is_editing(&self, id: &str) -> bool {
        matches!(&self.draft, Some((editing, _)) if editing == id)
    }

    /// The editable text, if `id` is the record being renamed.
    pub fn buffer_mut(&mut self, id: &str) -> Option<&mut String> {
        match &mut self.draft {
            Some((editing, name)) if editing == id => Some(name),
            _ => None,
        }
    }

    pub fn save(&mut self) -> Option<LibraryCommand> {
        self.draft.take().map(|(id, name)| LibraryCommand::Rename { id, name })
    }

    pub fn cancel(&mut self) {
        self.draft = None;
    }
}
