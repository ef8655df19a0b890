//! Narrow interfaces over a rich-text editing surface.
//!
//! `EditorCapability` is all the toolbar needs; `EditorSurface` adds the
//! content and input plumbing used by the editor session. Any surface that
//! implements both can replace `DocumentEditor` without touching the note
//! store or the toolbar.

use crate::editor::command::{Command, Format};
use crate::model::document::Document;

/// Cursor/selection inside a single textblock.
///
/// `block` is the textblock ordinal in document order; `anchor` and `head`
/// are character offsets within it (a hard break counts as one).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub block: usize,
    pub anchor: usize,
    pub head: usize,
}

impl Selection {
    pub fn cursor(block: usize, offset: usize) -> Self {
        Self {
            block,
            anchor: offset,
            head: offset,
        }
    }

    pub fn range(block: usize, anchor: usize, head: usize) -> Self {
        Self {
            block,
            anchor,
            head,
        }
    }

    pub fn from(&self) -> usize {
        self.anchor.min(self.head)
    }

    pub fn to(&self) -> usize {
        self.anchor.max(self.head)
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }
}

/// Command chain and capability queries.
pub trait EditorCapability {
    /// Runs one command; returns whether it changed anything.
    fn run(&mut self, command: Command) -> bool;
    /// Whether `format` applies at the current selection.
    fn is_active(&self, format: Format) -> bool;
    fn can_undo(&self) -> bool;
    fn can_redo(&self) -> bool;

    /// Whether `command` can currently run.
    fn can_run(&self, command: Command) -> bool {
        match command {
            Command::Undo => self.can_undo(),
            Command::Redo => self.can_redo(),
            Command::Toggle(_) | Command::HorizontalRule => true,
        }
    }
}

/// Full editing surface: content, direct input and change notifications.
pub trait EditorSurface: EditorCapability {
    fn document(&self) -> &Document;
    fn selection(&self) -> Selection;
    /// Replaces the whole document programmatically (resets history).
    fn set_content(&mut self, document: Document);
    /// Moves the selection; offsets are clamped to the document.
    fn set_selection(&mut self, selection: Selection);
    fn insert_text(&mut self, text: &str) -> bool;
    /// Splits the current textblock at the cursor (Enter).
    fn split_block(&mut self) -> bool;
    /// Deletes the selection or the character before the cursor (Backspace).
    fn delete_backward(&mut self) -> bool;
    /// Drains queued change notifications, oldest first.
    fn take_changes(&mut self) -> Vec<Document>;
}
