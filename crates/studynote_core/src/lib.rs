//! Core logic for studynote: rich-text notes persisted to a local key-value store.
//! Hosts (FFI, CLI) drive everything through [`NotesApp`].

pub mod app;
pub mod config;
pub mod db;
pub mod editor;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod toolbar;

pub use app::{AppView, NotesApp, SidebarItem};
pub use config::AppConfig;
pub use editor::capability::{EditorCapability, EditorSurface, Selection};
pub use editor::command::{Command, CommandParseError, Format};
pub use editor::session::{EditorSession, LoadTicket, SessionState};
pub use editor::surface::DocumentEditor;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::document::{Document, DocumentError, Mark, MarkKind, Node, NodeAttrs, NodeKind};
pub use model::note::{Note, NoteId};
pub use repo::kv_repo::{
    KeyValueRepository, MemoryKeyValueRepository, RepoError, RepoResult, SqliteKeyValueRepository,
};
pub use service::note_store::{ActiveSelection, NoteStore, StoreError, StoreResult};
pub use toolbar::ToolbarButton;

/// Health-check used by hosts to verify linkage.
pub fn ping() -> &'static str {
    "pong"
}

pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
