//! Application facade wiring the store, the editor session and the toolbar.
//!
//! # Responsibility
//! - Push the active note into the editor whenever the selection changes.
//! - Forward editor changes to `NoteStore::update` for the active note.
//! - Produce the view model hosts render (sidebar plus editor or placeholder).
//!
//! # Invariants
//! - Edits are only forwarded once the load of the active note is confirmed
//!   or its grace period has elapsed.
//! - Editing operations are no-ops while no note is active.

use crate::config::AppConfig;
use crate::editor::capability::{EditorSurface, Selection};
use crate::editor::command::Command;
use crate::editor::session::{EditorSession, LoadTicket};
use crate::editor::surface::DocumentEditor;
use crate::model::document::Document;
use crate::model::note::NoteId;
use crate::repo::kv_repo::KeyValueRepository;
use crate::service::note_store::{NoteStore, StoreResult};
use crate::service::preview::derive_preview;
use crate::toolbar::{self, ToolbarButton};
use log::{debug, info};

/// Sidebar row for one note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarItem {
    pub id: NoteId,
    pub title: String,
    /// Single-line plain-text summary; `None` for blank notes.
    pub preview: Option<String>,
    pub active: bool,
}

/// What the main pane shows.
#[derive(Debug, Clone, PartialEq)]
pub enum AppView {
    /// No note is selected.
    Placeholder(String),
    Editor {
        note_id: NoteId,
        title: String,
        document: Document,
        selection: Selection,
        toolbar: Vec<ToolbarButton>,
    },
}

/// A notes app instance over repository `R` and editing surface `S`.
pub struct NotesApp<R: KeyValueRepository, S: EditorSurface = DocumentEditor> {
    store: NoteStore<R>,
    session: EditorSession<S>,
    config: AppConfig,
}

impl<R: KeyValueRepository> NotesApp<R> {
    /// Loads the collection from `repo` and shows its first note in a
    /// `DocumentEditor`.
    pub fn open(repo: R, config: AppConfig) -> Self {
        let surface = DocumentEditor::new(config.history_depth);
        Self::with_surface(repo, surface, config)
    }
}

impl<R: KeyValueRepository, S: EditorSurface> NotesApp<R, S> {
    pub fn with_surface(repo: R, surface: S, config: AppConfig) -> Self {
        let mut store = NoteStore::new(repo, &config);
        let count = store.load();
        let session = EditorSession::new(surface, config.load_grace());
        let mut app = Self {
            store,
            session,
            config,
        };
        let shown = app.show_active();
        info!("event=app_open module=app status=ok count={count} editor_loaded={shown}");
        app
    }

    /// Creates a note, selects it and loads it into the editor.
    pub fn create_note(&mut self) -> StoreResult<NoteId> {
        let id = self.store.create()?;
        self.show_active();
        Ok(id)
    }

    /// Selects `id` and loads it into the editor in one step.
    ///
    /// Returns `false` for unknown ids, leaving the current note displayed.
    pub fn select_note(&mut self, id: NoteId) -> bool {
        match self.begin_select(id) {
            Some(ticket) => self.finish_select(ticket),
            None => false,
        }
    }

    /// Selects `id` and starts loading it; edits stay suppressed until
    /// `finish_select` is called with the returned ticket.
    pub fn begin_select(&mut self, id: NoteId) -> Option<LoadTicket> {
        if !self.store.select(id) {
            debug!("event=note_select module=app status=skipped reason=unknown_id note_id={id}");
            return None;
        }
        self.begin_show()
    }

    pub fn finish_select(&mut self, ticket: LoadTicket) -> bool {
        self.session.finish_load(ticket)
    }

    /// Runs an editor command (toolbar semantics: disabled commands do nothing).
    pub fn run(&mut self, command: Command) -> StoreResult<bool> {
        self.edit(|surface| toolbar::activate(surface, command))
    }

    pub fn insert_text(&mut self, text: &str) -> StoreResult<bool> {
        self.edit(|surface| surface.insert_text(text))
    }

    pub fn split_block(&mut self) -> StoreResult<bool> {
        self.edit(S::split_block)
    }

    pub fn delete_backward(&mut self) -> StoreResult<bool> {
        self.edit(S::delete_backward)
    }

    /// Moves the editor selection; returns `false` when no note is active.
    pub fn set_selection(&mut self, selection: Selection) -> bool {
        if self.store.active_id().is_none() {
            return false;
        }
        self.session.surface_mut().set_selection(selection);
        true
    }

    /// Persists the latest forwarded editor change into the active note.
    ///
    /// Returns whether the store was updated.
    pub fn sync(&mut self) -> StoreResult<bool> {
        let Some(document) = self.session.poll_changes() else {
            return Ok(false);
        };
        let Some(id) = self.store.active_id() else {
            return Ok(false);
        };
        self.store.update(id, document)
    }

    pub fn is_loading(&self) -> bool {
        self.session.is_loading()
    }

    pub fn toolbar(&self) -> Vec<ToolbarButton> {
        toolbar::render(self.session.surface())
    }

    pub fn sidebar(&self) -> Vec<SidebarItem> {
        let selection = self.store.selection();
        self.store
            .notes()
            .iter()
            .map(|note| SidebarItem {
                id: note.id,
                title: note.title.clone(),
                preview: derive_preview(&note.content),
                active: selection.is(note.id),
            })
            .collect()
    }

    pub fn view(&self) -> AppView {
        match self.store.active_note() {
            Some(note) => AppView::Editor {
                note_id: note.id,
                title: note.title.clone(),
                document: self.session.document().clone(),
                selection: self.session.surface().selection(),
                toolbar: self.toolbar(),
            },
            None => AppView::Placeholder(self.config.placeholder.clone()),
        }
    }

    pub fn store(&self) -> &NoteStore<R> {
        &self.store
    }

    pub fn editor(&self) -> &S {
        self.session.surface()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn edit(&mut self, apply: impl FnOnce(&mut S) -> bool) -> StoreResult<bool> {
        if self.store.active_id().is_none() {
            return Ok(false);
        }
        let changed = apply(self.session.surface_mut());
        self.sync()?;
        Ok(changed)
    }

    fn begin_show(&mut self) -> Option<LoadTicket> {
        let content = self.store.active_note()?.content.clone();
        Some(self.session.begin_load(content))
    }

    fn show_active(&mut self) -> bool {
        match self.begin_show() {
            Some(ticket) => self.session.finish_load(ticket),
            None => false,
        }
    }
}
