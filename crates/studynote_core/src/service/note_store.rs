//! Note store: the in-memory collection mirrored to durable storage.
//!
//! # Responsibility
//! - Load the collection once at startup, tolerating absent/corrupt payloads.
//! - Create and update notes, persisting the whole collection on each change.
//! - Own the active selection.
//!
//! # Invariants
//! - Collection order is newest-first; ids are unique.
//! - Every mutation writes the entire collection under one key; memory is
//!   only swapped after the write succeeded.
//! - Updates for unknown ids neither mutate nor write.

use crate::config::AppConfig;
use crate::model::document::Document;
use crate::model::note::{default_title, Note, NoteId};
use crate::repo::kv_repo::{KeyValueRepository, RepoError};
use log::{info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure raised while persisting the collection.
#[derive(Debug)]
pub enum StoreError {
    /// Durable storage rejected the write.
    Persist(RepoError),
    /// Collection could not be encoded.
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Persist(err) => write!(f, "failed to persist notes: {err}"),
            Self::Encode(err) => write!(f, "failed to encode notes: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persist(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Persist(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// The note currently displayed and edited, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActiveSelection {
    active: Option<NoteId>,
}

impl ActiveSelection {
    pub fn get(&self) -> Option<NoteId> {
        self.active
    }

    pub fn is(&self, id: NoteId) -> bool {
        self.active == Some(id)
    }

    fn set(&mut self, id: Option<NoteId>) {
        self.active = id;
    }
}

/// Ordered note collection backed by an injected key-value repository.
pub struct NoteStore<R: KeyValueRepository> {
    repo: R,
    storage_key: String,
    title_prefix: String,
    notes: Vec<Note>,
    selection: ActiveSelection,
}

impl<R: KeyValueRepository> NoteStore<R> {
    /// Creates an empty, not yet loaded store.
    pub fn new(repo: R, config: &AppConfig) -> Self {
        Self {
            repo,
            storage_key: config.storage_key.clone(),
            title_prefix: config.title_prefix.clone(),
            notes: Vec::new(),
            selection: ActiveSelection::default(),
        }
    }

    /// Replaces memory with the persisted collection and selects its first note.
    ///
    /// Absent, unreadable or malformed payloads yield an empty collection.
    /// Returns the number of loaded notes.
    pub fn load(&mut self) -> usize {
        self.notes = self.read_persisted();
        self.selection.set(self.notes.first().map(|note| note.id));
        info!(
            "event=notes_load module=store status=ok count={}",
            self.notes.len()
        );
        self.notes.len()
    }

    /// Prepends a fresh note, persists, and selects it.
    pub fn create(&mut self) -> StoreResult<NoteId> {
        let note = Note::new(default_title(&self.title_prefix, self.notes.len() + 1));
        let id = note.id;

        let mut next = Vec::with_capacity(self.notes.len() + 1);
        next.push(note);
        next.extend(self.notes.iter().cloned());
        self.commit(next)?;
        self.selection.set(Some(id));

        info!(
            "event=note_create module=store status=ok note_id={id} count={}",
            self.notes.len()
        );
        Ok(id)
    }

    /// Replaces the content of note `id` and persists.
    ///
    /// Returns `Ok(false)` without writing when no note matches.
    pub fn update(&mut self, id: NoteId, content: Document) -> StoreResult<bool> {
        let Some(index) = self.position(id) else {
            info!("event=note_update module=store status=skipped reason=unknown_id note_id={id}");
            return Ok(false);
        };

        let mut next = self.notes.clone();
        next[index].content = content;
        self.commit(next)?;
        info!("event=note_update module=store status=ok note_id={id}");
        Ok(true)
    }

    /// Makes `id` the active note. Unknown ids leave the selection untouched.
    pub fn select(&mut self, id: NoteId) -> bool {
        if self.position(id).is_none() {
            return false;
        }
        self.selection.set(Some(id));
        true
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn selection(&self) -> ActiveSelection {
        self.selection
    }

    pub fn active_id(&self) -> Option<NoteId> {
        self.selection.get()
    }

    pub fn active_note(&self) -> Option<&Note> {
        self.active_id().and_then(|id| self.get(id))
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Underlying repository, mainly for inspecting persisted state.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    fn position(&self, id: NoteId) -> Option<usize> {
        self.notes.iter().position(|note| note.id == id)
    }

    fn commit(&mut self, next: Vec<Note>) -> StoreResult<()> {
        let payload = serde_json::to_string(&next)?;
        if let Err(err) = self.repo.put(&self.storage_key, &payload) {
            warn!("event=notes_persist module=store status=error error={err}");
            return Err(err.into());
        }
        self.notes = next;
        Ok(())
    }

    fn read_persisted(&self) -> Vec<Note> {
        let raw = match self.repo.get(&self.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!("event=notes_load module=store status=degraded reason=read_failed error={err}");
                return Vec::new();
            }
        };

        let notes = match serde_json::from_str::<Vec<Note>>(&raw) {
            Ok(notes) => notes,
            Err(err) => {
                warn!("event=notes_load module=store status=degraded reason=malformed error={err}");
                return Vec::new();
            }
        };

        let mut seen = HashSet::with_capacity(notes.len());
        if notes.iter().any(|note| !seen.insert(note.id)) {
            warn!("event=notes_load module=store status=degraded reason=duplicate_id");
            return Vec::new();
        }
        notes
    }
}
