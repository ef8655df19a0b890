//! Note domain model.
//!
//! # Responsibility
//! - Define the persisted `{id, title, content}` record.
//! - Provide the creation helper used by the note store.
//!
//! # Invariants
//! - `id` is generated once and never changes.
//! - `content` is always a valid document; absent/null payloads read back as
//!   an empty document.

use crate::model::document::Document;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Stable note identifier.
pub type NoteId = Uuid;

/// One titled unit of document content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    #[serde(default, deserialize_with = "content_or_empty")]
    pub content: Document,
}

impl Note {
    /// Creates a note with a fresh id and an empty document.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            content: Document::empty(),
        }
    }
}

/// Builds the default title for the note created at 1-based position `index`.
pub fn default_title(prefix: &str, index: usize) -> String {
    format!("{} {index}", prefix.trim_end())
}

fn content_or_empty<'de, D>(deserializer: D) -> Result<Document, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Document>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::{default_title, Note};

    #[test]
    fn null_or_missing_content_reads_as_empty_document() {
        let id = "0b6a8d1e-6b35-4a4e-9d0a-3f1d2b2c9e11";
        let with_null = format!(r#"{{"id":"{id}","title":"a","content":null}}"#);
        let missing = format!(r#"{{"id":"{id}","title":"a"}}"#);

        let note: Note = serde_json::from_str(&with_null).unwrap();
        assert!(note.content.is_blank());
        let note: Note = serde_json::from_str(&missing).unwrap();
        assert!(note.content.is_blank());
    }

    #[test]
    fn default_title_appends_index() {
        assert_eq!(default_title("Ny Anteckning", 1), "Ny Anteckning 1");
        assert_eq!(default_title("Note ", 12), "Note 12");
    }

    #[test]
    fn new_notes_get_distinct_ids() {
        assert_ne!(Note::new("a").id, Note::new("a").id);
    }
}
