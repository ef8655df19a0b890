//! Domain model for notes and their rich-text content.
//!
//! # Responsibility
//! - Define the persisted note record and its document tree.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - Note content is always a valid, normalized `Document`.

pub mod document;
pub mod note;
