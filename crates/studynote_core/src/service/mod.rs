//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into note-level operations.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod note_store;
pub mod preview;
