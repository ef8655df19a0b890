//! Rich-text editing: command vocabulary, surface and session gate.
//!
//! # Responsibility
//! - Define the capability interface the toolbar drives.
//! - Provide the default in-process `DocumentEditor` surface.
//! - Separate programmatic content loads from user edits (`EditorSession`).

pub mod capability;
pub mod command;
pub mod session;
pub mod surface;
mod transform;
