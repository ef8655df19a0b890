//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the durable-storage contract injected into the note store.
//! - Isolate SQLite details from service orchestration.

pub mod kv_repo;
