//! Flutter-facing bindings for studynote core.

pub mod api;
