//! In-memory archive store.

/// Keyed contact archive.
pub mod store;
