//! Reconciliation engine: matching, locator checks, merging and reports.

/// Fuzzy near-duplicate matcher.
pub mod fuzzy;
/// Callsign country versus locator square check.
pub mod locator;
/// Archive merge and log ingestion.
pub mod merge;
/// Archive and contest report builders.
pub mod report;
/// Lookup seams injected into the engine.
pub mod traits;
