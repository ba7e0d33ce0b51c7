//! Reconciliation engine for ham-radio contact archives (CSL files).
//!
//! An archive maps each station worked, keyed by callsign, locator and
//! exchange, to how often and on which dates it was worked. The crate reads
//! and writes CSL archives, pulls contacts out of EDI contest logs, merges
//! archives, flags near-duplicate entries and checks locators against the
//! callsign's country.
//!
//! # Examples
//!
//! Folding a contest log into an archive:
//! ```
//! use cslarchive::{
//!     contact::{ArchiveEntry, Contact},
//!     core::store::Archive,
//!     engine::merge::ingest_edi,
//!     persist::{csl::render_csl, edi::parse_edi},
//! };
//!
//! let mut archive = Archive::new();
//! archive.set(
//!     Contact::new("G0SKA", "IO91QN", "SL"),
//!     ArchiveEntry::new(2, "2017/03/07;2017/04/04;"),
//! );
//!
//! let log = "[QSORecords;1]\n170606;1905;G0SKA;1;59;002;58;003;SL;IO91QN;15;;;;\n";
//! let extract = parse_edi(log.as_bytes());
//! let ops = ingest_edi(&mut archive, &extract.value).expect("QSO section");
//! assert_eq!(ops.len(), 1);
//!
//! assert_eq!(
//!     render_csl(&archive),
//!     "\"G0SKA\",\"IO91QN\",\"SL\",3,\"2017/06/06;2017/04/04;2017/03/07;\"\n"
//! );
//! ```
//!
//! Checking a contact against an archive:
//! ```
//! use cslarchive::{
//!     config::MatchConfig,
//!     contact::{ArchiveEntry, Contact},
//!     core::store::Archive,
//!     engine::fuzzy::{MatchReason, fuzzy_matches},
//! };
//!
//! let mut archive = Archive::new();
//! archive.set(Contact::new("G4AUC", "IO91OJ", ""), ArchiveEntry::new(1, "2018/02/24;"));
//!
//! let query = Contact::new("G4AUZ", "IO91OJ", "");
//! let matches = fuzzy_matches(&query, false, &archive, &MatchConfig::default());
//! let reasons: Vec<_> = matches.iter().map(|m| m.reason).collect();
//! assert_eq!(reasons, [MatchReason::SameLocator, MatchReason::SimilarCallsign]);
//! ```
#![deny(missing_docs)]

/// Engine configuration.
pub mod config;
/// Contact key, archive entry and raw row types.
pub mod contact;
/// In-memory archive store.
pub mod core;
/// Matching, locator checks, merging and reports.
pub mod engine;
/// Merge and ingest change events.
pub mod op;
/// CSL, EDI and reference table codecs.
pub mod persist;
/// Shared primitive types.
pub mod types;
/// Field and line format checks.
pub mod validate;
