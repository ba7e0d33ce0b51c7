//! Change events produced by the merge engine.

use serde::Serialize;

use crate::{contact::Contact, types::DateStamp};

/// What a merge or ingest did to one contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ArchiveOp {
    /// Contact copied from the source archive into the target.
    Added {
        /// Copied contact.
        contact: Contact,
    },
    /// Contact present in both archives; counts summed, dates concatenated.
    Combined {
        /// Shared contact.
        contact: Contact,
    },
    /// New contact from a log, worked once.
    Inserted {
        /// New contact.
        contact: Contact,
        /// Date it was worked.
        date: DateStamp,
    },
    /// Known contact worked on a new date.
    Revisited {
        /// Existing contact.
        contact: Contact,
        /// Newly recorded date.
        date: DateStamp,
    },
    /// Known contact whose date was already recorded; nothing changed.
    SameDay {
        /// Existing contact.
        contact: Contact,
        /// Date already present.
        date: DateStamp,
    },
    /// Log record with a blank callsign that was not inserted.
    SkippedBlank {
        /// Discarded contact.
        contact: Contact,
    },
}

impl ArchiveOp {
    /// Contact the event refers to.
    pub fn contact(&self) -> &Contact {
        match self {
            ArchiveOp::Added { contact }
            | ArchiveOp::Combined { contact }
            | ArchiveOp::Inserted { contact, .. }
            | ArchiveOp::Revisited { contact, .. }
            | ArchiveOp::SameDay { contact, .. }
            | ArchiveOp::SkippedBlank { contact } => contact,
        }
    }

    /// True when the event introduced a contact the archive did not hold.
    pub fn is_new_contact(&self) -> bool {
        matches!(self, ArchiveOp::Added { .. } | ArchiveOp::Inserted { .. })
    }
}
