use log::{debug, warn};

use crate::{
    contact::{ArchiveEntry, Contact},
    core::store::Archive,
    op::ArchiveOp,
    persist::edi::EdiExtract,
    types::{DATE_TERMINATOR, DateStamp},
};

/// Sorts a `;`-terminated date list newest first, dropping empty tokens.
///
/// `yyyy/mm/dd` sorts lexically in date order, so a string sort suffices.
pub fn sort_dates(dates: &str) -> String {
    let mut list: Vec<&str> = dates.split(DATE_TERMINATOR).filter(|d| !d.is_empty()).collect();
    list.sort_unstable_by(|a, b| b.cmp(a));
    list.iter().map(|d| format!("{d}{DATE_TERMINATOR}")).collect()
}

/// Folds `source` into `target`.
///
/// Contacts new to `target` are copied. Shared contacts get their counts
/// summed and their raw date strings concatenated; a date present in both
/// archives ends up listed twice.
pub fn merge_archives(target: &mut Archive, source: &Archive) -> Vec<ArchiveOp> {
    let mut ops = Vec::with_capacity(source.len());

    for (contact, entry) in source.iter() {
        if let Some(existing) = target.get_mut(contact) {
            existing.times_worked = existing.times_worked.saturating_add(entry.times_worked);
            existing.dates.push_str(&entry.dates);
            ops.push(ArchiveOp::Combined {
                contact: contact.clone(),
            });
            continue;
        }

        target.set(contact.clone(), entry.clone());
        ops.push(ArchiveOp::Added {
            contact: contact.clone(),
        });
    }

    debug!(
        "merged {} contacts, {} new",
        ops.len(),
        ops.iter().filter(|op| op.is_new_contact()).count()
    );
    ops
}

/// Adds newly logged contacts to `archive`.
///
/// A new contact is stored as worked once on its date; new contacts with a
/// blank callsign are skipped. A known contact is counted again only when
/// its date does not already appear in the stored date list.
pub fn ingest_contacts<I>(archive: &mut Archive, contacts: I) -> Vec<ArchiveOp>
where
    I: IntoIterator<Item = (Contact, DateStamp)>,
{
    let mut ops = Vec::new();

    for (contact, date) in contacts {
        if let Some(entry) = archive.get_mut(&contact) {
            if entry.mentions_date(&date) {
                ops.push(ArchiveOp::SameDay { contact, date });
            } else {
                entry.times_worked = entry.times_worked.saturating_add(1);
                entry.push_date(&date);
                ops.push(ArchiveOp::Revisited { contact, date });
            }
            continue;
        }

        if contact.callsign().is_empty() {
            ops.push(ArchiveOp::SkippedBlank { contact });
            continue;
        }

        archive.set(contact.clone(), ArchiveEntry::first_worked(&date));
        ops.push(ArchiveOp::Inserted { contact, date });
    }

    ops
}

/// Feeds the rows of an EDI extract into `archive`.
///
/// Returns `None` when the log had no QSO section. Rows without a usable
/// date are left out.
pub fn ingest_edi(archive: &mut Archive, extract: &EdiExtract) -> Option<Vec<ArchiveOp>> {
    let EdiExtract::Records(records) = extract else {
        warn!("EDI log has no QSO section, archive unchanged");
        return None;
    };

    let dated = records.iter().filter_map(|record| match &record.date {
        Some(date) => Some((record.contact.clone(), date.clone())),
        None => {
            debug!("skipping undated QSO with {}", record.contact);
            None
        }
    });

    Some(ingest_contacts(archive, dated))
}
