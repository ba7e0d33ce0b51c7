use std::collections::BTreeSet;

use proptest::prelude::*;

use cslarchive::{
    contact::{ArchiveEntry, Contact},
    core::store::Archive,
    engine::merge::{ingest_contacts, merge_archives, sort_dates},
    persist::csl::{parse_csl, render_csl},
    validate::{check_line, valid_date_list},
};

#[derive(Debug, Clone)]
enum Action {
    Set { call_idx: u8, loc_idx: u8, count: u8, day: u8 },
    Log { call_idx: u8, loc_idx: u8, day: u8 },
}

const LOCATORS: [&str; 4] = ["IO91OJ", "IO91OK", "JN47AA", "IN99VF"];

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0u8..16, 0u8..4, 1u8..9, 1u8..29).prop_map(|(call_idx, loc_idx, count, day)| Action::Set {
            call_idx,
            loc_idx,
            count,
            day,
        }),
        (0u8..16, 0u8..4, 1u8..29).prop_map(|(call_idx, loc_idx, day)| Action::Log {
            call_idx,
            loc_idx,
            day,
        }),
    ]
}

fn call(call_idx: u8) -> String {
    format!("G{}AA{}", call_idx % 10, char::from(b'A' + call_idx))
}

fn contact(call_idx: u8, loc_idx: u8) -> Contact {
    Contact::new(call(call_idx), LOCATORS[usize::from(loc_idx) % LOCATORS.len()], "")
}

fn date(day: u8) -> String {
    format!("2018/02/{day:02}")
}

fn archive_strategy() -> impl Strategy<Value = Archive> {
    prop::collection::vec(action_strategy(), 0..60).prop_map(|actions| {
        let mut archive = Archive::new();
        for action in actions {
            match action {
                Action::Set {
                    call_idx,
                    loc_idx,
                    count,
                    day,
                } => {
                    archive.set(
                        contact(call_idx, loc_idx),
                        ArchiveEntry::new(u32::from(count), format!("{};", date(day))),
                    );
                }
                Action::Log {
                    call_idx,
                    loc_idx,
                    day,
                } => {
                    ingest_contacts(&mut archive, [(contact(call_idx, loc_idx), date(day))]);
                }
            }
        }
        archive
    })
}

proptest! {
    #[test]
    fn insertion_order_lists_every_key_once(archive in archive_strategy()) {
        let keys: Vec<&Contact> = archive.iter().map(|(c, _)| c).collect();
        let unique: BTreeSet<&Contact> = keys.iter().copied().collect();
        prop_assert_eq!(keys.len(), archive.len());
        prop_assert_eq!(unique.len(), archive.len());

        let mut sorted = keys.clone();
        sorted.sort();
        prop_assert_eq!(archive.sorted_contacts(), sorted);
    }

    #[test]
    fn rendered_archive_reads_back_equal(archive in archive_strategy()) {
        let text = render_csl(&archive);
        for line in text.lines() {
            prop_assert_eq!(check_line(line), Ok(()));
        }

        let reread = parse_csl(text.as_bytes()).expect("parse");
        prop_assert!(reread.is_clean());
        prop_assert_eq!(render_csl(&reread.value), text);
        prop_assert_eq!(reread.value.len(), archive.len());
    }

    #[test]
    fn merged_counts_are_symmetric(a in archive_strategy(), b in archive_strategy()) {
        let mut ab = a.clone();
        merge_archives(&mut ab, &b);
        let mut ba = b.clone();
        merge_archives(&mut ba, &a);

        prop_assert_eq!(ab.len(), ba.len());
        for (contact, entry) in &ab {
            let other = ba.get(contact).map(|e| e.times_worked);
            prop_assert_eq!(Some(entry.times_worked), other);
        }
    }

    #[test]
    fn logging_a_recorded_day_is_a_no_op(archive in archive_strategy(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!archive.is_empty());
        let rows: Vec<(Contact, ArchiveEntry)> =
            archive.iter().map(|(c, e)| (c.clone(), e.clone())).collect();
        let (contact, entry) = &rows[pick.index(rows.len())];
        let day = entry.dates().next().expect("generated entries carry a date").to_string();

        let mut after = archive.clone();
        ingest_contacts(&mut after, [(contact.clone(), day)]);
        prop_assert_eq!(after, archive);
    }

    #[test]
    fn sorting_dates_is_idempotent(days in prop::collection::vec(1u8..29, 0..12)) {
        let raw: String = days.iter().map(|d| format!("{};", date(*d))).collect();
        let sorted = sort_dates(&raw);

        prop_assert_eq!(sort_dates(&sorted), sorted.clone());
        prop_assert_eq!(sorted.len(), raw.len());
        if !days.is_empty() {
            prop_assert!(valid_date_list(&sorted));
        }
    }
}
