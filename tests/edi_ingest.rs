use std::fs;

use cslarchive::{
    contact::{ArchiveEntry, Contact},
    core::store::Archive,
    engine::merge::{ingest_contacts, ingest_edi, sort_dates},
    op::ArchiveOp,
    persist::{
        Warning,
        csl::{parse_csl, render_csl, write_csl},
        edi::{EdiExtract, EdiRecord, format_date, parse_edi, read_edi},
    },
};
use tempfile::tempdir;

const HEADER: &str = "\
[REG1TEST;1]
TName=Test Contest
TDate=20170606;20170606
PCall=G4AUC
PWWLo=IO91OJ
";

fn log_with(rows: &[&str]) -> String {
    let mut text = HEADER.to_string();
    text.push_str(&format!("[QSORecords;{}]\n", rows.len()));
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    text
}

#[test]
fn format_date_pivots_at_seventy() {
    assert_eq!(format_date("700101").as_deref(), Some("1970/01/01"));
    assert_eq!(format_date("691231").as_deref(), Some("2069/12/31"));
    assert_eq!(format_date("180224").as_deref(), Some("2018/02/24"));
    assert_eq!(format_date("991231").as_deref(), Some("1999/12/31"));
}

#[test]
fn format_date_rejects_other_shapes() {
    for bad in ["", "70010", "7001011", "70O101", "20170606", "17-6-6"] {
        assert_eq!(format_date(bad), None, "{bad}");
    }
}

#[test]
fn sort_dates_orders_newest_first_and_drops_empties() {
    assert_eq!(
        sort_dates("2017/03/07;2018/02/24;;2017/04/04;"),
        "2018/02/24;2017/04/04;2017/03/07;"
    );
    assert_eq!(
        sort_dates("1970/01/01;2069/12/31;2018/02/24;"),
        "2069/12/31;2018/02/24;1970/01/01;"
    );
    assert_eq!(sort_dates(""), "");
    assert_eq!(sort_dates(";"), "");
}

#[test]
fn records_come_from_the_fixed_fields() {
    let text = log_with(&[
        "170606;1905;G0SKA;1;59;002;58;003;SL;IO91QN;15;;;;",
        "170606;1910;f8brk;1;59;004;59;010;;IN99VF;200;;;;",
    ]);
    let parsed = parse_edi(text.as_bytes());

    assert_eq!(
        parsed.warnings,
        [Warning::Callsign {
            line: "170606;1910;f8brk;1;59;004;59;010;;IN99VF;200;;;;".to_string(),
            callsign: "f8brk".to_string(),
        }]
    );
    assert_eq!(
        parsed.value,
        EdiExtract::Records(vec![
            EdiRecord {
                contact: Contact::new("F8BRK", "IN99VF", ""),
                date: Some("2017/06/06".to_string()),
            },
            EdiRecord {
                contact: Contact::new("G0SKA", "IO91QN", "SL"),
                date: Some("2017/06/06".to_string()),
            },
        ])
    );
}

#[test]
fn short_rows_after_the_marker_are_ignored() {
    let text = log_with(&[
        "170606;1905;G0SKA;1;59;002;58;003;SL",
        "",
        "170606;1910;F8BRK;1;59;004;59;010;;IN99VF;200;;;;",
    ]);
    let records = parse_edi(text.as_bytes()).value;
    assert_eq!(records.records().len(), 1);
    assert_eq!(records.records()[0].contact.callsign(), "F8BRK");
}

#[test]
fn header_rows_before_the_marker_are_not_records() {
    let text = "170606;1905;G0SKA;1;59;002;58;003;SL;IO91QN;15;;;;\n[QSORecords;0]\n";
    let parsed = parse_edi(text.as_bytes());
    assert_eq!(parsed.value, EdiExtract::Records(Vec::new()));
}

#[test]
fn missing_section_differs_from_an_empty_one() {
    let none = parse_edi(HEADER.as_bytes()).value;
    let empty = parse_edi(log_with(&[]).as_bytes()).value;

    assert_eq!(none, EdiExtract::NoQsoSection);
    assert!(!none.has_qso_section());
    assert!(none.records().is_empty());

    assert_eq!(empty, EdiExtract::Records(Vec::new()));
    assert!(empty.has_qso_section());
}

#[test]
fn bad_callsign_and_locator_are_reported_but_kept() {
    let text = log_with(&[
        "170606;1905;G1O1FW;1;59;002;58;003;;IO91QH;15;;;;",
        "170606;1905;G0SKA;1;59;002;58;003;;IO910K;15;;;;",
    ]);
    let parsed = parse_edi(text.as_bytes());
    assert_eq!(parsed.value.records().len(), 2);

    assert_eq!(
        parsed.warning_text(),
        "\
170606;1905;G1O1FW;1;59;002;58;003;;IO91QH;15;;;;
    Callsign: G1O1FW does not appear to be a valid callsign.

170606;1905;G0SKA;1;59;002;58;003;;IO910K;15;;;;
    Locator: IO910K does not appear to be a valid locator.

"
    );
}

#[test]
fn undated_rows_are_flagged_and_not_ingested() {
    let text = log_with(&["2017/06/06;1905;G0SKA;1;59;002;58;003;;IO91QN;15;;;;"]);
    let parsed = parse_edi(text.as_bytes());

    assert_eq!(parsed.value.records()[0].date, None);
    assert!(matches!(parsed.warnings[0], Warning::Date { .. }));

    let mut archive = Archive::new();
    let ops = ingest_edi(&mut archive, &parsed.value).expect("section present");
    assert!(ops.is_empty());
    assert!(archive.is_empty());
}

#[test]
fn crlf_line_endings_are_accepted() {
    let text = log_with(&["170606;1905;G0SKA;1;59;002;58;003;SL;IO91QN;15;;;;"]).replace('\n', "\r\n");
    let parsed = parse_edi(text.as_bytes());
    assert!(parsed.is_clean(), "{}", parsed.warning_text());
    assert_eq!(parsed.value.records()[0].contact, Contact::new("G0SKA", "IO91QN", "SL"));
}

#[test]
fn undecodable_rows_are_skipped() {
    let mut bytes = log_with(&["170606;1905;G0SKA;1;59;002;58;003;SL;IO91QN;15;;;;"]).into_bytes();
    bytes.extend_from_slice(b"170606;1905;\xff\xfe;1;59;002;58;003;;IO91QN;15;;;;\n");

    let parsed = parse_edi(&bytes);
    assert_eq!(parsed.value.records().len(), 1);
    assert!(matches!(parsed.warnings[..], [Warning::Undecodable { .. }]));
}

#[test]
fn log_without_section_leaves_archive_untouched() {
    let mut archive = Archive::new();
    archive.set(Contact::new("G4AUC", "IO91OJ", ""), ArchiveEntry::new(1, "2018/02/24;"));
    let before = archive.clone();

    assert_eq!(ingest_edi(&mut archive, &EdiExtract::NoQsoSection), None);
    assert_eq!(archive, before);
}

#[test]
fn contest_log_folds_into_the_archive() {
    let csl = "\
\"G0SKA\",\"IO91QN\",\"SL\",2,\"2017/04/04;2017/03/07;\"
\"G4AUC\",\"IO91OJ\",\"\",1,\"2018/02/24;\"
";
    let mut archive = parse_csl(csl.as_bytes()).expect("parse").value;

    let same_day = log_with(&["170404;1905;G0SKA;1;59;002;58;003;SL;IO91QN;15;;;;"]);
    let ops = ingest_edi(&mut archive, &parse_edi(same_day.as_bytes()).value).expect("section");
    assert_eq!(
        ops,
        [ArchiveOp::SameDay {
            contact: Contact::new("G0SKA", "IO91QN", "SL"),
            date: "2017/04/04".to_string(),
        }]
    );
    assert_eq!(
        archive.get(&Contact::new("G0SKA", "IO91QN", "SL")),
        Some(&ArchiveEntry::new(2, "2017/04/04;2017/03/07;"))
    );

    let new_day = log_with(&[
        "170606;1905;G0SKA;1;59;002;58;003;SL;IO91QN;15;;;;",
        "170606;1910;F8BRK;1;59;004;59;010;;IN99VF;200;;;;",
    ]);
    let ops = ingest_edi(&mut archive, &parse_edi(new_day.as_bytes()).value).expect("section");
    assert_eq!(ops.iter().filter(|op| op.is_new_contact()).count(), 1);

    assert_eq!(
        render_csl(&archive),
        "\
\"F8BRK\",\"IN99VF\",\"\",1,\"2017/06/06;\"
\"G0SKA\",\"IO91QN\",\"SL\",3,\"2017/06/06;2017/04/04;2017/03/07;\"
\"G4AUC\",\"IO91OJ\",\"\",1,\"2018/02/24;\"
"
    );
}

#[test]
fn repeated_contact_in_one_log_counts_once_per_day() {
    let mut archive = Archive::new();
    let ops = ingest_contacts(
        &mut archive,
        [
            (Contact::new("G4AUC", "IO91OJ", ""), "2018/02/24".to_string()),
            (Contact::new("G4AUC", "IO91OJ", ""), "2018/02/24".to_string()),
            (Contact::new("G4AUC", "IO91OJ", ""), "2018/03/01".to_string()),
        ],
    );

    assert!(matches!(ops[0], ArchiveOp::Inserted { .. }));
    assert!(matches!(ops[1], ArchiveOp::SameDay { .. }));
    assert!(matches!(ops[2], ArchiveOp::Revisited { .. }));
    assert_eq!(
        archive.get(&Contact::new("G4AUC", "IO91OJ", "")),
        Some(&ArchiveEntry::new(2, "2018/02/24;2018/03/01;"))
    );
}

#[test]
fn blank_callsigns_are_not_inserted() {
    let mut archive = Archive::new();
    let ops = ingest_contacts(
        &mut archive,
        [(Contact::new("", "IO91OJ", "SL"), "2018/02/24".to_string())],
    );

    assert_eq!(
        ops,
        [ArchiveOp::SkippedBlank {
            contact: Contact::new("", "IO91OJ", "SL"),
        }]
    );
    assert!(archive.is_empty());
}

#[test]
fn edi_file_round_trip_through_disk() {
    let dir = tempdir().expect("tempdir");
    let edi_path = dir.path().join("contest.edi");
    let csl_path = dir.path().join("archive.csl");
    fs::write(
        &edi_path,
        log_with(&["170606;1905;G0SKA;1;59;002;58;003;SL;IO91QN;15;;;;"]),
    )
    .expect("write edi");

    let extract = read_edi(&edi_path).expect("read edi");
    let mut archive = Archive::new();
    ingest_edi(&mut archive, &extract.value).expect("section");
    write_csl(&csl_path, &archive).expect("write csl");

    assert_eq!(
        fs::read_to_string(&csl_path).expect("read csl"),
        "\"G0SKA\",\"IO91QN\",\"SL\",1,\"2017/06/06;\"\n"
    );
}
