//! Contact extraction from EDI contest logs.
//!
//! Only the `[QSORecords` section is read. Each data row is `;`-separated:
//! field 0 is the `yymmdd` date, 2 the callsign, 8 the exchange and 9 the
//! locator.

use std::fs;
use std::path::Path;

use log::{debug, info, warn};

use crate::{
    contact::Contact,
    types::{DateStamp, LineNo},
    validate::{valid_callsign, valid_locator},
};

use super::{Parsed, PersistResult, Warning};

/// Substring marking the start of the QSO rows.
pub const QSO_SECTION_MARKER: &str = "[QSORecords";

const MIN_QSO_FIELDS: usize = 10;
const DATE_FIELD: usize = 0;
const CALLSIGN_FIELD: usize = 2;
const EXCHANGE_FIELD: usize = 8;
const LOCATOR_FIELD: usize = 9;

/// First two-digit year mapped into the 1900s.
pub const CENTURY_PIVOT: u32 = 70;

/// One QSO row pulled out of an EDI log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdiRecord {
    /// Station worked.
    pub contact: Contact,
    /// `yyyy/mm/dd` date, `None` when the row's date field was unusable.
    pub date: Option<DateStamp>,
}

/// Outcome of scanning an EDI log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdiExtract {
    /// The QSO section marker never appeared.
    NoQsoSection,
    /// Rows found after the marker, sorted by contact. May be empty.
    Records(Vec<EdiRecord>),
}

impl EdiExtract {
    /// Extracted rows; empty when there was no QSO section.
    pub fn records(&self) -> &[EdiRecord] {
        match self {
            EdiExtract::NoQsoSection => &[],
            EdiExtract::Records(records) => records,
        }
    }

    /// True when the marker was found.
    pub fn has_qso_section(&self) -> bool {
        matches!(self, EdiExtract::Records(_))
    }
}

/// Converts `yymmdd` to `yyyy/mm/dd`, `70`..`99` going to the 1900s.
///
/// Returns `None` unless the token is exactly six ASCII digits.
pub fn format_date(yymmdd: &str) -> Option<DateStamp> {
    if yymmdd.len() != 6 || !yymmdd.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let (yy, rest) = yymmdd.split_at(2);
    let (mm, dd) = rest.split_at(2);
    let year: u32 = yy.parse().ok()?;
    let century = if year >= CENTURY_PIVOT { "19" } else { "20" };
    Some(format!("{century}{yy}/{mm}/{dd}"))
}

/// Extracts QSO rows from raw EDI bytes.
pub fn parse_edi(bytes: &[u8]) -> Parsed<EdiExtract> {
    let mut lines = bytes.split(|b| *b == b'\n').enumerate();

    let found = lines.any(|(_, raw)| String::from_utf8_lossy(raw).contains(QSO_SECTION_MARKER));
    if !found {
        debug!("no {QSO_SECTION_MARKER} section in EDI input");
        return Parsed::clean(EdiExtract::NoQsoSection);
    }

    let mut records = Vec::new();
    let mut warnings = Vec::new();

    for (idx, raw) in lines {
        let line_no = idx as LineNo + 1;
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        let Ok(line) = std::str::from_utf8(raw) else {
            warn!("skipping undecodable EDI line {line_no}");
            warnings.push(Warning::Undecodable { line_no });
            continue;
        };

        let fields: Vec<&str> = line.split(';').collect();
        if fields.len() < MIN_QSO_FIELDS {
            continue;
        }

        let callsign = fields[CALLSIGN_FIELD];
        let locator = fields[LOCATOR_FIELD];
        let exchange = fields[EXCHANGE_FIELD];

        if !valid_callsign(callsign) {
            warnings.push(Warning::Callsign {
                line: line.trim().to_string(),
                callsign: callsign.to_string(),
            });
        }
        if !valid_locator(locator) {
            warnings.push(Warning::Locator {
                line: line.trim().to_string(),
                locator: locator.to_string(),
            });
        }

        let date = format_date(fields[DATE_FIELD]);
        if date.is_none() {
            warnings.push(Warning::Date {
                line: line.trim().to_string(),
                date: fields[DATE_FIELD].to_string(),
            });
        }

        records.push(EdiRecord {
            contact: Contact::new(callsign, locator, exchange),
            date,
        });
    }

    records.sort_by(|a, b| a.contact.cmp(&b.contact));
    Parsed {
        value: EdiExtract::Records(records),
        warnings,
    }
}

/// Reads and extracts the EDI log at `path`.
pub fn read_edi(path: impl AsRef<Path>) -> PersistResult<Parsed<EdiExtract>> {
    let path = path.as_ref();
    info!("reading EDI log {}", path.display());
    let bytes = fs::read(path)?;
    let parsed = parse_edi(&bytes);
    match &parsed.value {
        EdiExtract::NoQsoSection => warn!("{} has no QSO section", path.display()),
        EdiExtract::Records(records) => {
            info!("extracted {} QSOs from {}", records.len(), path.display())
        }
    }
    Ok(parsed)
}
