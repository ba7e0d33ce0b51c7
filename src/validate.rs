//! Syntax checks for CSL fields and whole CSL lines.
//!
//! Every predicate is total: malformed input yields `false`, never a panic.
//! [`check_line`] composes them positionally and collects one failure per
//! bad field instead of stopping at the first.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::types::CslField;

static CALLSIGN_BODY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[1-9][A-Z]|[A-Z]{1,2}?)[0-9]+[A-Z]*$").expect("valid callsign body regex")
});

// Country prefix written before or after a stroke, e.g. F/, C3/, /VE3.
static CALLSIGN_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[1-9][A-Z]|[A-Z]{1,2}?)[0-9]*$").expect("valid callsign prefix regex")
});

// Portable designators: /P, /MM, /3. The comma in the class is accepted as written.
static CALLSIGN_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[0-9,A-Z]|[A-Z]{1,2}?)$").expect("valid callsign suffix regex"));

static LOCATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-R][A-R][0-9][0-9][A-X][A-X](?:[0-9][0-9])?$").expect("valid locator regex")
});

// Year class is `[0,9]` on purpose: 19xx and 20xx only.
static DATE_LIST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[1-2][0,9][0-9][0-9]/[0-1][0-9]/[0-3][0-9];)*$").expect("valid date list regex")
});

/// Amateur callsign grammar with at most one stroke.
pub fn valid_callsign(callsign: &str) -> bool {
    if callsign.is_empty() {
        return false;
    }

    let mut parts = callsign.split('/');
    let (Some(before), after, None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };

    let Some(after) = after else {
        return CALLSIGN_BODY.is_match(before);
    };

    (CALLSIGN_BODY.is_match(before) && CALLSIGN_SUFFIX.is_match(after))
        || (CALLSIGN_PREFIX.is_match(before) && CALLSIGN_BODY.is_match(after))
        || (CALLSIGN_BODY.is_match(before) && CALLSIGN_PREFIX.is_match(after))
}

/// Six or eight character Maidenhead locator, upper-case.
pub fn valid_locator(locator: &str) -> bool {
    matches!(locator.len(), 6 | 8) && LOCATOR.is_match(locator)
}

/// Any exchange text is acceptable.
pub fn valid_exchange(_exchange: &str) -> bool {
    true
}

/// Only ASCII decimal digits: no sign, no decimal point.
pub fn valid_times_worked(times_worked: &str) -> bool {
    times_worked.bytes().all(|b| b.is_ascii_digit())
}

/// Non-empty run of `YYYY/MM/DD;` stamps. Purely syntactic.
pub fn valid_date_list(dates: &str) -> bool {
    !dates.is_empty() && DATE_LIST.is_match(dates)
}

fn field_check(field: CslField) -> fn(&str) -> bool {
    match field {
        CslField::Callsign => valid_callsign,
        CslField::Locator => valid_locator,
        CslField::Exchange => valid_exchange,
        CslField::TimesWorked => valid_times_worked,
        CslField::Dates => valid_date_list,
    }
}

/// One field that failed its check, with the text as it appeared in the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFailure {
    /// Which field failed.
    pub field: CslField,
    /// Raw field text including any quotes.
    pub raw: String,
}

impl fmt::Display for FieldFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}", self.raw, self.field.complaint())
    }
}

/// Outcome of a failed [`check_line`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    /// Fewer than three comma separated fields.
    #[error("The line: {line} must have at least three comma separated fields!")]
    TooFewFields {
        /// Offending line.
        line: String,
    },
    /// One or more fields failed their format check.
    #[error("The line: {line} is not correctly formatted:\n{}", render_failures(.failures))]
    Format {
        /// Offending line.
        line: String,
        /// Every failing field, in field order.
        failures: Vec<FieldFailure>,
    },
}

impl LineError {
    /// Fields that failed, empty for a structural error.
    pub fn failures(&self) -> &[FieldFailure] {
        match self {
            LineError::TooFewFields { .. } => &[],
            LineError::Format { failures, .. } => failures,
        }
    }
}

fn render_failures(failures: &[FieldFailure]) -> String {
    failures.iter().map(|f| format!("{f}\n")).collect()
}

/// Checks `callsign,locator,exchange[,times_worked[,dates]]`.
///
/// Fields beyond the fifth are ignored. Quotes around a field are stripped
/// before its check; the failure keeps the raw text.
pub fn check_line(line: &str) -> Result<(), LineError> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < 3 {
        return Err(LineError::TooFewFields {
            line: line.to_string(),
        });
    }

    let failures: Vec<FieldFailure> = CslField::ALL
        .iter()
        .zip(fields.iter())
        .filter(|(field, raw)| !field_check(**field)(raw.trim_matches('"')))
        .map(|(field, raw)| FieldFailure {
            field: *field,
            raw: (*raw).to_string(),
        })
        .collect();

    if failures.is_empty() {
        Ok(())
    } else {
        Err(LineError::Format {
            line: line.to_string(),
            failures,
        })
    }
}
