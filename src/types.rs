//! Shared primitive aliases and field identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of times a contact has been worked.
pub type TimesWorked = u32;
/// One `yyyy/mm/dd` date stamp.
pub type DateStamp = String;
/// Line number reported by the readers (1-based).
pub type LineNo = u64;

/// Default count given to a CSL row whose count field is missing.
pub const DEFAULT_TIMES_WORKED: TimesWorked = 1;

/// Separator terminating every date in a date list.
pub const DATE_TERMINATOR: char = ';';

/// Positional field of a CSL row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CslField {
    /// Station callsign.
    Callsign,
    /// Maidenhead locator.
    Locator,
    /// Contest exchange.
    Exchange,
    /// Times worked count.
    TimesWorked,
    /// Date list.
    Dates,
}

impl CslField {
    /// All fields in on-disk order.
    pub const ALL: [CslField; 5] = [
        CslField::Callsign,
        CslField::Locator,
        CslField::Exchange,
        CslField::TimesWorked,
        CslField::Dates,
    ];

    /// Message shown when the field fails its format check.
    pub fn complaint(self) -> &'static str {
        match self {
            CslField::Callsign => "callsign is not correctly formatted!",
            CslField::Locator => "locator is not correctly formatted!",
            CslField::Exchange => "exchange is not correctly formatted!",
            CslField::TimesWorked => "not a correct integer value!",
            CslField::Dates => "date(s) are not correctly formatted!",
        }
    }
}

impl fmt::Display for CslField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CslField::Callsign => "callsign",
            CslField::Locator => "locator",
            CslField::Exchange => "exchange",
            CslField::TimesWorked => "times worked",
            CslField::Dates => "dates",
        };
        f.write_str(name)
    }
}
