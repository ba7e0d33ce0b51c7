//! Contact key, archive entry and raw CSL row types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{DATE_TERMINATOR, DEFAULT_TIMES_WORKED, TimesWorked};

/// Identity of a worked station.
///
/// The callsign is upper-cased on construction. Equality and ordering are
/// exact over `(callsign, locator, exchange)` in that order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Contact {
    callsign: String,
    locator: String,
    exchange: String,
}

impl Contact {
    /// Builds a contact, normalizing the callsign to upper-case.
    pub fn new(
        callsign: impl Into<String>,
        locator: impl Into<String>,
        exchange: impl Into<String>,
    ) -> Self {
        Self {
            callsign: callsign.into().to_uppercase(),
            locator: locator.into(),
            exchange: exchange.into(),
        }
    }

    /// Normalized callsign.
    pub fn callsign(&self) -> &str {
        &self.callsign
    }

    /// Maidenhead locator as entered.
    pub fn locator(&self) -> &str {
        &self.locator
    }

    /// Contest exchange as entered.
    pub fn exchange(&self) -> &str {
        &self.exchange
    }

    /// True for title/placeholder rows, which are never written.
    pub fn is_placeholder(&self) -> bool {
        self.callsign.is_empty() && self.exchange.is_empty()
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.callsign, self.locator, self.exchange)
    }
}

/// Visit history stored against a [`Contact`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArchiveEntry {
    /// Number of times the station has been worked.
    pub times_worked: TimesWorked,
    /// Raw `;`-terminated list of `yyyy/mm/dd` dates.
    pub dates: String,
}

impl ArchiveEntry {
    /// Creates an entry from a count and a raw date list.
    pub fn new(times_worked: TimesWorked, dates: impl Into<String>) -> Self {
        Self {
            times_worked,
            dates: dates.into(),
        }
    }

    /// Entry for a station worked once on `date`.
    pub fn first_worked(date: &str) -> Self {
        Self::new(1, format!("{date}{DATE_TERMINATOR}"))
    }

    /// Non-empty date tokens in stored order.
    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.dates.split(DATE_TERMINATOR).filter(|d| !d.is_empty())
    }

    /// Substring containment check against the raw date list.
    pub fn mentions_date(&self, date: &str) -> bool {
        self.dates.contains(date)
    }

    pub(crate) fn push_date(&mut self, date: &str) {
        self.dates.push_str(date);
        self.dates.push(DATE_TERMINATOR);
    }

    /// "worked once on ..." / "worked N times on ..." summary line.
    pub fn summary(&self) -> String {
        if self.times_worked == 1 {
            format!("worked once on {}", self.dates)
        } else {
            format!("worked {} times on {}", self.times_worked, self.dates)
        }
    }
}

/// Count field of a CSL row; unparseable tokens are kept as read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountField {
    /// Parsed count.
    Count(TimesWorked),
    /// Token that is not an unsigned integer.
    Raw(String),
}

impl CountField {
    /// Parses a trimmed token. Empty means the field was not given.
    pub fn parse(token: &str) -> Self {
        if token.is_empty() {
            return Self::Count(DEFAULT_TIMES_WORKED);
        }
        match token.parse::<TimesWorked>() {
            Ok(n) => Self::Count(n),
            Err(_) => Self::Raw(token.to_string()),
        }
    }

    /// Count to store in the archive.
    pub fn count(&self) -> TimesWorked {
        match self {
            Self::Count(n) => *n,
            Self::Raw(_) => DEFAULT_TIMES_WORKED,
        }
    }
}

impl Default for CountField {
    fn default() -> Self {
        Self::Count(DEFAULT_TIMES_WORKED)
    }
}

/// One CSL row with its five fields padded to defaults.
///
/// Fields hold the text as read (trimmed); normalization happens when the
/// row becomes a [`Contact`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CslRow {
    /// Callsign as written, not yet upper-cased.
    pub callsign: String,
    /// Maidenhead locator.
    pub locator: String,
    /// Contest exchange, often empty.
    pub exchange: String,
    /// Count, `Count(1)` when the field is absent.
    pub times_worked: CountField,
    /// `;`-terminated date list as read.
    pub dates: String,
}

impl CslRow {
    /// Renders the row as a CSL line: strings quoted, a parsed count bare.
    pub fn to_line(&self) -> String {
        let count = match &self.times_worked {
            CountField::Count(n) => n.to_string(),
            CountField::Raw(raw) => quote(raw),
        };
        format!(
            "{},{},{},{},{}",
            quote(&self.callsign),
            quote(&self.locator),
            quote(&self.exchange),
            count,
            quote(&self.dates)
        )
    }

    /// Splits the row into its archive key and value.
    pub fn into_entry(self) -> (Contact, ArchiveEntry) {
        let count = self.times_worked.count();
        (
            Contact::new(self.callsign, self.locator, self.exchange),
            ArchiveEntry::new(count, self.dates),
        )
    }
}

/// Quotes a CSL string field, doubling embedded quotes.
pub(crate) fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
