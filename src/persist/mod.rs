//! File codecs: CSL archives, EDI logs and the locator reference tables.

use std::fmt;

use thiserror::Error;

use crate::{contact::Contact, types::LineNo, validate::LineError};

/// CSL archive reader and writer.
pub mod csl;
/// EDI contest log extraction.
pub mod edi;
/// Prefix and locator-square reference tables.
pub mod tables;

/// Hard failure at a file boundary.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// CSV framing error in a CSL file.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// Malformed reference table or configuration.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for file operations.
pub type PersistResult<T> = Result<T, PersistError>;

/// Non-fatal problem noticed while reading; reading carries on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// CSL row that failed the line check.
    Line(LineError),
    /// EDI record whose callsign fails the callsign grammar.
    Callsign {
        /// Trimmed source line.
        line: String,
        /// Offending callsign.
        callsign: String,
    },
    /// EDI record whose locator is not a Maidenhead locator.
    Locator {
        /// Trimmed source line.
        line: String,
        /// Offending locator.
        locator: String,
    },
    /// EDI record whose date field is not `yymmdd`.
    Date {
        /// Trimmed source line.
        line: String,
        /// Offending date token.
        date: String,
    },
    /// CSL row whose key was already read; the earlier entry was dropped.
    Duplicate {
        /// Key shared by both rows, after callsign normalization.
        contact: Contact,
    },
    /// Line that is not valid UTF-8 and was skipped.
    Undecodable {
        /// 1-based line number.
        line_no: LineNo,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::Line(err) => write!(f, "{err}"),
            Warning::Callsign { line, callsign } => writeln!(
                f,
                "{line}\n    Callsign: {callsign} does not appear to be a valid callsign."
            ),
            Warning::Locator { line, locator } => writeln!(
                f,
                "{line}\n    Locator: {locator} does not appear to be a valid locator."
            ),
            Warning::Date { line, date } => {
                writeln!(f, "{line}\n    Date: {date} is not a yymmdd date.")
            }
            Warning::Duplicate { contact } => {
                writeln!(f, "{contact} appears more than once; the earlier row was replaced.")
            }
            Warning::Undecodable { line_no } => {
                writeln!(f, "Line {line_no} is not valid text and was skipped.")
            }
        }
    }
}

impl From<LineError> for Warning {
    fn from(value: LineError) -> Self {
        Self::Line(value)
    }
}

/// Successfully read data together with every warning raised on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed<T> {
    /// What was read.
    pub value: T,
    /// Warnings in file order; empty when the input was clean.
    pub warnings: Vec<Warning>,
}

impl<T> Parsed<T> {
    /// Wraps a value with no warnings.
    pub fn clean(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    /// True when nothing was reported.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// All warnings, each followed by a blank line, ready for display.
    pub fn warning_text(&self) -> String {
        self.warnings.iter().map(|w| format!("{w}\n")).collect()
    }

    /// Applies `f` to the value, keeping the warnings.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Parsed<U> {
        Parsed {
            value: f(self.value),
            warnings: self.warnings,
        }
    }
}
