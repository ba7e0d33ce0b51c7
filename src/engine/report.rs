//! Report builders combining the matcher and the locator check.

use std::fmt;

use crate::{
    config::MatchConfig,
    contact::{ArchiveEntry, Contact},
    core::store::Archive,
    persist::edi::EdiRecord,
};

use super::{
    fuzzy::{FuzzyMatch, fuzzy_matches},
    locator::{LocatorMismatch, check_locator_country},
    traits::CountryReference,
};

/// Everything worth saying about one contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactReport<'a> {
    /// Contact being reported on.
    pub contact: Contact,
    /// Its archive entry, when it is in the archive.
    pub entry: Option<&'a ArchiveEntry>,
    /// Near matches found in the archive.
    pub near_matches: Vec<FuzzyMatch<'a>>,
    /// Locator/country inconsistency, if any.
    pub locator_mismatch: Option<LocatorMismatch>,
}

impl ContactReport<'_> {
    /// True when there are near matches or a locator problem.
    pub fn has_findings(&self) -> bool {
        !self.near_matches.is_empty() || self.locator_mismatch.is_some()
    }
}

impl fmt::Display for ContactReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  {}", self.contact)?;
        if let Some(entry) = self.entry {
            writeln!(f, "      {}", entry.summary())?;
        }
        if !self.near_matches.is_empty() {
            writeln!(f, "    Near Matches:")?;
            for m in &self.near_matches {
                writeln!(f, "    {m}")?;
                writeln!(f, "       {}", m.entry.summary())?;
            }
        }
        if let Some(mismatch) = &self.locator_mismatch {
            writeln!(f, "{mismatch}")?;
        }
        Ok(())
    }
}

fn report_on<'a, R>(
    contact: Contact,
    archive: &'a Archive,
    reference: &R,
    similar_locators: bool,
    config: &MatchConfig,
) -> ContactReport<'a>
where
    R: CountryReference + ?Sized,
{
    let near_matches = fuzzy_matches(&contact, similar_locators, archive, config);
    let locator_mismatch = check_locator_country(reference, contact.callsign(), contact.locator());
    ContactReport {
        entry: archive.get(&contact),
        contact,
        near_matches,
        locator_mismatch,
    }
}

/// Reports on every archive contact in ascending order.
pub fn check_archive<'a, R>(
    archive: &'a Archive,
    reference: &R,
    similar_locators: bool,
    config: &MatchConfig,
) -> Vec<ContactReport<'a>>
where
    R: CountryReference + ?Sized,
{
    archive
        .sorted_contacts()
        .into_iter()
        .map(|c| report_on(c.clone(), archive, reference, similar_locators, config))
        .collect()
}

/// Contest log contacts split by whether the archive already holds them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContestReport<'a> {
    /// Contacts not in the archive.
    pub unique: Vec<ContactReport<'a>>,
    /// Contacts already in the archive.
    pub worked_before: Vec<ContactReport<'a>>,
}

impl fmt::Display for ContestReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Date Format: yyyy/mm/dd")?;
        writeln!(f)?;
        writeln!(f, "The following are not in the archive:")?;
        writeln!(f)?;
        for report in &self.unique {
            write!(f, "{report}")?;
            writeln!(f)?;
        }
        writeln!(f)?;
        writeln!(f, "The following already exist in the archive:")?;
        for report in &self.worked_before {
            writeln!(f)?;
            write!(f, "{report}")?;
        }
        Ok(())
    }
}

/// Checks the contacts of a contest log against `archive`.
pub fn contest_report<'a, R>(
    archive: &'a Archive,
    records: &[EdiRecord],
    reference: &R,
    similar_locators: bool,
    config: &MatchConfig,
) -> ContestReport<'a>
where
    R: CountryReference + ?Sized,
{
    let mut report = ContestReport::default();
    for record in records {
        let contact = record.contact.clone();
        let in_archive = archive.contains(&contact);
        let entry = report_on(contact, archive, reference, similar_locators, config);
        if in_archive {
            report.worked_before.push(entry);
        } else {
            report.unique.push(entry);
        }
    }
    report
}
