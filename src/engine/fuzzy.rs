//! Near-duplicate detection by positional string comparison.
//!
//! No edit distance: every heuristic is a per-position character count or a
//! plain equality, so a query costs one pass over the archive.

use std::fmt;

use crate::{
    config::MatchConfig,
    contact::{ArchiveEntry, Contact},
    core::store::Archive,
    types::TimesWorked,
};

/// Why an archive contact was flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchReason {
    /// Locators differ in at most `locator_threshold` positions.
    SimilarLocator,
    /// Identical locator.
    SameLocator,
    /// Same callsign, different locator.
    DifferentLocator,
    /// Callsigns differ in at most `callsign_threshold` positions.
    SimilarCallsign,
    /// Callsigns equal once the `/` suffix is removed.
    DifferentSuffix,
    /// Callsigns equal once the country prefix is removed.
    DifferentPrefix,
}

impl MatchReason {
    /// Tag printed after a near match.
    pub fn tag(self) -> &'static str {
        match self {
            MatchReason::SimilarLocator => "(similar locator)",
            MatchReason::SameLocator => "(same locator)",
            MatchReason::DifferentLocator => "(different locator)",
            MatchReason::SimilarCallsign => "(similar callsign)",
            MatchReason::DifferentSuffix => "(different suffix)",
            MatchReason::DifferentPrefix => "(different prefix)",
        }
    }
}

impl fmt::Display for MatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// An archive contact that looks like the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuzzyMatch<'a> {
    /// Matched archive contact.
    pub contact: &'a Contact,
    /// Its archive entry.
    pub entry: &'a ArchiveEntry,
    /// Heuristic that fired.
    pub reason: MatchReason,
}

impl FuzzyMatch<'_> {
    /// Times the matched contact was worked.
    pub fn times_worked(&self) -> TimesWorked {
        self.entry.times_worked
    }

    /// Raw date list of the matched contact.
    pub fn dates(&self) -> &str {
        &self.entry.dates
    }
}

impl fmt::Display for FuzzyMatch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.contact, self.reason)
    }
}

/// Count of positions holding the same character, up to the shorter string.
pub fn similarity(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).filter(|(x, y)| x == y).count()
}

/// Callsign with everything from the last `/` removed.
pub fn remove_suffix(callsign: &str) -> &str {
    match callsign.rfind('/') {
        Some(idx) => &callsign[..idx],
        None => callsign,
    }
}

/// Callsign with its country prefix removed: one optional leading digit,
/// then letters, then digits.
pub fn remove_prefix(callsign: &str) -> &str {
    let end = prefix_end(callsign);
    &callsign[byte_offset(callsign, end)..]
}

/// Country prefix without its final character, e.g. `2E0NEY` → `2E`.
pub fn callsign_prefix(callsign: &str) -> &str {
    match prefix_end(callsign) {
        0 => "",
        end => &callsign[..byte_offset(callsign, end - 1)],
    }
}

// Character index just past the prefix.
fn prefix_end(callsign: &str) -> usize {
    let chars: Vec<char> = callsign.chars().collect();
    let mut pos = 0;

    if chars.first().is_some_and(|c| c.is_ascii_digit()) {
        pos += 1;
    }
    while pos < chars.len() && !chars[pos].is_ascii_digit() {
        pos += 1;
    }
    while pos < chars.len() && chars[pos].is_ascii_digit() {
        pos += 1;
    }
    pos
}

fn byte_offset(s: &str, char_idx: usize) -> usize {
    s.char_indices().nth(char_idx).map_or(s.len(), |(i, _)| i)
}

// `score >= len - threshold` without underflow.
fn within(score: usize, len: usize, threshold: usize) -> bool {
    score.saturating_add(threshold) >= len
}

/// All archive contacts that resemble `query`, in archive order.
///
/// A contact appears once per heuristic it satisfies. The query itself is
/// never returned. `similar_locators` enables the similar-locator check.
pub fn fuzzy_matches<'a>(
    query: &Contact,
    similar_locators: bool,
    archive: &'a Archive,
    config: &MatchConfig,
) -> Vec<FuzzyMatch<'a>> {
    let query_call = query.callsign();
    let query_loc = query.locator();
    let call_len = query_call.chars().count();
    let loc_len = query_loc.chars().count();
    let query_call_no_suffix = remove_suffix(query_call);
    let query_call_no_prefix = remove_prefix(query_call);

    let mut out = Vec::new();

    for (contact, entry) in archive.iter() {
        if contact == query {
            continue;
        }

        let mut push = |reason| {
            out.push(FuzzyMatch {
                contact,
                entry,
                reason,
            })
        };

        let call = contact.callsign();
        let loc = contact.locator();

        if similar_locators
            && !query_loc.is_empty()
            && within(similarity(query_loc, loc), loc_len, config.locator_threshold)
        {
            push(MatchReason::SimilarLocator);
        }

        if query_loc == loc {
            push(MatchReason::SameLocator);
        }

        if query_call == call && query_loc != loc {
            push(MatchReason::DifferentLocator);
        }

        let sameness = similarity(query_call, call);
        if within(sameness, call_len, config.callsign_threshold) && sameness != call_len {
            push(MatchReason::SimilarCallsign);
        }

        if query_call != call {
            if query_call_no_suffix == remove_suffix(call) {
                push(MatchReason::DifferentSuffix);
            }
            if query_call_no_prefix == remove_prefix(call) {
                push(MatchReason::DifferentPrefix);
            }
        }
    }

    out
}
