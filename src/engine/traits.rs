use hashbrown::HashSet;

/// Read-only country lookup used by the locator consistency check.
///
/// Implementations are built once and shared; lookups never mutate.
pub trait CountryReference: Send + Sync {
    /// Main prefix of the country `callsign` belongs to, by longest prefix
    /// match. `None` means the country is unknown.
    fn main_prefix(&self, callsign: &str) -> Option<&str>;

    /// Valid 4-character squares registered for `main_prefix`, if any.
    fn squares(&self, main_prefix: &str) -> Option<&HashSet<String>>;
}

/// Reference with no data: every callsign is from an unknown country.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReference;

impl CountryReference for NoReference {
    fn main_prefix(&self, _callsign: &str) -> Option<&str> {
        None
    }

    fn squares(&self, _main_prefix: &str) -> Option<&HashSet<String>> {
        None
    }
}
