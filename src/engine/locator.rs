use std::fmt;

use super::traits::CountryReference;

/// Number of leading locator characters that name a grid square.
pub const SQUARE_LEN: usize = 4;

/// Locator square not registered for the callsign's country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorMismatch {
    /// Callsign as checked.
    pub callsign: String,
    /// Locator as checked.
    pub locator: String,
    /// Country the callsign resolved to.
    pub main_prefix: String,
}

impl fmt::Display for LocatorMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "    Prefix of {} is not in Locator Square {}",
            self.callsign, self.locator
        )
    }
}

/// Checks that `locator` lies in a square registered for the country of
/// `callsign`.
///
/// Unknown prefixes and countries without square data pass.
pub fn check_locator_country<R>(reference: &R, callsign: &str, locator: &str) -> Option<LocatorMismatch>
where
    R: CountryReference + ?Sized,
{
    let main_prefix = reference.main_prefix(callsign)?;
    let squares = reference.squares(main_prefix)?;

    let square: String = locator.to_uppercase().chars().take(SQUARE_LEN).collect();
    if squares.contains(&square) {
        return None;
    }

    Some(LocatorMismatch {
        callsign: callsign.to_string(),
        locator: locator.to_string(),
        main_prefix: main_prefix.to_string(),
    })
}
