//! Card scheme detection using BIN prefix matching.
//!
//! The Bank Identification Number (BIN) is the first 6 digits of a card
//! number. This module uses pattern matching on the leading digits to detect
//! the card network, used as the offline fallback when neither the cache nor
//! the external lookup service can identify a BIN.
//!
//! Detection is a pure function of the BIN prefix; the total card-number
//! length is irrelevant to it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Card network/brand vocabulary for resolved BINs.
///
/// Display names are lower case ("diners club", not "DinersClub") because
/// that is the normalized form stored in the cache and returned by the
/// external lookup service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardScheme {
    /// Visa network.
    Visa,
    /// Mastercard network.
    Mastercard,
    /// American Express.
    Amex,
    /// Discover network.
    Discover,
    /// JCB (Japan Credit Bureau).
    Jcb,
    /// Diners Club International.
    #[serde(rename = "diners club")]
    DinersClub,
    /// Maestro debit network.
    Maestro,
    /// Scheme could not be determined.
    Unknown,
}

impl CardScheme {
    /// Returns the normalized lower-case name of the scheme.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Visa => "visa",
            Self::Mastercard => "mastercard",
            Self::Amex => "amex",
            Self::Discover => "discover",
            Self::Jcb => "jcb",
            Self::DinersClub => "diners club",
            Self::Maestro => "maestro",
            Self::Unknown => "unknown",
        }
    }

    /// Parses a scheme from a display name, case-insensitively.
    ///
    /// Unrecognized names map to `Unknown` rather than failing, since cache
    /// entries may have been written by collaborators outside this crate.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "visa" => Self::Visa,
            "mastercard" => Self::Mastercard,
            "amex" | "american express" => Self::Amex,
            "discover" => Self::Discover,
            "jcb" => Self::Jcb,
            "diners club" | "diners" | "dinersclub" => Self::DinersClub,
            "maestro" => Self::Maestro,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for CardScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Detects the card scheme from a sequence of digits.
///
/// The prefix rules are evaluated in a fixed order and the first match wins:
///
/// 1. `4` -> visa
/// 2. `51`-`55` -> mastercard
/// 3. `34`, `37` -> amex
/// 4. `6011`, `65` -> discover
/// 5. `2131`, `1800`, `35` -> jcb
/// 6. `36`, `38`, `300`-`305` -> diners club
/// 7. `50`, `56`-`58`, `63`, `67` -> maestro
///
/// # Example
///
/// ```
/// use bin_resolver::scheme::{detect_scheme, CardScheme};
///
/// let visa = [4, 1, 1, 1, 1, 1];
/// assert_eq!(detect_scheme(&visa), Some(CardScheme::Visa));
///
/// let amex = [3, 7, 0, 0, 0, 0];
/// assert_eq!(detect_scheme(&amex), Some(CardScheme::Amex));
///
/// assert_eq!(detect_scheme(&[9, 9, 9, 9, 9, 9]), None);
/// ```
#[inline]
pub fn detect_scheme(digits: &[u8]) -> Option<CardScheme> {
    if digits.is_empty() {
        return None;
    }

    // Arm order mirrors the evaluation order above; with overlapping
    // prefixes (65 vs 67, 35 vs 36) the earlier rule wins.
    match digits {
        // Visa: starts with 4
        [4, ..] => Some(CardScheme::Visa),

        // Mastercard: 51-55
        [5, 1..=5, ..] => Some(CardScheme::Mastercard),

        // American Express: 34 or 37
        [3, 4, ..] | [3, 7, ..] => Some(CardScheme::Amex),

        // Discover: 6011 or 65
        [6, 0, 1, 1, ..] | [6, 5, ..] => Some(CardScheme::Discover),

        // JCB: 2131, 1800, or 35
        [2, 1, 3, 1, ..] | [1, 8, 0, 0, ..] | [3, 5, ..] => Some(CardScheme::Jcb),

        // Diners Club: 36, 38, or 300-305
        [3, 6, ..] | [3, 8, ..] | [3, 0, 0..=5, ..] => Some(CardScheme::DinersClub),

        // Maestro: 50, 56-58, 63, 67
        [5, 0, ..] | [5, 6..=8, ..] | [6, 3, ..] | [6, 7, ..] => Some(CardScheme::Maestro),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visa_detection() {
        assert_eq!(detect_scheme(&[4, 1, 1, 1, 1, 1]), Some(CardScheme::Visa));
        // Full 16-digit number detects the same as the bare BIN
        assert_eq!(
            detect_scheme(&[4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1]),
            Some(CardScheme::Visa)
        );
    }

    #[test]
    fn test_mastercard_detection() {
        for second in 1..=5 {
            assert_eq!(
                detect_scheme(&[5, second, 0, 0, 0, 0]),
                Some(CardScheme::Mastercard)
            );
        }
    }

    #[test]
    fn test_amex_detection() {
        assert_eq!(detect_scheme(&[3, 4, 0, 0, 0, 0]), Some(CardScheme::Amex));
        assert_eq!(detect_scheme(&[3, 7, 0, 0, 0, 0]), Some(CardScheme::Amex));
    }

    #[test]
    fn test_discover_detection() {
        assert_eq!(
            detect_scheme(&[6, 0, 1, 1, 0, 0]),
            Some(CardScheme::Discover)
        );
        assert_eq!(
            detect_scheme(&[6, 5, 0, 0, 0, 0]),
            Some(CardScheme::Discover)
        );
        // 6012 is not Discover
        assert_eq!(detect_scheme(&[6, 0, 1, 2, 0, 0]), None);
    }

    #[test]
    fn test_jcb_detection() {
        assert_eq!(detect_scheme(&[3, 5, 0, 0, 0, 0]), Some(CardScheme::Jcb));
        assert_eq!(detect_scheme(&[2, 1, 3, 1, 0, 0]), Some(CardScheme::Jcb));
        assert_eq!(detect_scheme(&[1, 8, 0, 0, 0, 0]), Some(CardScheme::Jcb));
    }

    #[test]
    fn test_diners_club_detection() {
        assert_eq!(
            detect_scheme(&[3, 6, 0, 0, 0, 0]),
            Some(CardScheme::DinersClub)
        );
        assert_eq!(
            detect_scheme(&[3, 8, 0, 0, 0, 0]),
            Some(CardScheme::DinersClub)
        );
        for third in 0..=5 {
            assert_eq!(
                detect_scheme(&[3, 0, third, 0, 0, 0]),
                Some(CardScheme::DinersClub)
            );
        }
        // 306-309 are not Diners Club here
        assert_eq!(detect_scheme(&[3, 0, 6, 0, 0, 0]), None);
    }

    #[test]
    fn test_maestro_detection() {
        assert_eq!(
            detect_scheme(&[5, 0, 0, 0, 0, 0]),
            Some(CardScheme::Maestro)
        );
        for second in 6..=8 {
            assert_eq!(
                detect_scheme(&[5, second, 0, 0, 0, 0]),
                Some(CardScheme::Maestro)
            );
        }
        assert_eq!(
            detect_scheme(&[6, 3, 0, 4, 0, 0]),
            Some(CardScheme::Maestro)
        );
        assert_eq!(
            detect_scheme(&[6, 7, 5, 9, 0, 0]),
            Some(CardScheme::Maestro)
        );
    }

    #[test]
    fn test_overlap_order() {
        // 35 is JCB even though 36/38 are Diners Club
        assert_eq!(detect_scheme(&[3, 5, 2, 8, 0, 0]), Some(CardScheme::Jcb));
        // 65 is Discover even though 63/67 are Maestro
        assert_eq!(
            detect_scheme(&[6, 5, 9, 0, 0, 0]),
            Some(CardScheme::Discover)
        );
        // 51-55 is Mastercard even though 50/56-58 are Maestro
        assert_eq!(
            detect_scheme(&[5, 5, 0, 0, 0, 0]),
            Some(CardScheme::Mastercard)
        );
    }

    #[test]
    fn test_unknown_prefixes() {
        assert_eq!(detect_scheme(&[0, 0, 0, 0, 0, 0]), None);
        assert_eq!(detect_scheme(&[9, 9, 9, 9, 9, 9]), None);
        assert_eq!(detect_scheme(&[7, 1, 2, 3, 4, 5]), None);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(detect_scheme(&[]), None);
    }

    #[test]
    fn test_name_round_trip() {
        for scheme in [
            CardScheme::Visa,
            CardScheme::Mastercard,
            CardScheme::Amex,
            CardScheme::Discover,
            CardScheme::Jcb,
            CardScheme::DinersClub,
            CardScheme::Maestro,
            CardScheme::Unknown,
        ] {
            assert_eq!(CardScheme::from_name(scheme.name()), scheme);
        }
    }

    #[test]
    fn test_from_name_unrecognized() {
        assert_eq!(CardScheme::from_name("mir"), CardScheme::Unknown);
        assert_eq!(CardScheme::from_name(""), CardScheme::Unknown);
    }

    #[test]
    fn test_display_is_lowercase() {
        assert_eq!(CardScheme::DinersClub.to_string(), "diners club");
        assert_eq!(CardScheme::Visa.to_string(), "visa");
    }
}
