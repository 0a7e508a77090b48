//! # Innate Primitives
//!
//! Fixed defaults and limits shared by the primer containers.
//!
//! These are compiled in and immutable at runtime. The CLI may override the
//! matching and digest defaults through its configuration file, but the core
//! itself never reads configuration.

/// Default number of candidates returned by `TextUtility::closest_matches`.
pub const DEFAULT_MATCH_COUNT: usize = 3;

/// Default similarity cutoff for `TextUtility::closest_matches`.
///
/// A candidate is kept when `edit_distance <= len(self) * cutoff`.
pub const DEFAULT_CUTOFF: f64 = 0.6;

/// Literal inserted between the first and last four digits of a card number.
///
/// The mask length is fixed and does not track the number of hidden digits.
pub const CARD_MASK: &str = "XXXXXXXXX";

/// Pattern for a card-like digit run: 4 kept, at least 4 hidden, 4 kept.
pub const CARD_PATTERN: &str = r"([0-9]{4})[0-9]{4,}([0-9]{4})";

/// Heuristic e-mail pattern. This is not an RFC 5322 grammar.
pub const EMAIL_PATTERN: &str = r"^[\w.-]+@[\w.-]+\.[a-z]{2,6}$";

/// Pattern used by `TextUtility::extract_numbers`.
pub const DIGIT_RUN_PATTERN: &str = r"[0-9]+";

/// Smallest radix accepted by base conversion.
pub const MIN_BASE: u32 = 2;

/// Largest radix accepted by base conversion (digits `0-9a-z`).
pub const MAX_BASE: u32 = 36;

/// Largest number of decimal places `CorrectFloat` will round an addition to.
///
/// f64 carries at most 17 significant decimal digits, so anything finer is
/// noise.
pub const MAX_FLOAT_PLACES: usize = 17;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_bounds_cover_alphanumeric_digits() {
        assert_eq!(MIN_BASE, 2);
        assert_eq!(MAX_BASE, 10 + 26);
    }

    #[test]
    fn card_mask_is_fixed_width() {
        assert_eq!(CARD_MASK.len(), 9);
        assert!(CARD_MASK.chars().all(|c| c == 'X'));
    }
}
