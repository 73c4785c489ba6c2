//! Input normalization for card numbers and BINs.
//!
//! Callers hand the resolver raw user input: card numbers with spaces,
//! dashes, or other separators, or a bare 6-digit BIN. Everything here works
//! on the digits alone.
//!
//! # Example
//!
//! ```
//! use bin_resolver::input::{extract_digits, bin6};
//!
//! let digits = extract_digits("4111 1111 1111 1111");
//! assert_eq!(digits.len(), 16);
//! assert_eq!(bin6(&digits).as_deref(), Some("411111"));
//! ```

/// Number of digits in a BIN.
pub const BIN_LENGTH: usize = 6;

/// Extracts the digits from an input string, dropping everything else.
///
/// Returns digit *values* (0-9), not ASCII bytes.
///
/// # Example
///
/// ```
/// use bin_resolver::input::extract_digits;
///
/// assert_eq!(extract_digits("41-11 x1"), vec![4, 1, 1, 1, 1]);
/// assert_eq!(extract_digits("no digits"), Vec::<u8>::new());
/// ```
pub fn extract_digits(input: &str) -> Vec<u8> {
    input
        .chars()
        .filter(|c| c.is_ascii_digit())
        .map(|c| (c as u8) - b'0')
        .collect()
}

/// Returns the BIN (leftmost 6 digits) as a string, or `None` if fewer than
/// 6 digits are available.
///
/// # Example
///
/// ```
/// use bin_resolver::input::bin6;
///
/// assert_eq!(bin6(&[4, 1, 1, 1, 1, 1, 9, 9]).as_deref(), Some("411111"));
/// assert_eq!(bin6(&[4, 1, 1]), None);
/// ```
pub fn bin6(digits: &[u8]) -> Option<String> {
    if digits.len() < BIN_LENGTH {
        return None;
    }

    Some(
        digits[..BIN_LENGTH]
            .iter()
            .map(|&d| (b'0' + d) as char)
            .collect(),
    )
}
