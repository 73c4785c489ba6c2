//! Luhn algorithm implementation for card number validation.
//!
//! The Luhn algorithm (also known as the "modulus 10" algorithm) is a checksum
//! formula used to validate credit card numbers and other identification numbers.
//!
//! Note that Luhn validity is a property of a *complete* card number, not of a
//! 6-digit BIN prefix. The resolver records it as an advisory flag only.

/// Lookup table for doubled digits: double the value, subtract 9 if >= 10.
/// This avoids the branch and division in the inner loop.
/// Index is the digit (0-9), value is the transformed result.
const DOUBLE_TABLE: [u8; 10] = [0, 2, 4, 6, 8, 1, 3, 5, 7, 9];

/// Minimum digits in a complete card number.
pub const MIN_CARD_DIGITS: usize = 13;

/// Maximum digits in a complete card number.
pub const MAX_CARD_DIGITS: usize = 19;

/// Validates a digit sequence using the Luhn algorithm.
///
/// # Arguments
///
/// * `digits` - A slice of digits (0-9).
///
/// # Returns
///
/// `true` if the checksum is valid, `false` otherwise.
///
/// # Algorithm
///
/// 1. Starting from the rightmost digit (check digit), moving left
/// 2. Double every second digit
/// 3. If doubling results in a number > 9, subtract 9
/// 4. Sum all digits
/// 5. If the sum is divisible by 10, the number is valid
///
/// # Example
///
/// ```
/// use bin_resolver::luhn::validate;
///
/// // Valid Visa test card
/// let digits = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
/// assert!(validate(&digits));
///
/// // Invalid card (changed last digit)
/// let invalid = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2];
/// assert!(!validate(&invalid));
/// ```
#[inline]
pub fn validate(digits: &[u8]) -> bool {
    if digits.is_empty() {
        return false;
    }

    let sum = compute_checksum(digits);
    sum % 10 == 0
}

/// Computes the Luhn checksum for a sequence of digits.
///
/// # Arguments
///
/// * `digits` - A slice of digits (0-9).
///
/// # Returns
///
/// The Luhn sum (not modulo 10).
#[inline]
pub fn compute_checksum(digits: &[u8]) -> u32 {
    let len = digits.len();
    let mut sum: u32 = 0;

    // Process from right to left
    // The rightmost digit is position 0 (not doubled)
    // Position 1 is doubled, position 2 is not, etc.
    let mut i = 0;
    while i < len {
        let idx = len - 1 - i;
        let digit = digits[idx];

        if i % 2 == 1 {
            // Double this digit (positions 1, 3, 5, ...)
            sum += DOUBLE_TABLE[digit as usize] as u32;
        } else {
            // Don't double (positions 0, 2, 4, ...)
            sum += digit as u32;
        }
        i += 1;
    }

    sum
}

/// Validates a complete card number.
///
/// Card numbers shorter than 13 or longer than 19 digits are immediately
/// invalid without running the checksum. Everything else is standard Luhn.
///
/// # Example
///
/// ```
/// use bin_resolver::luhn::validate_card_number;
///
/// let digits = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
/// assert!(validate_card_number(&digits));
///
/// // Too short to be a card number, even though 0 passes mod-10
/// assert!(!validate_card_number(&[0]));
/// ```
#[inline]
pub fn validate_card_number(digits: &[u8]) -> bool {
    if digits.len() < MIN_CARD_DIGITS || digits.len() > MAX_CARD_DIGITS {
        return false;
    }

    validate(digits)
}
