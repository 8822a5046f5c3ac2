//! Check letter computation
//!
//! The 16th character is derived from the first fifteen: each character is
//! valued through the odd or even table depending on its 1-indexed position,
//! the values are summed, and the sum modulo 26 selects the letter.
//!
//! The check letter is computed over the characters as written, omocodia
//! letters included. Registry-issued substitutions always carry a check letter
//! recomputed for the substituted form.

use crate::error::{ValidationError, WrongCodeReason};
use crate::tables::{position_value, remainder_letter};

/// Compute the check letter for the first 15 characters of `code`.
///
/// Returns `None` if fewer than 15 characters are given or any of them is not
/// an uppercase ASCII alphanumeric.
pub fn compute(code: &[u8]) -> Option<char> {
    let body = code.get(..15)?;
    let mut sum: u32 = 0;
    for (idx, &c) in body.iter().enumerate() {
        // idx is 0-based, so even idx means an odd 1-indexed position
        sum += u32::from(position_value(c, idx % 2 == 0)?);
    }
    remainder_letter(u8::try_from(sum % 26).ok()?)
}

/// Check that the 16th character matches the computed check letter.
pub fn verify(code: &[u8; 16]) -> Result<(), ValidationError> {
    let found = char::from(code[15]);
    let expected = compute(code).ok_or_else(|| {
        let position = code
            .iter()
            .position(|c| !(c.is_ascii_uppercase() || c.is_ascii_digit()))
            .unwrap_or(0);
        ValidationError::BadCharacters {
            position: position + 1,
            character: char::from(code[position]),
        }
    })?;
    if expected == found {
        Ok(())
    } else {
        Err(WrongCodeReason::ChecksumMismatch { expected, found }.into())
    }
}
