//! Omocodia normalization
//!
//! When two people would share the same code, the registry replaces digits in
//! the numeric fields with letters, right to left. Normalization undoes that
//! substitution so the date and place fields can be read as digits again.

use tracing::trace;

use crate::charset::is_digit;
use crate::error::ValidationError;
use crate::tables::{omocodia_digit, NUMERIC_POSITIONS};

/// Rewrite omocodia letters in the numeric fields back to digits.
///
/// Input must be uppercase. Characters outside the numeric fields are left
/// untouched. Any numeric-field character that is neither a digit nor an
/// omocodia letter is rejected.
pub fn normalize(code: &[u8; 16]) -> Result<[u8; 16], ValidationError> {
    let mut out = *code;
    for &idx in &NUMERIC_POSITIONS {
        let c = out[idx];
        if is_digit(char::from(c)) {
            continue;
        }
        match omocodia_digit(c) {
            Some(digit) => {
                trace!(position = idx + 1, from = %char::from(c), to = %char::from(digit), "omocodia substitution");
                out[idx] = digit;
            }
            None => {
                return Err(ValidationError::BadOmocodiaChar {
                    position: idx + 1,
                    character: char::from(c),
                })
            }
        }
    }
    Ok(out)
}

/// Number of numeric-field positions holding a substituted letter.
pub fn substitution_count(code: &[u8; 16]) -> usize {
    NUMERIC_POSITIONS
        .iter()
        .filter(|&&idx| omocodia_digit(code[idx]).is_some())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes(s: &str) -> [u8; 16] {
        s.as_bytes().try_into().unwrap()
    }

    #[test]
    fn test_plain_code_passes_through() {
        let code = bytes("RSSMRA95E05F205Z");
        assert_eq!(normalize(&code).unwrap(), code);
        assert_eq!(substitution_count(&code), 0);
    }

    #[test]
    fn test_substituted_letters_become_digits() {
        let code = bytes("MKJRLA80A01L4L7I");
        assert_eq!(&normalize(&code).unwrap(), b"MKJRLA80A01L407I");
        assert_eq!(substitution_count(&code), 1);
    }

    #[test]
    fn test_letters_outside_numeric_fields_untouched() {
        // 'L' at position 12 is a place-type letter, not a substitution
        let code = bytes("VRDLGU80A01L407H");
        assert_eq!(normalize(&code).unwrap(), code);
    }

    #[test]
    fn test_idempotent() {
        let code = bytes("RSSMRA9RELRF2LRX");
        let once = normalize(&code).unwrap();
        let twice = normalize(&once).unwrap();
        assert_eq!(once, twice);
        assert_eq!(&once, b"RSSMRA95E05F205X");
    }

    #[test]
    fn test_rejects_non_omocodia_letter() {
        let err = normalize(&bytes("RSSMRA95E05F20OU")).unwrap_err();
        assert_eq!(
            err,
            ValidationError::BadOmocodiaChar {
                position: 15,
                character: 'O'
            }
        );
    }
}
