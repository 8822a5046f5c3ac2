//! Per-character predicates
//!
//! All predicates expect characters already folded to uppercase.

use crate::tables::{month_number, omocodia_digit};

/// `A-Z`
pub fn is_letter(c: char) -> bool {
    c.is_ascii_uppercase()
}

/// `0-9`
pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// `0-9A-Z`
pub fn is_alphanumeric(c: char) -> bool {
    is_letter(c) || is_digit(c)
}

/// One of the ten letters that may stand in for a digit.
pub fn is_omocodia_letter(c: char) -> bool {
    u8::try_from(c).ok().and_then(omocodia_digit).is_some()
}

/// One of the twelve month letters.
pub fn is_month_letter(c: char) -> bool {
    u8::try_from(c).ok().and_then(month_number).is_some()
}
