//! Fixed lookup tables of the fiscal code algorithm
//!
//! All tables are indexed by the position of a character in the 36-symbol
//! alphabet `0-9A-Z` (see [`alphabet_index`]).

/// 0-indexed offsets of the seven numeric fields eligible for omocodia
/// substitution (1-indexed positions 7, 8, 10, 11, 13, 14, 15).
pub const NUMERIC_POSITIONS: [usize; 7] = [6, 7, 9, 10, 12, 13, 14];

/// Values of `0-9A-Z` at odd (1-indexed) positions.
pub const ODD_VALUES: [u8; 36] = [
    // 0   1   2   3   4   5   6   7   8   9
    1, 0, 5, 7, 9, 13, 15, 17, 19, 21,
    // A   B   C   D   E   F   G   H   I   J
    1, 0, 5, 7, 9, 13, 15, 17, 19, 21,
    // K   L   M   N   O   P   Q   R   S   T
    2, 4, 18, 20, 11, 3, 6, 8, 12, 14,
    // U   V   W   X   Y   Z
    16, 10, 22, 25, 24, 23,
];

/// Values of `0-9A-Z` at even (1-indexed) positions.
pub const EVEN_VALUES: [u8; 36] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9,
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9,
    10, 11, 12, 13, 14, 15, 16, 17, 18, 19,
    20, 21, 22, 23, 24, 25,
];

/// Checksum remainder (0-25) to check letter.
pub const REMAINDER_LETTERS: [u8; 26] = *b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Omocodia substitution letters, indexed by the digit they replace.
pub const OMOCODIA_LETTERS: [u8; 10] = *b"LMNPQRSTUV";

/// Month letters, indexed by month number minus one.
pub const MONTH_LETTERS: [u8; 12] = *b"ABCDEHLMPRST";

/// Longest possible day of each month (February allows 29).
pub const MONTH_LENGTHS: [u8; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Index of an uppercase ASCII alphanumeric in the `0-9A-Z` alphabet.
pub fn alphabet_index(c: u8) -> Option<usize> {
    match c {
        b'0'..=b'9' => Some(usize::from(c - b'0')),
        b'A'..=b'Z' => Some(usize::from(c - b'A') + 10),
        _ => None,
    }
}

/// Checksum value of `c` at a 1-indexed position of the given parity.
pub fn position_value(c: u8, odd: bool) -> Option<u8> {
    let idx = alphabet_index(c)?;
    Some(if odd { ODD_VALUES[idx] } else { EVEN_VALUES[idx] })
}

/// Check letter for a remainder modulo 26.
pub fn remainder_letter(remainder: u8) -> Option<char> {
    REMAINDER_LETTERS
        .get(usize::from(remainder))
        .map(|&b| char::from(b))
}

/// Digit that an omocodia letter stands for.
pub fn omocodia_digit(letter: u8) -> Option<u8> {
    OMOCODIA_LETTERS
        .iter()
        .position(|&l| l == letter)
        .and_then(|d| u8::try_from(d).ok())
        .map(|d| b'0' + d)
}

/// Omocodia letter that replaces `digit`.
pub fn omocodia_letter(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(OMOCODIA_LETTERS[usize::from(digit - b'0')]),
        _ => None,
    }
}

/// Month number (1-12) for a month letter.
pub fn month_number(letter: u8) -> Option<u8> {
    MONTH_LETTERS
        .iter()
        .position(|&l| l == letter)
        .and_then(|m| u8::try_from(m + 1).ok())
}

/// Maximum day for a month number (1-12).
pub fn month_length(month: u8) -> Option<u8> {
    let idx = usize::from(month).checked_sub(1)?;
    MONTH_LENGTHS.get(idx).copied()
}
