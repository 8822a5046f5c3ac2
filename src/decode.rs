//! Birth date, sex and place code extraction

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, WrongCodeReason};
use crate::tables::{month_length, month_number};

/// Offset added to the day of birth for women.
pub const FEMALE_DAY_OFFSET: u8 = 40;

/// Sex encoded in the day field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Sex {
    /// Single-letter form (`M` or `F`).
    pub fn as_char(&self) -> char {
        match self {
            Sex::Male => 'M',
            Sex::Female => 'F',
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Fields read from a normalized code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFields {
    /// Last two digits of the birth year
    pub year: u8,
    /// Month, 1-12
    pub month: u8,
    /// Day of month, 1-31
    pub day: u8,
    pub sex: Sex,
    /// Place type letter followed by three digits
    pub place_code: String,
}

/// Month number for a month letter, rejecting anything outside the table.
pub fn month_from_letter(letter: char) -> Result<u8, ValidationError> {
    u8::try_from(letter)
        .ok()
        .and_then(month_number)
        .ok_or_else(|| WrongCodeReason::InvalidMonth { letter }.into())
}

/// Split the raw day field into day of month and sex.
pub fn day_and_sex(value: u8) -> Result<(u8, Sex), ValidationError> {
    match value {
        1..=31 => Ok((value, Sex::Male)),
        41..=71 => Ok((value - FEMALE_DAY_OFFSET, Sex::Female)),
        _ => Err(WrongCodeReason::InvalidDay { value }.into()),
    }
}

fn two_digits(code: &[u8; 16], idx: usize) -> Result<u8, ValidationError> {
    let (tens, units) = (code[idx], code[idx + 1]);
    if !tens.is_ascii_digit() || !units.is_ascii_digit() {
        let (pos, c) = if tens.is_ascii_digit() { (idx + 1, units) } else { (idx, tens) };
        return Err(ValidationError::BadOmocodiaChar {
            position: pos + 1,
            character: char::from(c),
        });
    }
    Ok((tens - b'0') * 10 + (units - b'0'))
}

/// Decode date, sex and place code from a normalized, uppercase code.
pub fn decode_fields(code: &[u8; 16]) -> Result<DecodedFields, ValidationError> {
    let year = two_digits(code, 6)?;
    let month = month_from_letter(char::from(code[8]))?;
    let (day, sex) = day_and_sex(two_digits(code, 9)?)?;

    let max_day = month_length(month).ok_or(WrongCodeReason::InvalidMonth {
        letter: char::from(code[8]),
    })?;
    if day > max_day {
        return Err(WrongCodeReason::DayOutOfRange { day, month }.into());
    }

    let place_code = String::from_utf8_lossy(&code[11..15]).into_owned();

    Ok(DecodedFields {
        year,
        month,
        day,
        sex,
        place_code,
    })
}
