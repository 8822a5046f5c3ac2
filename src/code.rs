//! Structurally validated fiscal code
//!
//! [`FiscalCode`] runs every check that does not need place names: presence,
//! length, character classes, omocodia, check letter and date fields. It is
//! the building block of [`crate::CodiceFiscale::parse`], and can also be used
//! on its own as a serde field that rejects invalid codes at deserialization
//! time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::charset::{is_alphanumeric, is_letter, is_month_letter};
use crate::checksum;
use crate::decode::{decode_fields, DecodedFields, Sex};
use crate::error::ValidationError;
use crate::omocodia;
use crate::places::PlaceKind;
use crate::tables::NUMERIC_POSITIONS;

/// Number of characters in a fiscal code
pub const CODE_LENGTH: usize = 16;

/// 0-indexed offset of the month letter
const MONTH_POSITION: usize = 8;

/// A fiscal code that passed structural validation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct FiscalCode {
    /// Uppercased input
    code: [u8; CODE_LENGTH],
    /// Omocodia letters replaced by digits
    normalized: [u8; CODE_LENGTH],
    year: u8,
    month: u8,
    day: u8,
    sex: Sex,
}

impl FiscalCode {
    /// Validate a code.
    ///
    /// # Errors
    ///
    /// Returns the first failing stage, in order: [`ValidationError::NoCode`],
    /// [`ValidationError::WrongSize`], [`ValidationError::BadCharacters`],
    /// [`ValidationError::BadOmocodiaChar`], [`ValidationError::WrongCode`].
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let result = Self::validate(raw);
        if let Err(e) = &result {
            debug!(kind = %e.kind(), error = %e, "fiscal code rejected");
        }
        result
    }

    fn validate(raw: &str) -> Result<Self, ValidationError> {
        if raw.is_empty() {
            return Err(ValidationError::NoCode);
        }

        let upper: Vec<char> = raw.chars().map(|c| c.to_ascii_uppercase()).collect();
        if upper.len() != CODE_LENGTH {
            return Err(ValidationError::WrongSize { length: upper.len() });
        }

        let mut code = [0u8; CODE_LENGTH];
        for (idx, &c) in upper.iter().enumerate() {
            check_character(idx, c)?;
            code[idx] = c as u8;
        }

        let normalized = omocodia::normalize(&code)?;
        checksum::verify(&code)?;
        let DecodedFields {
            year,
            month,
            day,
            sex,
            ..
        } = decode_fields(&normalized)?;

        Ok(Self {
            code,
            normalized,
            year,
            month,
            day,
            sex,
        })
    }

    /// The code as given, uppercased
    pub fn as_str(&self) -> &str {
        ascii(&self.code)
    }

    /// The code with omocodia letters replaced by digits
    pub fn normalized(&self) -> &str {
        ascii(&self.normalized)
    }

    /// Last two digits of the birth year
    pub fn year(&self) -> u8 {
        self.year
    }

    /// Birth month, 1-12
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Day of birth, 1-31
    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    /// Letter plus three digits identifying the birth place
    pub fn place_code(&self) -> &str {
        ascii(&self.normalized[11..15])
    }

    pub fn place_kind(&self) -> PlaceKind {
        PlaceKind::of(self.place_code())
    }

    /// Number of digits replaced by omocodia letters (0 for a first-issue code)
    pub fn omocodia_level(&self) -> usize {
        omocodia::substitution_count(&self.code)
    }

    /// The check letter
    pub fn check_letter(&self) -> char {
        char::from(self.code[CODE_LENGTH - 1])
    }
}

fn check_character(idx: usize, c: char) -> Result<(), ValidationError> {
    let ok = if !is_alphanumeric(c) {
        false
    } else if idx == MONTH_POSITION {
        is_month_letter(c)
    } else if NUMERIC_POSITIONS.contains(&idx) {
        true
    } else {
        is_letter(c)
    };
    if ok {
        Ok(())
    } else {
        Err(ValidationError::BadCharacters {
            position: idx + 1,
            character: c,
        })
    }
}

fn ascii(bytes: &[u8]) -> &str {
    // Only ASCII alphanumerics are ever stored
    std::str::from_utf8(bytes).unwrap_or_default()
}

impl fmt::Display for FiscalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FiscalCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for FiscalCode {
    type Error = ValidationError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<FiscalCode> for String {
    fn from(code: FiscalCode) -> Self {
        code.as_str().to_string()
    }
}

impl AsRef<str> for FiscalCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<'de> Deserialize<'de> for FiscalCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, WrongCodeReason};

    #[test]
    fn test_valid_code() {
        let code = FiscalCode::new("RSSMRA95E05F205Z").unwrap();
        assert_eq!(code.as_str(), "RSSMRA95E05F205Z");
        assert_eq!((code.year(), code.month(), code.day()), (95, 5, 5));
        assert_eq!(code.sex(), Sex::Male);
        assert_eq!(code.place_code(), "F205");
        assert_eq!(code.check_letter(), 'Z');
        assert_eq!(code.omocodia_level(), 0);
    }

    #[test]
    fn test_lowercase_is_folded() {
        let code = FiscalCode::new("rssmra95e05f205z").unwrap();
        assert_eq!(code.to_string(), "RSSMRA95E05F205Z");
    }

    #[test]
    fn test_omocodia_code_keeps_original_form() {
        let code: FiscalCode = "RSSMRA95E05F20RU".parse().unwrap();
        assert_eq!(code.as_str(), "RSSMRA95E05F20RU");
        assert_eq!(code.normalized(), "RSSMRA95E05F205U");
        assert_eq!(code.place_code(), "F205");
        assert_eq!(code.omocodia_level(), 1);
    }

    #[test]
    fn test_stage_order() {
        assert_eq!(FiscalCode::new("").unwrap_err(), ValidationError::NoCode);
        assert_eq!(
            FiscalCode::new("ABC").unwrap_err(),
            ValidationError::WrongSize { length: 3 }
        );
        assert_eq!(
            FiscalCode::new("%SSMRA95E05F20RU").unwrap_err(),
            ValidationError::BadCharacters {
                position: 1,
                character: '%'
            }
        );
        assert_eq!(
            FiscalCode::new("RSSMRA95E05F20OU").unwrap_err().kind(),
            ErrorKind::BadOmocodiaChar
        );
        assert_eq!(
            FiscalCode::new("LOIMLC71A77F979W").unwrap_err(),
            ValidationError::WrongCode(WrongCodeReason::InvalidDay { value: 77 })
        );
    }

    #[test]
    fn test_character_classes_by_position() {
        // digit in the surname block
        assert!(matches!(
            FiscalCode::new("R5SMRA95E05F205Z"),
            Err(ValidationError::BadCharacters { position: 2, .. })
        ));
        // 'F' is not a month letter
        assert!(matches!(
            FiscalCode::new("RSSMRA95F05F205Z"),
            Err(ValidationError::BadCharacters { position: 9, .. })
        ));
        // digit where the place type letter belongs
        assert!(matches!(
            FiscalCode::new("RSSMRA95E0552050"),
            Err(ValidationError::BadCharacters { position: 12, .. })
        ));
        // digit as check letter
        assert!(matches!(
            FiscalCode::new("RSSMRA95E05F2051"),
            Err(ValidationError::BadCharacters { position: 16, .. })
        ));
    }

    #[test]
    fn test_non_ascii_input_is_bad_characters() {
        assert!(matches!(
            FiscalCode::new("RSSMRÀ95E05F205Z"),
            Err(ValidationError::BadCharacters { position: 6, character: 'À' })
        ));
    }

    #[test]
    fn test_serde_rejects_invalid() {
        #[derive(Deserialize)]
        struct Person {
            code: FiscalCode,
        }
        let ok: Person = serde_json::from_str(r#"{"code": "RSSMRA95E45F205D"}"#).unwrap();
        assert_eq!(ok.code.sex(), Sex::Female);
        assert!(serde_json::from_str::<Person>(r#"{"code": "RSSMRA95E45F205A"}"#).is_err());

        let json = serde_json::to_string(&ok.code).unwrap();
        assert_eq!(json, r#""RSSMRA95E45F205D""#);
    }
}
