//! Error types for fiscal code validation

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for configuration and place-table operations
pub type Result<T> = std::result::Result<T, Error>;

/// The closed set of validation failure kinds.
///
/// Exactly one kind is reported per failing parse, chosen by pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NoCode,
    WrongSize,
    BadCharacters,
    BadOmocodiaChar,
    WrongCode,
}

impl ErrorKind {
    /// All kinds, in pipeline order.
    pub const ALL: [ErrorKind; 5] = [
        ErrorKind::NoCode,
        ErrorKind::WrongSize,
        ErrorKind::BadCharacters,
        ErrorKind::BadOmocodiaChar,
        ErrorKind::WrongCode,
    ];

    /// Stable snake_case identifier, used as a message key suffix.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NoCode => "no_code",
            ErrorKind::WrongSize => "wrong_size",
            ErrorKind::BadCharacters => "bad_characters",
            ErrorKind::BadOmocodiaChar => "bad_omocodia_char",
            ErrorKind::WrongCode => "wrong_code",
        }
    }

    /// Numeric code of the kind (0 = no code ... 4 = wrong code).
    pub fn code(&self) -> u8 {
        match self {
            ErrorKind::NoCode => 0,
            ErrorKind::WrongSize => 1,
            ErrorKind::BadCharacters => 2,
            ErrorKind::BadOmocodiaChar => 3,
            ErrorKind::WrongCode => 4,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why an otherwise well-formed code was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WrongCodeReason {
    #[error("checksum mismatch: expected {expected}, found {found}")]
    ChecksumMismatch { expected: char, found: char },

    #[error("day field {value} is outside 1-31 and 41-71")]
    InvalidDay { value: u8 },

    #[error("day {day} does not exist in month {month}")]
    DayOutOfRange { day: u8, month: u8 },

    #[error("unknown month letter {letter}")]
    InvalidMonth { letter: char },
}

/// A fiscal code validation failure.
///
/// Positions are 1-indexed, matching the published layout of the code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no fiscal code supplied")]
    NoCode,

    #[error("fiscal code must be 16 characters, got {length}")]
    WrongSize { length: usize },

    #[error("invalid character {character:?} at position {position}")]
    BadCharacters { position: usize, character: char },

    #[error("invalid omocodia character {character:?} at position {position}")]
    BadOmocodiaChar { position: usize, character: char },

    #[error("invalid fiscal code: {0}")]
    WrongCode(#[from] WrongCodeReason),
}

impl ValidationError {
    /// The taxonomy kind of this failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::NoCode => ErrorKind::NoCode,
            ValidationError::WrongSize { .. } => ErrorKind::WrongSize,
            ValidationError::BadCharacters { .. } => ErrorKind::BadCharacters,
            ValidationError::BadOmocodiaChar { .. } => ErrorKind::BadOmocodiaChar,
            ValidationError::WrongCode(_) => ErrorKind::WrongCode,
        }
    }
}

/// Errors raised while loading configuration or place tables
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] config_crate::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Unsupported place table format: {0}")]
    UnsupportedFormat(String),

    #[error("Malformed place table at line {line}: {reason}")]
    MalformedPlaceTable { line: usize, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(ValidationError::NoCode.kind(), ErrorKind::NoCode);
        assert_eq!(
            ValidationError::WrongSize { length: 3 }.kind(),
            ErrorKind::WrongSize
        );
        let err: ValidationError = WrongCodeReason::InvalidDay { value: 77 }.into();
        assert_eq!(err.kind(), ErrorKind::WrongCode);
    }

    #[test]
    fn test_kind_codes_follow_pipeline_order() {
        let codes: Vec<u8> = ErrorKind::ALL.iter().map(|k| k.code()).collect();
        assert_eq!(codes, vec![0, 1, 2, 3, 4]);
        assert_eq!(ErrorKind::BadOmocodiaChar.to_string(), "bad_omocodia_char");
    }
}
