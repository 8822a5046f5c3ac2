//! Fiscal code parser
//!
//! Combines structural validation ([`FiscalCode`]) with place-name resolution
//! through the [`PlaceResolver`] supplied at construction.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::century::CenturyPolicy;
use crate::code::FiscalCode;
use crate::decode::Sex;
use crate::error::ValidationError;
use crate::places::{CombinedResolver, PlaceKind, PlaceResolver};

/// A successfully parsed fiscal code
///
/// Serializes with stable keys: `code`, `gender`, `birth_place`,
/// `birth_place_complete`, `day`, `month`, `year`. Deserializing re-validates
/// `code` and derives every decoded field from it; only the place name is
/// taken from the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedFiscalCode {
    code: FiscalCode,
    #[serde(rename = "gender")]
    sex: Sex,
    #[serde(rename = "birth_place")]
    place_code: String,
    #[serde(rename = "birth_place_complete")]
    place_name: Option<String>,
    day: u8,
    month: u8,
    year: u8,
}

impl DecodedFiscalCode {
    fn new(code: FiscalCode, place_name: Option<String>) -> Self {
        Self {
            sex: code.sex(),
            place_code: code.place_code().to_string(),
            day: code.day(),
            month: code.month(),
            year: code.year(),
            place_name,
            code,
        }
    }

    /// The validated input, uppercased
    pub fn code(&self) -> &FiscalCode {
        &self.code
    }

    /// The input with omocodia letters replaced by digits
    pub fn normalized(&self) -> &str {
        self.code.normalized()
    }

    /// Last two digits of the birth year; the century is not encoded
    pub fn year(&self) -> u8 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn place_code(&self) -> &str {
        &self.place_code
    }

    /// Place name, if the resolver knew the code
    pub fn place_name(&self) -> Option<&str> {
        self.place_name.as_deref()
    }

    pub fn place_kind(&self) -> PlaceKind {
        PlaceKind::of(&self.place_code)
    }

    pub fn omocodia_level(&self) -> usize {
        self.code.omocodia_level()
    }

    /// Full birth date under the given century policy
    pub fn birth_date(&self, policy: CenturyPolicy) -> Option<NaiveDate> {
        policy.birth_date(self.year, self.month, self.day)
    }
}

impl<'de> Deserialize<'de> for DecodedFiscalCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Stored {
            code: FiscalCode,
            #[serde(rename = "birth_place_complete", default)]
            place_name: Option<String>,
        }

        let stored = Stored::deserialize(deserializer)?;
        Ok(Self::new(stored.code, stored.place_name))
    }
}

/// Fiscal code parser bound to a place resolver
#[derive(Debug, Clone)]
pub struct CodiceFiscale<R = CombinedResolver> {
    resolver: R,
}

impl CodiceFiscale {
    /// Parser backed by the embedded municipality and country lists
    ///
    /// The embedded lists are a small sample. Codes from places outside them
    /// still validate but decode with `place_name() == None`. Load a full
    /// registry with [`PlaceTable::from_path`](crate::PlaceTable::from_path),
    /// or set `places.file` in the config and use
    /// [`CodiceFiscaleConfig::build_parser`](crate::CodiceFiscaleConfig::build_parser).
    pub fn embedded() -> Self {
        Self::new(CombinedResolver::embedded())
    }
}

impl Default for CodiceFiscale {
    fn default() -> Self {
        Self::embedded()
    }
}

impl<R: PlaceResolver> CodiceFiscale<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Validate and decode a fiscal code.
    ///
    /// The resolver is called exactly once per successful parse; an unknown
    /// place code yields `place_name() == None`, not an error.
    pub fn parse(&self, raw: &str) -> Result<DecodedFiscalCode, ValidationError> {
        let code = FiscalCode::new(raw)?;
        let place_name = self.resolver.resolve(code.place_code());
        if place_name.is_none() {
            debug!(place_code = code.place_code(), "place code not resolved");
        }
        Ok(DecodedFiscalCode::new(code, place_name))
    }

    /// Like [`parse`](Self::parse), treating `None` as a missing code
    pub fn parse_optional(&self, raw: Option<&str>) -> Result<DecodedFiscalCode, ValidationError> {
        match raw {
            Some(raw) => self.parse(raw),
            None => Err(ValidationError::NoCode),
        }
    }

    /// Whether `raw` is a valid fiscal code; skips place resolution
    pub fn is_valid(&self, raw: &str) -> bool {
        FiscalCode::new(raw).is_ok()
    }
}
