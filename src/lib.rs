//! Italian Fiscal Code Decoder
//!
//! Validates and decodes the 16-character Italian personal tax identifier
//! (codice fiscale): surname/name block, birth year, month and day, sex,
//! birth place and check letter, including omocodia substitutions.
//!
//! ## Features
//!
//! - **Fail-Fast Validation**: one [`ErrorKind`] per rejected code, in pipeline order
//! - **Omocodia Support**: substituted letters in numeric fields decode like digits
//! - **Pluggable Place Names**: any [`PlaceResolver`] maps place codes to names
//! - **Embedded Registries**: municipality and foreign-country lists compiled in
//!
//! ## Layout
//!
//! ```text
//! R S S M R A 9 5 E 0 5 F 2 0 5 Z
//! └────┬────┘ └┬┘ │ └┬┘ └──┬──┘ │
//!   surname    │  │  │     │    check letter
//!   + name   year │ day+sex place code
//!               month
//! ```
//!
//! ## Example
//!
//! ```
//! use codice_fiscale::{CodiceFiscale, Sex};
//!
//! let cf: CodiceFiscale = CodiceFiscale::embedded();
//! let decoded = cf.parse("RSSMRA95E45F205D").unwrap();
//! assert_eq!(decoded.sex(), Sex::Female);
//! assert_eq!(decoded.day(), 5);
//! assert_eq!(decoded.place_name(), Some("Milano"));
//! ```

pub mod century;
pub mod charset;
pub mod checksum;
pub mod code;
pub mod config;
pub mod decode;
pub mod error;
pub mod omocodia;
pub mod parser;
pub mod places;
pub mod rule;
pub mod tables;

pub use century::CenturyPolicy;
pub use code::FiscalCode;
pub use config::CodiceFiscaleConfig;
pub use decode::Sex;
pub use error::{Error, ErrorKind, Result, ValidationError, WrongCodeReason};
pub use parser::{CodiceFiscale, DecodedFiscalCode};
pub use places::{
    CombinedResolver, CountryResolver, MunicipalityResolver, NoResolver, PlaceKind,
    PlaceResolver, PlaceTable,
};
pub use rule::{FieldError, FiscalCodeRule, MessageCatalog};
