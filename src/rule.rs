//! Form-validation rule
//!
//! Adapts the parser to form validation: a failure is reported against a
//! named attribute with a message taken from a [`MessageCatalog`]. Templates
//! use `:attribute` as the placeholder for the attribute name.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ErrorKind;
use crate::parser::{CodiceFiscale, DecodedFiscalCode};
use crate::places::PlaceResolver;

/// Placeholder replaced by the attribute name
pub const ATTRIBUTE_PLACEHOLDER: &str = ":attribute";

/// Message templates, one per error kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageCatalog {
    #[serde(flatten)]
    templates: HashMap<ErrorKind, String>,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::italian()
    }
}

impl MessageCatalog {
    /// Catalog with no templates; every message falls back to the kind name
    pub fn empty() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    pub fn italian() -> Self {
        Self::empty()
            .with(ErrorKind::NoCode, "Il campo :attribute è obbligatorio.")
            .with(ErrorKind::WrongSize, "Il campo :attribute deve contenere 16 caratteri.")
            .with(ErrorKind::BadCharacters, "Il campo :attribute contiene caratteri non validi.")
            .with(ErrorKind::BadOmocodiaChar, "Il campo :attribute contiene caratteri di omocodia non validi.")
            .with(ErrorKind::WrongCode, "Il campo :attribute non è un codice fiscale valido.")
    }

    pub fn english() -> Self {
        Self::empty()
            .with(ErrorKind::NoCode, "The :attribute field is required.")
            .with(ErrorKind::WrongSize, "The :attribute must be 16 characters long.")
            .with(ErrorKind::BadCharacters, "The :attribute contains invalid characters.")
            .with(ErrorKind::BadOmocodiaChar, "The :attribute contains invalid omocodia characters.")
            .with(ErrorKind::WrongCode, "The :attribute is not a valid fiscal code.")
    }

    /// Set the template for one kind
    pub fn with(mut self, kind: ErrorKind, template: impl Into<String>) -> Self {
        self.templates.insert(kind, template.into());
        self
    }

    /// Overlay templates from `other`
    pub fn merge(&mut self, other: MessageCatalog) {
        self.templates.extend(other.templates);
    }

    pub fn template(&self, kind: ErrorKind) -> Option<&str> {
        self.templates.get(&kind).map(String::as_str)
    }

    /// Render the message for `kind` against an attribute name
    pub fn render(&self, kind: ErrorKind, attribute: &str) -> String {
        match self.template(kind) {
            Some(template) => template.replace(ATTRIBUTE_PLACEHOLDER, attribute),
            None => format!("{attribute}: {kind}"),
        }
    }
}

/// A validation failure bound to a form attribute
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct FieldError {
    pub attribute: String,
    pub kind: ErrorKind,
    pub message: String,
}

/// Validates form values as fiscal codes
#[derive(Debug, Clone)]
pub struct FiscalCodeRule<R> {
    parser: CodiceFiscale<R>,
    messages: MessageCatalog,
}

impl<R: PlaceResolver> FiscalCodeRule<R> {
    pub fn new(parser: CodiceFiscale<R>, messages: MessageCatalog) -> Self {
        Self { parser, messages }
    }

    /// Rule name used when registering with a validator
    pub fn name(&self) -> &'static str {
        "codice_fiscale"
    }

    pub fn parser(&self) -> &CodiceFiscale<R> {
        &self.parser
    }

    pub fn messages(&self) -> &MessageCatalog {
        &self.messages
    }

    /// Validate `value` for `attribute`
    pub fn validate(
        &self,
        attribute: &str,
        value: Option<&str>,
    ) -> Result<DecodedFiscalCode, FieldError> {
        self.parser.parse_optional(value).map_err(|e| {
            let kind = e.kind();
            FieldError {
                attribute: attribute.to_string(),
                kind,
                message: self.messages.render(kind, attribute),
            }
        })
    }

    /// Validate and keep only pass/fail
    pub fn passes(&self, attribute: &str, value: Option<&str>) -> bool {
        self.validate(attribute, value).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::places::NoResolver;

    fn rule() -> FiscalCodeRule<NoResolver> {
        FiscalCodeRule::new(CodiceFiscale::new(NoResolver), MessageCatalog::english())
    }

    #[test]
    fn test_message_substitution() {
        let err = rule().validate("tax_id", Some("ABC")).unwrap_err();
        assert_eq!(err.attribute, "tax_id");
        assert_eq!(err.kind, ErrorKind::WrongSize);
        assert_eq!(err.message, "The tax_id must be 16 characters long.");
        assert_eq!(err.to_string(), err.message);
    }

    #[test]
    fn test_missing_value() {
        let err = rule().validate("cf", None).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NoCode);
        assert_eq!(err.message, "The cf field is required.");
    }

    #[test]
    fn test_every_kind_has_default_template() {
        for catalog in [MessageCatalog::italian(), MessageCatalog::english()] {
            for kind in ErrorKind::ALL {
                assert!(catalog.template(kind).is_some(), "missing {kind}");
            }
        }
    }

    #[test]
    fn test_fallback_and_merge() {
        let mut catalog = MessageCatalog::empty();
        assert_eq!(catalog.render(ErrorKind::WrongCode, "cf"), "cf: wrong_code");

        catalog.merge(MessageCatalog::empty().with(ErrorKind::WrongCode, ":attribute is wrong"));
        assert_eq!(catalog.render(ErrorKind::WrongCode, "cf"), "cf is wrong");
    }

    #[test]
    fn test_passes() {
        let rule = rule();
        assert!(rule.passes("cf", Some("RSSMRA95E05F205Z")));
        assert!(!rule.passes("cf", Some("RSSMRA95E05F20OU")));
        assert_eq!(rule.name(), "codice_fiscale");
    }
}
