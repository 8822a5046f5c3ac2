//! Configuration for the fiscal code parser
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (codicefiscale.toml)
//! - Environment variables (CODICEFISCALE__*)
//!
//! ## Example config file (codicefiscale.toml):
//! ```toml
//! [places]
//! resolver = "combined"
//! file = "./extra-places.csv"
//!
//! [century]
//! pivot = 70
//!
//! [messages]
//! language = "english"
//! wrong_code = "The :attribute is not a valid fiscal code."
//! ```

use std::path::PathBuf;

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::century::CenturyPolicy;
use crate::error::{ErrorKind, Result};
use crate::parser::CodiceFiscale;
use crate::places::{CombinedResolver, CountryResolver, MunicipalityResolver, PlaceTable};
use crate::rule::{FiscalCodeRule, MessageCatalog};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodiceFiscaleConfig {
    /// Place resolution settings
    #[serde(default)]
    pub places: PlacesConfig,

    /// Century policy for full birth dates
    #[serde(default)]
    pub century: CenturyConfig,

    /// Message template overrides
    #[serde(default)]
    pub messages: MessagesConfig,
}

/// Which place resolver the parser is built with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResolverKind {
    /// Italian municipalities only
    Municipalities,
    /// Foreign countries only
    Countries,
    /// Municipalities, then countries
    #[default]
    Combined,
}

/// Place resolution configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlacesConfig {
    #[serde(default)]
    pub resolver: ResolverKind,

    /// Extra place table (csv, json or toml), consulted before embedded data.
    /// Point this at a full registry; the embedded lists are a sample.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// Century configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CenturyConfig {
    /// Two-digit years below this map to the 2000s
    #[serde(default = "default_pivot")]
    pub pivot: u8,
}

/// Message template overrides, keyed by error kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesConfig {
    /// `italian` or `english`; anything else warns and uses italian
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub no_code: Option<String>,
    #[serde(default)]
    pub wrong_size: Option<String>,
    #[serde(default)]
    pub bad_characters: Option<String>,
    #[serde(default)]
    pub bad_omocodia_char: Option<String>,
    #[serde(default)]
    pub wrong_code: Option<String>,
}

// Default value functions
fn default_pivot() -> u8 {
    70
}

fn default_language() -> String {
    "italian".to_string()
}

impl Default for CenturyConfig {
    fn default() -> Self {
        Self {
            pivot: default_pivot(),
        }
    }
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            no_code: None,
            wrong_size: None,
            bad_characters: None,
            bad_omocodia_char: None,
            wrong_code: None,
        }
    }
}

impl CenturyConfig {
    pub fn policy(&self) -> CenturyPolicy {
        CenturyPolicy::Pivot(self.pivot)
    }
}

impl MessagesConfig {
    /// Built-in catalog for `language`, if there is one
    fn base_catalog(language: &str) -> Option<MessageCatalog> {
        match language.to_ascii_lowercase().as_str() {
            "italian" | "it" => Some(MessageCatalog::italian()),
            "english" | "en" => Some(MessageCatalog::english()),
            _ => None,
        }
    }

    /// Whether `language` names a built-in catalog
    pub fn is_known_language(&self) -> bool {
        Self::base_catalog(&self.language).is_some()
    }

    /// Base catalog for the configured language with overrides applied.
    ///
    /// An unknown language logs a warning and uses the Italian catalog.
    pub fn catalog(&self) -> MessageCatalog {
        let mut catalog = Self::base_catalog(&self.language).unwrap_or_else(|| {
            warn!(language = %self.language, "unknown message language, using italian");
            MessageCatalog::italian()
        });
        let overrides = [
            (ErrorKind::NoCode, &self.no_code),
            (ErrorKind::WrongSize, &self.wrong_size),
            (ErrorKind::BadCharacters, &self.bad_characters),
            (ErrorKind::BadOmocodiaChar, &self.bad_omocodia_char),
            (ErrorKind::WrongCode, &self.wrong_code),
        ];
        for (kind, template) in overrides {
            if let Some(template) = template {
                catalog = catalog.with(kind, template.clone());
            }
        }
        catalog
    }
}

impl CodiceFiscaleConfig {
    /// Load configuration from default locations
    pub fn load() -> std::result::Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from a specific file
    pub fn load_from(config_path: Option<&str>) -> std::result::Result<Self, ConfigError> {
        let mut builder = Config::builder();

        // Load from default locations
        let config_locations = [
            "codicefiscale.toml",
            ".codicefiscale.toml",
            "config/codicefiscale.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // Load from XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("it", "codicefiscale", "codice-fiscale") {
            let xdg_config = config_dir.config_dir().join("codicefiscale.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        // Load from specified path
        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Load from environment variables (CODICEFISCALE__*)
        builder = builder.add_source(
            Environment::with_prefix("CODICEFISCALE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Build the configured place resolver
    pub fn build_resolver(&self) -> Result<CombinedResolver> {
        let mut resolver = CombinedResolver::new();

        if let Some(path) = &self.places.file {
            let table = PlaceTable::from_path(path)?;
            debug!(path = %path.display(), entries = table.len(), "using extra place table");
            resolver = match self.places.resolver {
                ResolverKind::Municipalities => resolver.with(MunicipalityResolver::new(table)),
                ResolverKind::Countries => resolver.with(CountryResolver::new(table)),
                ResolverKind::Combined => resolver.with(table),
            };
        }

        resolver = match self.places.resolver {
            ResolverKind::Municipalities => resolver.with(MunicipalityResolver::embedded()),
            ResolverKind::Countries => resolver.with(CountryResolver::embedded()),
            ResolverKind::Combined => resolver
                .with(MunicipalityResolver::embedded())
                .with(CountryResolver::embedded()),
        };
        Ok(resolver)
    }

    /// Build a parser with the configured resolver
    pub fn build_parser(&self) -> Result<CodiceFiscale<CombinedResolver>> {
        Ok(CodiceFiscale::new(self.build_resolver()?))
    }

    /// Build a form rule with the configured resolver and messages
    pub fn build_rule(&self) -> Result<FiscalCodeRule<CombinedResolver>> {
        Ok(FiscalCodeRule::new(self.build_parser()?, self.messages.catalog()))
    }
}
