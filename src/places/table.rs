//! In-memory place code tables
//!
//! Tables can be loaded from CSV (`code,name` rows, optional header), JSON (an
//! object mapping code to name) or TOML (a `[places]` table). Codes are
//! uppercased on load; rows whose code is not a letter followed by three
//! digits are skipped with a warning.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use include_dir::{include_dir, Dir};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::places::{is_place_code, PlaceResolver};

/// Place tables compiled into the binary
static PLACE_DATA: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/data");

/// A mapping from place code to place name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceTable {
    entries: HashMap<String, String>,
}

#[derive(Deserialize)]
struct TomlPlaces {
    places: HashMap<String, String>,
}

impl PlaceTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a place, returning `false` if the code is malformed
    pub fn insert(&mut self, code: &str, name: impl Into<String>) -> bool {
        let code = code.trim().to_ascii_uppercase();
        if !is_place_code(&code) {
            warn!(code = %code, "skipping malformed place code");
            return false;
        }
        self.entries.insert(code, name.into());
        true
    }

    /// Look up a place name by code (case-insensitive)
    pub fn get(&self, code: &str) -> Option<&str> {
        self.entries
            .get(&code.to_ascii_uppercase())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(code, name)` pairs in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(c, n)| (c.as_str(), n.as_str()))
    }

    /// Copy every entry of `other` into this table, overriding duplicates
    pub fn merge(&mut self, other: PlaceTable) {
        self.entries.extend(other.entries);
    }

    /// Parse `code,name` rows. A first row of `code,name` is treated as header.
    pub fn from_csv_str(text: &str) -> Result<Self> {
        let mut table = Self::new();
        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (code, name) = line.split_once(',').ok_or_else(|| Error::MalformedPlaceTable {
                line: idx + 1,
                reason: "expected `code,name`".to_string(),
            })?;
            if idx == 0 && code.trim().eq_ignore_ascii_case("code") {
                continue;
            }
            let name = name.trim().trim_matches('"');
            if name.is_empty() {
                return Err(Error::MalformedPlaceTable {
                    line: idx + 1,
                    reason: format!("empty name for {}", code.trim()),
                });
            }
            table.insert(code, name);
        }
        Ok(table)
    }

    /// Parse a JSON object mapping code to name
    pub fn from_json_str(text: &str) -> Result<Self> {
        let raw: HashMap<String, String> = serde_json::from_str(text)?;
        Ok(Self::from_pairs(raw))
    }

    /// Parse a TOML document with a `[places]` table
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let raw: TomlPlaces = toml::from_str(text)?;
        Ok(Self::from_pairs(raw.places))
    }

    /// Load a table from disk, picking the format from the file extension
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let table = match ext.as_str() {
            "csv" => Self::from_csv_str(&text)?,
            "json" => Self::from_json_str(&text)?,
            "toml" => Self::from_toml_str(&text)?,
            other => return Err(Error::UnsupportedFormat(other.to_string())),
        };
        debug!(path = %path.display(), entries = table.len(), "loaded place table");
        Ok(table)
    }

    /// Embedded Italian municipalities (codes not starting with `Z`)
    ///
    /// Loaded once and shared by every caller. The list is a sample, not the
    /// full registry; load that with [`from_path`](Self::from_path).
    pub fn municipalities() -> Arc<PlaceTable> {
        static TABLE: OnceLock<Arc<PlaceTable>> = OnceLock::new();
        Arc::clone(TABLE.get_or_init(|| Arc::new(embedded("municipalities.csv"))))
    }

    /// Embedded foreign countries (codes starting with `Z`)
    pub fn countries() -> Arc<PlaceTable> {
        static TABLE: OnceLock<Arc<PlaceTable>> = OnceLock::new();
        Arc::clone(TABLE.get_or_init(|| Arc::new(embedded("countries.csv"))))
    }

    fn from_pairs(raw: HashMap<String, String>) -> Self {
        let mut table = Self::new();
        for (code, name) in raw {
            table.insert(&code, name);
        }
        table
    }
}

fn embedded(name: &str) -> PlaceTable {
    let Some(text) = PLACE_DATA.get_file(name).and_then(|f| f.contents_utf8()) else {
        warn!(file = name, "embedded place table missing");
        return PlaceTable::new();
    };
    match PlaceTable::from_csv_str(text) {
        Ok(table) => table,
        Err(e) => {
            warn!(file = name, error = %e, "embedded place table unreadable");
            PlaceTable::new()
        }
    }
}

impl PlaceResolver for PlaceTable {
    fn resolve(&self, code: &str) -> Option<String> {
        self.get(code).map(str::to_string)
    }
}

impl FromIterator<(String, String)> for PlaceTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self::from_pairs(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_tables() {
        assert_eq!(PlaceTable::municipalities().get("F205"), Some("Milano"));
        assert_eq!(PlaceTable::municipalities().get("l407"), Some("Treviso"));
        assert_eq!(PlaceTable::countries().get("Z357"), Some("Tanzania"));
        assert!(PlaceTable::municipalities().iter().all(|(c, _)| !c.starts_with('Z')));
        assert!(PlaceTable::countries().iter().all(|(c, _)| c.starts_with('Z')));
        assert!(Arc::ptr_eq(&PlaceTable::countries(), &PlaceTable::countries()));
    }

    #[test]
    fn test_csv_skips_header_comments_and_bad_codes() {
        let table = PlaceTable::from_csv_str("code,name\n# comment\nh501,Roma\nXX,Nowhere\n").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("H501"), Some("Roma"));
    }

    #[test]
    fn test_csv_rejects_missing_separator() {
        let err = PlaceTable::from_csv_str("H501 Roma").unwrap_err();
        assert!(matches!(err, Error::MalformedPlaceTable { line: 1, .. }));
    }

    #[test]
    fn test_json_and_toml() {
        let json = PlaceTable::from_json_str(r#"{"Z404": "Stati Uniti d'America"}"#).unwrap();
        assert_eq!(json.get("Z404"), Some("Stati Uniti d'America"));

        let toml = PlaceTable::from_toml_str("[places]\nD612 = \"Firenze\"\n").unwrap();
        assert_eq!(toml.get("D612"), Some("Firenze"));
    }

    #[test]
    fn test_from_path_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extra.csv");
        std::fs::write(&path, "A001,Abano Terme\n").unwrap();
        let table = PlaceTable::from_path(&path).unwrap();
        assert_eq!(table.get("A001"), Some("Abano Terme"));

        let bad = dir.path().join("extra.xml");
        std::fs::write(&bad, "<places/>").unwrap();
        assert!(matches!(
            PlaceTable::from_path(&bad),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_merge_overrides() {
        let mut base = PlaceTable::clone(&PlaceTable::municipalities());
        let mut extra = PlaceTable::new();
        extra.insert("F205", "Milan");
        base.merge(extra);
        assert_eq!(base.get("F205"), Some("Milan"));
    }
}
