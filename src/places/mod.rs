//! Place code resolution
//!
//! The parser does not know any place names. It hands the 4-character place
//! code (type letter plus three digits) to a [`PlaceResolver`] chosen when the
//! parser is built. Codes starting with `Z` identify foreign countries; every
//! other letter identifies an Italian municipality.
//!
//! ```text
//! CombinedResolver
//! ├── MunicipalityResolver   A000 - Y999
//! └── CountryResolver        Z000 - Z999
//! ```

mod table;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use table::PlaceTable;

/// Type letter of foreign-country place codes
pub const FOREIGN_PREFIX: char = 'Z';

/// Maps a place code to a place name
///
/// `None` means the code is unknown to this resolver. An unknown code is not a
/// validation failure. Implementations must be safe to call concurrently.
pub trait PlaceResolver: Send + Sync {
    fn resolve(&self, code: &str) -> Option<String>;
}

impl<R: PlaceResolver + ?Sized> PlaceResolver for &R {
    fn resolve(&self, code: &str) -> Option<String> {
        (**self).resolve(code)
    }
}

impl<R: PlaceResolver + ?Sized> PlaceResolver for Box<R> {
    fn resolve(&self, code: &str) -> Option<String> {
        (**self).resolve(code)
    }
}

impl<R: PlaceResolver + ?Sized> PlaceResolver for Arc<R> {
    fn resolve(&self, code: &str) -> Option<String> {
        (**self).resolve(code)
    }
}

/// Letter followed by three digits
pub fn is_place_code(code: &str) -> bool {
    let b = code.as_bytes();
    b.len() == 4 && b[0].is_ascii_uppercase() && b[1..].iter().all(u8::is_ascii_digit)
}

/// Whether a place code denotes a municipality or a foreign country
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceKind {
    Municipality,
    Foreign,
}

impl PlaceKind {
    pub fn of(code: &str) -> Self {
        if code.starts_with(FOREIGN_PREFIX) {
            PlaceKind::Foreign
        } else {
            PlaceKind::Municipality
        }
    }
}

/// Resolves Italian municipality codes only
#[derive(Debug, Clone)]
pub struct MunicipalityResolver {
    table: Arc<PlaceTable>,
}

impl MunicipalityResolver {
    pub fn new(table: impl Into<Arc<PlaceTable>>) -> Self {
        Self { table: table.into() }
    }

    /// Backed by the embedded municipality list; the table is shared, not copied
    pub fn embedded() -> Self {
        Self::new(PlaceTable::municipalities())
    }

    pub fn table(&self) -> &Arc<PlaceTable> {
        &self.table
    }
}

impl Default for MunicipalityResolver {
    fn default() -> Self {
        Self::embedded()
    }
}

impl PlaceResolver for MunicipalityResolver {
    fn resolve(&self, code: &str) -> Option<String> {
        match PlaceKind::of(code) {
            PlaceKind::Municipality => self.table.resolve(code),
            PlaceKind::Foreign => None,
        }
    }
}

/// Resolves foreign-country (`Z`) codes only
#[derive(Debug, Clone)]
pub struct CountryResolver {
    table: Arc<PlaceTable>,
}

impl CountryResolver {
    pub fn new(table: impl Into<Arc<PlaceTable>>) -> Self {
        Self { table: table.into() }
    }

    /// Backed by the embedded country list; the table is shared, not copied
    pub fn embedded() -> Self {
        Self::new(PlaceTable::countries())
    }

    pub fn table(&self) -> &Arc<PlaceTable> {
        &self.table
    }
}

impl Default for CountryResolver {
    fn default() -> Self {
        Self::embedded()
    }
}

impl PlaceResolver for CountryResolver {
    fn resolve(&self, code: &str) -> Option<String> {
        match PlaceKind::of(code) {
            PlaceKind::Foreign => self.table.resolve(code),
            PlaceKind::Municipality => None,
        }
    }
}

/// Consults several resolvers in order; the first hit wins
#[derive(Default)]
pub struct CombinedResolver {
    resolvers: Vec<Box<dyn PlaceResolver>>,
}

impl CombinedResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a resolver to the chain
    pub fn with(mut self, resolver: impl PlaceResolver + 'static) -> Self {
        self.resolvers.push(Box::new(resolver));
        self
    }

    /// Municipalities and countries from the embedded lists
    pub fn embedded() -> Self {
        Self::new()
            .with(MunicipalityResolver::embedded())
            .with(CountryResolver::embedded())
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl PlaceResolver for CombinedResolver {
    fn resolve(&self, code: &str) -> Option<String> {
        self.resolvers.iter().find_map(|r| r.resolve(code))
    }
}

impl std::fmt::Debug for CombinedResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombinedResolver")
            .field("resolvers", &self.resolvers.len())
            .finish()
    }
}

/// Never resolves anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResolver;

impl PlaceResolver for NoResolver {
    fn resolve(&self, _code: &str) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_kind() {
        assert_eq!(PlaceKind::of("Z357"), PlaceKind::Foreign);
        assert_eq!(PlaceKind::of("F205"), PlaceKind::Municipality);
    }

    #[test]
    fn test_is_place_code() {
        assert!(is_place_code("F205"));
        assert!(!is_place_code("F20R"));
        assert!(!is_place_code("f205"));
        assert!(!is_place_code("F2050"));
    }

    #[test]
    fn test_resolvers_are_partitioned_by_prefix() {
        let municipalities = MunicipalityResolver::embedded();
        let countries = CountryResolver::embedded();

        assert_eq!(municipalities.resolve("F205").as_deref(), Some("Milano"));
        assert_eq!(municipalities.resolve("Z357"), None);
        assert_eq!(countries.resolve("Z357").as_deref(), Some("Tanzania"));
        assert_eq!(countries.resolve("F205"), None);
    }

    #[test]
    fn test_partition_holds_even_for_mixed_tables() {
        let mut table = PlaceTable::new();
        table.insert("Z357", "Tanzania");
        table.insert("F205", "Milano");
        assert_eq!(MunicipalityResolver::new(table.clone()).resolve("Z357"), None);
        assert_eq!(CountryResolver::new(table).resolve("F205"), None);
    }

    #[test]
    fn test_combined_first_hit_wins() {
        let mut override_table = PlaceTable::new();
        override_table.insert("F205", "Milan");

        let combined = CombinedResolver::new()
            .with(override_table)
            .with(CombinedResolver::embedded());

        assert_eq!(combined.len(), 2);
        assert_eq!(combined.resolve("F205").as_deref(), Some("Milan"));
        assert_eq!(combined.resolve("Z357").as_deref(), Some("Tanzania"));
        assert_eq!(combined.resolve("Z999"), None);
    }

    #[test]
    fn test_embedded_resolvers_share_one_table() {
        let first = MunicipalityResolver::embedded();
        let second = MunicipalityResolver::embedded();
        assert!(Arc::ptr_eq(first.table(), second.table()));
        assert!(Arc::ptr_eq(first.table(), &PlaceTable::municipalities()));
        assert!(Arc::ptr_eq(
            CountryResolver::embedded().table(),
            CountryResolver::default().table()
        ));
    }

    #[test]
    fn test_shared_resolvers() {
        let shared: Arc<dyn PlaceResolver> = Arc::new(CountryResolver::embedded());
        assert_eq!(shared.resolve("Z110").as_deref(), Some("Francia"));
        assert_eq!(NoResolver.resolve("F205"), None);
    }
}
