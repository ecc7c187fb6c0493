//! Catalog - the embedded, validated set of React pattern entries.
//!
//! The catalog is built once, checked once, and never mutated. Queries are
//! plain scans in canonical order (basic, then intermediate, then advanced,
//! authoring order within a tier); lookups by id go through an index.
//!
//! ## Example
//!
//! ```
//! use pattern_playground::{catalog, Category};
//!
//! let catalog = catalog();
//! let pattern = catalog.get_by_id("context-api").expect("embedded pattern");
//! assert_eq!(pattern.category, Category::Basic);
//! assert_eq!(catalog.count_of(Category::Advanced), 5);
//! ```

mod error;
mod pattern;
mod validate;

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

pub use error::CatalogError;
pub use pattern::{Category, Difficulty, PatternCode, PatternDescription, PatternRecord};
pub use validate::{MIN_CODE_CHARS, MIN_PROSE_CHARS};

const EMBEDDED_PATTERNS: &str = include_str!("../../data/patterns.json");

/// Read-only query surface over the pattern records.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<PatternRecord>,
    index: HashMap<String, usize>,
    counts: BTreeMap<Category, usize>,
}

impl Catalog {
    /// Parse and validate the dataset compiled into the crate.
    pub fn embedded() -> Result<Self, CatalogError> {
        let records: Vec<PatternRecord> = serde_json::from_str(EMBEDDED_PATTERNS)
            .map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::from_records(records)
    }

    /// Build a catalog from an arbitrary record list, enforcing every dataset
    /// invariant. Records are put into canonical tier order.
    pub fn from_records(mut records: Vec<PatternRecord>) -> Result<Self, CatalogError> {
        validate::validate(&records)?;

        // stable: authoring order survives within a tier
        records.sort_by_key(|record| record.category);

        let index = records
            .iter()
            .enumerate()
            .map(|(position, record)| (record.id.clone(), position))
            .collect();

        let mut counts: BTreeMap<Category, usize> =
            Category::ALL.iter().map(|category| (*category, 0)).collect();
        for record in &records {
            *counts.entry(record.category).or_insert(0) += 1;
        }

        tracing::debug!(patterns = records.len(), "pattern catalog loaded");

        Ok(Self {
            records,
            index,
            counts,
        })
    }

    /// All records in canonical order.
    pub fn get_all(&self) -> &[PatternRecord] {
        &self.records
    }

    pub fn get_by_id(&self, id: &str) -> Option<&PatternRecord> {
        self.index.get(id).map(|&position| &self.records[position])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn get_by_category(&self, category: Category) -> Vec<&PatternRecord> {
        self.records
            .iter()
            .filter(|record| record.category == category)
            .collect()
    }

    /// Records with exactly this difficulty. Levels outside `1..=5` match nothing.
    pub fn get_by_difficulty(&self, level: u8) -> Vec<&PatternRecord> {
        self.records
            .iter()
            .filter(|record| record.difficulty.get() == level)
            .collect()
    }

    /// Resolve a record's `related_patterns` in declared order.
    pub fn related(&self, record: &PatternRecord) -> Vec<&PatternRecord> {
        record
            .related_patterns
            .iter()
            .filter_map(|id| self.get_by_id(id))
            .collect()
    }

    /// Total record count, fixed at construction.
    pub fn total(&self) -> usize {
        self.records.len()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Cached record count for one category.
    pub fn count_of(&self, category: Category) -> usize {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    /// Cached record counts for every category, zero included.
    pub fn counts_by_category(&self) -> &BTreeMap<Category, usize> {
        &self.counts
    }
}

/// The process-wide embedded catalog, loaded on first use.
///
/// # Panics
///
/// Panics if the embedded dataset violates a catalog invariant. That is an
/// authoring bug in `data/patterns.json`, caught by this crate's own tests.
pub fn catalog() -> &'static Catalog {
    static CATALOG: OnceLock<Catalog> = OnceLock::new();
    CATALOG.get_or_init(|| match Catalog::embedded() {
        Ok(catalog) => catalog,
        Err(err) => panic!("embedded pattern catalog is invalid: {}", err),
    })
}
