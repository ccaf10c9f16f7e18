//! Immutable item catalog: label -> display metadata lookup
//!
//! Loaded once per process from a bundled JSON dataset and shared by
//! reference across renders. Misses resolve to the designated unknown-item
//! entry, which every catalog is required to carry.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use thiserror::Error;

use crate::models::ItemMetadata;

/// Label of the shared placeholder entry used for unknown items.
pub const UNKNOWN_ITEM_LABEL: &str = "404item";

/// Errors raised while loading the catalog dataset.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog has no '404item' fallback entry")]
    MissingFallback,
}

/// Immutable lookup from item label to display metadata.
#[derive(Debug, Clone)]
pub struct ItemCatalog {
    items: HashMap<String, ItemMetadata>,
    unknown: ItemMetadata,
}

impl ItemCatalog {
    /// Build a catalog from a flat item list.
    ///
    /// Fails if the list lacks the [`UNKNOWN_ITEM_LABEL`] entry; the
    /// two-tier icon fallback depends on it existing.
    pub fn new(entries: Vec<ItemMetadata>) -> Result<Self, CatalogError> {
        let mut items = HashMap::with_capacity(entries.len());
        for item in entries {
            items.insert(item.label.clone(), item);
        }
        let unknown = items
            .get(UNKNOWN_ITEM_LABEL)
            .cloned()
            .ok_or(CatalogError::MissingFallback)?;
        Ok(Self { items, unknown })
    }

    /// Parse a JSON array of items from a reader.
    pub fn from_reader(reader: impl Read) -> Result<Self, CatalogError> {
        let entries: Vec<ItemMetadata> = serde_json::from_reader(reader)?;
        Self::new(entries)
    }

    /// Load the catalog dataset from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Exact lookup by label.
    pub fn get(&self, label: &str) -> Option<&ItemMetadata> {
        self.items.get(label)
    }

    /// Lookup by label, substituting the unknown-item entry on miss.
    pub fn resolve(&self, label: &str) -> &ItemMetadata {
        self.items.get(label).unwrap_or(&self.unknown)
    }

    /// The shared placeholder entry for unknown items.
    pub fn unknown(&self) -> &ItemMetadata {
        &self.unknown
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
