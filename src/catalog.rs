//! Catalog loading from a CSV source.
//!
//! The catalog is read once at startup and never mutated. A file that
//! cannot be read, cannot be parsed, or contains no rows is fatal before
//! any interactive prompt.

use std::path::Path;

use serde::Deserialize;

use crate::types::{CatalogItem, NutriError, NutriResult, Nutrients};

/// Raw CSV row. Kept flat because the csv deserializer does not support
/// nested records; extra columns in the source are ignored. Missing
/// nutrient columns read as zero.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Description")]
    description: String,
    #[serde(rename = "Data.Carbohydrate", alias = "Carbohydrate", default)]
    carbohydrate: f64,
    #[serde(rename = "Data.Fiber", alias = "Fiber", default)]
    fiber: f64,
    #[serde(rename = "Data.Protein", alias = "Protein", default)]
    protein: f64,
    #[serde(rename = "Data.Cholesterol", alias = "Cholesterol", default)]
    cholesterol: f64,
}

/// The full set of catalog rows, owned for the process lifetime.
#[derive(Debug)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// Load a catalog from a CSV file with a `Description` column and
    /// numeric nutrient columns.
    pub fn load(path: &Path) -> NutriResult<Self> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut items = Vec::new();

        for (id, record) in reader.deserialize::<CsvRow>().enumerate() {
            let row = record?;
            items.push(CatalogItem {
                id,
                description: row.description,
                nutrients: Nutrients {
                    carbohydrate: row.carbohydrate,
                    fiber: row.fiber,
                    protein: row.protein,
                    cholesterol: row.cholesterol,
                },
            });
        }

        log::info!("loaded {} catalog rows from {}", items.len(), path.display());
        Self::from_items(items)
    }

    /// Build a catalog from already-constructed items. Rejects an empty set.
    pub fn from_items(items: Vec<CatalogItem>) -> NutriResult<Self> {
        if items.is_empty() {
            return Err(NutriError::EmptyCatalog);
        }
        Ok(Self { items })
    }

    /// All rows, in source order.
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Row lookup by id (row index).
    pub fn get(&self, id: usize) -> Option<&CatalogItem> {
        self.items.get(id)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog has no rows. Always false after construction.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
