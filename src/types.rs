//! Core data types: catalog rows, nutrient profiles, and the crate error type.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias used throughout the crate.
pub type NutriResult<T> = Result<T, NutriError>;

/// Errors that abort startup. Per-turn problems (zero-result queries,
/// invalid menu choices) are ordinary return values, not errors.
#[derive(Debug, Error)]
pub enum NutriError {
    /// The catalog file could not be read.
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog file could not be parsed as CSV.
    #[error("failed to parse catalog: {0}")]
    Csv(#[from] csv::Error),

    /// The catalog parsed but contained no rows.
    #[error("catalog is empty: nothing to search")]
    EmptyCatalog,

    /// No description in the catalog produced a single indexable term.
    #[error("vocabulary is empty: no description contained an indexable term")]
    EmptyVocabulary,
}

/// The four nutrients tracked against daily targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NutrientKind {
    Carbohydrate,
    Fiber,
    Protein,
    Cholesterol,
}

impl NutrientKind {
    /// All tracked nutrients, in report order.
    pub const ALL: [NutrientKind; 4] = [
        NutrientKind::Carbohydrate,
        NutrientKind::Fiber,
        NutrientKind::Protein,
        NutrientKind::Cholesterol,
    ];

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            NutrientKind::Carbohydrate => "Carbohydrate",
            NutrientKind::Fiber => "Fiber",
            NutrientKind::Protein => "Protein",
            NutrientKind::Cholesterol => "Cholesterol",
        }
    }

    /// Default daily target in grams.
    pub fn default_target(&self) -> f64 {
        match self {
            NutrientKind::Carbohydrate => 300.0,
            NutrientKind::Fiber => 30.0,
            NutrientKind::Protein => 50.0,
            NutrientKind::Cholesterol => 300.0,
        }
    }
}

impl std::fmt::Display for NutrientKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Nutrient values in grams. Doubles as a per-row profile and as the
/// session accumulator (zero-initialized, elementwise addition).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrients {
    pub carbohydrate: f64,
    pub fiber: f64,
    pub protein: f64,
    pub cholesterol: f64,
}

impl Nutrients {
    /// Value for a single nutrient.
    pub fn get(&self, kind: NutrientKind) -> f64 {
        match kind {
            NutrientKind::Carbohydrate => self.carbohydrate,
            NutrientKind::Fiber => self.fiber,
            NutrientKind::Protein => self.protein,
            NutrientKind::Cholesterol => self.cholesterol,
        }
    }

    /// Elementwise addition into the accumulator.
    pub fn add(&mut self, other: &Nutrients) {
        self.carbohydrate += other.carbohydrate;
        self.fiber += other.fiber;
        self.protein += other.protein;
        self.cholesterol += other.cholesterol;
    }

    /// The default daily targets.
    pub fn daily_targets() -> Nutrients {
        Nutrients {
            carbohydrate: NutrientKind::Carbohydrate.default_target(),
            fiber: NutrientKind::Fiber.default_target(),
            protein: NutrientKind::Protein.default_target(),
            cholesterol: NutrientKind::Cholesterol.default_target(),
        }
    }
}

/// One immutable catalog row: a searchable description plus its nutrient
/// profile. The id is the row index in the source table.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    pub id: usize,
    pub description: String,
    pub nutrients: Nutrients,
}
