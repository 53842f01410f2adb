//! Keyword search over a food catalog with nutrient tracking.
//!
//! The catalog is loaded once from CSV, indexed into a TF-IDF vector
//! space, and queried interactively: queries are normalized with the same
//! tokenizer the index was built with, ranked by cosine similarity,
//! sampled into a shuffled display order, and confirmed selections
//! accumulate nutrients against daily targets.

pub mod catalog;
pub mod engine;
pub mod index;
pub mod session;
pub mod types;

pub use catalog::Catalog;
pub use engine::{Ranker, Sampler, ScoredItem, Tokenizer, TOP_K};
pub use index::{SparseVector, VectorSpace};
pub use session::{Advice, DisplayedOption, NutrientReport, Session, SessionState, Turn};
pub use types::{CatalogItem, NutriError, NutriResult, NutrientKind, Nutrients};
