//! The TF-IDF vector space built once over the catalog at startup.

pub mod vector_space;

pub use vector_space::{SparseVector, VectorSpace};
