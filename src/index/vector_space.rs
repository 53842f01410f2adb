//! TF-IDF vector space over the catalog descriptions.
//!
//! Built exactly once per process from the full catalog and immutable
//! afterward; queries project into the space but never mutate it.

use std::collections::HashMap;

use crate::catalog::Catalog;
use crate::engine::tokenizer::Tokenizer;
use crate::types::{NutriError, NutriResult};

/// A sparse vector over the vocabulary: (dimension, weight) pairs sorted
/// by dimension, L2-normalized so cosine similarity is a dot product.
#[derive(Debug, Clone, Default)]
pub struct SparseVector {
    weights: Vec<(usize, f32)>,
}

impl SparseVector {
    /// Build from unsorted (dimension, weight) pairs, normalizing to unit
    /// length. An all-zero input yields an empty vector.
    fn from_weights(mut weights: Vec<(usize, f32)>) -> Self {
        weights.retain(|&(_, w)| w != 0.0);
        weights.sort_by_key(|&(dim, _)| dim);

        let norm = weights.iter().map(|&(_, w)| w * w).sum::<f32>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut weights {
                *w /= norm;
            }
        }

        Self { weights }
    }

    /// Dot product via a merge walk over the sorted dimension lists.
    /// Equals cosine similarity because both sides are unit length.
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let mut sum = 0.0;
        let (mut i, mut j) = (0, 0);
        while i < self.weights.len() && j < other.weights.len() {
            let (da, wa) = self.weights[i];
            let (db, wb) = other.weights[j];
            match da.cmp(&db) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    /// Whether the vector carries no weight at all.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// The shared vector space: a fixed vocabulary, per-term IDF weights, and
/// one normalized document vector per catalog row.
pub struct VectorSpace {
    /// term -> dimension index, assigned in first-seen corpus order so
    /// identical corpora always build identical spaces.
    vocabulary: HashMap<String, usize>,
    /// IDF weight per dimension: ln(N / df) + 1. The +1 keeps weights
    /// nonzero when a term appears in every document.
    idf: Vec<f32>,
    /// One vector per catalog row, parallel to the row order.
    doc_vectors: Vec<SparseVector>,
}

impl VectorSpace {
    /// Build the space from every catalog description. Fails if no
    /// description yields a single indexable term.
    pub fn build(catalog: &Catalog, tokenizer: &Tokenizer) -> NutriResult<Self> {
        let tokenized: Vec<Vec<String>> = catalog
            .items()
            .iter()
            .map(|item| tokenizer.tokenize(&item.description))
            .collect();

        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: Vec<u32> = Vec::new();

        for tokens in &tokenized {
            let mut seen_dims: Vec<usize> = Vec::new();
            for term in tokens {
                let dim = match vocabulary.get(term) {
                    Some(&dim) => dim,
                    None => {
                        let dim = vocabulary.len();
                        vocabulary.insert(term.clone(), dim);
                        doc_freq.push(0);
                        dim
                    }
                };
                if !seen_dims.contains(&dim) {
                    seen_dims.push(dim);
                    doc_freq[dim] += 1;
                }
            }
        }

        if vocabulary.is_empty() {
            return Err(NutriError::EmptyVocabulary);
        }

        let n = catalog.len() as f32;
        let idf: Vec<f32> = doc_freq
            .iter()
            .map(|&df| (n / df as f32).ln() + 1.0)
            .collect();

        let doc_vectors: Vec<SparseVector> = tokenized
            .iter()
            .map(|tokens| {
                let mut tf: HashMap<usize, f32> = HashMap::new();
                for term in tokens {
                    *tf.entry(vocabulary[term]).or_insert(0.0) += 1.0;
                }
                SparseVector::from_weights(
                    tf.into_iter().map(|(dim, f)| (dim, f * idf[dim])).collect(),
                )
            })
            .collect();

        log::info!(
            "built vector space: {} rows, {} terms",
            catalog.len(),
            vocabulary.len()
        );

        Ok(Self {
            vocabulary,
            idf,
            doc_vectors,
        })
    }

    /// Project text into the space using the corpus IDF weights. Terms
    /// outside the vocabulary contribute nothing; they are not an error.
    pub fn project(&self, tokenizer: &Tokenizer, text: &str) -> SparseVector {
        let mut tf: HashMap<usize, f32> = HashMap::new();
        for term in tokenizer.tokenize(text) {
            if let Some(&dim) = self.vocabulary.get(&term) {
                *tf.entry(dim).or_insert(0.0) += 1.0;
            }
        }
        SparseVector::from_weights(
            tf.into_iter()
                .map(|(dim, f)| (dim, f * self.idf[dim]))
                .collect(),
        )
    }

    /// Document vector for a catalog row.
    pub fn doc_vector(&self, row: usize) -> &SparseVector {
        &self.doc_vectors[row]
    }

    /// Number of documents in the space.
    pub fn doc_count(&self) -> usize {
        self.doc_vectors.len()
    }

    /// Vocabulary size (vector dimensionality).
    pub fn term_count(&self) -> usize {
        self.vocabulary.len()
    }
}
