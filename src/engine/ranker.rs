//! Query ranking: cosine similarity against every document vector.

use crate::engine::tokenizer::Tokenizer;
use crate::index::VectorSpace;

/// Maximum number of ranked candidates returned per query.
pub const TOP_K: usize = 10;

/// One ranked candidate: a catalog row and its similarity to the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredItem {
    pub row: usize,
    pub score: f32,
}

/// Ranks catalog rows against free-text queries. Holds shared references
/// to the space and tokenizer built at startup; carries no mutable state,
/// so ranking is deterministic for a fixed corpus and query.
pub struct Ranker<'a> {
    space: &'a VectorSpace,
    tokenizer: &'a Tokenizer,
}

impl<'a> Ranker<'a> {
    pub fn new(space: &'a VectorSpace, tokenizer: &'a Tokenizer) -> Self {
        Self { space, tokenizer }
    }

    /// Rank every row by descending cosine similarity to the query and
    /// keep the top ten. Rows with zero similarity are excluded, so a
    /// query that matches nothing (or normalizes to nothing) returns an
    /// empty vector — "no match", not an error. Ties keep original row
    /// order: rows are scored in order and the sort is stable.
    pub fn rank(&self, query: &str) -> Vec<ScoredItem> {
        let query_vec = self.space.project(self.tokenizer, query);
        if query_vec.is_empty() {
            return Vec::new();
        }

        let mut results: Vec<ScoredItem> = (0..self.space.doc_count())
            .filter_map(|row| {
                let score = query_vec.dot(self.space.doc_vector(row));
                (score > 0.0).then_some(ScoredItem { row, score })
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(TOP_K);

        log::debug!("query {:?} matched {} rows", query, results.len());
        results
    }
}
