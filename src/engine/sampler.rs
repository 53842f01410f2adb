//! Randomized display ordering over a ranked result set.
//!
//! Display order is intentionally decorrelated from ranking order: the
//! same top-ranked rows stay in view across refreshes while their
//! presentation order varies, so a refresh feels like new options without
//! recomputing the ranking.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::engine::ranker::ScoredItem;

/// Draws random display permutations of a ranked result set. The RNG is
/// owned and explicitly seedable so tests can pin the display order.
pub struct Sampler {
    rng: StdRng,
}

impl Sampler {
    /// Sampler seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Sampler with a fixed seed; identical seeds draw identical
    /// permutation sequences.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draw a display permutation over the whole ranked set. Calling this
    /// again on the same set is the "refresh" operation: a new order over
    /// the same candidates, never new candidates.
    pub fn sample(&mut self, ranked: &[ScoredItem]) -> Vec<ScoredItem> {
        let mut display: Vec<ScoredItem> = ranked.to_vec();
        display.shuffle(&mut self.rng);
        display
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a 1-based display choice onto the displayed set. Returns `None`
/// for anything out of range; the caller re-prompts.
pub fn choose(displayed: &[ScoredItem], choice: usize) -> Option<ScoredItem> {
    if choice == 0 {
        return None;
    }
    displayed.get(choice - 1).copied()
}
