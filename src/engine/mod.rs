//! Query-time components: normalization, ranking, and display sampling.

pub mod ranker;
pub mod sampler;
pub mod tokenizer;

pub use ranker::{Ranker, ScoredItem, TOP_K};
pub use sampler::Sampler;
pub use tokenizer::Tokenizer;
