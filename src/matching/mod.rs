//! Name normalization and similarity scoring.
//!
//! This module holds the two pure building blocks of the search engine:
//!
//! - [`normalize`]: canonicalizes free text (lower-case ASCII letters and
//!   digits only)
//! - [`SimilarityScorer`]: bounded `[0, 1]` scoring of a normalized query
//!   against a normalized name, with an exact-substring fast path
//!
//! # Example
//!
//! ```
//! use medmatch::matching::{normalize, score, SimilarityAlgorithm};
//!
//! let query = normalize("Tylen");
//! let target = normalize("Tylenol");
//! assert_eq!(score(SimilarityAlgorithm::SequenceRatio, &query, &target), 1.0);
//! ```

mod config;
mod normalize;
pub mod string_similarity;
mod traits;

pub use config::{ExactMatchPriority, MatcherConfig, SimilarityAlgorithm};
pub use normalize::normalize;
pub use traits::SimilarityScorer;

/// Score two normalized strings with one of the built-in algorithms.
#[must_use]
pub fn score(algorithm: SimilarityAlgorithm, query: &str, target: &str) -> f64 {
    algorithm.score(query, target)
}
