//! Trait definitions for similarity scoring.
//!
//! [`SimilarityScorer`] is the seam between the matcher and the string
//! algorithms: the matcher only ever calls [`SimilarityScorer::score`], so a
//! custom scorer can be injected for testing or experimentation.

use super::config::SimilarityAlgorithm;
use super::string_similarity::{jaro_winkler_ratio, levenshtein_ratio, sequence_ratio};
use crate::utils::round2;

/// Scores a normalized query against a normalized candidate name.
pub trait SimilarityScorer: Send + Sync {
    /// Raw similarity of two non-empty normalized strings, in `[0.0, 1.0]`.
    fn similarity(&self, query: &str, target: &str) -> f64;

    /// Name of this scorer, for logs and explanations.
    fn name(&self) -> &'static str;

    /// Bounded match score.
    ///
    /// - either input empty: `0.0`
    /// - `query` is a substring of `target`: exactly `1.0`
    /// - otherwise the raw similarity, clamped to `[0, 1]` and rounded to
    ///   two decimal places
    fn score(&self, query: &str, target: &str) -> f64 {
        if query.is_empty() || target.is_empty() {
            return 0.0;
        }
        if target.contains(query) {
            return 1.0;
        }
        let raw = self.similarity(query, target);
        if raw.is_finite() {
            round2(raw.clamp(0.0, 1.0))
        } else {
            0.0
        }
    }
}

impl SimilarityScorer for SimilarityAlgorithm {
    fn similarity(&self, query: &str, target: &str) -> f64 {
        match self {
            Self::SequenceRatio => sequence_ratio(query, target),
            Self::Levenshtein => levenshtein_ratio(query, target),
            Self::JaroWinkler => jaro_winkler_ratio(query, target),
        }
    }

    fn name(&self) -> &'static str {
        SimilarityAlgorithm::name(self)
    }
}
