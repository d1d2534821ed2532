//! Matcher configuration.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Similarity algorithm used when the substring fast path does not apply.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum SimilarityAlgorithm {
    /// Gestalt sequence ratio (longest common blocks)
    #[default]
    SequenceRatio,
    /// Normalized Levenshtein edit distance
    Levenshtein,
    /// Jaro-Winkler, prefix-weighted
    JaroWinkler,
}

impl SimilarityAlgorithm {
    /// Get the algorithm name as used in config files.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SequenceRatio => "sequence-ratio",
            Self::Levenshtein => "levenshtein",
            Self::JaroWinkler => "jaro-winkler",
        }
    }

    /// Get all available algorithms.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::SequenceRatio, Self::Levenshtein, Self::JaroWinkler]
    }
}

impl fmt::Display for SimilarityAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SimilarityAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sequence-ratio" | "sequence" | "gestalt" => Ok(Self::SequenceRatio),
            "levenshtein" => Ok(Self::Levenshtein),
            "jaro-winkler" | "jaro" => Ok(Self::JaroWinkler),
            other => Err(format!(
                "unknown similarity algorithm '{other}' (expected sequence-ratio, levenshtein or jaro-winkler)"
            )),
        }
    }
}

/// Which record wins an exact lookup when the query equals one record's
/// brand name and another record's generic name.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum ExactMatchPriority {
    /// Any brand-name match beats any generic-name match; catalog order
    /// decides within each group.
    #[default]
    BrandFirst,
    /// First record in catalog order matching either name.
    CatalogOrder,
}

/// Configuration for [`MedicineMatcher`](crate::MedicineMatcher).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MatcherConfig {
    /// Similarity algorithm for non-substring matches
    pub algorithm: SimilarityAlgorithm,
    /// Default result limit for `search`
    pub search_limit: usize,
    /// Default result limit for alternatives
    pub alternatives_limit: usize,
    /// Tie policy for exact lookups
    pub exact_match_priority: ExactMatchPriority,
    /// Catalog size at which search scoring runs in parallel
    pub parallel_threshold: usize,
}

impl MatcherConfig {
    /// Catalog-order exact lookup with the default scoring.
    #[must_use]
    pub fn compat() -> Self {
        Self {
            exact_match_priority: ExactMatchPriority::CatalogOrder,
            ..Self::default()
        }
    }
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            algorithm: SimilarityAlgorithm::default(),
            search_limit: 10,
            alternatives_limit: 5,
            exact_match_priority: ExactMatchPriority::default(),
            parallel_threshold: 2048,
        }
    }
}
