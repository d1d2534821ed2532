//! Default values and named presets.

use super::types::{AppConfig, CatalogConfig};
use crate::catalog::MergePolicy;
use crate::matching::MatcherConfig;

/// Default shortest accepted search query.
pub const DEFAULT_MIN_QUERY_LENGTH: usize = 2;

/// Default number of search results.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Default number of alternatives.
pub const DEFAULT_ALTERNATIVES_LIMIT: usize = 5;

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Brand-first exact lookup, append-only merges
    Default,
    /// Catalog-order exact lookup, append-only merges
    Compat,
    /// Brand-first exact lookup, duplicate rows skipped on merge
    Dedup,
}

impl ConfigPreset {
    /// Get the preset name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Compat => "compat",
            Self::Dedup => "dedup",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::Default),
            "compat" | "compatible" | "catalog-order" => Some(Self::Compat),
            "dedup" | "skip-duplicates" => Some(Self::Dedup),
            _ => None,
        }
    }

    /// Get a description of this preset.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "Brand names win exact lookups; feeds are appended as-is",
            Self::Compat => "First catalog match wins exact lookups; feeds are appended as-is",
            Self::Dedup => "Brand names win exact lookups; duplicate brand/generic pairs are skipped",
        }
    }

    /// Get all available presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::Compat, Self::Dedup]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Preset Implementations
// ============================================================================

impl AppConfig {
    /// Create an `AppConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::Compat => Self::compat_preset(),
            ConfigPreset::Dedup => Self::dedup_preset(),
        }
    }

    /// Catalog-order exact lookup with append-only merges.
    #[must_use]
    pub fn compat_preset() -> Self {
        Self {
            matching: MatcherConfig::compat(),
            ..Self::default()
        }
    }

    /// Skip duplicate brand/generic pairs when merging feeds.
    #[must_use]
    pub fn dedup_preset() -> Self {
        Self {
            catalog: CatalogConfig {
                merge_policy: MergePolicy::SkipDuplicates,
                ..CatalogConfig::default()
            },
            ..Self::default()
        }
    }
}
