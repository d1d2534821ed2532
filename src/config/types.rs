//! Configuration types for medmatch.
//!
//! Provides the structured configuration loaded from YAML files and merged
//! with CLI flags.

use crate::catalog::MergePolicy;
use crate::matching::MatcherConfig;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// Every section is optional in a config file; missing values take their
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Search and lookup behavior
    pub matching: MatcherConfig,
    /// Where the catalog comes from
    pub catalog: CatalogConfig,
    /// Locality price multipliers
    pub locality: LocalityConfig,
    /// Output configuration (format, file, colors)
    pub output: OutputConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the catalog feed path.
    pub fn catalog_path(mut self, path: Option<PathBuf>) -> Self {
        self.config.catalog.path = path;
        self
    }

    /// Add a feed appended at startup.
    pub fn extra_feed(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.catalog.extra_feeds.push(path.into());
        self
    }

    /// Set the merge policy for extra feeds and refreshes.
    pub const fn merge_policy(mut self, policy: MergePolicy) -> Self {
        self.config.catalog.merge_policy = policy;
        self
    }

    /// Set the default search limit.
    pub const fn search_limit(mut self, limit: usize) -> Self {
        self.config.matching.search_limit = limit;
        self
    }

    /// Add or replace a locality multiplier.
    pub fn locality_multiplier(mut self, code: impl Into<String>, multiplier: f64) -> Self {
        self.config.locality.multipliers.insert(code.into(), multiplier);
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: OutputFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Disable colored output.
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    /// Build the `AppConfig`.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Section configurations
// ============================================================================

/// Catalog source configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CatalogConfig {
    /// JSON feed replacing the packaged dataset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// JSON feeds appended to the catalog at startup, in order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra_feeds: Vec<PathBuf>,
    /// How extra feeds and refreshes are merged
    pub merge_policy: MergePolicy,
}

/// Locality pricing configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LocalityConfig {
    /// Multipliers added to, or replacing entries of, the built-in table
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub multipliers: BTreeMap<String, f64>,
    /// Locality used when a command is given none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_locality: Option<String>,
}

/// Output format for command results.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned text table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Output-related configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: OutputFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Shortest accepted search query, in characters after trimming
    pub min_query_length: usize,
    /// Disable colored output
    pub no_color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            file: None,
            min_query_length: super::DEFAULT_MIN_QUERY_LENGTH,
            no_color: false,
        }
    }
}
