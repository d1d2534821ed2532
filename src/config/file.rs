//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use crate::catalog::MergePolicy;
use crate::matching::MatcherConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".medmatch.yaml",
    ".medmatch.yml",
    "medmatch.yaml",
    "medmatch.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. User config directory (~/.config/medmatch/)
/// 4. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if let Some(path) = find_config_in_dir(&cwd) {
            return Some(path);
        }
    }

    if let Some(config_dir) = user_config_dir() {
        if let Some(path) = find_config_in_dir(&config_dir) {
            return Some(path);
        }
    }

    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// The per-user config directory, `~/.config/medmatch` on Linux.
#[must_use]
pub fn user_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("medmatch"))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// File not found
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// IO error reading file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// YAML parsing error
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Only values that differ from the defaults override. Extra feeds and
    /// locality multipliers are added to the existing ones.
    pub fn merge(&mut self, other: &Self) {
        // Matching config
        let defaults = MatcherConfig::default();
        if other.matching.algorithm != defaults.algorithm {
            self.matching.algorithm = other.matching.algorithm;
        }
        if other.matching.search_limit != defaults.search_limit {
            self.matching.search_limit = other.matching.search_limit;
        }
        if other.matching.alternatives_limit != defaults.alternatives_limit {
            self.matching.alternatives_limit = other.matching.alternatives_limit;
        }
        if other.matching.exact_match_priority != defaults.exact_match_priority {
            self.matching.exact_match_priority = other.matching.exact_match_priority;
        }
        if other.matching.parallel_threshold != defaults.parallel_threshold {
            self.matching.parallel_threshold = other.matching.parallel_threshold;
        }

        // Catalog config
        if other.catalog.path.is_some() {
            self.catalog.path.clone_from(&other.catalog.path);
        }
        self.catalog
            .extra_feeds
            .extend(other.catalog.extra_feeds.iter().cloned());
        if other.catalog.merge_policy != MergePolicy::Append {
            self.catalog.merge_policy = other.catalog.merge_policy;
        }

        // Locality config
        self.locality.multipliers.extend(
            other
                .locality
                .multipliers
                .iter()
                .map(|(code, m)| (code.clone(), *m)),
        );
        if other.locality.default_locality.is_some() {
            self.locality
                .default_locality
                .clone_from(&other.locality.default_locality);
        }

        // Output config - only override if explicitly set
        if other.output.format != super::OutputFormat::default() {
            self.output.format = other.output.format;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        if other.output.min_query_length != super::DEFAULT_MIN_QUERY_LENGTH {
            self.output.min_query_length = other.output.min_query_length;
        }
        if other.output.no_color {
            self.output.no_color = true;
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content from the defaults.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# medmatch configuration
# Place this file at .medmatch.yaml in your working directory or ~/.config/medmatch/

{}
",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# medmatch Configuration File
# ============================
#
# Place it at:
#   - .medmatch.yaml in the working directory
#   - ~/.config/medmatch/medmatch.yaml for per-user config
#
# CLI arguments always override file settings.

# Search and lookup
matching:
  # Algorithm for non-substring matches: sequence-ratio, levenshtein, jaro-winkler
  algorithm: sequence-ratio
  # Results returned by `search` when --limit is not given
  search_limit: 10
  # Results returned by `alternatives` when --limit is not given
  alternatives_limit: 5
  # Exact lookup tie policy: brand-first, catalog-order
  exact_match_priority: brand-first
  # Catalog size at which search scoring runs in parallel
  parallel_threshold: 2048

# Catalog sources
catalog:
  # JSON feed replacing the packaged dataset
  # path: ./medicines.json
  # Feeds appended at startup, in order
  # extra_feeds:
  #   - ./regulatory-refresh.json
  # Merge policy for extra feeds and refreshes: append, skip-duplicates
  merge_policy: append

# Locality pricing
locality:
  # Added to the built-in table; `default` is fixed at 1.0
  multipliers: {}
  # multipliers:
  #   eu-de: 1.15
  # Locality used when a command is given none
  # default_locality: us-ny

# Output configuration
output:
  # Format: table, json
  format: table
  # Output file path (omit for stdout)
  # file: results.json
  # Shortest accepted search query
  min_query_length: 2
  # Disable colored output
  no_color: false
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================
