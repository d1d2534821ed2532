//! Configuration module for medmatch.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named presets
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust
//! use medmatch::config::{AppConfig, ConfigPreset, Validatable};
//!
//! // Use a preset
//! let config = AppConfig::from_preset(ConfigPreset::Dedup);
//! assert!(config.is_valid());
//!
//! // Use builder
//! let config = AppConfig::builder()
//!     .search_limit(5)
//!     .locality_multiplier("eu-de", 1.15)
//!     .build();
//! assert_eq!(config.matching.search_limit, 5);
//! ```
//!
//! # Configuration File
//!
//! Place a `.medmatch.yaml` file in the working directory or `~/.config/medmatch/`:
//!
//! ```yaml
//! matching:
//!   exact_match_priority: catalog-order
//! catalog:
//!   merge_policy: skip-duplicates
//! locality:
//!   multipliers:
//!     eu-de: 1.15
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    ConfigPreset, DEFAULT_ALTERNATIVES_LIMIT, DEFAULT_MIN_QUERY_LENGTH, DEFAULT_SEARCH_LIMIT,
};
pub use types::{
    AppConfig, AppConfigBuilder, CatalogConfig, LocalityConfig, OutputConfig, OutputFormat,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, generate_full_example_config, load_config_file,
    load_or_default, user_config_dir, ConfigFileError,
};

use crate::catalog::{CatalogFeed, EmbeddedFeed, JsonFileFeed};
use crate::engine::MedicineMatcher;
use crate::error::{MedMatchError, Result};
use crate::pricing::LocalityTable;

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.medmatch.yaml` config files.
pub fn generate_json_schema() -> Result<String> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
        .map_err(|e| MedMatchError::config(format!("schema serialization failed: {e}")))
}

impl AppConfig {
    /// Validate and turn validation errors into a single error.
    pub fn ensure_valid(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            return Ok(());
        }
        let joined = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(MedMatchError::config(joined))
    }

    /// The locality table with this config's overrides applied.
    pub fn locality_table(&self) -> Result<LocalityTable> {
        LocalityTable::builtin().with_overrides(
            self.locality
                .multipliers
                .iter()
                .map(|(code, m)| (code.as_str(), *m)),
        )
    }

    /// Build a matcher: load the primary feed, then append every extra feed.
    pub fn build_matcher(&self) -> Result<MedicineMatcher> {
        self.ensure_valid()?;

        let primary: Box<dyn CatalogFeed> = match self.catalog.path {
            Some(ref path) => Box::new(JsonFileFeed::new(path)),
            None => Box::new(EmbeddedFeed::default_catalog()),
        };

        let matcher = MedicineMatcher::from_feed(primary.as_ref(), self.matching.clone())?
            .with_locality_table(self.locality_table()?)
            .with_merge_policy(self.catalog.merge_policy);

        for path in &self.catalog.extra_feeds {
            matcher.merge_feed(&JsonFileFeed::new(path))?;
        }

        Ok(matcher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_lists_sections() {
        let schema = generate_json_schema().unwrap();
        assert!(schema.contains("matching"));
        assert!(schema.contains("merge_policy"));
        assert!(schema.contains("min_query_length"));
    }

    #[test]
    fn test_build_matcher_default() {
        let matcher = AppConfig::default().build_matcher().unwrap();
        assert!(matcher.len() >= 20);
        assert!(matcher.find_exact("Tylenol").is_some());
    }

    #[test]
    fn test_build_matcher_rejects_invalid_config() {
        let mut config = AppConfig::default();
        config.matching.search_limit = 0;
        let err = config.build_matcher().unwrap_err();
        assert!(matches!(err, MedMatchError::Config(_)));
    }

    #[test]
    fn test_build_matcher_with_feeds() {
        let tmp = tempfile::TempDir::new().unwrap();
        let primary = tmp.path().join("primary.json");
        let extra = tmp.path().join("extra.json");
        std::fs::write(
            &primary,
            r#"[{"brand_name": "Tylenol", "generic_name": "Acetaminophen"}]"#,
        )
        .unwrap();
        std::fs::write(
            &extra,
            r#"[{"brand_name": "Tylenol", "generic_name": "Acetaminophen"},
                {"brand_name": "Advil", "generic_name": "Ibuprofen"}]"#,
        )
        .unwrap();

        let config = AppConfig::builder()
            .catalog_path(Some(primary))
            .extra_feed(&extra)
            .merge_policy(crate::catalog::MergePolicy::SkipDuplicates)
            .locality_multiplier("eu-de", 1.15)
            .build();

        let matcher = config.build_matcher().unwrap();
        assert_eq!(matcher.brand_names(), vec!["Tylenol", "Advil"]);
        assert_eq!(matcher.localities().resolve("EU-DE").multiplier, 1.15);
    }
}
