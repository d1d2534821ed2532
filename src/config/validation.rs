//! Configuration validation.
//!
//! Provides the [`Validatable`] trait and implementations for every
//! configuration section.

use super::types::{AppConfig, CatalogConfig, LocalityConfig, OutputConfig};
use crate::matching::MatcherConfig;
use crate::pricing::DEFAULT_LOCALITY;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.matching.validate());
        errors.extend(self.catalog.validate());
        errors.extend(self.locality.validate());
        errors.extend(self.output.validate());
        errors
    }
}

impl Validatable for MatcherConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.search_limit == 0 {
            errors.push(ConfigError::new(
                "matching.search_limit",
                "Search limit must be at least 1",
            ));
        }
        if self.alternatives_limit == 0 {
            errors.push(ConfigError::new(
                "matching.alternatives_limit",
                "Alternatives limit must be at least 1",
            ));
        }
        if self.parallel_threshold == 0 {
            errors.push(ConfigError::new(
                "matching.parallel_threshold",
                "Parallel threshold must be at least 1",
            ));
        }
        errors
    }
}

impl Validatable for CatalogConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(ref path) = self.path {
            if path.as_os_str().is_empty() {
                errors.push(ConfigError::new("catalog.path", "Catalog path must not be empty"));
            }
        }
        for (index, feed) in self.extra_feeds.iter().enumerate() {
            if feed.as_os_str().is_empty() {
                errors.push(ConfigError::new(
                    format!("catalog.extra_feeds[{index}]"),
                    "Feed path must not be empty",
                ));
            }
        }
        errors
    }
}

impl Validatable for LocalityConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        for (code, &multiplier) in &self.multipliers {
            let field = format!("locality.multipliers.{code}");
            let normalized = code.trim().to_lowercase();
            if normalized.is_empty() {
                errors.push(ConfigError::new(field, "Locality code must not be empty"));
                continue;
            }
            if !multiplier.is_finite() || multiplier <= 0.0 {
                errors.push(ConfigError::new(
                    field,
                    format!("Multiplier must be a positive number, got {multiplier}"),
                ));
            } else if normalized == DEFAULT_LOCALITY && (multiplier - 1.0).abs() > f64::EPSILON {
                errors.push(ConfigError::new(
                    field,
                    format!("The '{DEFAULT_LOCALITY}' multiplier is fixed at 1.0"),
                ));
            }
        }

        if let Some(ref code) = self.default_locality {
            if code.trim().is_empty() {
                errors.push(ConfigError::new(
                    "locality.default_locality",
                    "Default locality must not be empty",
                ));
            }
        }

        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(ref file_path) = self.file {
            if let Some(parent) = file_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    errors.push(ConfigError::new(
                        "output.file",
                        format!("Parent directory does not exist: {}", parent.display()),
                    ));
                }
            }
        }

        if self.min_query_length == 0 {
            errors.push(ConfigError::new(
                "output.min_query_length",
                "Minimum query length must be at least 1",
            ));
        }

        errors
    }
}
