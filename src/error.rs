//! Unified error types for medmatch.
//!
//! Construction-time failures (an empty catalog, an unreadable feed) are
//! surfaced as errors. Per-row problems in a feed are not: they become
//! [`RowOutcome::Rejected`](crate::model::RowOutcome) values and are skipped.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for medmatch operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MedMatchError {
    /// Errors building or extending the catalog
    #[error("Catalog error: {context}")]
    Catalog {
        context: String,
        #[source]
        source: CatalogErrorKind,
    },

    /// Errors reading a catalog feed document
    #[error("Failed to read feed: {context}")]
    Feed {
        context: String,
        #[source]
        source: FeedErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific catalog error kinds
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogErrorKind {
    #[error("no valid medicine records in feed ({rejected} rows rejected)")]
    Empty { rejected: usize },
}

/// Specific feed error kinds
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FeedErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Feed document must be a JSON array of rows")]
    NotAnArray,
}

/// Convenience type alias for Results with `MedMatchError`
pub type Result<T> = std::result::Result<T, MedMatchError>;

impl MedMatchError {
    /// Create a catalog error
    pub fn catalog(context: impl Into<String>, source: CatalogErrorKind) -> Self {
        Self::Catalog {
            context: context.into(),
            source,
        }
    }

    /// Create the empty-catalog construction error
    pub fn empty_catalog(rejected: usize) -> Self {
        Self::catalog(
            "catalog construction",
            CatalogErrorKind::Empty { rejected },
        )
    }

    /// Create a feed error
    pub fn feed(context: impl Into<String>, source: FeedErrorKind) -> Self {
        Self::Feed {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let message = format!("{source}");
        Self::Io {
            path: Some(path.into()),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// True when this is the fatal "no valid rows" construction error.
    ///
    /// Callers must not retry with the same input when this is set.
    #[must_use]
    pub const fn is_empty_catalog(&self) -> bool {
        matches!(
            self,
            Self::Catalog {
                source: CatalogErrorKind::Empty { .. },
                ..
            }
        )
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for MedMatchError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for MedMatchError {
    fn from(err: serde_json::Error) -> Self {
        Self::feed(
            "JSON deserialization",
            FeedErrorKind::InvalidJson(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// The new context is prepended to whatever context the error already
/// carries, producing a chain like `"loading feed x.json: JSON deserialization"`.
///
/// ```ignore
/// use medmatch::error::ErrorContext;
///
/// let raw = std::fs::read_to_string(path)
///     .with_context(|| format!("reading feed {}", path.display()))?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<MedMatchError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: MedMatchError, new_ctx: &str) -> MedMatchError {
    match err {
        MedMatchError::Catalog {
            context: existing,
            source,
        } => MedMatchError::Catalog {
            context: chain_context(new_ctx, &existing),
            source,
        },
        MedMatchError::Feed {
            context: existing,
            source,
        } => MedMatchError::Feed {
            context: chain_context(new_ctx, &existing),
            source,
        },
        MedMatchError::Io {
            path,
            message,
            source,
        } => MedMatchError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        MedMatchError::Config(msg) => MedMatchError::Config(chain_context(new_ctx, &msg)),
        MedMatchError::Validation(msg) => MedMatchError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}
