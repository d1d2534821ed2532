//! Catalog feeds: where raw rows come from.
//!
//! A feed produces a [`FeedBatch`] of classified rows plus metadata about
//! where they came from. The packaged dataset and JSON files on disk are
//! provided here; anything that fetches rows over the network should do so
//! up front and hand the result over as a feed, so the engine itself never
//! blocks on I/O while holding the catalog.

use crate::error::{ErrorContext, FeedErrorKind, MedMatchError, Result};
use crate::model::RowOutcome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// The packaged default dataset.
const DEFAULT_DATASET: &str = include_str!("../../data/medicines.json");

/// Parse a feed document (a JSON array of rows) and classify each row.
///
/// The document as a whole must be a JSON array; individual rows that are
/// malformed come back as [`RowOutcome::Rejected`] instead of failing the
/// whole feed.
pub fn parse_feed_str(json: &str) -> Result<Vec<RowOutcome>> {
    let value: Value = serde_json::from_str(json)?;
    parse_feed_value(value)
}

/// Classify the rows of an already-parsed feed document.
pub fn parse_feed_value(value: Value) -> Result<Vec<RowOutcome>> {
    match value {
        Value::Array(rows) => Ok(rows.into_iter().map(RowOutcome::from_value).collect()),
        _ => Err(MedMatchError::feed(
            "feed document",
            FeedErrorKind::NotAnArray,
        )),
    }
}

/// Provenance attached to a loaded feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedMetadata {
    /// When the batch was produced
    pub generated_at: DateTime<Utc>,
    /// Where the rows came from
    pub sources: Vec<String>,
    /// Human-readable notes about how the batch was produced
    pub notes: Vec<String>,
    /// Number of rows in the batch after any limit was applied
    pub records: usize,
}

impl FeedMetadata {
    /// Metadata stamped with the current time.
    pub fn now(source: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            generated_at: Utc::now(),
            sources: vec![source.into()],
            notes: vec![note.into()],
            records: 0,
        }
    }
}

/// Rows produced by a feed, already classified.
#[derive(Debug, Clone)]
pub struct FeedBatch {
    pub rows: Vec<RowOutcome>,
    pub metadata: FeedMetadata,
}

impl FeedBatch {
    /// Create a batch, recording the row count in the metadata.
    pub fn new(rows: Vec<RowOutcome>, mut metadata: FeedMetadata) -> Self {
        metadata.records = rows.len();
        Self { rows, metadata }
    }

    /// Keep at most `limit` rows.
    #[must_use]
    pub fn truncated(mut self, limit: Option<usize>) -> Self {
        if let Some(limit) = limit {
            self.rows.truncate(limit);
            self.metadata.records = self.rows.len();
        }
        self
    }
}

/// A source of catalog rows.
pub trait CatalogFeed: Send + Sync {
    /// Name of this feed, for logs and reports.
    fn name(&self) -> &str;

    /// Load and classify the feed's rows.
    fn load(&self) -> Result<FeedBatch>;
}

/// The dataset compiled into the binary.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedFeed {
    limit: Option<usize>,
}

impl EmbeddedFeed {
    /// The packaged default catalog.
    #[must_use]
    pub const fn default_catalog() -> Self {
        Self { limit: None }
    }

    /// Keep at most `limit` rows.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl CatalogFeed for EmbeddedFeed {
    fn name(&self) -> &str {
        "packaged dataset"
    }

    fn load(&self) -> Result<FeedBatch> {
        let rows = parse_feed_str(DEFAULT_DATASET).context("packaged dataset")?;
        let metadata = FeedMetadata::now(
            "data/medicines.json",
            "Using packaged medicine dataset.",
        );
        Ok(FeedBatch::new(rows, metadata).truncated(self.limit))
    }
}

/// A JSON feed document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileFeed {
    path: PathBuf,
    limit: Option<usize>,
}

impl JsonFileFeed {
    /// Feed reading the given JSON file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            limit: None,
        }
    }

    /// Keep at most `limit` rows.
    #[must_use]
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Path of the feed document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogFeed for JsonFileFeed {
    fn name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("json feed")
    }

    fn load(&self) -> Result<FeedBatch> {
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| MedMatchError::io(&self.path, e))?;
        let rows = parse_feed_str(&content)
            .with_context(|| format!("loading feed {}", self.path.display()))?;
        let metadata = FeedMetadata::now(
            self.path.display().to_string(),
            format!("Loaded from JSON feed {}.", self.path.display()),
        );
        Ok(FeedBatch::new(rows, metadata).truncated(self.limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RejectReason;

    #[test]
    fn test_parse_feed_classifies_rows() {
        let outcomes = parse_feed_str(
            r#"[
                {"brand_name": "Tylenol", "generic_name": "Acetaminophen"},
                {"brand_name": "NoGeneric"},
                "garbage"
            ]"#,
        )
        .expect("array parses");

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].is_valid());
        assert_eq!(
            outcomes[1],
            RowOutcome::Rejected(RejectReason::MissingGenericName)
        );
        assert!(matches!(
            outcomes[2],
            RowOutcome::Rejected(RejectReason::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_feed_requires_array() {
        let err = parse_feed_str(r#"{"brand_name": "Tylenol"}"#).unwrap_err();
        assert!(matches!(
            err,
            MedMatchError::Feed {
                source: FeedErrorKind::NotAnArray,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_feed_invalid_json() {
        let err = parse_feed_str("[{").unwrap_err();
        assert!(matches!(
            err,
            MedMatchError::Feed {
                source: FeedErrorKind::InvalidJson(_),
                ..
            }
        ));
    }

    #[test]
    fn test_embedded_feed_loads() {
        let batch = EmbeddedFeed::default_catalog().load().expect("embedded feed");
        assert!(batch.rows.iter().all(RowOutcome::is_valid));
        assert_eq!(batch.metadata.records, batch.rows.len());
        assert!(batch.metadata.records >= 20);
    }

    #[test]
    fn test_embedded_feed_limit() {
        let batch = EmbeddedFeed::default_catalog()
            .with_limit(3)
            .load()
            .expect("embedded feed");
        assert_eq!(batch.rows.len(), 3);
        assert_eq!(batch.metadata.records, 3);
    }

    #[test]
    fn test_json_file_feed() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("refresh.json");
        std::fs::write(
            &path,
            r#"[{"brand_name": "Brilinta", "generic_name": "Ticagrelor"}, {}]"#,
        )
        .unwrap();

        let feed = JsonFileFeed::new(&path);
        assert_eq!(feed.name(), "refresh.json");

        let batch = feed.load().expect("feed loads");
        assert_eq!(batch.rows.len(), 2);
        assert_eq!(batch.metadata.sources, vec![path.display().to_string()]);
    }

    #[test]
    fn test_json_file_feed_missing_file() {
        let err = JsonFileFeed::new("/nonexistent/feed.json").load().unwrap_err();
        assert!(matches!(err, MedMatchError::Io { .. }));
    }
}
