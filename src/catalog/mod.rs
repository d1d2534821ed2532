//! The in-memory medicine catalog.
//!
//! A [`Catalog`] is built once from a feed and may later be extended with
//! rows from further feeds. Extension only ever appends: existing records
//! are never removed, replaced or reordered.
//!
//! ```ignore
//! use medmatch::catalog::{Catalog, CatalogFeed, EmbeddedFeed};
//!
//! let batch = EmbeddedFeed::default_catalog().load()?;
//! let mut catalog = Catalog::from_outcomes(batch.rows)?;
//! let report = catalog.extend_outcomes(more_rows, MergePolicy::SkipDuplicates);
//! println!("added {} records", report.added);
//! ```

mod feed;

pub use feed::{
    parse_feed_str, parse_feed_value, CatalogFeed, EmbeddedFeed, FeedBatch, FeedMetadata,
    JsonFileFeed,
};

use crate::error::{MedMatchError, Result};
use crate::model::{MedicineRecord, RawMedicineRow, RowOutcome};
use crate::utils::record_fingerprint;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How rows from a secondary feed are merged into the catalog.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum MergePolicy {
    /// Append every valid row, even when the same brand/generic pair is
    /// already present. Searches then return both entries.
    #[default]
    Append,
    /// Skip valid rows whose normalized brand and generic names both match
    /// a record already in the catalog.
    SkipDuplicates,
}

/// Counts from one extend operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendReport {
    /// Records appended
    pub added: usize,
    /// Rows that failed validation
    pub rejected: usize,
    /// Valid rows skipped by [`MergePolicy::SkipDuplicates`]
    pub skipped_duplicates: usize,
}

/// Ordered, never-empty collection of medicine records.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<MedicineRecord>,
    /// Record indices by fingerprint of the normalized (brand, generic) pair
    fingerprints: HashMap<u64, Vec<usize>>,
}

impl Catalog {
    /// Build a catalog from raw feed rows.
    ///
    /// Invalid rows are skipped. Fails with the empty-catalog error when no
    /// row is valid.
    pub fn build<I>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = RawMedicineRow>,
    {
        Self::from_outcomes(rows.into_iter().map(RawMedicineRow::validate))
    }

    /// Build a catalog from already-classified rows.
    pub fn from_outcomes<I>(outcomes: I) -> Result<Self>
    where
        I: IntoIterator<Item = RowOutcome>,
    {
        let mut catalog = Self {
            records: Vec::new(),
            fingerprints: HashMap::new(),
        };
        let report = catalog.extend_outcomes(outcomes, MergePolicy::Append);

        if catalog.records.is_empty() {
            return Err(MedMatchError::empty_catalog(report.rejected));
        }

        tracing::info!(
            records = catalog.records.len(),
            rejected = report.rejected,
            "catalog built"
        );
        Ok(catalog)
    }

    /// Append the valid rows, returning how many records were added.
    pub fn extend<I>(&mut self, rows: I) -> usize
    where
        I: IntoIterator<Item = RawMedicineRow>,
    {
        self.extend_outcomes(rows.into_iter().map(RawMedicineRow::validate), MergePolicy::Append)
            .added
    }

    /// Append already-classified rows under the given merge policy.
    pub fn extend_outcomes<I>(&mut self, outcomes: I, policy: MergePolicy) -> ExtendReport
    where
        I: IntoIterator<Item = RowOutcome>,
    {
        let mut report = ExtendReport::default();

        for (index, outcome) in outcomes.into_iter().enumerate() {
            let record = match outcome {
                RowOutcome::Valid(record) => record,
                RowOutcome::Rejected(reason) => {
                    tracing::debug!(row = index, %reason, "skipping feed row");
                    report.rejected += 1;
                    continue;
                }
            };

            let brand = record.normalized_brand();
            let generic = record.normalized_generic();
            if policy == MergePolicy::SkipDuplicates && self.contains_normalized(&brand, &generic) {
                tracing::debug!(
                    brand = %record.brand_name,
                    generic = %record.generic_name,
                    "skipping duplicate record"
                );
                report.skipped_duplicates += 1;
                continue;
            }

            self.fingerprints
                .entry(record_fingerprint(&brand, &generic))
                .or_default()
                .push(self.records.len());
            self.records.push(record);
            report.added += 1;
        }

        report
    }

    /// All records, in catalog order.
    #[must_use]
    pub fn records(&self) -> &[MedicineRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a constructed catalog; provided for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether a record with the same normalized brand and generic names exists.
    #[must_use]
    pub fn contains_pair(&self, brand_name: &str, generic_name: &str) -> bool {
        self.contains_normalized(
            &crate::matching::normalize(brand_name),
            &crate::matching::normalize(generic_name),
        )
    }

    /// Fingerprint lookup, confirmed against the stored names so a hash
    /// collision never counts as a duplicate.
    fn contains_normalized(&self, brand: &str, generic: &str) -> bool {
        self.fingerprints
            .get(&record_fingerprint(brand, generic))
            .is_some_and(|indices| {
                indices.iter().any(|&i| {
                    let existing = &self.records[i];
                    existing.normalized_brand() == brand && existing.normalized_generic() == generic
                })
            })
    }
}
