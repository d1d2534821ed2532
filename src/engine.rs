//! The matching and ranking engine.
//!
//! [`MedicineMatcher`] owns the catalog and exposes the read operations
//! (search, exact lookup, alternatives, locality pricing, summary stats) plus
//! `extend`/`merge_feed`, the only operations that change the catalog.
//!
//! # Concurrency
//!
//! The catalog is held as a copy-on-write snapshot (`RwLock<Arc<Catalog>>`).
//! Reads clone the `Arc` under a short read lock and then work without any
//! lock held. Extends take the write lock, so they are serialized with each
//! other; a read that started before an extend keeps its old snapshot.
//!
//! # Example
//!
//! ```
//! use medmatch::MedicineMatcher;
//!
//! let matcher = MedicineMatcher::with_default_catalog()?;
//! let results = matcher.search("tylen", 5);
//! assert_eq!(results[0].brand_name, "Tylenol");
//!
//! let record = matcher.find_exact("acetaminophen").expect("known generic");
//! let priced = matcher.adjust_prices(&record, "us-ny");
//! assert_eq!(priced.locality.multiplier, 1.08);
//! # Ok::<(), medmatch::MedMatchError>(())
//! ```

use crate::catalog::{Catalog, CatalogFeed, EmbeddedFeed, ExtendReport, FeedMetadata, MergePolicy};
use crate::error::Result;
use crate::matching::{normalize, ExactMatchPriority, MatcherConfig, SimilarityScorer};
use crate::model::{MedicineRecord, RawMedicineRow, RowOutcome, SummaryStats};
use crate::pricing::{adjust_prices, LocalityTable, PricedRecord};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Which name of a record produced its search score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchedField {
    Brand,
    Generic,
}

/// A search hit with the score that ranked it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMedicine {
    #[serde(flatten)]
    pub record: MedicineRecord,
    /// `max(brand score, generic score)`, in `(0, 1]`
    pub score: f64,
    pub matched_field: MatchedField,
}

/// Outcome of merging a secondary feed into the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeReport {
    /// Name of the merged feed
    pub feed: String,
    pub added: usize,
    pub rejected: usize,
    pub skipped_duplicates: usize,
    /// Catalog size after the merge
    pub total_records: usize,
    pub metadata: FeedMetadata,
}

/// Search and comparison engine over a medicine catalog.
pub struct MedicineMatcher {
    catalog: RwLock<Arc<Catalog>>,
    scorer: Arc<dyn SimilarityScorer>,
    config: MatcherConfig,
    localities: LocalityTable,
    merge_policy: MergePolicy,
}

impl fmt::Debug for MedicineMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MedicineMatcher")
            .field("records", &self.len())
            .field("scorer", &self.scorer.name())
            .field("config", &self.config)
            .field("merge_policy", &self.merge_policy)
            .finish_non_exhaustive()
    }
}

impl MedicineMatcher {
    /// Create a matcher over a catalog with default configuration.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self::with_config(catalog, MatcherConfig::default())
    }

    /// Create a matcher with the given configuration.
    #[must_use]
    pub fn with_config(catalog: Catalog, config: MatcherConfig) -> Self {
        Self {
            catalog: RwLock::new(Arc::new(catalog)),
            scorer: Arc::new(config.algorithm),
            config,
            localities: LocalityTable::builtin(),
            merge_policy: MergePolicy::default(),
        }
    }

    /// Build the catalog from a feed and wrap it in a matcher.
    pub fn from_feed(feed: &dyn CatalogFeed, config: MatcherConfig) -> Result<Self> {
        let batch = feed.load()?;
        let catalog = Catalog::from_outcomes(batch.rows)?;
        Ok(Self::with_config(catalog, config))
    }

    /// A matcher over the packaged default dataset.
    pub fn with_default_catalog() -> Result<Self> {
        Self::from_feed(&EmbeddedFeed::default_catalog(), MatcherConfig::default())
    }

    /// Replace the similarity scorer.
    #[must_use]
    pub fn with_scorer(mut self, scorer: Arc<dyn SimilarityScorer>) -> Self {
        self.scorer = scorer;
        self
    }

    /// Replace the locality multiplier table.
    #[must_use]
    pub fn with_locality_table(mut self, table: LocalityTable) -> Self {
        self.localities = table;
        self
    }

    /// Set the policy used by `extend` and `merge_feed`.
    #[must_use]
    pub const fn with_merge_policy(mut self, policy: MergePolicy) -> Self {
        self.merge_policy = policy;
        self
    }

    /// Get the current configuration.
    #[must_use]
    pub const fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// The locality multiplier table.
    #[must_use]
    pub const fn localities(&self) -> &LocalityTable {
        &self.localities
    }

    /// Current catalog snapshot. Later extends do not affect it.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog.read().unwrap_or_else(PoisonError::into_inner))
    }

    // ========================================================================
    // Read operations
    // ========================================================================

    /// Rank catalog records against a free-text query.
    ///
    /// Records scoring zero on both names are dropped. Ties keep catalog
    /// order. A `limit` of zero returns nothing.
    #[must_use]
    pub fn search(&self, query: &str, limit: usize) -> Vec<MedicineRecord> {
        self.search_scored(query, limit)
            .into_iter()
            .map(|hit| hit.record)
            .collect()
    }

    /// Like [`search`](Self::search), keeping the score of each hit.
    #[must_use]
    pub fn search_scored(&self, query: &str, limit: usize) -> Vec<ScoredMedicine> {
        if limit == 0 {
            return Vec::new();
        }

        let normalized = normalize(query);
        let catalog = self.snapshot();
        let records = catalog.records();

        let score_record = |record: &MedicineRecord| -> Option<ScoredMedicine> {
            let brand = self.scorer.score(&normalized, &record.normalized_brand());
            let generic = self.scorer.score(&normalized, &record.normalized_generic());
            if brand == 0.0 && generic == 0.0 {
                return None;
            }
            let (score, matched_field) = if brand >= generic {
                (brand, MatchedField::Brand)
            } else {
                (generic, MatchedField::Generic)
            };
            Some(ScoredMedicine {
                record: record.clone(),
                score,
                matched_field,
            })
        };

        // Both paths yield hits in catalog order, which the stable sort
        // below relies on for tie-breaking.
        let mut hits: Vec<ScoredMedicine> = if records.len() >= self.config.parallel_threshold {
            records.par_iter().filter_map(score_record).collect()
        } else {
            records.iter().filter_map(score_record).collect()
        };

        let candidates = hits.len();
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(limit);

        tracing::debug!(
            query = %normalized,
            scorer = self.scorer.name(),
            candidates,
            returned = hits.len(),
            "search"
        );
        hits
    }

    /// Exact lookup by brand or generic name, after normalization.
    ///
    /// When several records match, the configured
    /// [`ExactMatchPriority`] decides which one is returned.
    #[must_use]
    pub fn find_exact(&self, name: &str) -> Option<MedicineRecord> {
        let key = normalize(name);
        if key.is_empty() {
            return None;
        }

        let catalog = self.snapshot();
        let records = catalog.records();
        let found = match self.config.exact_match_priority {
            ExactMatchPriority::CatalogOrder => records
                .iter()
                .find(|r| r.normalized_brand() == key || r.normalized_generic() == key),
            ExactMatchPriority::BrandFirst => records
                .iter()
                .find(|r| r.normalized_brand() == key)
                .or_else(|| records.iter().find(|r| r.normalized_generic() == key)),
        };
        found.cloned()
    }

    /// Records with a different generic that share an indication with `base`.
    ///
    /// Ordered by generic price ascending (unknown prices last), then brand
    /// name. A base without indications has no alternatives.
    #[must_use]
    pub fn get_alternatives(&self, base: &MedicineRecord, limit: usize) -> Vec<MedicineRecord> {
        if limit == 0 || base.indications.is_empty() {
            return Vec::new();
        }

        let catalog = self.snapshot();
        let mut candidates: Vec<&MedicineRecord> = catalog
            .records()
            .iter()
            .filter(|r| r.generic_name != base.generic_name && r.shares_indication_with(base))
            .collect();

        candidates.sort_by(|a, b| {
            generic_price_key(a)
                .total_cmp(&generic_price_key(b))
                .then_with(|| a.brand_name.cmp(&b.brand_name))
        });

        candidates.into_iter().take(limit).cloned().collect()
    }

    /// Resolve `name` with [`find_exact`](Self::find_exact) and list its
    /// alternatives. `None` when the name is unknown.
    #[must_use]
    pub fn alternatives_for(&self, name: &str, limit: usize) -> Option<Vec<MedicineRecord>> {
        self.find_exact(name)
            .map(|base| self.get_alternatives(&base, limit))
    }

    /// Scale a record's prices for a locality code.
    #[must_use]
    pub fn adjust_prices(&self, record: &MedicineRecord, locality: &str) -> PricedRecord {
        adjust_prices(record, &self.localities, locality)
    }

    /// Catalog size and price averages.
    #[must_use]
    pub fn summary_stats(&self) -> SummaryStats {
        SummaryStats::compute(self.snapshot().records())
    }

    /// Copy of every record, in catalog order.
    #[must_use]
    pub fn all_records(&self) -> Vec<MedicineRecord> {
        self.snapshot().records().to_vec()
    }

    /// Every brand name, in catalog order.
    #[must_use]
    pub fn brand_names(&self) -> Vec<String> {
        self.snapshot()
            .records()
            .iter()
            .map(|r| r.brand_name.clone())
            .collect()
    }

    /// Number of records in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    /// Never true: catalogs cannot be empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    // ========================================================================
    // Write operations
    // ========================================================================

    /// Append the valid rows, returning how many records were added.
    pub fn extend<I>(&self, rows: I) -> usize
    where
        I: IntoIterator<Item = RawMedicineRow>,
    {
        self.extend_outcomes(rows.into_iter().map(RawMedicineRow::validate))
            .added
    }

    /// Append already-classified rows under the configured merge policy.
    pub fn extend_outcomes<I>(&self, outcomes: I) -> ExtendReport
    where
        I: IntoIterator<Item = RowOutcome>,
    {
        self.extend_locked(outcomes).0
    }

    /// Extend under the write lock, returning the report and the catalog
    /// size as seen by this extend.
    fn extend_locked<I>(&self, outcomes: I) -> (ExtendReport, usize)
    where
        I: IntoIterator<Item = RowOutcome>,
    {
        let mut guard = self
            .catalog
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        // Clones only if a reader still holds the current snapshot.
        let catalog = Arc::make_mut(&mut guard);
        let report = catalog.extend_outcomes(outcomes, self.merge_policy);
        (report, catalog.len())
    }

    /// Load a feed and merge it into the catalog.
    ///
    /// The feed is loaded before the catalog lock is taken.
    pub fn merge_feed(&self, feed: &dyn CatalogFeed) -> Result<MergeReport> {
        let batch = feed.load()?;
        let (report, total_records) = self.extend_locked(batch.rows);

        tracing::info!(
            feed = feed.name(),
            added = report.added,
            rejected = report.rejected,
            skipped_duplicates = report.skipped_duplicates,
            total_records,
            "merged feed"
        );

        Ok(MergeReport {
            feed: feed.name().to_string(),
            added: report.added,
            rejected: report.rejected,
            skipped_duplicates: report.skipped_duplicates,
            total_records,
            metadata: batch.metadata,
        })
    }
}

/// Sort key treating an unknown (zero) generic price as infinitely expensive.
fn generic_price_key(record: &MedicineRecord) -> f64 {
    if record.average_generic_price > 0.0 {
        record.average_generic_price
    } else {
        f64::INFINITY
    }
}
