//! **Branded vs. generic medicine matching and ranking.**
//!
//! `medmatch` holds a catalog of branded medicines with their generic
//! equivalents, indications and average prices, and answers the questions a
//! patient or pharmacist asks of it: which medicine did I mean, what is its
//! generic, what else treats the same condition, and how much would switching
//! save.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: [`MedicineRecord`] and the raw feed rows it is validated from.
//! - **[`catalog`]**: the ordered, never-empty [`Catalog`] and the
//!   [`CatalogFeed`] sources that fill it.
//! - **[`matching`]**: name normalization and bounded similarity scoring.
//! - **[`engine`]**: [`MedicineMatcher`], the search, lookup and alternatives
//!   engine over a shared catalog snapshot.
//! - **[`pricing`]**: locality price multipliers and savings estimates.
//! - **[`config`]**: YAML configuration with discovery, presets and validation.
//! - **[`cli`]**: testable handlers behind the `medmatch` binary.
//!
//! ## Getting Started
//!
//! ```
//! use medmatch::MedicineMatcher;
//!
//! let matcher = MedicineMatcher::with_default_catalog()?;
//!
//! for record in matcher.search("lipitor", 3) {
//!     println!("{} -> {}", record.brand_name, record.generic_name);
//! }
//!
//! let lipitor = matcher.find_exact("Lipitor").expect("packaged record");
//! let cheaper = matcher.get_alternatives(&lipitor, 5);
//! assert!(cheaper.iter().all(|r| r.generic_name != lipitor.generic_name));
//! # Ok::<(), medmatch::MedMatchError>(())
//! ```
//!
//! ### Extending the catalog
//!
//! ```
//! use medmatch::{MedicineMatcher, RawMedicineRow};
//!
//! let matcher = MedicineMatcher::with_default_catalog()?;
//! let before = matcher.len();
//! let added = matcher.extend(vec![RawMedicineRow {
//!     brand_name: Some("Brilinta".into()),
//!     generic_name: Some("Ticagrelor".into()),
//!     ..Default::default()
//! }]);
//! assert_eq!(added, 1);
//! assert_eq!(matcher.len(), before + 1);
//! # Ok::<(), medmatch::MedMatchError>(())
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Record counts are averaged as f64
    clippy::cast_precision_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod catalog;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod matching;
pub mod model;
pub mod pricing;
pub mod utils;

// Re-export main types for convenience
pub use catalog::{
    Catalog, CatalogFeed, EmbeddedFeed, ExtendReport, FeedBatch, FeedMetadata, JsonFileFeed,
    MergePolicy,
};
pub use config::{AppConfig, AppConfigBuilder, ConfigError, ConfigPreset, Validatable};
pub use engine::{MatchedField, MedicineMatcher, MergeReport, ScoredMedicine};
pub use error::{ErrorContext, MedMatchError, Result};
pub use matching::{
    normalize, ExactMatchPriority, MatcherConfig, SimilarityAlgorithm, SimilarityScorer,
};
pub use model::{
    MedicineRecord, PriceAverages, RawMedicineRow, RejectReason, RowOutcome, SourceRef,
    SummaryStats,
};
pub use pricing::{adjust_prices, LocalityAdjustment, LocalityTable, PricedRecord, SavingsEstimate};
