//! Data model for the medicine catalog.
//!
//! Feed documents deserialize into [`RawMedicineRow`], which is validated into
//! a [`RowOutcome`]: either a [`MedicineRecord`] ready for the catalog or a
//! [`RejectReason`] explaining why the row was skipped.
//!
//! ```ignore
//! let outcome = RawMedicineRow {
//!     brand_name: Some("Tylenol".into()),
//!     generic_name: Some("Acetaminophen".into()),
//!     ..Default::default()
//! }
//! .validate();
//! assert!(outcome.is_valid());
//! ```

mod medicine;
mod raw;
mod stats;

pub use medicine::{MedicineRecord, SourceRef};
pub use raw::{RawMedicineRow, RejectReason, RowOutcome};
pub use stats::{PriceAverages, SummaryStats};
