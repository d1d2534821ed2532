//! Raw feed rows and their validation outcome.

use super::medicine::{MedicineRecord, SourceRef};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of a catalog feed, as it appears on the wire.
///
/// Every field is optional at this stage; [`RawMedicineRow::validate`]
/// decides whether the row becomes a catalog record. Unknown keys (such as
/// `regulatory_application` or `ndc_package` in regulatory exports) are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawMedicineRow {
    pub brand_name: Option<String>,
    pub generic_name: Option<String>,
    pub indications: Option<Vec<String>>,
    pub form: Option<String>,
    pub strength: Option<String>,
    pub average_brand_price: Option<f64>,
    pub average_generic_price: Option<f64>,
    pub notes: Option<String>,
    pub sources: Option<Vec<SourceRef>>,
}

/// Why a feed row was not admitted into the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// `brand_name` absent or blank
    MissingBrandName,
    /// `generic_name` absent or blank
    MissingGenericName,
    /// A price field was negative or not finite
    InvalidPrice { field: &'static str },
    /// The row did not have the expected shape
    Malformed(String),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingBrandName => write!(f, "missing brand_name"),
            Self::MissingGenericName => write!(f, "missing generic_name"),
            Self::InvalidPrice { field } => write!(f, "{field} must be a non-negative number"),
            Self::Malformed(msg) => write!(f, "malformed row: {msg}"),
        }
    }
}

/// Tagged result of validating a single feed row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Valid(MedicineRecord),
    Rejected(RejectReason),
}

impl RowOutcome {
    /// Classify an arbitrary JSON value as a feed row.
    #[must_use]
    pub fn from_value(value: serde_json::Value) -> Self {
        match serde_json::from_value::<RawMedicineRow>(value) {
            Ok(row) => row.validate(),
            Err(e) => Self::Rejected(RejectReason::Malformed(e.to_string())),
        }
    }

    /// Whether the row was accepted.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// The accepted record, if any.
    #[must_use]
    pub fn into_record(self) -> Option<MedicineRecord> {
        match self {
            Self::Valid(record) => Some(record),
            Self::Rejected(_) => None,
        }
    }
}

impl RawMedicineRow {
    /// Validate this row into a catalog record.
    ///
    /// Names are trimmed; a name that is blank after trimming counts as
    /// missing. Absent prices default to `0.0` (unknown).
    #[must_use]
    pub fn validate(self) -> RowOutcome {
        let Some(brand_name) = non_blank(self.brand_name) else {
            return RowOutcome::Rejected(RejectReason::MissingBrandName);
        };
        let Some(generic_name) = non_blank(self.generic_name) else {
            return RowOutcome::Rejected(RejectReason::MissingGenericName);
        };

        let average_brand_price = match checked_price(self.average_brand_price, "average_brand_price") {
            Ok(price) => price,
            Err(reason) => return RowOutcome::Rejected(reason),
        };
        let average_generic_price =
            match checked_price(self.average_generic_price, "average_generic_price") {
                Ok(price) => price,
                Err(reason) => return RowOutcome::Rejected(reason),
            };

        RowOutcome::Valid(MedicineRecord {
            brand_name,
            generic_name,
            indications: self.indications.unwrap_or_default(),
            form: self.form.unwrap_or_default(),
            strength: self.strength.unwrap_or_default(),
            average_brand_price,
            average_generic_price,
            notes: self.notes,
            sources: self.sources.unwrap_or_default(),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn checked_price(value: Option<f64>, field: &'static str) -> Result<f64, RejectReason> {
    match value {
        None => Ok(0.0),
        Some(price) if price.is_finite() && price >= 0.0 => Ok(price),
        Some(_) => Err(RejectReason::InvalidPrice { field }),
    }
}
