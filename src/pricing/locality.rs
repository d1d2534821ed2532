//! Locality price multipliers.

use crate::error::{MedMatchError, Result};
use crate::model::MedicineRecord;
use crate::utils::round2;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Reserved key covering every locality code not in the table.
pub const DEFAULT_LOCALITY: &str = "default";

/// Built-in regional multipliers, relative to the national average price.
const BUILTIN_MULTIPLIERS: &[(&str, f64)] = &[
    (DEFAULT_LOCALITY, 1.0),
    ("us-ny", 1.08),
    ("us-ca", 1.12),
    ("us-tx", 0.97),
    ("online-us", 0.94),
    ("ca-on", 1.05),
    ("in-ka", 0.88),
    ("in-mh", 0.90),
    ("online-in", 0.82),
];

/// Mapping from lower-cased locality code to a positive price multiplier.
///
/// Always contains the [`DEFAULT_LOCALITY`] key with multiplier `1.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalityTable {
    multipliers: IndexMap<String, f64>,
}

impl LocalityTable {
    /// The built-in table.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            multipliers: BUILTIN_MULTIPLIERS
                .iter()
                .map(|(code, m)| ((*code).to_string(), *m))
                .collect(),
        }
    }

    /// Add or replace entries.
    ///
    /// Codes are trimmed and lower-cased. Multipliers must be finite and
    /// positive, and the reserved default entry can only be set to `1.0`.
    pub fn with_overrides<I, S>(mut self, overrides: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        for (code, multiplier) in overrides {
            let code = code.as_ref().trim().to_lowercase();
            if code.is_empty() {
                return Err(MedMatchError::validation("locality code must not be empty"));
            }
            if !multiplier.is_finite() || multiplier <= 0.0 {
                return Err(MedMatchError::validation(format!(
                    "multiplier for '{code}' must be a positive number, got {multiplier}"
                )));
            }
            if code == DEFAULT_LOCALITY && (multiplier - 1.0).abs() > f64::EPSILON {
                return Err(MedMatchError::validation(format!(
                    "the '{DEFAULT_LOCALITY}' multiplier is fixed at 1.0"
                )));
            }
            self.multipliers.insert(code, multiplier);
        }
        Ok(self)
    }

    /// Look up a locality code, falling back to the default entry.
    #[must_use]
    pub fn resolve(&self, code: &str) -> LocalityAdjustment {
        let key = code.trim().to_lowercase();
        match self.multipliers.get(&key) {
            Some(&multiplier) => LocalityAdjustment {
                locality: key,
                multiplier,
            },
            None => LocalityAdjustment {
                locality: DEFAULT_LOCALITY.to_string(),
                multiplier: 1.0,
            },
        }
    }

    /// Entries in table order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, f64)> {
        self.multipliers.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of entries, including the default.
    #[must_use]
    pub fn len(&self) -> usize {
        self.multipliers.len()
    }

    /// Never true: the default entry is always present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.multipliers.is_empty()
    }
}

impl Default for LocalityTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// The locality and multiplier applied to a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalityAdjustment {
    pub locality: String,
    pub multiplier: f64,
}

/// A record with locality-adjusted prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedRecord {
    #[serde(flatten)]
    pub record: MedicineRecord,
    pub locality: LocalityAdjustment,
}

/// Scale both average prices by the locality multiplier.
///
/// Prices are rounded to two decimals. The input record is not modified;
/// unknown prices (`0.0`) stay `0.0`.
#[must_use]
pub fn adjust_prices(record: &MedicineRecord, table: &LocalityTable, code: &str) -> PricedRecord {
    let adjustment = table.resolve(code);
    let mut adjusted = record.clone();
    adjusted.average_brand_price = round2(record.average_brand_price * adjustment.multiplier);
    adjusted.average_generic_price = round2(record.average_generic_price * adjustment.multiplier);
    PricedRecord {
        record: adjusted,
        locality: adjustment,
    }
}
