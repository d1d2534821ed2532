//! Catalog summary statistics.

use super::medicine::MedicineRecord;
use crate::utils::round2;
use serde::{Deserialize, Serialize};

/// Average prices over records that carry both prices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceAverages {
    pub average_brand_price: f64,
    pub average_generic_price: f64,
    pub average_savings: f64,
}

/// Summary of the catalog for landing pages and `stats` output.
///
/// `pricing` is absent when no record has both prices set. That is a
/// distinct signal from "zero savings", so serialization omits the three
/// average fields entirely instead of writing zeros.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total_count: usize,
    #[serde(flatten)]
    pub pricing: Option<PriceAverages>,
}

impl SummaryStats {
    /// Compute summary statistics over a slice of records.
    #[must_use]
    pub fn compute(records: &[MedicineRecord]) -> Self {
        let priced: Vec<(f64, f64)> = records
            .iter()
            .filter(|r| r.has_complete_pricing())
            .map(|r| (r.average_brand_price, r.average_generic_price))
            .collect();

        if priced.is_empty() {
            return Self {
                total_count: records.len(),
                pricing: None,
            };
        }

        let n = priced.len() as f64;
        let average_brand_price = round2(priced.iter().map(|p| p.0).sum::<f64>() / n);
        let average_generic_price = round2(priced.iter().map(|p| p.1).sum::<f64>() / n);

        Self {
            total_count: records.len(),
            pricing: Some(PriceAverages {
                average_brand_price,
                average_generic_price,
                average_savings: round2(average_brand_price - average_generic_price),
            }),
        }
    }
}
