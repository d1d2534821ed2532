//! Annual savings estimates for switching from brand to generic.

use crate::error::{MedMatchError, Result};
use crate::utils::round2;
use serde::{Deserialize, Serialize};

/// Yearly cost comparison between a branded medicine and its generic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsEstimate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medicine_name: Option<String>,
    pub prescriptions_per_year: u32,
    pub brand_annual_cost: f64,
    pub generic_annual_cost: f64,
    pub annual_savings: f64,
    pub percentage_saved: f64,
}

impl SavingsEstimate {
    /// Estimate yearly costs and savings.
    ///
    /// All three inputs must be positive, and the yearly brand cost must be
    /// finite and at least one cent. Costs are rounded to cents; the
    /// percentage is taken from the unrounded costs.
    pub fn compute(brand_price: f64, generic_price: f64, prescriptions_per_year: u32) -> Result<Self> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(brand_price) || !positive(generic_price) || prescriptions_per_year == 0 {
            return Err(MedMatchError::validation(
                "Brand price, generic price, and prescriptions per year must be positive",
            ));
        }

        let per_year = f64::from(prescriptions_per_year);
        let brand_total = brand_price * per_year;
        let generic_total = generic_price * per_year;
        let brand_annual_cost = round2(brand_total);
        let generic_annual_cost = round2(generic_total);
        if !brand_annual_cost.is_finite() || !generic_annual_cost.is_finite() {
            return Err(MedMatchError::validation("Annual costs are too large to estimate"));
        }
        if brand_annual_cost <= 0.0 {
            return Err(MedMatchError::validation(
                "Brand annual cost must be at least 0.01",
            ));
        }
        let annual_savings = round2(brand_annual_cost - generic_annual_cost);

        Ok(Self {
            medicine_name: None,
            prescriptions_per_year,
            brand_annual_cost,
            generic_annual_cost,
            annual_savings,
            percentage_saved: round2((brand_total - generic_total) / brand_total * 100.0),
        })
    }

    /// Attach the medicine name for display.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.medicine_name = Some(name.into());
        self
    }
}
