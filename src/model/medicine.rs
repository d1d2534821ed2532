//! Validated medicine records.

use crate::matching::normalize;
use serde::{Deserialize, Serialize};

/// A citation for where a record's data came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceRef {
    /// Human-readable source name
    pub name: String,
    /// Link to the source
    pub url: String,
}

impl SourceRef {
    /// Create a new source reference
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// A branded medicine and its generic equivalent.
///
/// Records only enter the catalog through feed validation, which guarantees
/// non-empty brand and generic names and non-negative prices. A price of
/// `0.0` means "unknown", not free.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicineRecord {
    /// Trade name
    pub brand_name: String,
    /// Chemical or therapeutic equivalent name
    pub generic_name: String,
    /// Therapeutic use tags, in display order
    #[serde(default)]
    pub indications: Vec<String>,
    /// Dosage form (free text)
    #[serde(default)]
    pub form: String,
    /// Strength (free text)
    #[serde(default)]
    pub strength: String,
    /// Average branded price, 0 when unknown
    #[serde(default)]
    pub average_brand_price: f64,
    /// Average generic price, 0 when unknown
    #[serde(default)]
    pub average_generic_price: f64,
    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Data sources, in display order
    #[serde(default)]
    pub sources: Vec<SourceRef>,
}

impl MedicineRecord {
    /// Create a record with only the two required names set.
    pub fn new(brand_name: impl Into<String>, generic_name: impl Into<String>) -> Self {
        Self {
            brand_name: brand_name.into(),
            generic_name: generic_name.into(),
            indications: Vec::new(),
            form: String::new(),
            strength: String::new(),
            average_brand_price: 0.0,
            average_generic_price: 0.0,
            notes: None,
            sources: Vec::new(),
        }
    }

    /// Set the indications.
    #[must_use]
    pub fn with_indications<I, S>(mut self, indications: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.indications = indications.into_iter().map(Into::into).collect();
        self
    }

    /// Set the brand and generic average prices.
    #[must_use]
    pub fn with_prices(mut self, brand: f64, generic: f64) -> Self {
        self.average_brand_price = brand;
        self.average_generic_price = generic;
        self
    }

    /// Set form and strength.
    #[must_use]
    pub fn with_form(mut self, form: impl Into<String>, strength: impl Into<String>) -> Self {
        self.form = form.into();
        self.strength = strength.into();
        self
    }

    /// Normalized brand name, computed on demand.
    #[must_use]
    pub fn normalized_brand(&self) -> String {
        normalize(&self.brand_name)
    }

    /// Normalized generic name, computed on demand.
    #[must_use]
    pub fn normalized_generic(&self) -> String {
        normalize(&self.generic_name)
    }

    /// Whether both prices are known (non-zero).
    #[must_use]
    pub fn has_complete_pricing(&self) -> bool {
        self.average_brand_price > 0.0 && self.average_generic_price > 0.0
    }

    /// Whether the two records share at least one indication.
    #[must_use]
    pub fn shares_indication_with(&self, other: &Self) -> bool {
        self.indications
            .iter()
            .any(|ind| other.indications.contains(ind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_names() {
        let record = MedicineRecord::new("Tylenol Extra-Strength", "Acetaminophen");
        assert_eq!(record.normalized_brand(), "tylenolextrastrength");
        assert_eq!(record.normalized_generic(), "acetaminophen");
    }

    #[test]
    fn test_complete_pricing() {
        let record = MedicineRecord::new("A", "B");
        assert!(!record.has_complete_pricing());
        assert!(!record.clone().with_prices(10.0, 0.0).has_complete_pricing());
        assert!(record.with_prices(10.0, 2.5).has_complete_pricing());
    }

    #[test]
    fn test_shares_indication() {
        let a = MedicineRecord::new("A", "a").with_indications(["pain", "fever"]);
        let b = MedicineRecord::new("B", "b").with_indications(["fever"]);
        let c = MedicineRecord::new("C", "c").with_indications(["asthma"]);
        let none = MedicineRecord::new("D", "d");

        assert!(a.shares_indication_with(&b));
        assert!(!a.shares_indication_with(&c));
        assert!(!none.shares_indication_with(&a));
    }

    #[test]
    fn test_serializes_snake_case_fields() {
        let record = MedicineRecord::new("Tylenol", "Acetaminophen").with_prices(12.5, 4.0);
        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(json["brand_name"], "Tylenol");
        assert_eq!(json["average_generic_price"], 4.0);
        assert!(json.get("notes").is_none());
    }
}
