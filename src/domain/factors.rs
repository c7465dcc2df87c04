//! Emission Factors - kg CO2 emitted per kg of waste

use std::sync::OnceLock;

use hashlink::LinkedHashMap;

use crate::domain::category::WasteCategory;
use crate::error::{Error, Result};

/// Default factors, in selector order
const DEFAULT_FACTORS: [(WasteCategory, f64); 7] = [
    (WasteCategory::Plastic, 6.0),
    (WasteCategory::Paper, 1.2),
    (WasteCategory::FoodWaste, 1.9),
    (WasteCategory::Glass, 0.85),
    (WasteCategory::Cardboard, 1.0),
    (WasteCategory::Textiles, 5.0),
    (WasteCategory::Metal, 2.5),
];

static STANDARD_TABLE: OnceLock<EmissionFactorTable> = OnceLock::new();

/// Mapping from waste category to a positive emission factor
///
/// Immutable once built. The process-wide table is [`EmissionFactorTable::standard`].
#[derive(Debug, Clone, PartialEq)]
pub struct EmissionFactorTable {
    factors: LinkedHashMap<WasteCategory, f64>,
}

impl EmissionFactorTable {
    /// The fixed seven-category table
    pub fn standard() -> &'static EmissionFactorTable {
        STANDARD_TABLE.get_or_init(|| EmissionFactorTable {
            factors: DEFAULT_FACTORS.into_iter().collect(),
        })
    }

    /// Build a table from explicit factors
    ///
    /// Every factor must be finite and strictly positive.
    pub fn from_factors(
        factors: impl IntoIterator<Item = (WasteCategory, f64)>,
    ) -> Result<Self> {
        let mut table = LinkedHashMap::new();
        for (category, factor) in factors {
            if !factor.is_finite() || factor <= 0.0 {
                return Err(Error::Invalid {
                    message: format!("Emission factor for {category} must be positive, got {factor}"),
                });
            }
            table.replace(category, factor);
        }
        Ok(Self { factors: table })
    }

    /// Look up the factor of a category
    pub fn factor(&self, category: WasteCategory) -> Result<f64> {
        self.factors
            .get(&category)
            .copied()
            .ok_or_else(|| Error::UnknownCategory {
                category: category.to_string(),
            })
    }

    /// Categories covered by this table, in insertion order
    pub fn categories(&self) -> impl Iterator<Item = WasteCategory> + '_ {
        self.factors.keys().copied()
    }

    /// Iterate `(category, factor)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (WasteCategory, f64)> + '_ {
        self.factors.iter().map(|(c, f)| (*c, *f))
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }
}

impl Default for EmissionFactorTable {
    fn default() -> Self {
        Self::standard().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_values() {
        let table = EmissionFactorTable::standard();
        assert_eq!(table.len(), 7);
        assert_eq!(table.factor(WasteCategory::Plastic).ok(), Some(6.0));
        assert_eq!(table.factor(WasteCategory::Paper).ok(), Some(1.2));
        assert_eq!(table.factor(WasteCategory::FoodWaste).ok(), Some(1.9));
        assert_eq!(table.factor(WasteCategory::Glass).ok(), Some(0.85));
        assert_eq!(table.factor(WasteCategory::Cardboard).ok(), Some(1.0));
        assert_eq!(table.factor(WasteCategory::Textiles).ok(), Some(5.0));
        assert_eq!(table.factor(WasteCategory::Metal).ok(), Some(2.5));
    }

    #[test]
    fn test_standard_table_covers_every_category_in_order() {
        let categories: Vec<_> = EmissionFactorTable::standard().categories().collect();
        assert_eq!(categories, WasteCategory::ALL.to_vec());
    }

    #[test]
    fn test_missing_category_is_unknown() {
        let table = EmissionFactorTable::from_factors([(WasteCategory::Glass, 0.85)])
            .expect("valid table");
        let err = table.factor(WasteCategory::Metal).expect_err("missing");
        assert!(matches!(err, Error::UnknownCategory { .. }));
    }

    #[test]
    fn test_rejects_non_positive_factor() {
        assert!(EmissionFactorTable::from_factors([(WasteCategory::Paper, 0.0)]).is_err());
        assert!(EmissionFactorTable::from_factors([(WasteCategory::Paper, f64::NAN)]).is_err());
    }
}
