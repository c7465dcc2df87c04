//! Calculation - Emissions Aggregation over Logged Entries

use hashlink::LinkedHashMap;
use serde::{Deserialize, Serialize};

use crate::constants::TOTAL_DECIMALS;
use crate::domain::category::WasteCategory;
use crate::domain::entry::WasteEntry;
use crate::domain::factors::EmissionFactorTable;
use crate::error::Result;

/// Result of one calculator run
///
/// `total` is rounded to two decimals; `by_category` keeps full precision and
/// lists categories in the order they first appear in `items`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CalculationResult {
    pub total: f64,
    pub by_category: LinkedHashMap<WasteCategory, f64>,
    pub items: Vec<WasteEntry>,
}

impl CalculationResult {
    /// Result of an empty entry list
    pub fn empty() -> Self {
        Self::default()
    }

    /// Sum of the unrounded subtotals
    pub fn unrounded_total(&self) -> f64 {
        self.by_category.values().sum()
    }

    /// Percentage of the total contributed by `category`
    pub fn share(&self, category: WasteCategory) -> Option<f64> {
        let subtotal = *self.by_category.get(&category)?;
        let sum = self.unrounded_total();
        if sum > 0.0 {
            Some(subtotal / sum * 100.0)
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Compute subtotals and the rounded grand total with an explicit factor table
pub fn calculate_with(
    entries: &[WasteEntry],
    table: &EmissionFactorTable,
) -> Result<CalculationResult> {
    let mut by_category: LinkedHashMap<WasteCategory, f64> = LinkedHashMap::new();
    let mut total = 0.0;

    for entry in entries {
        let emission = entry.emission(table)?;
        *by_category.entry(entry.category).or_insert(0.0) += emission;
        total += emission;
    }

    Ok(CalculationResult {
        total: round_to(total, TOTAL_DECIMALS),
        by_category,
        items: entries.to_vec(),
    })
}

/// Compute emissions with the standard factor table
pub fn calculate(entries: &[WasteEntry]) -> Result<CalculationResult> {
    calculate_with(entries, EmissionFactorTable::standard())
}

/// Round the exact binary value of `value` to `decimals` places
///
/// Ties go to the even digit, so `0.475` (stored just below the tie) gives
/// `0.47` and the exact tie `0.125` gives `0.12`.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{value:.decimals$}").parse().unwrap_or(value)
}
