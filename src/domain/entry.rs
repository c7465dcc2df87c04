//! Waste Entry - One Logged Item

use serde::{Deserialize, Serialize};

use crate::domain::category::WasteCategory;
use crate::domain::factors::EmissionFactorTable;
use crate::error::{Error, Result};

/// A single logged waste item (kg)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WasteEntry {
    pub category: WasteCategory,
    pub quantity: f64,
}

impl WasteEntry {
    /// Create an entry from user input
    ///
    /// Quantities must be finite and strictly positive.
    pub fn new(category: WasteCategory, quantity: f64) -> Result<Self> {
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(Error::InvalidQuantity { quantity });
        }
        Ok(Self { category, quantity })
    }

    /// CO2 emitted by this entry alone (unrounded)
    pub fn emission(&self, table: &EmissionFactorTable) -> Result<f64> {
        Ok(self.quantity * table.factor(self.category)?)
    }
}
