//! Waste Category - Closed Set of Loggable Waste Types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A household waste category
///
/// Serialized with its display name ("Food Waste"), which is also the key
/// used in persisted history records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WasteCategory {
    Plastic,
    Paper,
    #[serde(rename = "Food Waste")]
    FoodWaste,
    Glass,
    Cardboard,
    Textiles,
    Metal,
}

impl WasteCategory {
    /// All categories in selector order
    pub const ALL: [WasteCategory; 7] = [
        WasteCategory::Plastic,
        WasteCategory::Paper,
        WasteCategory::FoodWaste,
        WasteCategory::Glass,
        WasteCategory::Cardboard,
        WasteCategory::Textiles,
        WasteCategory::Metal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WasteCategory::Plastic => "Plastic",
            WasteCategory::Paper => "Paper",
            WasteCategory::FoodWaste => "Food Waste",
            WasteCategory::Glass => "Glass",
            WasteCategory::Cardboard => "Cardboard",
            WasteCategory::Textiles => "Textiles",
            WasteCategory::Metal => "Metal",
        }
    }
}

impl fmt::Display for WasteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WasteCategory {
    type Err = Error;

    /// Parse a category name, ignoring case and treating `_`/`-` as spaces
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace(['_', '-'], " ").to_lowercase();
        WasteCategory::ALL
            .into_iter()
            .find(|c| c.as_str().to_lowercase() == normalized)
            .ok_or_else(|| Error::UnknownCategory {
                category: s.trim().to_string(),
            })
    }
}
