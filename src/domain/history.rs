//! History - Month-Keyed Calculation Results

use hashlink::LinkedHashMap;
use serde::{Deserialize, Serialize};

use crate::domain::calculation::CalculationResult;
use crate::domain::month::month_sort_key;

/// Mapping from month label to the latest result of that month
///
/// Writes to an existing month replace the previous result.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    months: LinkedHashMap<String, CalculationResult>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `result` under `month`, replacing any previous result
    pub fn put(&mut self, month: impl Into<String>, result: CalculationResult) {
        self.months.replace(month.into(), result);
    }

    pub fn get(&self, month: &str) -> Option<&CalculationResult> {
        self.months.get(month)
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn clear(&mut self) {
        self.months.clear();
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CalculationResult)> {
        self.months.iter().map(|(m, r)| (m.as_str(), r))
    }

    /// Entries ordered newest month first
    pub fn newest_first(&self) -> Vec<(&str, &CalculationResult)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by_key(|(month, _)| std::cmp::Reverse(month_sort_key(month)));
        entries
    }

    /// The most recent month and its result
    pub fn latest(&self) -> Option<(&str, &CalculationResult)> {
        self.iter().max_by_key(|(month, _)| month_sort_key(month))
    }
}

impl FromIterator<(String, CalculationResult)> for History {
    fn from_iter<I: IntoIterator<Item = (String, CalculationResult)>>(iter: I) -> Self {
        let mut history = History::new();
        for (month, result) in iter {
            history.put(month, result);
        }
        history
    }
}
