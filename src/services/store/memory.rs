//! In-memory history, lost when the process exits

use crate::domain::calculation::CalculationResult;
use crate::domain::history::History;
use crate::error::Result;
use crate::services::store::HistoryStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
    history: History,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing history
    pub fn with_history(history: History) -> Self {
        Self { history }
    }
}

impl HistoryStore for MemoryStore {
    fn put(&mut self, month: &str, result: &CalculationResult) -> Result<()> {
        self.history.put(month, result.clone());
        Ok(())
    }

    fn get_all(&mut self) -> History {
        self.history.clone()
    }

    fn clear(&mut self) -> Result<()> {
        self.history.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::calculation::calculate;
    use crate::domain::category::WasteCategory;
    use crate::domain::entry::WasteEntry;

    fn result_of(category: WasteCategory, quantity: f64) -> CalculationResult {
        calculate(&[WasteEntry::new(category, quantity).expect("valid")]).expect("calculate")
    }

    #[test]
    fn test_overwrite_and_clear() {
        let mut store = MemoryStore::new();
        let a = result_of(WasteCategory::Plastic, 1.0);
        let b = result_of(WasteCategory::Metal, 4.0);

        store.put("March 2025", &a).expect("put");
        store.put("March 2025", &b).expect("put");
        assert_eq!(store.get_all().get("March 2025"), Some(&b));

        store.clear().expect("clear");
        assert!(store.get_all().is_empty());
    }

    #[test]
    fn test_with_history() {
        let mut history = History::new();
        history.put("June 2025", result_of(WasteCategory::Glass, 2.0));
        let mut store = MemoryStore::with_history(history.clone());
        assert_eq!(store.get_all(), history);
    }
}
