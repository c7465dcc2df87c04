//! JSON file history
//!
//! The whole history is one JSON object keyed by month label:
//!
//! ```json
//! { "March 2025": { "total": 18.0,
//!                   "by_category": { "Plastic": 12.0, "Paper": 6.0 },
//!                   "items": [ { "category": "Plastic", "quantity": 2.0 } ] } }
//! ```
//!
//! Records written by older versions may lack `by_category` (and sometimes
//! `total`). They are rebuilt from `items` on read and the upgraded document
//! is written back.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use hashlink::LinkedHashMap;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::constants::TOTAL_DECIMALS;
use crate::domain::calculation::{CalculationResult, calculate, round_to};
use crate::domain::category::WasteCategory;
use crate::domain::entry::WasteEntry;
use crate::domain::history::History;
use crate::error::Result;
use crate::helpers::atomic_write;
use crate::services::store::HistoryStore;

/// A record as found on disk, before upgrading
#[derive(Debug, Deserialize)]
struct StoredRecord {
    #[serde(default)]
    total: Option<f64>,
    #[serde(default)]
    by_category: Option<LinkedHashMap<WasteCategory, f64>>,
    #[serde(default)]
    items: Option<Vec<WasteEntry>>,
}

/// Outcome of upgrading one stored record
enum Upgrade {
    Current(CalculationResult),
    Migrated(CalculationResult),
    Unrecoverable,
}

impl StoredRecord {
    fn upgrade(self) -> Upgrade {
        match (self.by_category, self.items) {
            (Some(by_category), items) => {
                let missing_total = self.total.is_none();
                let total = self.total.unwrap_or_else(|| {
                    round_to(by_category.values().sum(), TOTAL_DECIMALS)
                });
                let result = CalculationResult {
                    total,
                    by_category,
                    items: items.unwrap_or_default(),
                };
                if missing_total {
                    Upgrade::Migrated(result)
                } else {
                    Upgrade::Current(result)
                }
            }
            (None, Some(items)) => match calculate(&items) {
                Ok(result) => Upgrade::Migrated(result),
                Err(e) => {
                    warn!(error = %e, "Legacy record could not be recomputed");
                    Upgrade::Unrecoverable
                }
            },
            (None, None) => Upgrade::Unrecoverable,
        }
    }
}

/// History kept in a single JSON document on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and upgrade the document, reporting whether anything was migrated
    fn read(&self) -> Result<(History, bool)> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = ?self.path, "No history file yet");
                return Ok((History::new(), false));
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok((History::new(), false));
        }

        let raw: LinkedHashMap<String, StoredRecord> = serde_json::from_str(&content)?;
        let mut history = History::new();
        let mut migrated = false;

        for (month, record) in raw {
            match record.upgrade() {
                Upgrade::Current(result) => history.put(month, result),
                Upgrade::Migrated(result) => {
                    debug!(month = %month, "Rebuilt legacy history record");
                    history.put(month, result);
                    migrated = true;
                }
                Upgrade::Unrecoverable => {
                    warn!(month = %month, "Dropping history record without items or breakdown");
                }
            }
        }

        Ok((history, migrated))
    }

    fn write(&self, history: &History) -> Result<()> {
        let content = serde_json::to_string_pretty(history)?;
        atomic_write(&self.path, content.as_bytes())
    }
}

impl HistoryStore for JsonFileStore {
    fn put(&mut self, month: &str, result: &CalculationResult) -> Result<()> {
        let mut history = self.get_all();
        history.put(month, result.clone());
        self.write(&history)?;
        info!(month = %month, total = result.total, "Saved calculation to history");
        Ok(())
    }

    fn get_all(&mut self) -> History {
        match self.read() {
            Ok((history, migrated)) => {
                if migrated {
                    match self.write(&history) {
                        Ok(()) => info!(path = ?self.path, "Upgraded legacy history records"),
                        Err(e) => warn!(error = %e, "Failed to write upgraded history"),
                    }
                }
                history
            }
            Err(e) => {
                warn!(error = %e, path = ?self.path, "Unreadable history, treating as empty");
                History::new()
            }
        }
    }

    fn clear(&mut self) -> Result<()> {
        self.write(&History::new())?;
        info!(path = ?self.path, "Cleared history");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(category: WasteCategory, quantity: f64) -> WasteEntry {
        WasteEntry::new(category, quantity).expect("valid")
    }

    fn store_in(dir: &tempfile::TempDir) -> JsonFileStore {
        JsonFileStore::new(dir.path().join("carbon_wise_history.json"))
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = store_in(&dir);
        assert!(store.get_all().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_round_trip_is_lossless() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = calculate(&[
            entry(WasteCategory::FoodWaste, 1.37),
            entry(WasteCategory::Plastic, 0.1),
            entry(WasteCategory::FoodWaste, 0.25),
        ])
        .expect("calculate");

        store_in(&dir).put("March 2025", &result).expect("put");
        let history = store_in(&dir).get_all();

        assert_eq!(history.get("March 2025"), Some(&result));
    }

    #[test]
    fn test_put_overwrites_month_and_keeps_others() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = store_in(&dir);
        let a = calculate(&[entry(WasteCategory::Plastic, 1.0)]).expect("calculate");
        let b = calculate(&[entry(WasteCategory::Paper, 3.0)]).expect("calculate");
        let c = calculate(&[entry(WasteCategory::Glass, 2.0)]).expect("calculate");

        store.put("February 2025", &c).expect("put");
        store.put("March 2025", &a).expect("put");
        store.put("March 2025", &b).expect("put");

        let history = store.get_all();
        assert_eq!(history.len(), 2);
        assert_eq!(history.get("March 2025"), Some(&b));
        assert_eq!(history.get("February 2025"), Some(&c));
    }

    #[test]
    fn test_clear() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = store_in(&dir);
        let a = calculate(&[entry(WasteCategory::Metal, 1.0)]).expect("calculate");
        store.put("March 2025", &a).expect("put");

        store.clear().expect("clear");

        assert!(store.get_all().is_empty());
        assert_eq!(fs::read_to_string(store.path()).expect("read").trim(), "{}");
    }

    #[test]
    fn test_legacy_record_is_recomputed_and_written_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = store_in(&dir);
        fs::write(
            store.path(),
            r#"{"March 2025": {"items": [{"category": "Plastic", "quantity": 2}], "total": 12.0}}"#,
        )
        .expect("write");

        let history = store.get_all();
        let record = history.get("March 2025").expect("record");
        assert_eq!(record.by_category.get(&WasteCategory::Plastic), Some(&12.0));
        assert_eq!(record.by_category.len(), 1);
        assert_eq!(record.total, 12.0);

        let on_disk: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).expect("read"))
                .expect("json");
        assert_eq!(on_disk["March 2025"]["by_category"]["Plastic"], 12.0);
    }

    #[test]
    fn test_record_missing_total_gets_rounded_sum() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = store_in(&dir);
        fs::write(
            store.path(),
            r#"{"April 2025": {"by_category": {"Glass": 0.28305}, "items": []}}"#,
        )
        .expect("write");

        let history = store.get_all();
        assert_eq!(history.get("April 2025").map(|r| r.total), Some(0.28));
    }

    #[test]
    fn test_record_without_items_or_breakdown_is_dropped() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = store_in(&dir);
        fs::write(
            store.path(),
            r#"{"May 2025": {"total": 3.0}, "June 2025": {"items": [{"category": "Paper", "quantity": 1}]}}"#,
        )
        .expect("write");

        let history = store.get_all();
        assert_eq!(history.len(), 1);
        assert!(history.get("June 2025").is_some());
    }

    #[test]
    fn test_corrupt_file_is_empty_history() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = store_in(&dir);

        for garbage in [
            "{'March 2025': {'total': 1}}",
            "not json at all",
            r#"{"March 2025": {"items": [{"category": "Styrofoam", "quantity": 1}]}}"#,
            "[1, 2, 3]",
        ] {
            fs::write(store.path(), garbage).expect("write");
            assert!(store.get_all().is_empty(), "expected empty history for {garbage}");
        }
    }

    #[test]
    fn test_put_over_corrupt_file_starts_fresh() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = store_in(&dir);
        fs::write(store.path(), "garbage").expect("write");

        let a = calculate(&[entry(WasteCategory::Cardboard, 2.0)]).expect("calculate");
        store.put("March 2025", &a).expect("put");

        let history = store.get_all();
        assert_eq!(history.len(), 1);
        assert_eq!(history.get("March 2025"), Some(&a));
    }
}
