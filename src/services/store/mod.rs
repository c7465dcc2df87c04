//! History Stores
//!
//! A history store keeps the latest [`CalculationResult`] per month label.
//! Backends differ only in where the mapping lives:
//!
//! ```text
//! ┌───────────────────┐   put / get_all / clear   ┌──────────────────────┐
//! │   SessionState    │ ────────────────────────▶ │  dyn HistoryStore    │
//! └───────────────────┘                           │  ├─ MemoryStore      │
//!                                                 │  ├─ JsonFileStore    │
//!                                                 │  └─ MonthlyLogged<S> │
//!                                                 └──────────────────────┘
//! ```

mod json_file;
mod memory;
mod monthly_log;

pub use json_file::*;
pub use memory::*;
pub use monthly_log::*;

use std::path::PathBuf;

use crate::constants::{HISTORY_KEY, MONTHLY_LOG_FILE};
use crate::domain::calculation::CalculationResult;
use crate::domain::config::{StorageBackend, StorageConfig};
use crate::domain::history::History;
use crate::error::Result;
use crate::helpers::get_or_create_data_dir;

/// Month-keyed persistence of calculation results
pub trait HistoryStore: Send {
    /// Store `result` for `month`, replacing whatever was there
    fn put(&mut self, month: &str, result: &CalculationResult) -> Result<()>;

    /// Every stored month
    ///
    /// Unreadable storage is reported as an empty history, never as an error.
    fn get_all(&mut self) -> History;

    /// Remove every stored month
    fn clear(&mut self) -> Result<()>;
}

impl<S: HistoryStore + ?Sized> HistoryStore for Box<S> {
    fn put(&mut self, month: &str, result: &CalculationResult) -> Result<()> {
        (**self).put(month, result)
    }

    fn get_all(&mut self) -> History {
        (**self).get_all()
    }

    fn clear(&mut self) -> Result<()> {
        (**self).clear()
    }
}

/// Default location of the JSON history document
pub fn default_history_path() -> Result<PathBuf> {
    Ok(get_or_create_data_dir()?.join(format!("{HISTORY_KEY}.json")))
}

/// Default location of the flat monthly log
pub fn default_monthly_log_path() -> Result<PathBuf> {
    Ok(get_or_create_data_dir()?.join(MONTHLY_LOG_FILE))
}

/// Open the store described by `config`
pub fn open_history_store(config: &StorageConfig) -> Result<Box<dyn HistoryStore>> {
    let store: Box<dyn HistoryStore> = match config.backend {
        StorageBackend::Memory => Box::new(MemoryStore::new()),
        StorageBackend::Json => {
            let path = match &config.history_path {
                Some(path) => path.clone(),
                None => default_history_path()?,
            };
            Box::new(JsonFileStore::new(path))
        }
    };

    if config.monthly_log {
        let log = MonthlyTotalsLog::new(default_monthly_log_path()?);
        return Ok(Box::new(MonthlyLogged::new(store, log)));
    }

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::calculation::calculate;
    use crate::domain::category::WasteCategory;
    use crate::domain::entry::WasteEntry;

    #[test]
    fn test_open_json_store_at_configured_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("history.json");
        let config = StorageConfig {
            backend: StorageBackend::Json,
            history_path: Some(path.clone()),
            monthly_log: false,
        };

        let mut store = open_history_store(&config).expect("open");
        let entry = WasteEntry::new(WasteCategory::Paper, 1.0).expect("valid");
        store
            .put("May 2025", &calculate(&[entry]).expect("calculate"))
            .expect("put");

        assert!(path.exists());
        assert_eq!(store.get_all().len(), 1);
    }

    #[test]
    fn test_open_memory_store() {
        let config = StorageConfig {
            backend: StorageBackend::Memory,
            history_path: None,
            monthly_log: false,
        };
        let mut store = open_history_store(&config).expect("open");
        assert!(store.get_all().is_empty());
    }
}
