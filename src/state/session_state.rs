//! SessionState - Entries, Last Result and Notices of One Session
//!
//! A single owner (the front-end loop) holds the session and passes it by
//! `&mut` into every operation. Failures never escape: they become notices.

use tracing::{info, warn};

use crate::domain::calculation::{CalculationResult, calculate};
use crate::domain::category::WasteCategory;
use crate::domain::entry::WasteEntry;
use crate::domain::factors::EmissionFactorTable;
use crate::services::store::HistoryStore;
use crate::state::notice_state::{NoticeLevel, NoticeState};
use crate::utils::format::format_kg;

/// One row of an items table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemRow {
    pub category: WasteCategory,
    pub quantity: f64,
    /// `quantity * factor`, `None` when the category has no factor
    pub emission: Option<f64>,
}

/// Table rows for `items`, each with its own emission
pub fn item_rows(items: &[WasteEntry]) -> Vec<ItemRow> {
    let table = EmissionFactorTable::standard();
    items
        .iter()
        .map(|item| ItemRow {
            category: item.category,
            quantity: item.quantity,
            emission: item.emission(table).ok(),
        })
        .collect()
}

#[derive(Debug, Default)]
pub struct SessionState {
    entries: Vec<WasteEntry>,
    calculation_result: Option<CalculationResult>,
    show_result: bool,
    notices: NoticeState,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[WasteEntry] {
        &self.entries
    }

    pub fn item_rows(&self) -> Vec<ItemRow> {
        item_rows(&self.entries)
    }

    /// The last result, while it is on display
    pub fn visible_result(&self) -> Option<&CalculationResult> {
        if self.show_result {
            self.calculation_result.as_ref()
        } else {
            None
        }
    }

    pub fn notices(&self) -> &NoticeState {
        &self.notices
    }

    pub fn notices_mut(&mut self) -> &mut NoticeState {
        &mut self.notices
    }

    /// Log one entry; an unusable quantity leaves the session untouched
    pub fn add_entry(&mut self, category: WasteCategory, quantity: f64) -> bool {
        match WasteEntry::new(category, quantity) {
            Ok(entry) => {
                self.entries.push(entry);
                self.notices.push_now(
                    NoticeLevel::Success,
                    format!("Added {} kg of {}", format_kg(quantity), category),
                );
                true
            }
            Err(e) => {
                warn!(error = %e, "Rejected waste entry");
                self.notices.push_now(NoticeLevel::Warn, "Enter a valid quantity");
                false
            }
        }
    }

    /// Remove the entry at `index` (zero-based)
    pub fn remove_entry(&mut self, index: usize) -> Option<WasteEntry> {
        if index >= self.entries.len() {
            self.notices
                .push_now(NoticeLevel::Warn, format!("No item #{}", index + 1));
            return None;
        }
        let removed = self.entries.remove(index);
        self.notices.push_now(
            NoticeLevel::Info,
            format!("Removed {} kg of {}", format_kg(removed.quantity), removed.category),
        );
        Some(removed)
    }

    /// Drop every entry and hide the last result
    pub fn clear_entries(&mut self) {
        self.entries.clear();
        self.calculation_result = None;
        self.show_result = false;
        self.notices.push_now(NoticeLevel::Info, "Items cleared");
    }

    /// Calculate the current entries and store the result under `month`
    ///
    /// The result stays on display even when saving fails.
    pub fn calculate_and_save(
        &mut self,
        store: &mut dyn HistoryStore,
        month: &str,
    ) -> Option<&CalculationResult> {
        if self.entries.is_empty() {
            self.notices
                .push_now(NoticeLevel::Info, "Add at least one item first");
            return None;
        }

        let result = match calculate(&self.entries) {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "Calculation failed");
                self.notices.push_now(NoticeLevel::Error, e.to_string());
                return None;
            }
        };

        match store.put(month, &result) {
            Ok(()) => {
                info!(month = %month, total = result.total, "Calculation saved");
                self.notices
                    .push_now(NoticeLevel::Success, "Calculation complete & saved!");
            }
            Err(e) => {
                warn!(error = %e, month = %month, "Failed to save calculation");
                self.notices
                    .push_now(NoticeLevel::Error, format!("Calculation not saved: {e}"));
            }
        }

        self.calculation_result = Some(result);
        self.show_result = true;
        self.calculation_result.as_ref()
    }

    /// Wipe every stored month, only when `confirmed`
    pub fn clear_history(&mut self, store: &mut dyn HistoryStore, confirmed: bool) -> bool {
        if !confirmed {
            self.notices.push_now(
                NoticeLevel::Warn,
                "Run `clear-history --yes` to delete all history",
            );
            return false;
        }

        match store.clear() {
            Ok(()) => {
                self.notices.push_now(NoticeLevel::Success, "All history cleared!");
                true
            }
            Err(e) => {
                warn!(error = %e, "Failed to clear history");
                self.notices
                    .push_now(NoticeLevel::Error, format!("History not cleared: {e}"));
                false
            }
        }
    }
}
