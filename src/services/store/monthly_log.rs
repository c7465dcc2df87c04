//! Flat monthly log
//!
//! Append-only `month,total` rows, one per calculation. Unlike the month-keyed
//! history, repeated calculations in the same month all stay in the log.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::domain::calculation::CalculationResult;
use crate::domain::history::History;
use crate::error::Result;
use crate::services::store::HistoryStore;

const HEADER: &str = "month,total";

/// One row of the flat log
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTotalRow {
    pub month: String,
    pub total: f64,
}

/// Append-only tabular log of calculation totals
#[derive(Debug, Clone)]
pub struct MonthlyTotalsLog {
    path: PathBuf,
}

impl MonthlyTotalsLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one row, writing the header first when the file is new
    pub fn append(&self, month: &str, total: f64) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let is_new = !self.path.exists();
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        if is_new {
            writeln!(file, "{HEADER}")?;
        }
        writeln!(file, "\"{}\",{}", month.replace('"', "\"\""), total)?;
        Ok(())
    }

    /// Every well-formed row, oldest first
    ///
    /// Malformed lines are skipped; a missing file has no rows.
    pub fn rows(&self) -> Result<Vec<MonthlyTotalRow>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut rows = Vec::new();
        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line == HEADER {
                continue;
            }
            match parse_row(line) {
                Some(row) => rows.push(row),
                None => warn!(line = line_no + 1, path = ?self.path, "Skipping malformed log row"),
            }
        }
        Ok(rows)
    }
}

fn parse_row(line: &str) -> Option<MonthlyTotalRow> {
    let (month, total) = line.rsplit_once(',')?;
    let month = month.trim();
    let month = match month.strip_prefix('"').and_then(|m| m.strip_suffix('"')) {
        Some(quoted) => quoted.replace("\"\"", "\""),
        None => month.to_string(),
    };
    let total = total.trim().parse::<f64>().ok()?;
    Some(MonthlyTotalRow { month, total })
}

/// A history store that also appends every `put` to a [`MonthlyTotalsLog`]
pub struct MonthlyLogged<S> {
    inner: S,
    log: MonthlyTotalsLog,
}

impl<S: HistoryStore> MonthlyLogged<S> {
    pub fn new(inner: S, log: MonthlyTotalsLog) -> Self {
        Self { inner, log }
    }

    pub fn log(&self) -> &MonthlyTotalsLog {
        &self.log
    }
}

impl<S: HistoryStore> HistoryStore for MonthlyLogged<S> {
    fn put(&mut self, month: &str, result: &CalculationResult) -> Result<()> {
        self.inner.put(month, result)?;
        if let Err(e) = self.log.append(month, result.total) {
            warn!(error = %e, path = ?self.log.path(), "Failed to append to monthly log");
        }
        Ok(())
    }

    fn get_all(&mut self) -> History {
        self.inner.get_all()
    }

    fn clear(&mut self) -> Result<()> {
        self.inner.clear()
    }
}
