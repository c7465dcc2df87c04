//! Render - Plain-Text Views
//!
//! Every view is returned as a `String` so the loop decides where it goes.

use std::fmt::Write;

use crate::domain::calculation::CalculationResult;
use crate::domain::config::DeviceConfig;
use crate::domain::factors::EmissionFactorTable;
use crate::domain::history::History;
use crate::state::device_state::DeviceState;
use crate::state::notice_state::Notice;
use crate::state::session_state::{ItemRow, item_rows};
use crate::utils::format::{bar, fit, format_kg, format_percent, format_time};

const CATEGORY_WIDTH: usize = 12;
const SHARE_BAR_WIDTH: usize = 20;
const GAUGE_WIDTH: usize = 30;

pub fn render_notice(notice: &Notice) -> String {
    format!("[{}] {}", notice.level.label(), notice.message)
}

/// Current or saved items with their emissions
pub fn render_items(rows: &[ItemRow]) -> String {
    if rows.is_empty() {
        return "No items yet. Use `add <category> <kg>`.".to_string();
    }
    let mut out = format!(
        "{:>3}  {}  {:>13}  {:>17}\n",
        "#",
        fit("Category", CATEGORY_WIDTH),
        "Quantity (kg)",
        "CO2 Emission (kg)"
    );
    for (i, row) in rows.iter().enumerate() {
        let emission = row.emission.map(format_kg).unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{:>3}  {}  {:>13}  {:>17}",
            i + 1,
            fit(row.category.as_str(), CATEGORY_WIDTH),
            format_kg(row.quantity),
            emission
        );
    }
    out.truncate(out.trim_end().len());
    out
}

pub fn render_result(result: &CalculationResult) -> String {
    format!("Total CO2 Emissions: {} kg", format_kg(result.total))
}

/// Latest month by calendar order with per-category shares
pub fn render_dashboard(history: &History) -> String {
    let Some((month, latest)) = history.latest() else {
        return "No history yet. Make a calculation first!".to_string();
    };

    let mut out = format!("Latest Calculation - {month}\n");
    for (category, subtotal) in latest.by_category.iter() {
        let share = latest.share(*category).unwrap_or(0.0);
        let _ = writeln!(
            out,
            "  {}  {}  {:>8} kg  {:>6}",
            fit(category.as_str(), CATEGORY_WIDTH),
            bar(share / 100.0, SHARE_BAR_WIDTH),
            format_kg(*subtotal),
            format_percent(share)
        );
    }
    let _ = write!(out, "Total Emissions: {} kg CO2", format_kg(latest.total));
    out
}

/// Every saved month, newest first, each with its items
pub fn render_history(history: &History) -> String {
    if history.is_empty() {
        return "No saved history yet.".to_string();
    }
    let mut sections = Vec::with_capacity(history.len());
    for (month, result) in history.newest_first() {
        sections.push(format!(
            "{month} - {} kg CO2\n{}",
            format_kg(result.total),
            render_items(&item_rows(&result.items))
        ));
    }
    sections.join("\n\n")
}

pub fn render_categories(table: &EmissionFactorTable) -> String {
    let mut out = format!("{}  kg CO2 per kg\n", fit("Category", CATEGORY_WIDTH));
    for (category, factor) in table.iter() {
        let _ = writeln!(out, "{}  {factor}", fit(category.as_str(), CATEGORY_WIDTH));
    }
    out.truncate(out.trim_end().len());
    out
}

/// Sensor status with the last reading drawn against the configured range
pub fn render_gauge(device: &DeviceState, config: &DeviceConfig) -> String {
    let status = device.connection().label();
    match device.last_reading() {
        Some(reading) => {
            let fraction = reading.fraction_of(config.min_reading, config.max_reading);
            format!(
                "Sensor: {status}\n{} [{}] {}\n{:.0} (updated {})",
                config.min_reading,
                bar(fraction, GAUGE_WIDTH),
                config.max_reading,
                reading.value,
                format_time(&reading.taken_at)
            )
        }
        None => format!("Sensor: {status}\nNo reading yet."),
    }
}
