//! Format - Formatting Utilities

use chrono::{DateTime, Local};

/// Format a weight or emission with two decimals, e.g. `12.00`
pub fn format_kg(value: f64) -> String {
    format!("{value:.2}")
}

/// Format a percentage with one decimal, e.g. `66.7%`
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// Format just the time portion
pub fn format_time(dt: &DateTime<Local>) -> String {
    dt.format("%H:%M:%S").to_string()
}

/// Pad or truncate to exactly `width` characters
pub fn fit(s: &str, width: usize) -> String {
    let count = s.chars().count();
    if count <= width {
        format!("{s:<width$}")
    } else if width <= 3 {
        s.chars().take(width).collect()
    } else {
        let head: String = s.chars().take(width - 3).collect();
        format!("{head}...")
    }
}

/// Horizontal bar of `width` cells filled to `fraction`
pub fn bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "#".repeat(filled), ".".repeat(width - filled))
}
