//! Application Constants
//!
//! Centralized constants shared by the calculator, the stores and the device feed.

/// Application name used for directories and log files
pub const APP_NAME: &str = "carbon-wise";

/// Storage key of the month-keyed history document
pub const HISTORY_KEY: &str = "carbon_wise_history";

/// File name of the flat per-calculation log
pub const MONTHLY_LOG_FILE: &str = "carbon_wise_log.csv";

/// Settings file name inside the config directory
pub const SETTINGS_FILE: &str = "carbon-wise.toml";

/// Month label format, e.g. "March 2025"
pub const MONTH_LABEL_FORMAT: &str = "%B %Y";

/// Decimal places kept on the grand total
pub const TOTAL_DECIMALS: usize = 2;

/// Simulated sensor range
pub const DEVICE_MIN_READING: f64 = 350.0;
pub const DEVICE_MAX_READING: f64 = 2000.0;

/// Simulated sensor timings
pub const DEVICE_POLL_INTERVAL_MS: u64 = 2000;
pub const DEVICE_CONNECT_LATENCY_MS: u64 = 1000;

/// Bounded buffer capacities
pub const DEVICE_READINGS_CAPACITY: usize = 120;
pub const NOTICE_LOG_CAPACITY: usize = 200;
