//! Config - Application Settings

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEVICE_CONNECT_LATENCY_MS, DEVICE_MAX_READING, DEVICE_MIN_READING, DEVICE_POLL_INTERVAL_MS,
    DEVICE_READINGS_CAPACITY,
};

/// Main application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// History persistence
    pub storage: StorageConfig,
    /// Simulated sensor
    pub device: DeviceConfig,
    /// Logging
    pub logging: LoggingConfig,
}

/// Where calculation history is kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Lost when the process exits
    Memory,
    /// JSON document in the data directory
    #[default]
    Json,
}

/// History storage configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Backend kind
    pub backend: StorageBackend,
    /// Override for the history file (defaults to the data directory)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_path: Option<PathBuf>,
    /// Also append one `month,total` row per calculation to a flat log
    pub monthly_log: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Json,
            history_path: None,
            monthly_log: false,
        }
    }
}

/// How the simulated sensor is driven
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedMode {
    /// Background task pushing readings on a timer
    #[default]
    Ticker,
    /// Sensor advanced whenever the front-end handles input
    Pull,
}

/// Simulated sensor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Push (ticker) or pull driven feed
    pub mode: FeedMode,
    /// Interval between readings while connected
    pub poll_interval_ms: u64,
    /// Fake handshake delay before the feed reports connected
    pub connect_latency_ms: u64,
    /// Lowest reading produced
    pub min_reading: f64,
    /// Highest reading produced
    pub max_reading: f64,
    /// Number of recent readings kept for display
    pub readings_capacity: usize,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            mode: FeedMode::Ticker,
            poll_interval_ms: DEVICE_POLL_INTERVAL_MS,
            connect_latency_ms: DEVICE_CONNECT_LATENCY_MS,
            min_reading: DEVICE_MIN_READING,
            max_reading: DEVICE_MAX_READING,
            readings_capacity: DEVICE_READINGS_CAPACITY,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    pub level: String,
    /// Write a daily rolling log file in the data directory
    pub file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: true,
        }
    }
}
