//! Reading - Simulated Sensor Sample

use chrono::{DateTime, Local};

/// One sample from the simulated sensor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceReading {
    /// Sensor value (ppm)
    pub value: f64,
    /// When the sample was produced
    pub taken_at: DateTime<Local>,
}

impl DeviceReading {
    pub fn new(value: f64, taken_at: DateTime<Local>) -> Self {
        Self { value, taken_at }
    }

    /// Position of the value within `[min, max]`, clamped to `0.0..=1.0`
    pub fn fraction_of(&self, min: f64, max: f64) -> f64 {
        if max <= min {
            return 0.0;
        }
        ((self.value - min) / (max - min)).clamp(0.0, 1.0)
    }
}
