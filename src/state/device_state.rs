//! DeviceState - Connection Status and Recent Readings of the Sensor

use std::collections::VecDeque;

use chrono::{DateTime, Local};
use crossbeam_channel::Receiver;

use crate::domain::reading::DeviceReading;
use crate::services::{ConnectionState, DeviceEvent};

/// Latest known state of the simulated sensor
#[derive(Debug)]
pub struct DeviceState {
    connection: ConnectionState,
    readings: VecDeque<DeviceReading>,
    capacity: usize,
}

impl DeviceState {
    pub fn new(capacity: usize) -> Self {
        Self {
            connection: ConnectionState::Disconnected,
            readings: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Apply one event from the feed
    pub fn apply(&mut self, event: DeviceEvent) {
        match event {
            DeviceEvent::Reading(reading) => self.record(reading),
            DeviceEvent::ConnectionChanged { state } => self.connection = state,
        }
    }

    /// Apply every event waiting on `rx` without blocking
    pub fn drain(&mut self, rx: &Receiver<DeviceEvent>) -> usize {
        let mut applied = 0;
        for event in rx.try_iter() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    /// Keep a reading, dropping the oldest when full
    pub fn record(&mut self, reading: DeviceReading) {
        if self.readings.len() >= self.capacity {
            self.readings.pop_front();
        }
        self.readings.push_back(reading);
    }

    pub fn connection(&self) -> ConnectionState {
        self.connection
    }

    pub fn set_connection(&mut self, state: ConnectionState) {
        self.connection = state;
    }

    pub fn is_connected(&self) -> bool {
        self.connection == ConnectionState::Connected
    }

    pub fn last_reading(&self) -> Option<&DeviceReading> {
        self.readings.back()
    }

    pub fn last_value(&self) -> Option<f64> {
        self.last_reading().map(|r| r.value)
    }

    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_reading().map(|r| r.taken_at)
    }

    pub fn readings(&self) -> &VecDeque<DeviceReading> {
        &self.readings
    }
}
