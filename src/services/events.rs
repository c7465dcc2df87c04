//! Device Events
//!
//! Events emitted by the device feed to be consumed by the state layer.

use crate::domain::reading::DeviceReading;

/// Connection state of the simulated sensor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionState {
    /// Not connected, not trying to connect
    Disconnected,
    /// Handshake in progress
    Connecting,
    /// Producing readings
    Connected,
}

impl ConnectionState {
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionState::Disconnected => "Disconnected",
            ConnectionState::Connecting => "Connecting...",
            ConnectionState::Connected => "Connected",
        }
    }

    pub(crate) fn from_u8(value: u8) -> Self {
        match value {
            1 => ConnectionState::Connecting,
            2 => ConnectionState::Connected,
            _ => ConnectionState::Disconnected,
        }
    }
}

/// Events emitted by the device feed
#[derive(Clone, Debug, PartialEq)]
pub enum DeviceEvent {
    /// A new sample is available
    Reading(DeviceReading),

    /// Sensor connection state changed
    ConnectionChanged {
        /// New state
        state: ConnectionState,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_from_u8() {
        assert_eq!(ConnectionState::from_u8(ConnectionState::Connected as u8), ConnectionState::Connected);
        assert_eq!(ConnectionState::from_u8(ConnectionState::Connecting as u8), ConnectionState::Connecting);
        assert_eq!(ConnectionState::from_u8(7), ConnectionState::Disconnected);
    }
}
