//! Service Layer
//!
//! Persistence of calculation history and the simulated sensor feed.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Services                               │
//! │  ┌──────────────────────┐      ┌──────────────────────────┐ │
//! │  │   dyn HistoryStore   │      │  DeviceTicker (tokio)    │ │
//! │  │  (month -> result)   │      │  SimulatedSensor (pull)  │ │
//! │  └──────────────────────┘      └──────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼ DeviceEvent
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      State Layer                             │
//! │               (SessionState, DeviceState)                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod device_feed;
mod events;
mod runtime;
pub mod store;

pub use device_feed::*;
pub use events::*;
pub use runtime::*;
