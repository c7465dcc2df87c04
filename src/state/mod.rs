//! State - Session State Modules
//!
//! Each state module owns one distinct piece of session state,
//! mutated only by the front-end loop.

pub mod device_state;
pub mod notice_state;
pub mod session_state;
