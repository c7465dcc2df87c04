//! Utils - Settings Storage and Formatting

pub mod config_store;
pub mod format;
