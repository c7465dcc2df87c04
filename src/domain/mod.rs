//! Domain - Pure Data Structures and Calculations
//!
//! These types don't depend on storage or the front-end and represent the
//! business domain: categories, factors, entries, results and history.

pub mod calculation;
pub mod category;
pub mod config;
pub mod entry;
pub mod factors;
pub mod history;
pub mod month;
pub mod reading;
