//! Carbon Wise Library
//!
//! This crate provides the logic of Carbon Wise, a household waste CO2
//! calculator: emission factors, the calculator, month-keyed history storage
//! and a simulated sensor feed, driven by a terminal front-end.

pub mod app;
pub mod constants;
pub mod domain;
pub mod error;
pub mod helpers;
pub mod services;
pub mod state;
pub mod utils;
