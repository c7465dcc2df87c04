//! Application Layer
//!
//! Contains command parsing, text rendering and the interactive loop.

pub mod application;
pub mod commands;
pub mod render;
