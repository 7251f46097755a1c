//! Utilities

pub mod config;
pub mod format;
