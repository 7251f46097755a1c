//! Browser services

pub mod provider;
