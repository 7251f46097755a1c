//! # Core Library
//!
//! Wallet connection state, the provider abstraction, errors and widget
//! configuration. Target-independent: the browser binding lives in
//! `wallet-web`.

pub mod config;
pub mod error;
pub mod wallet;

// Re-export commonly used types
pub use config::WidgetConfig;
pub use error::{Operation, ProviderError, WalletError};
pub use wallet::{ConnectionManager, ConnectionState, EventSubscriptions, WalletProvider};
