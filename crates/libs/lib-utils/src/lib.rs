//! # Utilities Library
//!
//! Ethereum helper functions used by the wallet widget: address validation,
//! quantity parsing, unit formatting and chain id parsing.

pub mod chain;
pub mod units;
pub mod validation;

// Re-export commonly used functions
pub use chain::parse_chain_id;
pub use units::{format_ether, parse_quantity};
pub use validation::{is_address, validate_address};
