//! # Unit Utilities
//!
//! Parsing of JSON-RPC hex quantities and rendering of wei amounts as
//! decimal ether strings.

use alloy_primitives::{utils, U256};

/// Parse a JSON-RPC quantity (`0x`-prefixed hex) into a [`U256`].
pub fn parse_quantity(quantity: &str) -> Result<U256, Error> {
    let digits = quantity
        .strip_prefix("0x")
        .ok_or_else(|| Error::MissingPrefix(quantity.to_string()))?;
    if digits.is_empty() {
        return Err(Error::Empty);
    }
    U256::from_str_radix(digits, 16).map_err(|_| Error::InvalidQuantity(quantity.to_string()))
}

/// Format a wei amount as ether, dropping trailing zeros.
///
/// Always keeps at least one fractional digit, so one ether renders as `"1.0"`
/// and 1.5 ether as `"1.5"`.
pub fn format_ether(wei: U256) -> String {
    let padded = utils::format_ether(wei);
    match padded.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                format!("{whole}.0")
            } else {
                format!("{whole}.{fraction}")
            }
        }
        None => format!("{padded}.0"),
    }
}

// region:    --- Error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    MissingPrefix(String),
    Empty,
    InvalidQuantity(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::MissingPrefix(q) => write!(fmt, "quantity {q:?} is missing the 0x prefix"),
            Error::Empty => write!(fmt, "quantity has no digits"),
            Error::InvalidQuantity(q) => write!(fmt, "invalid quantity {q:?}"),
        }
    }
}

impl std::error::Error for Error {}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("0x0").unwrap(), U256::ZERO);
        assert_eq!(parse_quantity("0x14d1120d7b160000").unwrap(), U256::from(1_500_000_000_000_000_000u64));
    }

    #[test]
    fn test_parse_quantity_rejects_garbage() {
        assert_eq!(parse_quantity("1234"), Err(Error::MissingPrefix("1234".to_string())));
        assert_eq!(parse_quantity("0x"), Err(Error::Empty));
        assert!(matches!(parse_quantity("0xnope"), Err(Error::InvalidQuantity(_))));
    }

    #[test]
    fn test_format_ether() {
        assert_eq!(format_ether(U256::from(1_500_000_000_000_000_000u64)), "1.5");
        assert_eq!(format_ether(U256::from(1_000_000_000_000_000_000u64)), "1.0");
        assert_eq!(format_ether(U256::ZERO), "0.0");
        assert_eq!(format_ether(U256::from(1u64)), "0.000000000000000001");
    }

    #[test]
    fn test_format_large_balance() {
        let wei = U256::from(123_456u64) * U256::from(10u64).pow(U256::from(18u64));
        assert_eq!(format_ether(wei), "123456.0");
    }
}
