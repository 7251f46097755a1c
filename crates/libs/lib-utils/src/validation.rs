//! # Validation Utilities
//!
//! Account address validation.
//!
//! Accepts 40 hex digits with an optional `0x` prefix. All-lowercase and
//! all-uppercase addresses are accepted as-is; mixed-case addresses must carry
//! a valid EIP-55 checksum.

use alloy_primitives::Address;
use std::str::FromStr;

/// Parse and validate an account address.
pub fn validate_address(input: &str) -> Result<Address, Error> {
    let digits = input.strip_prefix("0x").unwrap_or(input);
    if digits.len() != 40 {
        return Err(Error::WrongLength(digits.len()));
    }

    let address = Address::from_str(digits).map_err(|_| Error::NotHex)?;

    let has_lower = digits.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = digits.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        Address::parse_checksummed(format!("0x{digits}"), None)
            .map_err(|_| Error::BadChecksum)?;
    }

    Ok(address)
}

/// Whether `input` is a syntactically valid account address.
pub fn is_address(input: &str) -> bool {
    validate_address(input).is_ok()
}

// region:    --- Error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    WrongLength(usize),
    NotHex,
    BadChecksum,
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}
// endregion: --- Error
