//! # Chain Id Utilities

/// Parse a hex chain id (`"0x89"`, or bare `"89"`) into its numeric value.
pub fn parse_chain_id(chain_id: &str) -> Result<u64, Error> {
    let digits = chain_id.strip_prefix("0x").unwrap_or(chain_id);
    if digits.is_empty() {
        return Err(Error::Empty);
    }
    u64::from_str_radix(digits, 16).map_err(|_| Error::InvalidChainId(chain_id.to_string()))
}

// region:    --- Error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    Empty,
    InvalidChainId(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}
// endregion: --- Error
