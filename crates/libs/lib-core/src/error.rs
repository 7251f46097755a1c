//! # Centralized Error Handling
//!
//! [`WalletError`] is the single error channel of the widget. Every failure of
//! a wallet operation ends up as one of its variants in
//! [`ConnectionState::error`](crate::wallet::ConnectionState::error); nothing
//! is returned to the view as a raw error.
//!
//! ## Error Categories
//!
//! 1. **Environment** - [`ProviderAbsent`](WalletError::ProviderAbsent): no wallet extension injected
//! 2. **User** - [`UserRejected`](WalletError::UserRejected): permission prompt declined (code 4001)
//! 3. **Provider** - [`CallFailed`](WalletError::CallFailed): any other failed provider call
//! 4. **Input** - [`InvalidAddress`](WalletError::InvalidAddress): local validation, never reaches the provider
//! 5. **Revocation** - [`AccountRevoked`](WalletError::AccountRevoked): provider reports no authorized accounts
//!
//! [`ProviderError`] is the raw error at the provider boundary (EIP-1193
//! `{ code, message }`), converted into a [`WalletError`] by the manager.

use std::fmt;
use thiserror::Error;

/// EIP-1193 error code for a request the user rejected.
pub const USER_REJECTED_CODE: i64 = 4001;

/// Provider operation that failed, used to word [`WalletError::CallFailed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Connect,
    FetchBalance,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Connect => f.write_str("connect wallet"),
            Operation::FetchBalance => f.write_str("fetch balance"),
        }
    }
}

/// User-visible wallet error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    /// No injected wallet provider.
    #[error("⚠️ Please install MetaMask!")]
    ProviderAbsent,

    /// The user declined the permission request.
    #[error("Please connect to MetaMask.")]
    UserRejected,

    /// A provider call failed for any other reason.
    #[error("Failed to {op}: {reason}")]
    CallFailed { op: Operation, reason: String },

    /// The address did not pass local validation.
    #[error("Invalid Ethereum address.")]
    InvalidAddress,

    /// The provider reported that no account is authorized any more.
    #[error("Please connect to MetaMask.")]
    AccountRevoked,
}

impl WalletError {
    /// Classify a provider failure for the given operation.
    ///
    /// Only the connect flow distinguishes a user rejection; balance lookups
    /// report every failure as [`WalletError::CallFailed`].
    pub fn from_provider(op: Operation, err: ProviderError) -> Self {
        if op == Operation::Connect && err.is_user_rejection() {
            return WalletError::UserRejected;
        }
        WalletError::CallFailed {
            op,
            reason: err.message,
        }
    }
}

/// Error returned by a wallet provider request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ProviderError {
    pub code: Option<i64>,
    pub message: String,
}

impl ProviderError {
    pub fn new(code: Option<i64>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn is_user_rejection(&self) -> bool {
        self.code == Some(USER_REJECTED_CODE)
    }
}

/// Convert an unexpected response shape into a `ProviderError`.
impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::new(None, format!("Unexpected provider response: {}", err))
    }
}
