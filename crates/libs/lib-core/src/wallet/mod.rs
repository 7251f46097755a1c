//! # Wallet Connection
//!
//! ```text
//! provider events ──► ConnectionManager ──► ConnectionState ──► view
//! view actions    ──► ConnectionManager ──► WalletProvider::request
//! ```

pub mod manager;
pub mod network;
pub mod provider;
pub mod state;

#[cfg(test)]
mod mock;

pub use manager::{ConnectionManager, EventSubscriptions};
pub use network::network_label;
pub use provider::{EventHandler, EventKind, ListenerId, ProviderEvent, RpcRequest, WalletProvider};
pub use state::ConnectionState;
