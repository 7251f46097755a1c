//! # Wallet Provider Abstraction
//!
//! The contract the connection manager needs from an injected wallet
//! (EIP-1193): a JSON-RPC `request` plus `accountsChanged` / `chainChanged`
//! event subscriptions. The browser implementation lives in `wallet-web`;
//! tests use an in-memory fake.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use std::rc::Rc;

use crate::error::ProviderError;

/// Provider events the widget listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    AccountsChanged,
    ChainChanged,
}

impl EventKind {
    /// Event name as used by `on` / `removeListener`.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::AccountsChanged => "accountsChanged",
            EventKind::ChainChanged => "chainChanged",
        }
    }
}

/// Decoded payload of a provider event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderEvent {
    AccountsChanged(Vec<String>),
    ChainChanged(String),
}

impl ProviderEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            ProviderEvent::AccountsChanged(_) => EventKind::AccountsChanged,
            ProviderEvent::ChainChanged(_) => EventKind::ChainChanged,
        }
    }
}

pub type EventHandler = Rc<dyn Fn(ProviderEvent)>;

/// Handle identifying a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Arguments of an EIP-1193 `request` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RpcRequest {
    pub method: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub params: Value,
}

impl RpcRequest {
    pub fn new(method: impl Into<String>, params: Value) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }

    /// Accounts already authorized for this origin. Never prompts.
    pub fn accounts() -> Self {
        Self::new("eth_accounts", Value::Null)
    }

    pub fn chain_id() -> Self {
        Self::new("eth_chainId", Value::Null)
    }

    /// Ask for account access, prompting the user if needed.
    pub fn request_account_permission() -> Self {
        Self::new("wallet_requestPermissions", json!([{ "eth_accounts": {} }]))
    }

    pub fn balance(address: &str) -> Self {
        Self::new("eth_getBalance", json!([address, "latest"]))
    }
}

/// An injected wallet provider.
#[async_trait(?Send)]
pub trait WalletProvider {
    /// Send a JSON-RPC request and return the raw result.
    async fn request(&self, request: RpcRequest) -> Result<Value, ProviderError>;

    /// Register a listener for `kind`.
    fn subscribe(&self, kind: EventKind, handler: EventHandler) -> ListenerId;

    /// Remove a listener previously returned by [`subscribe`](Self::subscribe).
    fn unsubscribe(&self, kind: EventKind, id: ListenerId);
}
