//! # Connection Manager
//!
//! Owns the [`ConnectionState`] of the widget and mediates between the view
//! and a single injected [`WalletProvider`].
//!
//! ## State machine
//!
//! ```text
//!                 initialize()
//! Uninitialized ───────────────► Disconnected ◄──┐ disconnect_wallet()
//!        │                           │           │ accountsChanged([])
//!        │ pre-authorized account    │ connect_wallet() / accountsChanged([a, ..])
//!        └──────────────────────► Connected ─────┘
//! ```
//!
//! `chainChanged` and [`get_balance`](ConnectionManager::get_balance) only
//! touch auxiliary fields.
//!
//! ## Failure semantics
//!
//! No operation returns an error. Every failure is converted into a
//! [`WalletError`] stored in [`ConnectionState::error`] and nothing is
//! retried. Overlapping calls are not sequenced; whichever resolves last wins.

use serde_json::Value;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::{debug, error, info, instrument, warn};

use lib_utils::{format_ether, is_address, parse_quantity};

use super::provider::{EventHandler, EventKind, ListenerId, ProviderEvent, RpcRequest, WalletProvider};
use super::state::ConnectionState;
use crate::error::{Operation, ProviderError, WalletError};

type StateObserver = Box<dyn Fn(&ConnectionState)>;

struct Inner {
    provider: Option<Rc<dyn WalletProvider>>,
    state: RefCell<ConnectionState>,
    observer: RefCell<Option<StateObserver>>,
}

impl Inner {
    /// Apply a transition, then notify the observer with no borrow held.
    fn update(&self, transition: impl FnOnce(&mut ConnectionState)) {
        let snapshot = {
            let mut state = self.state.borrow_mut();
            transition(&mut state);
            state.clone()
        };
        if let Some(observer) = self.observer.borrow().as_ref() {
            observer(&snapshot);
        }
    }

    fn handle_event(&self, event: ProviderEvent) {
        match event {
            ProviderEvent::AccountsChanged(accounts) => {
                info!("Accounts changed ({} authorized)", accounts.len());
                self.update(|state| state.apply_accounts_changed(&accounts));
            }
            ProviderEvent::ChainChanged(chain_id) => {
                info!("Chain changed to {}", chain_id);
                self.update(|state| state.apply_chain_changed(chain_id));
            }
        }
    }
}

/// Wallet connection state manager.
///
/// Cloning is cheap and every clone drives the same state.
#[derive(Clone)]
pub struct ConnectionManager {
    inner: Rc<Inner>,
}

impl fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("has_provider", &self.has_provider())
            .field("state", &*self.inner.state.borrow())
            .finish()
    }
}

impl ConnectionManager {
    /// Create a manager. `None` means no wallet extension is installed.
    pub fn new(provider: Option<Rc<dyn WalletProvider>>) -> Self {
        Self {
            inner: Rc::new(Inner {
                provider,
                state: RefCell::new(ConnectionState::default()),
                observer: RefCell::new(None),
            }),
        }
    }

    /// Set the observer called with a snapshot after every state change.
    pub fn on_change(&self, observer: impl Fn(&ConnectionState) + 'static) {
        *self.inner.observer.borrow_mut() = Some(Box::new(observer));
    }

    pub fn state(&self) -> ConnectionState {
        self.inner.state.borrow().clone()
    }

    pub fn is_connected(&self) -> bool {
        self.inner.state.borrow().is_connected()
    }

    pub fn has_provider(&self) -> bool {
        self.inner.provider.is_some()
    }

    /// Register the `accountsChanged` / `chainChanged` listeners.
    ///
    /// The returned guard removes both listeners when released or dropped.
    /// Returns `None` when there is no provider to listen to.
    pub fn subscribe(&self) -> Option<EventSubscriptions> {
        let provider = self.inner.provider.clone()?;

        let weak: Weak<Inner> = Rc::downgrade(&self.inner);
        let handler: EventHandler = Rc::new(move |event: ProviderEvent| match weak.upgrade() {
            Some(inner) => inner.handle_event(event),
            None => debug!("Ignoring {:?}, manager is gone", event.kind()),
        });

        let listeners = [EventKind::AccountsChanged, EventKind::ChainChanged]
            .into_iter()
            .map(|kind| (kind, provider.subscribe(kind, handler.clone())))
            .collect();

        debug!("Subscribed to provider events");
        Some(EventSubscriptions { provider, listeners })
    }

    /// Pick up an account the user already authorized, without prompting.
    ///
    /// Failures are logged only; the widget simply stays disconnected.
    pub async fn check_connection(&self) {
        let Some(provider) = self.inner.provider.clone() else {
            debug!("No wallet provider, skipping connection check");
            return;
        };

        let accounts = match request_accounts(provider.as_ref()).await {
            Ok(accounts) => accounts,
            Err(err) => {
                error!("Failed to get accounts: {}", err);
                return;
            }
        };

        let Some(account) = accounts.into_iter().next() else {
            debug!("No pre-authorized account");
            return;
        };
        info!("Found pre-authorized account {}", account);
        self.inner.update(|state| state.set_account(Some(account)));

        match request_chain_id(provider.as_ref()).await {
            Ok(chain_id) => self.inner.update(|state| state.set_chain_id(Some(chain_id))),
            Err(err) => error!("Failed to get chain id: {}", err),
        }
    }

    /// Subscribe to provider events, then check for a pre-authorized account.
    ///
    /// Callers that must hold the guard before the first `.await` (a UI owner
    /// registering its cleanup) call [`subscribe`](Self::subscribe) and
    /// [`check_connection`](Self::check_connection) separately instead.
    pub async fn initialize(&self) -> Option<EventSubscriptions> {
        let subscriptions = self.subscribe();
        self.check_connection().await;
        subscriptions
    }

    /// Ask the wallet for account access (prompting if needed) and adopt the
    /// resulting account and chain.
    pub async fn connect_wallet(&self) {
        let Some(provider) = self.inner.provider.clone() else {
            warn!("Connect requested without a wallet provider");
            self.inner.update(|state| state.fail(WalletError::ProviderAbsent));
            return;
        };

        match handshake(provider.as_ref()).await {
            Ok((account, chain_id)) => {
                info!("Wallet connected: account={:?} chain={}", account, chain_id);
                self.inner.update(|state| state.apply_connected(account, chain_id));
            }
            Err(err) => {
                let err = WalletError::from_provider(Operation::Connect, err);
                warn!("Wallet connection failed: {}", err);
                self.inner.update(|state| state.fail(err));
            }
        }
    }

    /// Forget the connection locally. Wallets expose no programmatic
    /// disconnect, so the provider is not called.
    pub fn disconnect_wallet(&self) {
        info!("Wallet disconnected");
        self.inner.update(ConnectionState::reset);
    }

    /// Fetch the balance of the address field. Does nothing while the field
    /// is empty.
    pub async fn check_balance(&self) {
        let address = self.inner.state.borrow().address_input.clone();
        if address.is_empty() {
            debug!("Balance check skipped, no address entered");
            return;
        }
        self.get_balance(&address).await;
    }

    /// Fetch the balance of `address` on the current chain.
    #[instrument(skip_all, fields(address = %address))]
    pub async fn get_balance(&self, address: &str) {
        if !is_address(address) {
            debug!("Rejected invalid address");
            self.inner.update(|state| state.fail_balance(WalletError::InvalidAddress));
            return;
        }

        let Some(provider) = self.inner.provider.clone() else {
            warn!("Balance requested without a wallet provider");
            self.inner.update(|state| state.fail_balance(WalletError::ProviderAbsent));
            return;
        };

        match fetch_balance(provider.as_ref(), address).await {
            Ok(balance) => {
                debug!("Balance: {}", balance);
                self.inner.update(|state| state.set_balance(balance));
            }
            Err(err) => {
                let err = WalletError::from_provider(Operation::FetchBalance, err);
                warn!("{}", err);
                self.inner.update(|state| state.fail_balance(err));
            }
        }
    }

    /// Handle a provider `accountsChanged` event.
    pub fn on_accounts_changed(&self, accounts: &[String]) {
        self.inner.handle_event(ProviderEvent::AccountsChanged(accounts.to_vec()));
    }

    /// Handle a provider `chainChanged` event.
    pub fn on_chain_changed(&self, chain_id: String) {
        self.inner.handle_event(ProviderEvent::ChainChanged(chain_id));
    }

    /// Update the address field of the balance form.
    pub fn set_address_input(&self, text: String) {
        self.inner.update(|state| state.address_input = text);
    }
}

/// Registered provider listeners. Removes them exactly once, on
/// [`release`](Self::release) or drop.
#[must_use = "dropping the guard removes the provider listeners"]
pub struct EventSubscriptions {
    provider: Rc<dyn WalletProvider>,
    listeners: Vec<(EventKind, ListenerId)>,
}

impl EventSubscriptions {
    pub fn release(mut self) {
        self.remove_listeners();
    }

    pub fn is_active(&self) -> bool {
        !self.listeners.is_empty()
    }

    fn remove_listeners(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        for (kind, id) in self.listeners.drain(..) {
            self.provider.unsubscribe(kind, id);
        }
        debug!("Unsubscribed from provider events");
    }
}

impl Drop for EventSubscriptions {
    fn drop(&mut self) {
        self.remove_listeners();
    }
}

impl fmt::Debug for EventSubscriptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSubscriptions")
            .field("listeners", &self.listeners)
            .finish()
    }
}

// region:    --- Provider calls

async fn request_accounts(provider: &dyn WalletProvider) -> Result<Vec<String>, ProviderError> {
    let value = provider.request(RpcRequest::accounts()).await?;
    Ok(serde_json::from_value(value)?)
}

async fn request_chain_id(provider: &dyn WalletProvider) -> Result<String, ProviderError> {
    let value = provider.request(RpcRequest::chain_id()).await?;
    Ok(serde_json::from_value(value)?)
}

/// Permission prompt, then the resulting first account and chain id.
async fn handshake(provider: &dyn WalletProvider) -> Result<(Option<String>, String), ProviderError> {
    provider.request(RpcRequest::request_account_permission()).await?;
    let account = request_accounts(provider).await?.into_iter().next();
    let chain_id = request_chain_id(provider).await?;
    Ok((account, chain_id))
}

async fn fetch_balance(provider: &dyn WalletProvider, address: &str) -> Result<String, ProviderError> {
    let value = provider.request(RpcRequest::balance(address)).await?;
    let quantity = match value {
        Value::String(quantity) => quantity,
        other => return Err(ProviderError::new(None, format!("Unexpected balance {}", other))),
    };
    let wei = parse_quantity(&quantity).map_err(|e| ProviderError::new(None, e.to_string()))?;
    Ok(format_ether(wei))
}

// endregion: --- Provider calls
