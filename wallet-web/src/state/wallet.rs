//! Wallet state management
//!
//! Bridges the [`ConnectionManager`] into Leptos: every manager state change
//! is mirrored into an `RwSignal` the view reads from, and view actions are
//! forwarded to the manager.

use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;

use lib_core::wallet::{ConnectionManager, ConnectionState, EventSubscriptions, WalletProvider};

use crate::services::provider::InjectedProvider;

/// Global wallet context
#[derive(Clone, Copy)]
pub struct WalletContext {
    pub state: RwSignal<ConnectionState>,
    manager: StoredValue<ConnectionManager, LocalStorage>,
    has_provider: bool,
}

impl WalletContext {
    fn manager(&self) -> ConnectionManager {
        self.manager.get_value()
    }

    pub fn has_provider(&self) -> bool {
        self.has_provider
    }

    pub fn is_connected(&self) -> bool {
        self.state.with(|state| state.is_connected())
    }

    pub fn account(&self) -> Option<String> {
        self.state.with(|state| state.account.clone())
    }

    pub fn chain_id(&self) -> Option<String> {
        self.state.with(|state| state.chain_id.clone())
    }

    pub fn error_message(&self) -> Option<String> {
        self.state.with(|state| state.error_message())
    }

    pub fn balance(&self) -> Option<String> {
        self.state.with(|state| state.balance.clone())
    }

    pub fn address_input(&self) -> String {
        self.state.with(|state| state.address_input.clone())
    }

    pub fn set_address_input(&self, text: String) {
        self.manager().set_address_input(text);
    }

    pub fn connect(&self) {
        let manager = self.manager();
        spawn_local(async move {
            manager.connect_wallet().await;
        });
    }

    pub fn disconnect(&self) {
        self.manager().disconnect_wallet();
    }

    /// Check the balance of the address field; ignored while it is empty.
    pub fn check_balance(&self) {
        let manager = self.manager();
        spawn_local(async move {
            manager.check_balance().await;
        });
    }
}

/// Create the manager, subscribe to provider events for the lifetime of the
/// current owner and look for a pre-authorized account.
pub fn provide_wallet_context() -> WalletContext {
    let provider = InjectedProvider::detect().map(|p| Rc::new(p) as Rc<dyn WalletProvider>);
    if provider.is_none() {
        log::warn!("No injected wallet provider found");
    }

    let manager = ConnectionManager::new(provider);
    let state = RwSignal::new(manager.state());
    manager.on_change(move |snapshot| {
        if state.try_set(snapshot.clone()).is_some() {
            log::debug!("Wallet state changed after the view was disposed");
        }
    });

    let subscriptions: StoredValue<Option<EventSubscriptions>, LocalStorage> =
        StoredValue::new_local(manager.subscribe());
    on_cleanup(move || {
        subscriptions.try_update_value(|subscriptions| {
            if let Some(subscriptions) = subscriptions.take() {
                subscriptions.release();
            }
        });
    });

    let context = WalletContext {
        state,
        manager: StoredValue::new_local(manager.clone()),
        has_provider: manager.has_provider(),
    };
    provide_context(context);

    spawn_local(async move {
        manager.check_connection().await;
    });

    context
}

pub fn use_wallet_context() -> WalletContext {
    expect_context::<WalletContext>()
}
