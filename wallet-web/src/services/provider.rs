//! Injected Wallet Provider via wasm-bindgen
//!
//! Binds the EIP-1193 object a wallet extension injects as `window.ethereum`
//! and exposes it to the connection manager as a [`WalletProvider`].

use async_trait::async_trait;
use js_sys::{Function, Reflect};
use serde::Serialize;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use lib_core::wallet::{EventHandler, EventKind, ListenerId, ProviderEvent, RpcRequest, WalletProvider};
use lib_core::ProviderError;

// ============================================================================
// EIP-1193 BINDINGS (JavaScript Interop)
// ============================================================================

#[wasm_bindgen]
extern "C" {
    /// Provider object injected by the wallet extension.
    #[derive(Clone, Debug)]
    pub type Ethereum;

    #[wasm_bindgen(method, catch)]
    async fn request(this: &Ethereum, args: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method)]
    fn on(this: &Ethereum, event: &str, listener: &Function);

    #[wasm_bindgen(method, js_name = removeListener)]
    fn remove_listener(this: &Ethereum, event: &str, listener: &Function);
}

/// Look up `window.ethereum` without throwing when it is missing
#[wasm_bindgen(inline_js = "
export function injectedEthereum() {
    if (typeof window !== 'undefined' && typeof window.ethereum !== 'undefined') {
        return window.ethereum;
    }
    return null;
}
")]
extern "C" {
    #[wasm_bindgen(js_name = injectedEthereum)]
    fn injected_ethereum() -> Option<Ethereum>;
}

// ============================================================================
// PROVIDER
// ============================================================================

/// [`WalletProvider`] backed by `window.ethereum`.
pub struct InjectedProvider {
    ethereum: Ethereum,
    listeners: RefCell<HashMap<ListenerId, (EventKind, Closure<dyn Fn(JsValue)>)>>,
    next_id: Cell<u64>,
}

impl InjectedProvider {
    /// The injected provider, or `None` when no wallet extension is installed.
    pub fn detect() -> Option<Self> {
        let ethereum = injected_ethereum()?;
        log::info!("Injected wallet provider detected");
        Some(Self {
            ethereum,
            listeners: RefCell::new(HashMap::new()),
            next_id: Cell::new(0),
        })
    }
}

#[async_trait(?Send)]
impl WalletProvider for InjectedProvider {
    async fn request(&self, request: RpcRequest) -> Result<Value, ProviderError> {
        log::debug!("-> {}", request.method);
        let args = request
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| ProviderError::new(None, e.to_string()))?;

        let result = self.ethereum.request(&args).await.map_err(provider_error)?;

        serde_wasm_bindgen::from_value(result).map_err(|e| ProviderError::new(None, e.to_string()))
    }

    fn subscribe(&self, kind: EventKind, handler: EventHandler) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let closure = Closure::<dyn Fn(JsValue)>::new(move |payload: JsValue| {
            match decode_event(kind, payload) {
                Ok(event) => handler(event),
                Err(err) => log::warn!("Ignoring malformed {} event: {}", kind.as_str(), err),
            }
        });
        self.ethereum.on(kind.as_str(), closure.as_ref().unchecked_ref());
        self.listeners.borrow_mut().insert(id, (kind, closure));
        id
    }

    fn unsubscribe(&self, kind: EventKind, id: ListenerId) {
        let removed = self.listeners.borrow_mut().remove(&id);
        match removed {
            Some((_, closure)) => {
                self.ethereum
                    .remove_listener(kind.as_str(), closure.as_ref().unchecked_ref());
            }
            None => log::warn!("Unknown {} listener {:?}", kind.as_str(), id),
        }
    }
}

impl Drop for InjectedProvider {
    fn drop(&mut self) {
        // A dropped Closure must not stay registered on the JS side
        for (_, (kind, closure)) in self.listeners.get_mut().drain() {
            self.ethereum
                .remove_listener(kind.as_str(), closure.as_ref().unchecked_ref());
        }
    }
}

fn decode_event(kind: EventKind, payload: JsValue) -> Result<ProviderEvent, String> {
    match kind {
        EventKind::AccountsChanged => serde_wasm_bindgen::from_value::<Vec<String>>(payload)
            .map(ProviderEvent::AccountsChanged)
            .map_err(|e| e.to_string()),
        EventKind::ChainChanged => payload
            .as_string()
            .map(ProviderEvent::ChainChanged)
            .ok_or_else(|| "chain id is not a string".to_string()),
    }
}

/// Read `{ code, message }` off a rejected request.
fn provider_error(err: JsValue) -> ProviderError {
    let code = Reflect::get(&err, &JsValue::from_str("code"))
        .ok()
        .and_then(|v| v.as_f64())
        .map(|c| c as i64);
    let message = Reflect::get(&err, &JsValue::from_str("message"))
        .ok()
        .and_then(|v| v.as_string())
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{:?}", err));
    ProviderError::new(code, message)
}
