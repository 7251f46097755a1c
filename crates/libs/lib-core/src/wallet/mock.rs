//! Scripted in-memory provider for manager tests.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use tokio::sync::oneshot;

use super::provider::{EventHandler, EventKind, ListenerId, ProviderEvent, RpcRequest, WalletProvider};
use crate::error::ProviderError;

type Response = Result<Value, ProviderError>;

enum Scripted {
    Ready(Response),
    Deferred(oneshot::Receiver<Response>),
}

#[derive(Default)]
pub struct MockProvider {
    once: RefCell<HashMap<String, VecDeque<Scripted>>>,
    always: RefCell<HashMap<String, Response>>,
    calls: RefCell<Vec<RpcRequest>>,
    listeners: RefCell<Vec<(EventKind, ListenerId, EventHandler)>>,
    next_id: Cell<u64>,
}

impl MockProvider {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Provider with one authorized account on `chain_id`.
    pub fn with_account(account: &str, chain_id: &str) -> Rc<Self> {
        let provider = Self::new();
        provider.respond("eth_accounts", Ok(json!([account])));
        provider.respond("eth_chainId", Ok(json!(chain_id)));
        provider.respond("wallet_requestPermissions", Ok(json!([{ "parentCapability": "eth_accounts" }])));
        provider
    }

    /// Answer every call to `method` with `response`.
    pub fn respond(&self, method: &str, response: Response) {
        self.always.borrow_mut().insert(method.to_string(), response);
    }

    /// Answer the next call to `method` with `response`, ahead of [`respond`](Self::respond).
    pub fn respond_once(&self, method: &str, response: Response) {
        self.queue(method, Scripted::Ready(response));
    }

    /// Hold the next call to `method` until the returned sender fires.
    pub fn respond_later(&self, method: &str) -> oneshot::Sender<Response> {
        let (tx, rx) = oneshot::channel();
        self.queue(method, Scripted::Deferred(rx));
        tx
    }

    fn queue(&self, method: &str, scripted: Scripted) {
        self.once
            .borrow_mut()
            .entry(method.to_string())
            .or_default()
            .push_back(scripted);
    }

    /// Methods requested so far, in order.
    pub fn methods(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.method.clone()).collect()
    }

    pub fn calls(&self) -> Vec<RpcRequest> {
        self.calls.borrow().clone()
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.borrow().iter().filter(|(k, _, _)| *k == kind).count()
    }

    /// Deliver `event` to every listener registered for its kind.
    pub fn emit(&self, event: ProviderEvent) {
        let handlers: Vec<EventHandler> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(kind, _, _)| *kind == event.kind())
            .map(|(_, _, handler)| handler.clone())
            .collect();
        for handler in handlers {
            handler(event.clone());
        }
    }
}

#[async_trait(?Send)]
impl WalletProvider for MockProvider {
    async fn request(&self, request: RpcRequest) -> Result<Value, ProviderError> {
        self.calls.borrow_mut().push(request.clone());

        let scripted = self
            .once
            .borrow_mut()
            .get_mut(&request.method)
            .and_then(|queue| queue.pop_front());

        match scripted {
            Some(Scripted::Ready(response)) => response,
            Some(Scripted::Deferred(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(ProviderError::new(None, "deferred response dropped"))),
            None => self.always.borrow().get(&request.method).cloned().unwrap_or_else(|| {
                Err(ProviderError::new(
                    Some(-32601),
                    format!("method {} not mocked", request.method),
                ))
            }),
        }
    }

    fn subscribe(&self, kind: EventKind, handler: EventHandler) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((kind, id, handler));
        id
    }

    fn unsubscribe(&self, kind: EventKind, id: ListenerId) {
        self.listeners
            .borrow_mut()
            .retain(|(k, listener, _)| !(*k == kind && *listener == id));
    }
}
