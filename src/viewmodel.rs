//! Screen-facing state: loading flag plus error and success messages per operation.
//!
//! A [`StateProjector`] keeps one [`OperationState`] slot per operation key. Tracking a
//! call flips the slot's `is_loading` on and, when the call's envelope arrives, off again
//! while setting either `error_message` or `success_message`. Calls sharing a key share
//! the slot, so the outcome that arrives last is the one the screen shows.

use crate::envelope::{Envelope, Void};
use crate::models::Client;
use crate::observable::{Observable, Subscription};
use crate::repository::ClientRepository;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// The three signals a screen binds to for one operation.
#[derive(Debug, Clone)]
pub struct OperationState {
    pub is_loading: Observable<bool>,
    pub error_message: Observable<Option<String>>,
    pub success_message: Observable<Option<String>>,
}

impl OperationState {
    fn new() -> Self {
        Self {
            is_loading: Observable::with_value(false),
            error_message: Observable::with_value(None),
            success_message: Observable::with_value(None),
        }
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            is_loading: self.is_loading.get().unwrap_or(false),
            error_message: self.error_message.get().flatten(),
            success_message: self.success_message.get().flatten(),
        }
    }

    fn apply<T>(&self, envelope: &Envelope<T>) {
        self.is_loading.publish(false);
        if envelope.success {
            self.error_message.publish(None);
            self.success_message.publish(Some(envelope.message.clone()));
        } else {
            self.success_message.publish(None);
            self.error_message.publish(Some(envelope.message.clone()));
        }
    }

    fn clear_messages(&self) {
        self.error_message.publish(None);
        self.success_message.publish(None);
    }
}

/// Point-in-time copy of an [`OperationState`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateSnapshot {
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub success_message: Option<String>,
}

/// Per-screen registry of operation slots.
#[derive(Debug, Default)]
pub struct StateProjector {
    slots: Mutex<HashMap<&'static str, OperationState>>,
}

impl StateProjector {
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<&'static str, OperationState>> {
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// The slot for `key`, created on first use.
    pub fn state(&self, key: &'static str) -> OperationState {
        self.slots()
            .entry(key)
            .or_insert_with(OperationState::new)
            .clone()
    }

    /// Marks `key` as loading and projects the first envelope `outcome` yields into it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn track<T>(&self, key: &'static str, outcome: &Observable<Envelope<T>>) -> Subscription
    where
        T: Clone + Send + Sync + 'static,
    {
        let state = self.state(key);
        state.is_loading.publish(true);
        outcome.observe_once(move |envelope| state.apply(&envelope))
    }

    pub fn clear_messages(&self, key: &'static str) {
        if let Some(state) = self.slots().get(key) {
            state.clear_messages();
        }
    }

    pub fn clear_all(&self) {
        for state in self.slots().values() {
            state.clear_messages();
        }
    }
}

/// Client screens: list, detail and edit.
pub struct ClientViewModel {
    repository: ClientRepository,
    projector: StateProjector,
    tracked: Mutex<Vec<Subscription>>,
}

impl ClientViewModel {
    pub const LIST: &'static str = "clients.list";
    pub const ACTIVE: &'static str = "clients.active";
    pub const DETAIL: &'static str = "clients.detail";
    pub const BY_DOCUMENT: &'static str = "clients.by_document";
    pub const CREATE: &'static str = "clients.create";
    pub const UPDATE: &'static str = "clients.update";
    pub const DELETE: &'static str = "clients.delete";
    pub const STATUS: &'static str = "clients.status";
    pub const CREDIT_LIMIT: &'static str = "clients.credit_limit";

    pub fn new(repository: ClientRepository) -> Self {
        Self {
            repository,
            projector: StateProjector::new(),
            tracked: Mutex::new(Vec::new()),
        }
    }

    pub fn state(&self, key: &'static str) -> OperationState {
        self.projector.state(key)
    }

    pub fn projector(&self) -> &StateProjector {
        &self.projector
    }

    pub fn clear_messages(&self, key: &'static str) {
        self.projector.clear_messages(key);
    }

    fn track<T>(&self, key: &'static str, outcome: Observable<Envelope<T>>) -> Observable<Envelope<T>>
    where
        T: Clone + Send + Sync + 'static,
    {
        let subscription = self.projector.track(key, &outcome);
        let mut tracked = self.tracked.lock().unwrap_or_else(|p| p.into_inner());
        tracked.retain(|s| !s.is_cancelled());
        tracked.push(subscription);
        outcome
    }

    pub fn clients(&self) -> Observable<Envelope<Vec<Client>>> {
        self.track(Self::LIST, self.repository.list())
    }

    pub fn active_clients(&self) -> Observable<Envelope<Vec<Client>>> {
        self.track(Self::ACTIVE, self.repository.active())
    }

    pub fn client(&self, id: i64) -> Observable<Envelope<Client>> {
        self.track(Self::DETAIL, self.repository.get(id))
    }

    pub fn client_by_document(&self, document_number: &str) -> Observable<Envelope<Client>> {
        self.track(Self::BY_DOCUMENT, self.repository.by_document(document_number))
    }

    pub fn create_client(&self, client: &Client) -> Observable<Envelope<Client>> {
        self.track(Self::CREATE, self.repository.create(client))
    }

    pub fn update_client(&self, id: i64, client: &Client) -> Observable<Envelope<Client>> {
        self.track(Self::UPDATE, self.repository.update(id, client))
    }

    pub fn delete_client(&self, id: i64) -> Observable<Envelope<Void>> {
        self.track(Self::DELETE, self.repository.delete(id))
    }

    pub fn change_status(&self, id: i64, status: &str) -> Observable<Envelope<Client>> {
        self.track(Self::STATUS, self.repository.set_status(id, status))
    }

    pub fn update_credit_limit(&self, id: i64, credit_limit: f64) -> Observable<Envelope<Client>> {
        self.track(
            Self::CREDIT_LIMIT,
            self.repository.update_credit_limit(id, credit_limit),
        )
    }
}
