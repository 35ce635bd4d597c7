//! Per-resource façades over the call executor.
//!
//! Every operation returns an [`Observable<Envelope<T>>`](crate::Observable) that is
//! published exactly once, when the call settles. When the connectivity probe reports no
//! network the observable is settled immediately with the offline envelope and nothing
//! is dispatched.

pub mod auth;
pub mod categories;
pub mod clients;
pub mod credit_requests;
pub mod products;
pub mod quotes;
pub mod resource;
pub mod suppliers;

pub use auth::AuthRepository;
pub use categories::CategoryRepository;
pub use clients::ClientRepository;
pub use credit_requests::CreditRequestRepository;
pub use products::ProductRepository;
pub use quotes::QuoteRepository;
pub use resource::{ResourceLabels, ResourceRepository};
pub use suppliers::SupplierRepository;

use crate::client::{ApiRequest, CallExecutor, Outcome, OutcomeCallback};
use crate::connectivity::ConnectivityProbe;
use crate::envelope::Envelope;
use crate::observable::Observable;
use crate::session::AuthSession;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

/// Bounds shared by every payload a repository publishes.
pub trait Payload: DeserializeOwned + Clone + Send + Sync + 'static {}

impl<T> Payload for T where T: DeserializeOwned + Clone + Send + Sync + 'static {}

/// What every repository needs from the client: the executor, the pre-flight probe and
/// the session.
#[derive(Clone)]
pub struct RepoContext {
    executor: CallExecutor,
    connectivity: Arc<dyn ConnectivityProbe>,
    session: Arc<AuthSession>,
}

impl RepoContext {
    pub(crate) fn new(
        executor: CallExecutor,
        connectivity: Arc<dyn ConnectivityProbe>,
        session: Arc<AuthSession>,
    ) -> Self {
        Self {
            executor,
            connectivity,
            session,
        }
    }

    pub fn is_online(&self) -> bool {
        self.connectivity.is_network_available()
    }

    pub fn session(&self) -> &Arc<AuthSession> {
        &self.session
    }

    /// Dispatches `request`; a success is republished with `message` and `code`.
    pub(crate) fn dispatch<T: Payload>(
        &self,
        request: ApiRequest,
        message: impl Into<String>,
        code: i32,
    ) -> Observable<Envelope<T>> {
        let message = message.into();
        self.dispatch_with(request, move |outcome| outcome.into_envelope(&message, code))
    }

    /// Like [`dispatch`](Self::dispatch) with a custom mapping from outcome to envelope.
    pub(crate) fn dispatch_with<T, F>(&self, request: ApiRequest, finish: F) -> Observable<Envelope<T>>
    where
        T: Payload,
        F: FnOnce(Outcome<T>) -> Envelope<T> + Send + 'static,
    {
        if !self.is_online() {
            debug!(request = %request, "no network, short-circuiting");
            return settled(Envelope::offline());
        }
        self.execute_with(request, finish)
    }

    /// Dispatches without consulting the connectivity probe.
    pub(crate) fn execute_with<T, F>(&self, request: ApiRequest, finish: F) -> Observable<Envelope<T>>
    where
        T: Payload,
        F: FnOnce(Outcome<T>) -> Envelope<T> + Send + 'static,
    {
        let cell = Observable::new();
        let sink = cell.clone();
        self.executor.execute(
            request,
            OutcomeCallback::new(move |outcome: Outcome<T>| sink.publish(finish(outcome))),
        );
        cell
    }
}

/// An observable that already holds its final envelope.
pub(crate) fn settled<T: Payload>(envelope: Envelope<T>) -> Observable<Envelope<T>> {
    Observable::with_value(envelope)
}
