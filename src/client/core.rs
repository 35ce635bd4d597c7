use crate::client::builder::ApiClientBuilder;
use crate::client::execution::CallExecutor;
use crate::connectivity::ConnectivityProbe;
use crate::repository::{
    AuthRepository, CategoryRepository, ClientRepository, CreditRequestRepository,
    ProductRepository, QuoteRepository, RepoContext, SupplierRepository,
};
use crate::session::AuthSession;
use crate::transport::{HttpTransport, RequestDecorator, TransportConfig};
use crate::Result;
use arc_swap::ArcSwap;
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// Process-wide entry point to the sales backend.
///
/// Owns the single [`AuthSession`], the swappable transport and the connectivity probe,
/// and hands out repositories bound to them. Cloning is cheap and every clone shares the
/// same session and transport slot.
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) session: Arc<AuthSession>,
    pub(crate) transport: Arc<ArcSwap<HttpTransport>>,
    pub(crate) decorators: Vec<Arc<dyn RequestDecorator>>,
    pub(crate) connectivity: Arc<dyn ConnectivityProbe>,
    pub(crate) executor: CallExecutor,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.transport.load().base_url().as_str())
            .field("session", &self.session)
            .field("decorators", &self.decorators.len())
            .finish()
    }
}

impl ApiClient {
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::new()
    }

    /// Client configured from `CHANCAFE_*` environment variables.
    pub fn from_env() -> Result<Self> {
        ApiClientBuilder::new().build()
    }

    pub fn session(&self) -> &Arc<AuthSession> {
        &self.session
    }

    pub fn executor(&self) -> &CallExecutor {
        &self.executor
    }

    pub fn connectivity(&self) -> &Arc<dyn ConnectivityProbe> {
        &self.connectivity
    }

    /// The transport new calls are dispatched on.
    pub fn transport(&self) -> Arc<HttpTransport> {
        self.transport.load_full()
    }

    /// Builds a fresh transport from `config` and swaps it in atomically.
    ///
    /// Request decorators (including the bearer authenticator) carry over. Calls already
    /// in flight finish on the transport they started with.
    pub fn rebuild_transport(&self, config: TransportConfig) -> Result<()> {
        let fresh = HttpTransport::new(&config, self.decorators.clone())?;
        info!(base_url = %fresh.base_url(), "transport rebuilt");
        self.transport.store(Arc::new(fresh));
        Ok(())
    }

    fn context(&self) -> RepoContext {
        RepoContext::new(
            self.executor.clone(),
            Arc::clone(&self.connectivity),
            Arc::clone(&self.session),
        )
    }

    pub fn auth(&self) -> AuthRepository {
        AuthRepository::new(self.context())
    }

    pub fn clients(&self) -> ClientRepository {
        ClientRepository::bind(self.context())
    }

    pub fn quotes(&self) -> QuoteRepository {
        QuoteRepository::bind(self.context())
    }

    pub fn products(&self) -> ProductRepository {
        ProductRepository::bind(self.context())
    }

    pub fn categories(&self) -> CategoryRepository {
        CategoryRepository::bind(self.context())
    }

    pub fn suppliers(&self) -> SupplierRepository {
        SupplierRepository::bind(self.context())
    }

    pub fn credit_requests(&self) -> CreditRequestRepository {
        CreditRequestRepository::bind(self.context())
    }
}
