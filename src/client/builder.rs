use crate::client::core::ApiClient;
use crate::client::error_classification::ErrorClassifier;
use crate::client::execution::CallExecutor;
use crate::config::ClientConfig;
use crate::connectivity::{AlwaysOnline, ConnectivityProbe};
use crate::session::AuthSession;
use crate::transport::{BearerAuthenticator, CorrelationId, HttpTransport, RequestDecorator};
use crate::Result;
use arc_swap::ArcSwap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Builder for [`ApiClient`].
///
/// Keep this surface area small and predictable. Unset values come from the
/// [`ClientConfig`] (by default the `CHANCAFE_*` environment, see [`crate::config`]).
pub struct ApiClientBuilder {
    config: Option<ClientConfig>,
    base_url_override: Option<String>,
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
    write_timeout: Option<Duration>,
    log_bodies: Option<bool>,
    session: Option<Arc<AuthSession>>,
    connectivity: Arc<dyn ConnectivityProbe>,
    decorators: Vec<Arc<dyn RequestDecorator>>,
    correlation_ids: bool,
}

impl ApiClientBuilder {
    pub fn new() -> Self {
        Self {
            config: None,
            base_url_override: None,
            connect_timeout: None,
            read_timeout: None,
            write_timeout: None,
            log_bodies: None,
            session: None,
            connectivity: Arc::new(AlwaysOnline),
            decorators: Vec::new(),
            correlation_ids: true,
        }
    }

    /// Use an explicit configuration instead of the environment.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Load the configuration from a YAML file, then apply `CHANCAFE_*` overrides.
    pub fn config_file(mut self, path: impl AsRef<Path>) -> Result<Self> {
        self.config = Some(ClientConfig::from_yaml_file(path)?.with_env_overrides());
        Ok(self)
    }

    /// Override the base URL (mock servers, on-premise deployments).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_override = Some(base_url.into());
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    pub fn write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = Some(timeout);
        self
    }

    /// Log request and response bodies at `debug` level.
    pub fn log_bodies(mut self, enable: bool) -> Self {
        self.log_bodies = Some(enable);
        self
    }

    /// Share an existing session instead of starting with an empty one.
    pub fn session(mut self, session: Arc<AuthSession>) -> Self {
        self.session = Some(session);
        self
    }

    /// Inject the network availability probe. Default reports always online.
    pub fn connectivity(mut self, probe: Arc<dyn ConnectivityProbe>) -> Self {
        self.connectivity = probe;
        self
    }

    /// Add a decorator; it runs after the bearer authenticator, in registration order.
    pub fn decorator(mut self, decorator: Arc<dyn RequestDecorator>) -> Self {
        self.decorators.push(decorator);
        self
    }

    /// Tag every request with an `x-request-id` header (on by default).
    pub fn correlation_ids(mut self, enable: bool) -> Self {
        self.correlation_ids = enable;
        self
    }

    pub fn build(self) -> Result<ApiClient> {
        let config = self.config.unwrap_or_else(ClientConfig::from_env);
        let mut transport_config = config.transport()?;
        if let Some(url) = self.base_url_override {
            transport_config.base_url = url;
        }
        if let Some(t) = self.connect_timeout {
            transport_config.connect_timeout = t;
        }
        if let Some(t) = self.read_timeout {
            transport_config.read_timeout = t;
        }
        if let Some(t) = self.write_timeout {
            transport_config.write_timeout = t;
        }
        if let Some(enable) = self.log_bodies {
            transport_config.log_bodies = enable;
        }

        let session = self.session.unwrap_or_default();

        let mut decorators: Vec<Arc<dyn RequestDecorator>> =
            vec![Arc::new(BearerAuthenticator::new(Arc::clone(&session)))];
        if self.correlation_ids {
            decorators.push(Arc::new(CorrelationId));
        }
        decorators.extend(self.decorators);

        let transport = HttpTransport::new(&transport_config, decorators.clone())?;
        info!(
            base_url = %transport.base_url(),
            environment = ?config.environment,
            "api client ready"
        );
        let transport = Arc::new(ArcSwap::from_pointee(transport));
        let executor = CallExecutor::new(
            Arc::clone(&transport),
            ErrorClassifier::new(Arc::clone(&session)),
        );

        Ok(ApiClient {
            session,
            transport,
            decorators,
            connectivity: self.connectivity,
            executor,
        })
    }
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
