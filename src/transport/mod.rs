//! HTTP transport: request decoration, dispatch and raw responses.

pub mod decorate;
pub mod http;

pub use decorate::{BearerAuthenticator, CorrelationId, RequestDecorator};
pub use http::HttpTransport;

use bytes::Bytes;
use reqwest::header::HeaderMap;
use std::time::Duration;

/// Construction-time settings of an [`HttpTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Base address every request path is resolved against, e.g. `https://api.chancafe.com/api/`.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub write_timeout: Duration,
    /// Log request and response bodies at `debug` level.
    pub log_bodies: bool,
    pub user_agent: String,
}

impl TransportConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            connect_timeout: Duration::from_secs(30),
            read_timeout: Duration::from_secs(30),
            write_timeout: Duration::from_secs(30),
            log_bodies: false,
            user_agent: default_user_agent(),
        }
    }

    pub fn with_timeouts(mut self, connect: Duration, read: Duration, write: Duration) -> Self {
        self.connect_timeout = connect;
        self.read_timeout = read;
        self.write_timeout = write;
        self
    }

    pub fn with_body_logging(mut self, enabled: bool) -> Self {
        self.log_bodies = enabled;
        self
    }

    /// Deadline for one request once connected: time to upload plus time to download.
    pub fn request_deadline(&self) -> Duration {
        self.write_timeout.saturating_add(self.read_timeout)
    }
}

pub(crate) fn default_user_agent() -> String {
    format!("chancafe-client/{}", env!("CARGO_PKG_VERSION"))
}

/// A response as received from the network, before envelope decoding.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Transport error: {0}")]
    Other(String),
}

impl TransportError {
    /// Short cause text surfaced in user-facing messages.
    pub fn cause(&self) -> String {
        match self {
            TransportError::Http(e) if e.is_timeout() => format!("timeout ({})", e),
            TransportError::Http(e) => e.to_string(),
            TransportError::InvalidRequest(msg) | TransportError::Other(msg) => msg.clone(),
        }
    }
}
