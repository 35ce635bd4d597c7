use crate::client::ApiRequest;
use crate::transport::{RawResponse, RequestDecorator, TransportConfig, TransportError};
use crate::{Error, ErrorContext, Result};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;
use url::Url;

/// Asynchronous HTTP sender bound to one base address and one set of timeouts.
///
/// Instances are immutable; changing the configuration means building a new one (see
/// [`ApiClient::rebuild_transport`](crate::ApiClient::rebuild_transport)).
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
    decorators: Vec<Arc<dyn RequestDecorator>>,
    log_bodies: bool,
}

impl HttpTransport {
    pub fn new(config: &TransportConfig, decorators: Vec<Arc<dyn RequestDecorator>>) -> Result<Self> {
        let base_url = parse_base_url(&config.base_url)?;

        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_deadline())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self {
            client,
            base_url,
            decorators,
            log_bodies: config.log_bodies,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL of a request; placeholder values are percent-encoded per segment.
    pub fn url_for(&self, request: &ApiRequest) -> std::result::Result<Url, TransportError> {
        let segments = request
            .segments()
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| TransportError::InvalidRequest("base URL cannot hold a path".into()))?;
            path.pop_if_empty();
            path.extend(segments.iter());
        }
        Ok(url)
    }

    pub async fn send(&self, request: &ApiRequest) -> std::result::Result<RawResponse, TransportError> {
        let url = self.url_for(request)?;
        let body = request
            .json_body()
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;

        let mut builder = self.client.request(request.method().to_reqwest(), url.clone());
        if !request.query_pairs().is_empty() {
            builder = builder.query(request.query_pairs());
        }
        if let Some(body) = body {
            if self.log_bodies {
                debug!(method = %request.method(), url = %url, body = %body, "request body");
            }
            builder = builder.json(body);
        }
        for decorator in &self.decorators {
            builder = decorator.decorate(builder);
        }

        let start = Instant::now();
        debug!(
            method = %request.method(),
            url = %url,
            session_required = request.requires_session(),
            "dispatching request"
        );

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let bytes = response.bytes().await?;

        debug!(
            method = %request.method(),
            url = %url,
            http_status = status,
            duration_ms = start.elapsed().as_millis() as u64,
            "response received"
        );
        if self.log_bodies {
            debug!(body = %String::from_utf8_lossy(&bytes), "response body");
        }

        Ok(RawResponse {
            status,
            headers,
            body: bytes,
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let ctx = || {
        ErrorContext::at("http_transport")
            .field("base_url")
            .detail(raw)
    };
    let mut normalized = raw.trim().to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    let url = Url::parse(&normalized)
        .map_err(|e| Error::configuration(format!("invalid base URL: {}", e), ctx()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::configuration(
            format!("unsupported scheme `{}`, expected http or https", other),
            ctx(),
        )),
    }
}
