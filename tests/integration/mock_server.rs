//! Mock HTTP server setup for integration tests

use chancafe_client::{ApiClient, ClientConfig, ConnectivityProbe, Environment};
use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Test fixture that manages a mock server
pub struct MockServerFixture {
    pub server: Arc<Mutex<ServerGuard>>,
    /// Base address the client is pointed at, `http://127.0.0.1:<port>/api/`.
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = format!("{}/api/", server.url());
        Self {
            server: Arc::new(Mutex::new(server)),
            base_url,
        }
    }

    /// Production profile (no env lookups, no body logging) pointed at the mock server.
    pub fn client(&self) -> ApiClient {
        ApiClient::builder()
            .config(ClientConfig::for_environment(Environment::Production))
            .base_url(&self.base_url)
            .build()
            .expect("client builds against mock server")
    }

    pub fn client_with_probe(&self, probe: Arc<dyn ConnectivityProbe>) -> ApiClient {
        ApiClient::builder()
            .config(ClientConfig::for_environment(Environment::Production))
            .base_url(&self.base_url)
            .connectivity(probe)
            .build()
            .expect("client builds against mock server")
    }

    /// JSON response for `method path`, any headers.
    pub async fn mock_json(&self, method: &str, path: &str, status: usize, body: Value) -> Mock {
        let mut server = self.server.lock().await;
        server
            .mock(method, path)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await
    }

    /// Non-envelope response body (HTML error pages, proxies).
    pub async fn mock_raw(&self, method: &str, path: &str, status: usize, body: &str) -> Mock {
        let mut server = self.server.lock().await;
        server
            .mock(method, path)
            .with_status(status)
            .with_header("content-type", "text/html")
            .with_body(body)
            .create_async()
            .await
    }

    /// Only matches requests carrying `Authorization: Bearer <token>`.
    pub async fn mock_authorized(
        &self,
        method: &str,
        path: &str,
        token: &str,
        status: usize,
        body: Value,
    ) -> Mock {
        let mut server = self.server.lock().await;
        server
            .mock(method, path)
            .match_header("authorization", format!("Bearer {}", token).as_str())
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await
    }

    /// Only matches requests without an `Authorization` header.
    pub async fn mock_anonymous(&self, method: &str, path: &str, body: Value) -> Mock {
        let mut server = self.server.lock().await;
        server
            .mock(method, path)
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await
    }

    /// A mock that must never be hit.
    pub async fn mock_unreachable(&self, method: &str, path: &str) -> Mock {
        let mut server = self.server.lock().await;
        server
            .mock(method, path)
            .with_status(200)
            .expect(0)
            .create_async()
            .await
    }
}
