//! Cross-cutting request decorators.
//!
//! Decorators are registered once on the client builder and applied by the transport to
//! every outgoing request, in registration order. They survive transport rebuilds.

use crate::session::AuthSession;
use reqwest::RequestBuilder;
use std::sync::Arc;
use uuid::Uuid;

pub trait RequestDecorator: Send + Sync {
    fn decorate(&self, request: RequestBuilder) -> RequestBuilder;
}

/// Attaches `Authorization: Bearer <token>` whenever the session holds a non-empty token.
#[derive(Debug, Clone)]
pub struct BearerAuthenticator {
    session: Arc<AuthSession>,
}

impl BearerAuthenticator {
    pub fn new(session: Arc<AuthSession>) -> Self {
        Self { session }
    }
}

impl RequestDecorator for BearerAuthenticator {
    fn decorate(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.bearer() {
            Some(token) => request.bearer_auth(token.as_str()),
            None => request,
        }
    }
}

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Tags each request with a fresh correlation id for log linkage.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorrelationId;

impl RequestDecorator for CorrelationId {
    fn decorate(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(REQUEST_ID_HEADER, Uuid::new_v4().to_string())
    }
}
