//! Call execution: dispatches one request and delivers its decoded outcome to a callback.
//!
//! This is a single attempt (no retry, no fallback). Every `execute` ends in exactly one
//! of `on_success` / `on_error`.

use crate::envelope::{self, Envelope, Void};
use crate::transport::{HttpTransport, RawResponse};
use crate::{Error, ErrorContext, Result};
use arc_swap::ArcSwap;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;
use tracing::info;

use super::endpoint::ApiRequest;
use super::error_classification::{Classification, ErrorClassifier};

/// Typed receiver of a call's outcome.
pub trait ApiCallback<T>: Send + 'static {
    /// `data` is the envelope's payload, `None` for operations without one.
    fn on_success(&mut self, data: Option<T>);

    fn on_error(&mut self, message: String, code: i32);

    /// Fired synchronously inside `execute`, before the request is dispatched.
    fn on_loading(&mut self) {}
}

/// Awaitable form of a callback outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success(Option<T>),
    Failure { message: String, code: i32 },
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Wraps the outcome in a fresh envelope; successes get `message` and `code`.
    pub fn into_envelope(self, message: &str, code: i32) -> Envelope<T> {
        match self {
            Outcome::Success(data) => Envelope::success(data, message, code),
            Outcome::Failure { message, code } => Envelope::failure(message, code),
        }
    }

    fn deliver<C: ApiCallback<T>>(self, callback: &mut C) {
        match self {
            Outcome::Success(data) => callback.on_success(data),
            Outcome::Failure { message, code } => callback.on_error(message, code),
        }
    }
}

impl<T> From<Classification> for Outcome<T> {
    fn from(c: Classification) -> Self {
        Outcome::Failure {
            message: c.message,
            code: c.code,
        }
    }
}

/// Handle to a dispatched call. Dropping it does not cancel the call.
#[derive(Debug)]
pub struct CallHandle {
    inner: JoinHandle<()>,
}

impl CallHandle {
    /// Waits until the callback has run.
    pub async fn join(self) -> Result<()> {
        self.inner.await.map_err(|e| {
            Error::runtime(
                format!("call task failed: {}", e),
                ErrorContext::at("call_executor"),
            )
        })
    }

    pub fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }
}

/// Generic bridge from a pending request to a typed callback.
#[derive(Clone)]
pub struct CallExecutor {
    transport: Arc<ArcSwap<HttpTransport>>,
    classifier: ErrorClassifier,
}

impl CallExecutor {
    pub(crate) fn new(transport: Arc<ArcSwap<HttpTransport>>, classifier: ErrorClassifier) -> Self {
        Self {
            transport,
            classifier,
        }
    }

    pub fn classifier(&self) -> &ErrorClassifier {
        &self.classifier
    }

    /// Fires `on_loading`, then dispatches `request` on a tokio task and delivers the
    /// outcome to `callback`. Never blocks the caller.
    pub fn execute<T, C>(&self, request: ApiRequest, mut callback: C) -> CallHandle
    where
        T: DeserializeOwned + Send + 'static,
        C: ApiCallback<T>,
    {
        callback.on_loading();
        let executor = self.clone();
        let inner = tokio::spawn(async move {
            executor.execute_async::<T>(&request).await.deliver(&mut callback);
        });
        CallHandle { inner }
    }

    /// Runs `request` to completion on the current task.
    pub async fn execute_async<T: DeserializeOwned>(&self, request: &ApiRequest) -> Outcome<T> {
        // calls already in flight keep the transport they started with
        let transport = self.transport.load_full();
        let start = Instant::now();
        match transport.send(request).await {
            Ok(raw) => self.resolve(request, raw, start),
            Err(e) => {
                let classification = self.classifier.classify_transport(e.cause());
                info!(
                    request = %request,
                    error_kind = classification.kind.name(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    "request failed before a response arrived"
                );
                classification.into()
            }
        }
    }

    fn resolve<T: DeserializeOwned>(&self, request: &ApiRequest, raw: RawResponse, start: Instant) -> Outcome<T> {
        if raw.is_success() {
            return match envelope::decode::<T>(&raw.body, raw.status) {
                Ok(env) if env.success => Outcome::Success(env.data),
                Ok(env) => Outcome::Failure {
                    message: env.message,
                    code: env.code,
                },
                Err(e) => {
                    let classification = self.classifier.classify_transport(decode_cause(&e));
                    info!(
                        request = %request,
                        http_status = raw.status,
                        error_kind = classification.kind.name(),
                        "response body is not a valid envelope"
                    );
                    classification.into()
                }
            };
        }

        // Classify first: a 401 must clear the session even when the server sent its own envelope.
        let classification = self.classifier.classify_status(raw.status);
        info!(
            request = %request,
            http_status = raw.status,
            error_kind = classification.kind.name(),
            duration_ms = start.elapsed().as_millis() as u64,
            "request failed"
        );
        match envelope::decode::<Void>(&raw.body, raw.status) {
            Ok(env) if !env.success => Outcome::Failure {
                message: env.message,
                code: env.code,
            },
            _ => classification.into(),
        }
    }
}

fn decode_cause(err: &Error) -> String {
    match err {
        Error::Decode { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

/// Adapts a closure over the final [`Outcome`] into an [`ApiCallback`].
pub struct OutcomeCallback<T, F>
where
    F: FnOnce(Outcome<T>) + Send + 'static,
{
    handler: Option<F>,
    _marker: std::marker::PhantomData<fn(T)>,
}

impl<T, F> OutcomeCallback<T, F>
where
    F: FnOnce(Outcome<T>) + Send + 'static,
{
    pub fn new(handler: F) -> Self {
        Self {
            handler: Some(handler),
            _marker: std::marker::PhantomData,
        }
    }

    fn finish(&mut self, outcome: Outcome<T>) {
        if let Some(handler) = self.handler.take() {
            handler(outcome);
        }
    }
}

impl<T, F> ApiCallback<T> for OutcomeCallback<T, F>
where
    T: 'static,
    F: FnOnce(Outcome<T>) + Send + 'static,
{
    fn on_success(&mut self, data: Option<T>) {
        self.finish(Outcome::Success(data));
    }

    fn on_error(&mut self, message: String, code: i32) {
        self.finish(Outcome::Failure { message, code });
    }
}
