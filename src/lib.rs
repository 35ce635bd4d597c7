//! # chancafe-client
//!
//! Authenticated asynchronous data-access layer for the ChancafeQ sales and quoting
//! backend.
//!
//! ## Overview
//!
//! Logical calls (list clients, approve a credit request, log in) become HTTP requests
//! carrying the session's bearer token. Their outcome is decoded from the backend's
//! `{ success, message, data, code }` envelope, failures are classified into a closed set
//! of kinds with fixed user-facing messages, and the result is published to any number of
//! observers as a loading / success / error signal.
//!
//! ## Core Properties
//!
//! - **One session**: every [`ApiClient`] owns a single [`AuthSession`]; a 401 anywhere
//!   clears it.
//! - **Non-blocking**: each call runs on its own tokio task and reports through a callback
//!   or an [`Observable`].
//! - **Exactly one outcome**: every call ends in one success or one error, never both.
//! - **Offline-aware**: repositories consult a [`ConnectivityProbe`] before dispatching.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chancafe_client::models::LoginRequest;
//! use chancafe_client::ApiClient;
//!
//! #[tokio::main]
//! async fn main() -> chancafe_client::Result<()> {
//!     let client = ApiClient::builder()
//!         .base_url("http://localhost:3000/api/")
//!         .build()?;
//!
//!     let login = client.auth().login(&LoginRequest::new("ana@chancafe.com", "secreto"));
//!     if let Some(envelope) = login.wait().await {
//!         println!("{} ({})", envelope.message, envelope.code);
//!     }
//!
//!     let clients = client.clients().list().wait().await;
//!     println!("{:?}", clients.and_then(|e| e.data).map(|c| c.len()));
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Requests, call execution, error classification, the [`ApiClient`] |
//! | [`transport`] | HTTP sender and request decorators |
//! | [`envelope`] | Response envelope codec and date format |
//! | [`repository`] | Per-resource operations publishing observables |
//! | [`viewmodel`] | Loading / error / success projection per operation |
//! | [`session`] | Bearer token holder |
//! | [`config`] | Environment profiles, YAML and env overrides |
//! | [`models`] | Wire models of the sales backend |

pub mod client;
pub mod config;
pub mod connectivity;
pub mod envelope;
pub mod error_kind;
pub mod logging;
pub mod models;
pub mod observable;
pub mod repository;
pub mod session;
pub mod transport;
pub mod viewmodel;

// Re-export main types for convenience
pub use client::{
    ApiCallback, ApiClient, ApiClientBuilder, ApiRequest, CallExecutor, CallHandle, Method,
    Outcome, OutcomeCallback,
};
pub use config::{ClientConfig, Environment};
pub use connectivity::{AlwaysOnline, ConnectivityProbe, NetworkMonitor};
pub use envelope::{Envelope, Void};
pub use error_kind::ErrorKind;
pub use observable::{Observable, Subscription};
pub use session::AuthSession;
pub use transport::TransportConfig;
pub use viewmodel::{ClientViewModel, OperationState, StateProjector, StateSnapshot};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
