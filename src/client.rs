//! Client layer: request description, dispatch, classification and the [`ApiClient`] that
//! ties them to one session.
//!
//! Implementation details are split into submodules under `src/client/`.

pub mod builder;
pub mod core;
pub mod endpoint;
pub mod error_classification;
pub mod execution;

pub use builder::ApiClientBuilder;
pub use core::ApiClient;
pub use endpoint::{ApiRequest, Method};
pub use error_classification::{Classification, ErrorClassifier};
pub use execution::{ApiCallback, CallExecutor, CallHandle, Outcome, OutcomeCallback};
