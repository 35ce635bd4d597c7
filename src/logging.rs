//! `tracing` subscriber setup for binaries and tests.
//!
//! The library itself only emits events; installing a subscriber is the host's call.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "chancafe_client=info";

/// Installs a formatting subscriber filtered by `RUST_LOG` (or `default_filter`).
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_with(default_filter: &str) -> bool {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()
        .is_ok()
}

pub fn init() -> bool {
    init_with(DEFAULT_FILTER)
}
