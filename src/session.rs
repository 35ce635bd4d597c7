//! Bearer token holder shared by the transport, the error classifier and the repositories.

use arc_swap::ArcSwapOption;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// The authenticated session of one [`ApiClient`](crate::ApiClient).
///
/// Reads and writes are atomic swaps of a single reference. Concurrent `set`/`clear`
/// calls leave the session in the state of whichever call ran last.
#[derive(Default)]
pub struct AuthSession {
    token: ArcSwapOption<String>,
}

impl AuthSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::new();
        session.set(token);
        session
    }

    pub fn set(&self, token: impl Into<String>) {
        self.token.store(Some(Arc::new(token.into())));
        debug!("session token stored");
    }

    pub fn get(&self) -> Option<String> {
        self.token.load_full().map(|t| t.as_ref().clone())
    }

    /// The token if it is present and non-empty.
    pub(crate) fn bearer(&self) -> Option<Arc<String>> {
        self.token.load_full().filter(|t| !t.is_empty())
    }

    pub fn clear(&self) {
        if self.token.swap(None).is_some() {
            debug!("session token cleared");
        }
    }

    /// Explicit reset; same effect as [`clear`](Self::clear).
    pub fn reset(&self) {
        self.clear();
    }

    pub fn is_authenticated(&self) -> bool {
        self.bearer().is_some()
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
