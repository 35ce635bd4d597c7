//! Error classification logic

use crate::error_kind::ErrorKind;
use crate::session::AuthSession;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Result of classifying a failed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub kind: ErrorKind,
    pub message: String,
    pub code: i32,
}

impl From<ErrorKind> for Classification {
    fn from(kind: ErrorKind) -> Self {
        Self {
            message: kind.message(),
            code: kind.code(),
            kind,
        }
    }
}

/// Maps non-2xx statuses and transport failures to an [`ErrorKind`].
///
/// Classifying an authentication failure clears the session it was built with.
#[derive(Debug, Clone)]
pub struct ErrorClassifier {
    session: Arc<AuthSession>,
}

impl ErrorClassifier {
    pub fn new(session: Arc<AuthSession>) -> Self {
        Self { session }
    }

    pub fn classify_status(&self, status: u16) -> Classification {
        self.resolve(ErrorKind::from_http_status(status))
    }

    /// No response reached the caller, or its body could not be read as an envelope.
    pub fn classify_transport(&self, cause: impl fmt::Display) -> Classification {
        self.resolve(ErrorKind::transport_failure(cause))
    }

    pub fn offline() -> Classification {
        ErrorKind::Offline.into()
    }

    fn resolve(&self, kind: ErrorKind) -> Classification {
        if kind.clears_session() {
            warn!(error_kind = kind.name(), "authentication rejected, clearing session");
            self.session.clear();
        }
        kind.into()
    }
}
