//! Closed classification of failed API calls.
//!
//! Every non-success outcome of a call resolves to exactly one [`ErrorKind`]. The kind
//! decides the code and the human-readable message handed to callbacks, and whether the
//! local session must be invalidated.
//!
//! | Kind               | Code   | Message                            |
//! |--------------------|--------|------------------------------------|
//! | `BadRequest`       | 400    | Datos inválidos                    |
//! | `Unauthorized`     | 401    | No autorizado - Sesión expirada    |
//! | `Forbidden`        | 403    | Acceso denegado                    |
//! | `NotFound`         | 404    | Recurso no encontrado              |
//! | `ServerError`      | 500    | Error interno del servidor         |
//! | `Unavailable`      | 503    | Servicio no disponible             |
//! | `Unknown(c)`       | c      | Error del servidor: c              |
//! | `Offline`          | 0      | No hay conexión a internet         |
//! | `TransportFailure` | 500    | Error de conexión: cause           |
//!
//! ## Example
//!
//! ```rust
//! use chancafe_client::error_kind::ErrorKind;
//!
//! let kind = ErrorKind::from_http_status(401);
//! assert_eq!(kind, ErrorKind::Unauthorized);
//! assert_eq!(kind.code(), 401);
//! assert!(kind.clears_session());
//! ```

use std::fmt;

/// Synthetic code used when the device reports no network.
pub const OFFLINE_CODE: i32 = 0;
/// Synthetic code used when no response was received or the body was unreadable.
pub const TRANSPORT_FAILURE_CODE: i32 = 500;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 400: the server rejected the request data
    BadRequest,
    /// 401: missing, invalid or expired bearer token
    Unauthorized,
    /// 403: valid session without the needed permission
    Forbidden,
    /// 404: resource does not exist
    NotFound,
    /// 500: internal server error
    ServerError,
    /// 503: service temporarily unavailable
    Unavailable,
    /// Any other non-2xx status
    Unknown(u16),
    /// Connectivity pre-flight reported no network; the request was never sent
    Offline,
    /// The request failed before or while receiving the response, or the body was malformed
    TransportFailure(String),
}

impl ErrorKind {
    /// Maps a non-success HTTP status to its kind.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            500 => Self::ServerError,
            503 => Self::Unavailable,
            other => Self::Unknown(other),
        }
    }

    pub fn transport_failure(cause: impl fmt::Display) -> Self {
        Self::TransportFailure(cause.to_string())
    }

    /// Code delivered to `on_error`: the HTTP status, or a synthetic code.
    pub fn code(&self) -> i32 {
        match self {
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::ServerError => 500,
            Self::Unavailable => 503,
            Self::Unknown(status) => i32::from(*status),
            Self::Offline => OFFLINE_CODE,
            Self::TransportFailure(_) => TRANSPORT_FAILURE_CODE,
        }
    }

    /// Fixed user-facing message for this kind.
    pub fn message(&self) -> String {
        match self {
            Self::BadRequest => "Datos inválidos".to_string(),
            Self::Unauthorized => "No autorizado - Sesión expirada".to_string(),
            Self::Forbidden => "Acceso denegado".to_string(),
            Self::NotFound => "Recurso no encontrado".to_string(),
            Self::ServerError => "Error interno del servidor".to_string(),
            Self::Unavailable => "Servicio no disponible".to_string(),
            Self::Unknown(status) => format!("Error del servidor: {}", status),
            Self::Offline => "No hay conexión a internet".to_string(),
            Self::TransportFailure(cause) => format!("Error de conexión: {}", cause),
        }
    }

    /// Stable snake_case name, used in logs.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::BadRequest => "bad_request",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::ServerError => "server_error",
            Self::Unavailable => "unavailable",
            Self::Unknown(_) => "unknown",
            Self::Offline => "offline",
            Self::TransportFailure(_) => "transport_failure",
        }
    }

    /// Only an authentication failure invalidates the local session.
    #[inline]
    pub fn clears_session(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}
