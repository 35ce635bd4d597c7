use std::fmt;
use thiserror::Error;

/// Where a library error came from, plus the offending field and value when known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Component that raised the error: `client_config`, `http_transport`, `api_request`,
    /// `envelope_codec`, `call_executor`.
    pub origin: &'static str,
    /// Config key or request template at fault, e.g. `read_timeout_secs`, `clients/{id}`.
    pub field_path: Option<String>,
    pub detail: Option<String>,
}

impl ErrorContext {
    pub fn at(origin: &'static str) -> Self {
        Self {
            origin,
            field_path: None,
            detail: None,
        }
    }

    pub fn field(self, field_path: impl Into<String>) -> Self {
        Self {
            field_path: Some(field_path.into()),
            ..self
        }
    }

    pub fn detail(self, detail: impl Into<String>) -> Self {
        Self {
            detail: Some(detail.into()),
            ..self
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}", self.origin)?;
        if let Some(field) = &self.field_path {
            write!(f, " at {}", field)?;
        }
        if let Some(detail) = &self.detail {
            write!(f, ": {}", detail)?;
        }
        f.write_str("]")
    }
}

/// Failures of the library's own machinery.
///
/// API outcomes never surface as this type: they reach callbacks and observables as
/// `(message, code)` pairs. This enum covers building the client, loading configuration,
/// preparing requests and decoding bodies.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {message} {context}")]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("invalid request: {message} {context}")]
    Validation {
        message: String,
        context: ErrorContext,
    },

    #[error("runtime failure: {message} {context}")]
    Runtime {
        message: String,
        context: ErrorContext,
    },

    #[error("undecodable response: {message} {context}")]
    Decode {
        message: String,
        context: ErrorContext,
    },

    #[error(transparent)]
    Transport(#[from] crate::transport::TransportError),

    #[error("reading config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("parsing config file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    pub fn configuration(message: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: message.into(),
            context,
        }
    }

    pub fn validation(message: impl Into<String>, context: ErrorContext) -> Self {
        Error::Validation {
            message: message.into(),
            context,
        }
    }

    pub fn runtime(message: impl Into<String>, context: ErrorContext) -> Self {
        Error::Runtime {
            message: message.into(),
            context,
        }
    }

    pub fn decode(message: impl Into<String>, context: ErrorContext) -> Self {
        Error::Decode {
            message: message.into(),
            context,
        }
    }

    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. }
            | Error::Validation { context, .. }
            | Error::Runtime { context, .. }
            | Error::Decode { context, .. } => Some(context),
            Error::Transport(_) | Error::Io(_) | Error::Yaml(_) => None,
        }
    }
}
