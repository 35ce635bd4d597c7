//! Uniform `{ success, message, data, code }` wrapper around every API response.

pub mod datetime;

use crate::error_kind::ErrorKind;
use crate::{Error, ErrorContext, Result};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Deserializer, Serialize};

/// Response envelope shared by every endpoint.
///
/// A successful envelope carries `data` for operations that declare a payload; a failed
/// one never does. `code` is the HTTP status, or a synthetic code (0 offline, 500
/// transport failure).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    pub code: i32,
}

impl<T> Envelope<T> {
    pub fn success(data: Option<T>, message: impl Into<String>, code: i32) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
            code,
        }
    }

    pub fn failure(message: impl Into<String>, code: i32) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            code,
        }
    }

    pub fn from_kind(kind: &ErrorKind) -> Self {
        Self::failure(kind.message(), kind.code())
    }

    pub fn offline() -> Self {
        Self::from_kind(&ErrorKind::Offline)
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}

/// Payload type for operations that return no data.
///
/// Deserializes from anything (including `null` and objects) and discards it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Void;

impl<'de> Deserialize<'de> for Void {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        IgnoredAny::deserialize(deserializer)?;
        Ok(Void)
    }
}

// The backend omits `message` and `code` on many routes.
#[derive(Deserialize)]
struct WireEnvelope<T> {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    data: Option<T>,
    #[serde(default)]
    code: Option<i32>,
}

/// Decodes a raw body into an [`Envelope`].
///
/// A missing `code` falls back to the HTTP status of the response, a missing `message`
/// to the empty string, and a missing or `null` `data` to `None`. `data` sent alongside
/// `success: false` is discarded.
pub fn decode<T: DeserializeOwned>(body: &[u8], http_status: u16) -> Result<Envelope<T>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(Error::decode(
            "empty response body",
            ErrorContext::at("envelope_codec"),
        ));
    }
    let wire: WireEnvelope<T> = serde_json::from_slice(body).map_err(|e| {
        Error::decode(
            e.to_string(),
            ErrorContext::at("envelope_codec").detail(format!("http status {}", http_status)),
        )
    })?;
    let code = wire.code.unwrap_or(i32::from(http_status));
    let message = wire.message.unwrap_or_default();
    // a failed envelope never carries data
    Ok(match (wire.success, wire.data) {
        (true, data) => Envelope::success(data, message, code),
        (false, _) => Envelope::failure(message, code),
    })
}
