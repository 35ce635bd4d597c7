//! `yyyy-MM-dd HH:mm:ss` date fields, parsed leniently.
//!
//! Serialization always writes [`FORMAT`]. Parsing also accepts a `T` separator,
//! fractional seconds, an RFC 3339 offset (converted to UTC) and bare dates (midnight),
//! which is what the backend emits depending on the route.
//!
//! Use with serde field attributes:
//!
//! ```rust
//! use chrono::NaiveDateTime;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Row {
//!     #[serde(with = "chancafe_client::envelope::datetime")]
//!     created_at: NaiveDateTime,
//!     #[serde(default, with = "chancafe_client::envelope::datetime::option")]
//!     updated_at: Option<NaiveDateTime>,
//! }
//!
//! let row: Row = serde_json::from_str(r#"{"created_at":"2024-03-01T10:15:00.000Z"}"#).unwrap();
//! assert_eq!(row.created_at.to_string(), "2024-03-01 10:15:00");
//! assert!(row.updated_at.is_none());
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{de, Deserialize, Deserializer, Serializer};

pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

pub fn parse_lenient(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

pub fn format(value: &NaiveDateTime) -> String {
    value.format(FORMAT).to_string()
}

pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(value))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_lenient(&raw)
        .ok_or_else(|| de::Error::custom(format!("unrecognized date `{}`, expected {}", raw, FORMAT)))
}

/// Same format for `Option<NaiveDateTime>`; `null` and empty strings become `None`.
pub mod option {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_str(&super::format(v)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => parse_lenient(&raw).map(Some).ok_or_else(|| {
                de::Error::custom(format!("unrecognized date `{}`, expected {}", raw, FORMAT))
            }),
        }
    }
}
