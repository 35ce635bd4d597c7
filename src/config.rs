//! Client configuration: environment profiles, YAML files and `CHANCAFE_*` overrides.
//!
//! Resolution order, highest first: builder setters, environment variables, the YAML
//! file (if any), then the defaults of the selected [`Environment`].
//!
//! | Variable                        | Meaning                                 |
//! |---------------------------------|-----------------------------------------|
//! | `CHANCAFE_ENV`                  | `development`, `staging`, `production`  |
//! | `CHANCAFE_BASE_URL`             | base address, e.g. `http://host/api/`   |
//! | `CHANCAFE_CONNECT_TIMEOUT_SECS` | connect timeout                         |
//! | `CHANCAFE_READ_TIMEOUT_SECS`    | read timeout                            |
//! | `CHANCAFE_WRITE_TIMEOUT_SECS`   | write timeout                           |
//! | `CHANCAFE_HTTP_LOGGING`         | `1`/`true` to log bodies                |

use crate::transport::{default_user_agent, TransportConfig};
use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn default_base_url(&self) -> &'static str {
        match self {
            // Android emulator alias for the host machine
            Environment::Development => "http://10.0.2.2:3000/api/",
            Environment::Staging => "https://staging.chancafe.com/api/",
            Environment::Production => "https://api.chancafe.com/api/",
        }
    }

    pub fn default_timeout_secs(&self) -> u64 {
        match self {
            Environment::Development => 60,
            Environment::Staging | Environment::Production => 30,
        }
    }

    pub fn body_logging_by_default(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(Error::configuration(
                format!("unknown environment `{}`", other),
                ErrorContext::at("client_config").field("environment"),
            )),
        }
    }
}

/// Partially specified configuration; unset fields fall back to the environment profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    pub environment: Environment,
    pub base_url: Option<String>,
    pub connect_timeout_secs: Option<u64>,
    pub read_timeout_secs: Option<u64>,
    pub write_timeout_secs: Option<u64>,
    pub http_logging: Option<bool>,
    pub user_agent: Option<String>,
}

impl ClientConfig {
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            environment,
            ..Self::default()
        }
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&raw)
    }

    /// Defaults of `CHANCAFE_ENV` (development when unset) with every override applied.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    pub fn with_env_overrides(self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies `CHANCAFE_*` overrides read through `lookup`. Unparsable values are
    /// ignored with a warning.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("CHANCAFE_ENV") {
            match raw.parse() {
                Ok(env) => self.environment = env,
                Err(e) => warn!(error = %e, "ignoring CHANCAFE_ENV"),
            }
        }
        if let Some(url) = lookup("CHANCAFE_BASE_URL").filter(|s| !s.trim().is_empty()) {
            self.base_url = Some(url);
        }
        let secs = |key: &str| {
            let raw = lookup(key)?;
            match raw.trim().parse::<u64>() {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!(key, value = raw.as_str(), "ignoring non-numeric timeout");
                    None
                }
            }
        };
        if let Some(v) = secs("CHANCAFE_CONNECT_TIMEOUT_SECS") {
            self.connect_timeout_secs = Some(v);
        }
        if let Some(v) = secs("CHANCAFE_READ_TIMEOUT_SECS") {
            self.read_timeout_secs = Some(v);
        }
        if let Some(v) = secs("CHANCAFE_WRITE_TIMEOUT_SECS") {
            self.write_timeout_secs = Some(v);
        }
        if let Some(raw) = lookup("CHANCAFE_HTTP_LOGGING") {
            self.http_logging = Some(matches!(
                raw.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            ));
        }
        self
    }

    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.default_base_url())
    }

    /// Resolves every default and validates the result.
    pub fn transport(&self) -> Result<TransportConfig> {
        let default_secs = self.environment.default_timeout_secs();
        let timeout = |field: &'static str, value: Option<u64>| -> Result<Duration> {
            match value.unwrap_or(default_secs) {
                0 => Err(Error::configuration(
                    "timeouts must be at least one second",
                    ErrorContext::at("client_config").field(field),
                )),
                secs => Ok(Duration::from_secs(secs)),
            }
        };

        Ok(TransportConfig {
            base_url: self.base_url().to_string(),
            connect_timeout: timeout("connect_timeout_secs", self.connect_timeout_secs)?,
            read_timeout: timeout("read_timeout_secs", self.read_timeout_secs)?,
            write_timeout: timeout("write_timeout_secs", self.write_timeout_secs)?,
            log_bodies: self
                .http_logging
                .unwrap_or_else(|| self.environment.body_logging_by_default()),
            user_agent: self.user_agent.clone().unwrap_or_else(default_user_agent),
        })
    }
}
