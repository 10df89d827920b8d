//! Configuration loaded via OrthoConfig from files and `EWALLET_*` variables.

use std::fmt;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use super::{ConfigError, Configuration};

/// Raw settings for building a [`Configuration`].
///
/// Environment variables: `EWALLET_ACCESS_KEY`, `EWALLET_SECRET_KEY`,
/// `EWALLET_URL` and `EWALLET_TIMEOUT_SECONDS`.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EWALLET")]
pub struct EwalletSettings {
    /// Access key issued by the eWallet admin panel.
    pub access_key: Option<String>,
    /// Secret key paired with `access_key`.
    pub secret_key: Option<String>,
    /// Server base URL, e.g. `https://ewallet.example.com/api`.
    pub url: Option<String>,
    /// Request timeout in seconds; [`super::DEFAULT_TIMEOUT`] when unset.
    pub timeout_seconds: Option<u64>,
}

impl EwalletSettings {
    /// Validate the settings into a client configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingSetting`] when a required value is
    /// absent, [`ConfigError::ZeroTimeout`] for a zero timeout, or any
    /// validation error raised by [`Configuration::new`].
    pub fn into_configuration(self) -> Result<Configuration, ConfigError> {
        let access_key = self.access_key.ok_or(ConfigError::MissingSetting {
            name: "access_key",
        })?;
        let secret_key = self.secret_key.ok_or(ConfigError::MissingSetting {
            name: "secret_key",
        })?;
        let url = self
            .url
            .ok_or(ConfigError::MissingSetting { name: "url" })?;

        let config = Configuration::new(access_key, secret_key, &url)?;
        match self.timeout_seconds {
            Some(seconds) => config.with_timeout(Duration::from_secs(seconds)),
            None => Ok(config),
        }
    }
}

impl fmt::Debug for EwalletSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EwalletSettings")
            .field("access_key", &self.access_key)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .field("url", &self.url)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}
