//! Client configuration: credentials, server URL, logging and timeouts.
//!
//! [`Configuration`] is built programmatically and validated once; a
//! [`crate::Client`] then owns it unchanged for its whole lifetime.
//! [`EwalletSettings`] loads the same values through `ortho_config`.

mod settings;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use url::Url;
use zeroize::Zeroizing;

use crate::domain::ports::{RequestLogger, RequestSigner, SchemeSigner};

pub use settings::EwalletSettings;

/// Request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors raised while validating configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The access key was empty or whitespace.
    #[error("access key must not be blank")]
    BlankAccessKey,
    /// The secret key was empty or whitespace.
    #[error("secret key must not be blank")]
    BlankSecretKey,
    /// The base URL was empty or whitespace.
    #[error("base URL must not be blank")]
    BlankBaseUrl,
    /// The base URL could not be parsed.
    #[error("base URL '{url}' is invalid: {message}")]
    InvalidBaseUrl {
        /// Raw URL as supplied.
        url: String,
        /// Parser diagnostic.
        message: String,
    },
    /// The base URL uses a scheme other than `http` or `https`.
    #[error("base URL scheme '{scheme}' is not supported; use http or https")]
    UnsupportedScheme {
        /// Scheme found in the URL.
        scheme: String,
    },
    /// The request timeout was zero.
    #[error("request timeout must be greater than zero")]
    ZeroTimeout,
    /// A required setting was not provided by any configuration source.
    #[error("missing required setting '{name}'")]
    MissingSetting {
        /// Setting name, as used in configuration files.
        name: &'static str,
    },
}

/// Validated client configuration.
///
/// ## Invariants
/// - `access_key` and `secret_key` are non-blank.
/// - `base_url` is an absolute `http(s)` URL whose path ends with `/`, so
///   endpoint names join beneath it.
///
/// # Examples
/// ```
/// use ewallet::Configuration;
///
/// let config = Configuration::new("access", "secret", "https://ewallet.example.com/api")
///     .expect("valid configuration");
/// assert_eq!(config.base_url().as_str(), "https://ewallet.example.com/api/");
/// ```
#[derive(Clone)]
pub struct Configuration {
    access_key: String,
    secret_key: Zeroizing<String>,
    base_url: Url,
    logger: Option<Arc<dyn RequestLogger>>,
    signer: Arc<dyn RequestSigner>,
    timeout: Duration,
}

impl Configuration {
    /// Validate credentials and the server URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a key is blank or the URL is blank,
    /// unparsable, or not `http(s)`.
    pub fn new(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        base_url: &str,
    ) -> Result<Self, ConfigError> {
        let access_key = access_key.into();
        if access_key.trim().is_empty() {
            return Err(ConfigError::BlankAccessKey);
        }
        let secret_key = Zeroizing::new(secret_key.into());
        if secret_key.trim().is_empty() {
            return Err(ConfigError::BlankSecretKey);
        }

        Ok(Self {
            access_key,
            secret_key,
            base_url: parse_base_url(base_url)?,
            logger: None,
            signer: Arc::new(SchemeSigner::default()),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Attach a sink receiving the request/response log lines.
    #[must_use]
    pub fn with_logger(mut self, logger: Arc<dyn RequestLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Replace the `Authorization` header scheme.
    #[must_use]
    pub fn with_signer(mut self, signer: Arc<dyn RequestSigner>) -> Self {
        self.signer = signer;
        self
    }

    /// Override the request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroTimeout`] for a zero duration.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ConfigError> {
        if timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        self.timeout = timeout;
        Ok(self)
    }

    /// Public half of the key pair.
    pub fn access_key(&self) -> &str {
        self.access_key.as_str()
    }

    /// Server base URL, always ending in `/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Configured log sink, if any.
    pub fn logger(&self) -> Option<&dyn RequestLogger> {
        self.logger.as_deref()
    }

    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `Authorization` header value for this key pair.
    pub fn authorization(&self) -> String {
        self.signer
            .authorization(self.access_key.as_str(), self.secret_key.as_str())
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .field("logger", &self.logger.is_some())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::BlankBaseUrl);
    }
    let mut url = Url::parse(trimmed).map_err(|error| ConfigError::InvalidBaseUrl {
        url: trimmed.to_owned(),
        message: error.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme {
            scheme: url.scheme().to_owned(),
        });
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

#[cfg(test)]
mod tests {
    //! Validation coverage for programmatic configuration.

    use super::*;
    use crate::domain::ports::MockRequestSigner;
    use rstest::rstest;

    const BASE: &str = "https://ewallet.example.com/api/";

    #[rstest]
    #[case::blank_access("  ", "secret", BASE, ConfigError::BlankAccessKey)]
    #[case::blank_secret("access", "", BASE, ConfigError::BlankSecretKey)]
    #[case::blank_url("access", "secret", " ", ConfigError::BlankBaseUrl)]
    #[case::bad_scheme(
        "access",
        "secret",
        "ftp://ewallet.example.com",
        ConfigError::UnsupportedScheme { scheme: "ftp".to_owned() }
    )]
    fn rejects_invalid_values(
        #[case] access_key: &str,
        #[case] secret_key: &str,
        #[case] base_url: &str,
        #[case] expected: ConfigError,
    ) {
        let error = Configuration::new(access_key, secret_key, base_url)
            .expect_err("configuration should be rejected");
        assert_eq!(error, expected);
    }

    #[rstest]
    fn rejects_relative_urls() {
        let error = Configuration::new("access", "secret", "/api")
            .expect_err("relative URL should be rejected");
        assert!(matches!(error, ConfigError::InvalidBaseUrl { .. }));
    }

    #[rstest]
    #[case("https://ewallet.example.com", "https://ewallet.example.com/")]
    #[case("https://ewallet.example.com/api", "https://ewallet.example.com/api/")]
    #[case("http://localhost:4000/api/?x=1#frag", "http://localhost:4000/api/")]
    fn normalises_base_url_to_a_directory(#[case] raw: &str, #[case] expected: &str) {
        let config = Configuration::new("access", "secret", raw).expect("valid configuration");
        assert_eq!(config.base_url().as_str(), expected);
    }

    #[rstest]
    fn defaults_to_server_scheme_and_thirty_second_timeout() {
        let config = Configuration::new("access", "secret", BASE).expect("valid configuration");

        assert_eq!(config.authorization(), "OMGServer YWNjZXNzOnNlY3JldA==");
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
        assert!(config.logger().is_none());
    }

    #[rstest]
    fn custom_signer_receives_both_keys() {
        let mut signer = MockRequestSigner::new();
        signer
            .expect_authorization()
            .withf(|access, secret| access.to_string() == "access" && secret.to_string() == "secret")
            .times(1)
            .return_const("Custom token".to_owned());

        let config = Configuration::new("access", "secret", BASE)
            .expect("valid configuration")
            .with_signer(Arc::new(signer));

        assert_eq!(config.authorization(), "Custom token");
    }

    #[rstest]
    fn zero_timeout_is_rejected() {
        let error = Configuration::new("access", "secret", BASE)
            .and_then(|config| config.with_timeout(Duration::ZERO))
            .expect_err("zero timeout should be rejected");
        assert_eq!(error, ConfigError::ZeroTimeout);
    }

    #[rstest]
    fn debug_output_redacts_secret_key() {
        let config =
            Configuration::new("access", "very-secret", BASE).expect("valid configuration");
        let rendered = format!("{config:?}");

        assert!(rendered.contains("access"));
        assert!(!rendered.contains("very-secret"));
    }
}
