//! Pluggable construction of the `Authorization` header.
//!
//! The eWallet server authenticates server-side integrations with the
//! access/secret key pair encoded like HTTP Basic credentials, prefixed by a
//! deployment-specific scheme name.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Scheme expected by eWallet server deployments.
pub const OMG_SERVER_SCHEME: &str = "OMGServer";
/// Standard HTTP Basic scheme.
pub const BASIC_SCHEME: &str = "Basic";

/// Produces the `Authorization` header value for a key pair.
#[cfg_attr(test, mockall::automock)]
pub trait RequestSigner: Send + Sync {
    /// Header value authenticating `access_key`/`secret_key`.
    fn authorization(&self, access_key: &str, secret_key: &str) -> String;
}

/// Signer emitting `<scheme> base64(access_key:secret_key)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemeSigner {
    scheme: String,
}

impl SchemeSigner {
    /// Build a signer for an arbitrary scheme name.
    pub fn new(scheme: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
        }
    }

    /// Signer using the eWallet server scheme.
    pub fn omg_server() -> Self {
        Self::new(OMG_SERVER_SCHEME)
    }

    /// Signer using plain HTTP Basic credentials.
    pub fn basic() -> Self {
        Self::new(BASIC_SCHEME)
    }

    /// Scheme name placed before the encoded credentials.
    pub fn scheme(&self) -> &str {
        self.scheme.as_str()
    }
}

impl Default for SchemeSigner {
    fn default() -> Self {
        Self::omg_server()
    }
}

impl RequestSigner for SchemeSigner {
    fn authorization(&self, access_key: &str, secret_key: &str) -> String {
        let encoded = STANDARD.encode(format!("{access_key}:{secret_key}"));
        format!("{} {encoded}", self.scheme)
    }
}
