//! API-reported errors and the operation-level error type.
//!
//! An [`ApiError`] is a normal value: the server answered, and the answer was
//! a failure. [`Error`] adds the transport case so callers can tell "the
//! server said no" apart from "the request may never have arrived".

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ports::TransportError;

/// Error codes this client produces or branches on.
pub mod codes {
    /// No user matches the given `provider_user_id`.
    pub const USER_NOT_FOUND: &str = "user:provider_user_id_not_found";
    /// A required identifier was missing.
    pub const NIL_ID: &str = "user:nil_id";
    /// One or more request parameters were rejected.
    pub const INVALID_PARAMETER: &str = "client:invalid_parameter";
}

/// Failure reported by the eWallet API, or detected locally before a call.
///
/// ## Invariants
/// - `code` is the server's namespaced identifier, e.g. `user:nil_id`.
/// - `description` is passed through verbatim from the server.
///
/// # Examples
/// ```
/// use ewallet::domain::{ApiError, codes};
///
/// let err = ApiError::nil_id();
/// assert_eq!(err.code(), codes::NIL_ID);
/// assert_eq!(err.description(), "The given ID was nil.");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{code}: {description}")]
pub struct ApiError {
    #[serde(default, deserialize_with = "super::null_as_default")]
    code: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    messages: Option<Value>,
}

impl ApiError {
    /// Build an error from a code and description.
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            messages: None,
        }
    }

    /// Local error returned when an identifying parameter is missing.
    pub fn nil_id() -> Self {
        Self::new(codes::NIL_ID, "The given ID was nil.")
    }

    /// Local error returned when a parameter fails validation before sending.
    pub fn invalid_parameter(description: impl Into<String>) -> Self {
        Self::new(codes::INVALID_PARAMETER, description)
    }

    /// Attach the server's per-field messages.
    pub fn with_messages(mut self, messages: Value) -> Self {
        self.messages = Some(messages);
        self
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &str {
        self.code.as_str()
    }

    /// Human-readable description.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Per-field validation messages, when the server sent any.
    pub fn messages(&self) -> Option<&Value> {
        self.messages.as_ref()
    }
}

/// Error returned by every resource operation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The API answered with a failure envelope, or local validation failed.
    #[error("ewallet API error {0}")]
    Api(#[from] ApiError),
    /// No usable response was obtained.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl Error {
    /// The API error, when this is one.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(error) => Some(error),
            Self::Transport(_) => None,
        }
    }

    /// The transport error, when this is one.
    pub fn as_transport(&self) -> Option<&TransportError> {
        match self {
            Self::Transport(error) => Some(error),
            Self::Api(_) => None,
        }
    }

    /// Whether the server (or local validation) reported this failure.
    pub fn is_api(&self) -> bool {
        matches!(self, Self::Api(_))
    }

    /// Whether the failure happened before a decodable answer arrived.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// API error code, when this is an API error.
    pub fn code(&self) -> Option<&str> {
        self.as_api().map(ApiError::code)
    }
}
