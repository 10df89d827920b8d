//! User entity as returned by the eWallet API.
//!
//! The resource operations (`login`, `find`, `create`, `update`, `wallets`,
//! `credit`, `debit`) live in `crate::resources::user`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::null_as_default;

/// User known to the eWallet server.
///
/// ## Invariants
/// - `provider_user_id` is the integrating provider's identifier and is what
///   every user-scoped operation addresses the user by.
/// - `metadata` is free-form and defaults to an empty map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, deserialize_with = "null_as_default")]
    id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    provider_user_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    metadata: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<String>,
}

impl User {
    /// Build a user from its identifying fields.
    pub fn new(
        id: impl Into<String>,
        provider_user_id: impl Into<String>,
        username: impl Into<String>,
        metadata: Map<String, Value>,
    ) -> Self {
        Self {
            id: id.into(),
            provider_user_id: provider_user_id.into(),
            username: username.into(),
            metadata,
            created_at: None,
            updated_at: None,
        }
    }

    /// Handle for an existing user known only by `provider_user_id`.
    ///
    /// `wallets`, `credit` and `debit` address users by provider id alone,
    /// so this avoids a `find` round trip before them.
    pub fn with_provider_user_id(provider_user_id: impl Into<String>) -> Self {
        Self::new("", provider_user_id, "", Map::new())
    }

    /// Server-assigned identifier.
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Provider-assigned identifier.
    pub fn provider_user_id(&self) -> &str {
        self.provider_user_id.as_str()
    }

    /// Username; empty when the server did not report one.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Free-form metadata.
    pub fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    /// Creation timestamp as sent by the server (RFC 3339).
    pub fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }

    /// Last update timestamp as sent by the server (RFC 3339).
    pub fn updated_at(&self) -> Option<&str> {
        self.updated_at.as_deref()
    }
}
