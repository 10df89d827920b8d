//! Authentication token issued by `login`.

use serde::{Deserialize, Serialize};

use super::null_as_default;
use super::user::User;

/// Token authenticating client-side calls on behalf of a user.
///
/// `Debug` output redacts the token value.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthenticationToken {
    #[serde(default, deserialize_with = "null_as_default")]
    authentication_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<User>,
}

impl AuthenticationToken {
    /// Build a token, optionally carrying the user it was issued for.
    pub fn new(authentication_token: impl Into<String>, user: Option<User>) -> Self {
        Self {
            authentication_token: authentication_token.into(),
            user,
        }
    }

    /// Opaque token value.
    pub fn authentication_token(&self) -> &str {
        self.authentication_token.as_str()
    }

    /// User the token was issued for, when embedded in the response.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }
}

impl std::fmt::Debug for AuthenticationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticationToken")
            .field("authentication_token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}
