//! Description of one API call before it is signed and sent.

use serde_json::{Map, Value};

use crate::domain::ports::Method;

/// Endpoint, parameters and optional idempotency token for one call.
///
/// # Examples
/// ```
/// use ewallet::{ApiRequest, Method};
/// use serde_json::json;
///
/// let request = ApiRequest::post("user.credit_wallet")
///     .with_params(json!({"provider_user_id": "p1"}))
///     .with_idempotency_token("8d2f2c0a");
/// assert_eq!(request.method(), Method::Post);
/// assert_eq!(request.idempotency_token(), Some("8d2f2c0a"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    method: Method,
    path: String,
    params: Value,
    idempotency_token: Option<String>,
}

impl ApiRequest {
    /// Request `path` with `method` and no parameters.
    ///
    /// A leading `/` is dropped so the path always joins beneath the base URL.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        let path = path.into();
        let path = path.trim_start_matches('/').to_owned();
        Self {
            method,
            path,
            params: Value::Object(Map::new()),
            idempotency_token: None,
        }
    }

    /// POST request to `path`.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// GET request to `path`.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// Replace the parameters sent with the request.
    #[must_use]
    pub fn with_params(mut self, params: Value) -> Self {
        self.params = params;
        self
    }

    /// Send `token` in the `Idempotency-Token` header.
    #[must_use]
    pub fn with_idempotency_token(mut self, token: impl Into<String>) -> Self {
        self.idempotency_token = Some(token.into());
        self
    }

    /// HTTP verb.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Endpoint path relative to the base URL.
    pub fn path(&self) -> &str {
        self.path.as_str()
    }

    /// Parameters as JSON.
    pub fn params(&self) -> &Value {
        &self.params
    }

    /// Idempotency token, when set.
    pub fn idempotency_token(&self) -> Option<&str> {
        self.idempotency_token.as_deref()
    }
}
