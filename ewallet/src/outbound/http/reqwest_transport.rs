//! Reqwest-backed eWallet transport adapter.
//!
//! This adapter owns connection details only: the timeout, user agent and
//! mapping of reqwest failures. Headers and bodies arrive fully built.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::domain::ports::{HttpRequest, HttpResponse, HttpTransport, Method, TransportError};

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("ewallet-rust/", env!("CARGO_PKG_VERSION"));

/// Transport adapter sending requests through one pooled reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build an adapter with an explicit request timeout.
    /// ```rust,ignore
    /// let transport = ReqwestTransport::new(Duration::from_secs(30))?;
    /// ```
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        Self::with_user_agent(timeout, DEFAULT_USER_AGENT)
    }

    /// Build an adapter sending `user_agent` on every request.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_user_agent(timeout: Duration, user_agent: &str) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|error| TransportError::invalid_request(error.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let mut builder = match method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
        };
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(map_transport_error)?;
        debug!(status, bytes = body.len(), "ewallet response received");

        Ok(HttpResponse::new(status, body.to_vec()))
    }
}

fn map_transport_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::timeout(error.to_string())
    } else if error.is_builder() {
        TransportError::invalid_request(error.to_string())
    } else {
        TransportError::transport(error.to_string())
    }
}
