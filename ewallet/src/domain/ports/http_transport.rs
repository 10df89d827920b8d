//! Driven port for exchanging raw HTTP requests with the eWallet server.
//!
//! The client owns request construction (URL, headers, body encoding) and
//! envelope decoding. Transports only move bytes, so tests can swap the
//! network for recorded responses without touching the client.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use url::Url;

use super::define_port_error;

/// HTTP verbs used by the eWallet API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Lookup; parameters travel in the query string.
    Get,
    /// RPC-style call; parameters travel as a JSON body.
    Post,
}

impl Method {
    /// Upper-case verb as it appears on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully built request handed to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// HTTP verb.
    pub method: Method,
    /// Absolute request URL, including any query string.
    pub url: Url,
    /// Header name/value pairs in insertion order.
    pub headers: Vec<(String, String)>,
    /// Encoded body, absent for query-style requests.
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Look up a header value, ignoring ASCII case in the name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Raw response returned by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Numeric HTTP status.
    pub status: u16,
    /// Undecoded response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Build a response from a status and body.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

define_port_error! {
    /// Failures that prevented a usable eWallet envelope from being obtained.
    ///
    /// These are distinct from API-reported errors: the request may never
    /// have reached the server, so callers decide whether to retry.
    pub enum TransportError {
        /// Network transport failed before a response was received.
        Transport { message: String } =>
            "ewallet transport failed: {message}",
        /// The request exceeded the configured timeout.
        Timeout { message: String } =>
            "ewallet request timed out: {message}",
        /// The server answered with a non-2xx status and an unreadable body.
        Status { status: u16, message: String } =>
            "ewallet responded with HTTP {status}: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "ewallet response decode failed: {message}",
        /// The request could not be built or sent as described.
        InvalidRequest { message: String } =>
            "ewallet request invalid: {message}",
    }
}

impl TransportError {
    /// Return whether retrying this error is expected to help.
    ///
    /// Credit and debit retries must reuse the original idempotency token.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Timeout { .. })
            || matches!(self, Self::Status { status, .. } if *status >= 500)
    }
}

/// Port for sending one HTTP request and receiving its raw response.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Execute `request` and return the raw response.
    ///
    /// Non-2xx statuses are successful exchanges at this layer; only
    /// failures to obtain a response are errors.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use ewallet::domain::ports::{FixtureTransport, HttpResponse, HttpTransport};
    ///
    /// let transport = FixtureTransport::new([Ok(HttpResponse::new(200, "{}"))]);
    /// let response = transport.execute(request).await?;
    /// assert_eq!(response.status, 200);
    /// # Ok::<(), ewallet::domain::ports::TransportError>(())
    /// ```
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Canned-response transport that replays queued responses in order and
/// records every request it receives.
#[derive(Debug, Default)]
pub struct FixtureTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl FixtureTransport {
    /// Queue `responses` for replay.
    pub fn new(responses: impl IntoIterator<Item = Result<HttpResponse, TransportError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a single `200` response carrying `body`.
    pub fn with_body(body: impl Into<Vec<u8>>) -> Self {
        Self::new([Ok(HttpResponse::new(200, body))])
    }

    /// Append another response to the replay queue.
    pub fn push(&self, response: Result<HttpResponse, TransportError>) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
    }

    /// Number of requests executed so far.
    pub fn calls(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Snapshot of the requests executed so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl HttpTransport for FixtureTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportError::invalid_request(
                    "fixture transport has no recorded response left",
                ))
            })
    }
}
