//! Signed request execution against the eWallet API.
//!
//! [`Client`] turns an [`ApiRequest`] into an HTTP exchange: it joins the
//! endpoint onto the configured base URL, adds the authorisation and media
//! type headers, writes the optional log lines and decodes the response
//! [`Envelope`]. Resource operations build on [`Client::send`].

mod envelope;
mod request;

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Configuration;
use crate::domain::ports::{HttpRequest, HttpTransport, Method, TransportError};
use crate::outbound::http::ReqwestTransport;

pub use envelope::Envelope;
pub(crate) use envelope::decode_envelope;
pub use request::ApiRequest;

/// Tag prefixed to every request log line.
pub const LOG_TAG: &str = "OmiseGO";
/// Media type sent in `Accept` and `Content-Type`.
pub const MEDIA_TYPE: &str = "application/vnd.omisego.v1+json";
/// Header carrying the caller's idempotency token.
pub const IDEMPOTENCY_HEADER: &str = "Idempotency-Token";

/// Handle for issuing calls with one configuration.
///
/// Cloning is cheap and clones share the transport, so one client can
/// serve concurrent callers.
#[derive(Clone)]
pub struct Client {
    config: Arc<Configuration>,
    transport: Arc<dyn HttpTransport>,
}

impl Client {
    /// Build a client backed by a reqwest transport honouring the
    /// configured timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn new(config: Configuration) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::new(config.timeout())?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Build a client over an explicit transport.
    pub fn with_transport(config: Configuration, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    /// Configuration this client was built with.
    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Call `path` with `params` and decode the response envelope.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when no decodable envelope was obtained.
    /// A failure envelope is a successful call returning
    /// [`Envelope::Failure`].
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        params: Value,
    ) -> Result<Envelope, TransportError> {
        self.send(ApiRequest::new(method, path).with_params(params))
            .await
    }

    /// Send a prepared request and decode the response envelope.
    ///
    /// # Errors
    ///
    /// See [`Client::call`].
    pub async fn send(&self, request: ApiRequest) -> Result<Envelope, TransportError> {
        let http_request = self.build_request(&request)?;

        debug!(
            method = %request.method(),
            path = request.path(),
            idempotent = request.idempotency_token().is_some(),
            "sending ewallet request"
        );
        self.log(format_args!(
            "Request: {} {}",
            request.method(),
            request.path()
        ));

        let response = match self.transport.execute(http_request).await {
            Ok(response) => response,
            Err(error) => {
                warn!(path = request.path(), %error, "ewallet request failed");
                return Err(error);
            }
        };

        self.log(format_args!("Response: HTTP/{}", response.status));
        debug!(
            path = request.path(),
            status = response.status,
            "ewallet response received"
        );

        decode_envelope(response.status, &response.body)
    }

    fn log(&self, message: fmt::Arguments<'_>) {
        if let Some(logger) = self.config.logger() {
            logger.info(&format!("[{LOG_TAG}] {message}\n"));
        }
    }

    fn build_request(&self, request: &ApiRequest) -> Result<HttpRequest, TransportError> {
        let mut url = self.config.base_url().join(request.path()).map_err(|error| {
            TransportError::invalid_request(format!(
                "cannot join `{}` onto base URL: {error}",
                request.path()
            ))
        })?;

        let mut headers = vec![
            ("Authorization".to_owned(), self.config.authorization()),
            ("Accept".to_owned(), MEDIA_TYPE.to_owned()),
        ];
        if let Some(token) = request.idempotency_token() {
            headers.push((IDEMPOTENCY_HEADER.to_owned(), token.to_owned()));
        }

        let body = match request.method() {
            Method::Get => {
                append_query(&mut url, request.params())?;
                None
            }
            Method::Post => {
                headers.push(("Content-Type".to_owned(), MEDIA_TYPE.to_owned()));
                Some(encode_body(request.params())?)
            }
        };

        Ok(HttpRequest {
            method: request.method(),
            url,
            headers,
            body,
        })
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn encode_body(params: &Value) -> Result<Vec<u8>, TransportError> {
    if params.is_null() {
        return Ok(b"{}".to_vec());
    }
    serde_json::to_vec(params).map_err(|error| {
        TransportError::invalid_request(format!("cannot encode request body: {error}"))
    })
}

/// Query-encode object params: strings raw, other values as JSON, nulls
/// skipped.
fn append_query(url: &mut url::Url, params: &Value) -> Result<(), TransportError> {
    let fields = match params {
        Value::Null => return Ok(()),
        Value::Object(fields) => fields,
        other => {
            return Err(TransportError::invalid_request(format!(
                "query parameters must be a JSON object, got {other}"
            )));
        }
    };
    if fields.values().all(Value::is_null) {
        return Ok(());
    }

    let mut pairs = url.query_pairs_mut();
    for (name, value) in fields {
        match value {
            Value::Null => {}
            Value::String(text) => {
                pairs.append_pair(name, text);
            }
            other => {
                pairs.append_pair(name, &other.to_string());
            }
        }
    }
    drop(pairs);
    Ok(())
}
