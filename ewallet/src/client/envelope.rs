//! Decoding of the `{version, success, data}` wrapper around every response.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::ApiError;
use crate::domain::ports::TransportError;

/// Decoded response envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// `success: true`; the payload object.
    Success(Value),
    /// `success: false`; the error reported by the server.
    Failure(ApiError),
}

impl Envelope {
    /// Whether the server reported success.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Split into the payload or the reported error.
    pub fn into_result(self) -> Result<Value, ApiError> {
        match self {
            Self::Success(data) => Ok(data),
            Self::Failure(error) => Err(error),
        }
    }
}

#[derive(Debug, Deserialize)]
struct EnvelopeDto {
    success: bool,
    #[serde(default)]
    data: Value,
}

/// Decode a raw response body into an [`Envelope`].
///
/// A body that is not an envelope maps to [`TransportError::Status`] for
/// non-2xx responses and [`TransportError::Decode`] otherwise.
pub(crate) fn decode_envelope(status: u16, body: &[u8]) -> Result<Envelope, TransportError> {
    let dto: EnvelopeDto = match serde_json::from_slice(body) {
        Ok(dto) => dto,
        Err(error) if (200..300).contains(&status) => {
            return Err(TransportError::decode(format!(
                "invalid response envelope: {error}"
            )));
        }
        Err(_) => return Err(TransportError::status(status, status_message(status, body))),
    };

    if dto.success {
        return Ok(Envelope::Success(dto.data));
    }
    serde_json::from_value(dto.data)
        .map(Envelope::Failure)
        .map_err(|error| TransportError::decode(format!("invalid error object: {error}")))
}

fn status_message(status: u16, body: &[u8]) -> String {
    let preview = body_preview(body);
    if preview.is_empty() {
        format!("status {status}")
    } else {
        format!("status {status}: {preview}")
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
