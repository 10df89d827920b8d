//! Resource operations layered on [`crate::Client`].
//!
//! Each operation validates cheaply, performs one call, and converts the
//! envelope into an entity. Failure envelopes become [`Error::Api`]; missing
//! or undecodable answers become [`Error::Transport`].

pub mod user;

use crate::client::Envelope;
use crate::domain::Error;
use crate::domain::object::ApiObject;

pub use user::{TransferParams, UserParams};

/// Decode a success payload, or surface the failure as [`Error::Api`].
///
/// A success envelope whose payload is itself an `error` object is treated
/// as a failure too.
pub(crate) fn receive(envelope: Envelope) -> Result<ApiObject, Error> {
    let data = envelope.into_result()?;
    match ApiObject::from_value(data)? {
        ApiObject::Error(error) => Err(Error::Api(error)),
        object => Ok(object),
    }
}
