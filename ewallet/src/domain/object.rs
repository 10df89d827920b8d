//! Dispatch of response payloads on their `object` tag.
//!
//! Every eWallet payload names its own type (`"object": "user"`, `"list"`,
//! ...). Decoding goes through [`ApiObject`] first so an operation that
//! expects one type can report precisely what arrived instead.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::ports::TransportError;
use super::{ApiError, AuthenticationToken, List, User, Wallet};

/// One decoded response object.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ApiObject {
    User(User),
    AuthenticationToken(AuthenticationToken),
    List(List<ApiObject>),
    Wallet(Wallet),
    Error(ApiError),
}

impl ApiObject {
    /// Decode `value` according to its `object` tag.
    pub(crate) fn from_value(value: Value) -> Result<Self, TransportError> {
        let tag = value
            .get("object")
            .and_then(Value::as_str)
            .ok_or_else(|| TransportError::decode("response object is missing its `object` tag"))?
            .to_owned();

        match tag.as_str() {
            "user" => decode_as(value).map(Self::User),
            "authentication_token" => decode_as(value).map(Self::AuthenticationToken),
            "list" => decode_as::<List<Value>>(value)?
                .try_map(Self::from_value)
                .map(Self::List),
            "wallet" | "address" => decode_as(value).map(Self::Wallet),
            "error" => decode_as(value).map(Self::Error),
            other => Err(TransportError::decode(format!(
                "unsupported response object `{other}`"
            ))),
        }
    }

    /// Tag name used in diagnostics.
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Self::User(_) => "user",
            Self::AuthenticationToken(_) => "authentication_token",
            Self::List(_) => "list",
            Self::Wallet(_) => "wallet",
            Self::Error(_) => "error",
        }
    }

    pub(crate) fn into_user(self) -> Result<User, TransportError> {
        match self {
            Self::User(user) => Ok(user),
            other => Err(unexpected("user", &other)),
        }
    }

    pub(crate) fn into_authentication_token(self) -> Result<AuthenticationToken, TransportError> {
        match self {
            Self::AuthenticationToken(token) => Ok(token),
            other => Err(unexpected("authentication_token", &other)),
        }
    }

    pub(crate) fn into_wallet(self) -> Result<Wallet, TransportError> {
        match self {
            Self::Wallet(wallet) => Ok(wallet),
            other => Err(unexpected("wallet", &other)),
        }
    }

    /// Expect a list of wallets; every element must itself be a wallet.
    pub(crate) fn into_wallets(self) -> Result<List<Wallet>, TransportError> {
        match self {
            Self::List(list) => list.try_map(Self::into_wallet),
            other => Err(unexpected("list", &other)),
        }
    }
}

fn decode_as<T: DeserializeOwned>(value: Value) -> Result<T, TransportError> {
    serde_json::from_value(value)
        .map_err(|error| TransportError::decode(format!("invalid response object: {error}")))
}

fn unexpected(expected: &str, actual: &ApiObject) -> TransportError {
    TransportError::decode(format!(
        "expected `{expected}` object, received `{}`",
        actual.kind()
    ))
}
