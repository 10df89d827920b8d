//! Domain entities and errors projected from eWallet API responses.
//!
//! Purpose: give every response object a typed, read-only Rust shape. The
//! entities are rebuilt from each response and never mutated or cached.
//!
//! Public surface:
//! - `User`, `Wallet`, `Balance`, `Token`, `AuthenticationToken`: entities.
//! - `List`: ordered records plus pagination metadata.
//! - `ApiError` is a failure reported by the API; `Error` is the operation result
//!   error distinguishing API failures from transport failures.

pub mod authentication_token;
pub mod error;
pub(crate) mod object;
pub mod ports;
pub mod token;
pub mod user;
pub mod wallet;

use serde::{Deserialize, Deserializer};

pub use self::authentication_token::AuthenticationToken;
pub use self::error::{ApiError, Error, codes};
pub use self::token::Token;
pub use self::user::User;
pub use self::wallet::{Balance, Wallet};
pub use pagination::{List, Pagination};

/// Convenient operation result alias.
///
/// # Examples
/// ```
/// use ewallet::domain::{ApiError, ApiResult, User};
///
/// fn lookup() -> ApiResult<User> {
///     Err(ApiError::nil_id().into())
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;

/// Treat an explicit JSON `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
