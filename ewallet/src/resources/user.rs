//! User lifecycle and wallet operations.
//!
//! Class-level operations (`login`, `find`, `create`, `update`) are
//! associated functions on [`User`]; wallet operations (`wallets`, `credit`,
//! `debit`) act on a user already fetched.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::receive;
use crate::client::{ApiRequest, Client};
use crate::domain::ports::TransportError;
use crate::domain::{ApiError, AuthenticationToken, Error, List, User, Wallet};

mod endpoints {
    pub(super) const LOGIN: &str = "login";
    pub(super) const GET: &str = "user.get";
    pub(super) const CREATE: &str = "user.create";
    pub(super) const UPDATE: &str = "user.update";
    pub(super) const LIST_WALLETS: &str = "user.list_wallets";
    pub(super) const CREDIT_WALLET: &str = "user.credit_wallet";
    pub(super) const DEBIT_WALLET: &str = "user.debit_wallet";
}

/// Parameters for [`User::create`] and [`User::update`].
///
/// Values are sent as given; the server validates them and its
/// descriptions are returned verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserParams {
    provider_user_id: String,
    username: String,
    metadata: Map<String, Value>,
}

impl UserParams {
    /// Parameters addressing `provider_user_id` with `username`.
    pub fn new(provider_user_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            provider_user_id: provider_user_id.into(),
            username: username.into(),
            metadata: Map::new(),
        }
    }

    /// Attach free-form metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Provider-assigned identifier.
    pub fn provider_user_id(&self) -> &str {
        self.provider_user_id.as_str()
    }

    /// Requested username.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }
}

/// Parameters for [`User::credit`] and [`User::debit`].
///
/// The idempotency token makes a retried transfer apply at most once; reuse
/// it when retrying after a transport failure.
///
/// # Examples
/// ```
/// use ewallet::TransferParams;
///
/// let params = TransferParams::new("tok_OMG_01", 10_000, "4c4b0e7e")
///     .with_account_id("acc_01");
/// assert!(params.validate().is_ok());
/// assert!(TransferParams::new("tok_OMG_01", 0, "4c4b0e7e").validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TransferParams {
    token_id: String,
    amount: u128,
    idempotency_token: String,
    account_id: Option<String>,
    account_address: Option<String>,
    metadata: Map<String, Value>,
}

impl TransferParams {
    /// Transfer of `amount` minor units of `token_id`.
    pub fn new(
        token_id: impl Into<String>,
        amount: u128,
        idempotency_token: impl Into<String>,
    ) -> Self {
        Self {
            token_id: token_id.into(),
            amount,
            idempotency_token: idempotency_token.into(),
            account_id: None,
            account_address: None,
            metadata: Map::new(),
        }
    }

    /// Account funding (credit) or receiving (debit) the transfer.
    #[must_use]
    pub fn with_account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    /// Specific wallet address of that account.
    #[must_use]
    pub fn with_account_address(mut self, account_address: impl Into<String>) -> Self {
        self.account_address = Some(account_address.into());
        self
    }

    /// Attach free-form metadata to the transaction.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Token identifier.
    pub fn token_id(&self) -> &str {
        self.token_id.as_str()
    }

    /// Amount in minor units.
    pub fn amount(&self) -> u128 {
        self.amount
    }

    /// Idempotency token sent with the request.
    pub fn idempotency_token(&self) -> &str {
        self.idempotency_token.as_str()
    }

    /// Check the values that never need a round trip to reject.
    ///
    /// # Errors
    ///
    /// Returns a `client:invalid_parameter` [`ApiError`] for a blank token
    /// id, a zero amount or a blank idempotency token.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.token_id.trim().is_empty() {
            return Err(ApiError::invalid_parameter(
                "Invalid parameter provided `token_id` can't be blank.",
            ));
        }
        if self.amount == 0 {
            return Err(ApiError::invalid_parameter(
                "Invalid parameter provided `amount` must be greater than 0.",
            ));
        }
        if self.idempotency_token.trim().is_empty() {
            return Err(ApiError::invalid_parameter(
                "Invalid parameter provided `idempotency_token` can't be blank.",
            ));
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct TransferBody<'a> {
    provider_user_id: &'a str,
    token_id: &'a str,
    amount: u128,
    metadata: &'a Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    account_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    account_address: Option<&'a str>,
}

impl User {
    /// Issue an authentication token for `provider_user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] with `user:provider_user_id_not_found` for an
    /// unknown user, or [`Error::Transport`] when no answer was decoded.
    pub async fn login(
        client: &Client,
        provider_user_id: &str,
    ) -> Result<AuthenticationToken, Error> {
        let request = ApiRequest::post(endpoints::LOGIN)
            .with_params(provider_params(provider_user_id));
        let object = receive(client.send(request).await?)?;
        Ok(object.into_authentication_token()?)
    }

    /// Fetch the user with `provider_user_id`.
    ///
    /// # Errors
    ///
    /// A missing or blank id returns `user:nil_id` without a request.
    /// Otherwise errors as for [`User::login`].
    pub async fn find(client: &Client, provider_user_id: Option<&str>) -> Result<Self, Error> {
        let Some(provider_user_id) = provider_user_id.filter(|id| !id.trim().is_empty()) else {
            debug!("rejecting user lookup without an id");
            return Err(ApiError::nil_id().into());
        };
        let request =
            ApiRequest::post(endpoints::GET).with_params(provider_params(provider_user_id));
        let object = receive(client.send(request).await?)?;
        Ok(object.into_user()?)
    }

    /// Create a user.
    ///
    /// # Errors
    ///
    /// Returns `client:invalid_parameter` when the server rejects a value.
    pub async fn create(client: &Client, params: &UserParams) -> Result<Self, Error> {
        Self::submit(client, endpoints::CREATE, params).await
    }

    /// Update the user addressed by `params.provider_user_id()`.
    ///
    /// # Errors
    ///
    /// Unknown users and rejected values both return [`Error::Api`] carrying
    /// the server's description.
    pub async fn update(client: &Client, params: &UserParams) -> Result<Self, Error> {
        Self::submit(client, endpoints::UPDATE, params).await
    }

    /// List this user's wallets and their balances.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] or [`Error::Transport`] as for [`User::find`].
    pub async fn wallets(&self, client: &Client) -> Result<List<Wallet>, Error> {
        let request = ApiRequest::post(endpoints::LIST_WALLETS)
            .with_params(provider_params(self.provider_user_id()));
        let object = receive(client.send(request).await?)?;
        Ok(object.into_wallets()?)
    }

    /// Credit this user's wallet; returns the wallets after the transfer.
    ///
    /// # Errors
    ///
    /// Invalid [`TransferParams`] return `client:invalid_parameter` without
    /// a request. Server failures return [`Error::Api`].
    pub async fn credit(
        &self,
        client: &Client,
        params: &TransferParams,
    ) -> Result<List<Wallet>, Error> {
        self.transfer(client, endpoints::CREDIT_WALLET, params).await
    }

    /// Debit this user's wallet; returns the wallets after the transfer.
    ///
    /// # Errors
    ///
    /// As for [`User::credit`].
    pub async fn debit(
        &self,
        client: &Client,
        params: &TransferParams,
    ) -> Result<List<Wallet>, Error> {
        self.transfer(client, endpoints::DEBIT_WALLET, params).await
    }

    async fn submit(client: &Client, path: &str, params: &UserParams) -> Result<Self, Error> {
        let request = ApiRequest::post(path).with_params(encode(params)?);
        let object = receive(client.send(request).await?)?;
        Ok(object.into_user()?)
    }

    async fn transfer(
        &self,
        client: &Client,
        path: &str,
        params: &TransferParams,
    ) -> Result<List<Wallet>, Error> {
        params.validate()?;
        let body = TransferBody {
            provider_user_id: self.provider_user_id(),
            token_id: params.token_id(),
            amount: params.amount(),
            metadata: &params.metadata,
            account_id: params.account_id.as_deref(),
            account_address: params.account_address.as_deref(),
        };
        let request = ApiRequest::post(path)
            .with_params(encode(&body)?)
            .with_idempotency_token(params.idempotency_token());
        let object = receive(client.send(request).await?)?;
        Ok(object.into_wallets()?)
    }
}

fn provider_params(provider_user_id: &str) -> Value {
    let mut params = Map::new();
    params.insert(
        "provider_user_id".to_owned(),
        Value::String(provider_user_id.to_owned()),
    );
    Value::Object(params)
}

fn encode(body: &impl Serialize) -> Result<Value, TransportError> {
    serde_json::to_value(body).map_err(|error| {
        TransportError::invalid_request(format!("cannot encode parameters: {error}"))
    })
}

#[cfg(test)]
mod tests {
    //! Local validation and body shaping; network behaviour lives in the
    //! integration tests.

    use std::sync::Arc;

    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::config::Configuration;
    use crate::domain::codes;
    use crate::domain::ports::{FixtureTransport, MockHttpTransport};

    fn client_with(transport: Arc<dyn crate::domain::ports::HttpTransport>) -> Client {
        let config = Configuration::new("access", "secret", "https://ewallet.example.com/api")
            .expect("valid configuration");
        Client::with_transport(config, transport)
    }

    fn user() -> User {
        User::new("usr_1", "provider_user_id01", "john@doe.com", Map::new())
    }

    #[rstest]
    #[case::blank_token(TransferParams::new("  ", 10, "idem"), "`token_id`")]
    #[case::zero_amount(TransferParams::new("tok_1", 0, "idem"), "`amount`")]
    #[case::blank_idempotency(TransferParams::new("tok_1", 10, ""), "`idempotency_token`")]
    fn invalid_transfer_params_are_named(#[case] params: TransferParams, #[case] field: &str) {
        let error = params.validate().expect_err("params are invalid");

        assert_eq!(error.code(), codes::INVALID_PARAMETER);
        assert!(error.description().contains(field));
    }

    #[rstest]
    #[tokio::test]
    async fn invalid_transfer_makes_no_request() {
        let mut transport = MockHttpTransport::new();
        transport.expect_execute().times(0);
        let client = client_with(Arc::new(transport));

        let error = user()
            .debit(&client, &TransferParams::new("tok_1", 0, "idem"))
            .await
            .expect_err("zero amount is rejected locally");

        assert_eq!(error.code(), Some(codes::INVALID_PARAMETER));
    }

    #[rstest]
    #[case::none(None)]
    #[case::blank(Some("   "))]
    #[tokio::test]
    async fn find_without_id_makes_no_request(#[case] id: Option<&str>) {
        let mut transport = MockHttpTransport::new();
        transport.expect_execute().times(0);
        let client = client_with(Arc::new(transport));

        let error = User::find(&client, id).await.expect_err("nil id");

        assert_eq!(error.as_api(), Some(&ApiError::nil_id()));
    }

    #[rstest]
    #[tokio::test]
    async fn credit_body_carries_optional_accounts_only_when_set() {
        let transport = Arc::new(FixtureTransport::default());
        let client = client_with(transport.clone());
        let mut metadata = Map::new();
        metadata.insert("order".to_owned(), json!("A-1"));
        let params = TransferParams::new("tok_1", 10_000, "idem-1")
            .with_account_id("acc_1")
            .with_metadata(metadata);

        // The fixture has no response queued, so only the request matters.
        let _ = user().credit(&client, &params).await;

        let request = transport.requests().remove(0);
        let body: Value =
            serde_json::from_slice(request.body.as_deref().expect("body")).expect("json");
        assert_eq!(
            body,
            json!({
                "provider_user_id": "provider_user_id01",
                "token_id": "tok_1",
                "amount": 10_000,
                "metadata": {"order": "A-1"},
                "account_id": "acc_1"
            })
        );
        assert_eq!(request.url.path(), "/api/user.credit_wallet");
        assert_eq!(request.header("Idempotency-Token"), Some("idem-1"));
    }

    #[rstest]
    fn user_params_serialise_every_field() {
        let mut metadata = Map::new();
        metadata.insert("first_name".to_owned(), json!("Jane"));
        let params = UserParams::new("p1", "").with_metadata(metadata);

        assert_eq!(
            encode(&params).expect("encodes"),
            json!({"provider_user_id": "p1", "username": "", "metadata": {"first_name": "Jane"}})
        );
    }
}
