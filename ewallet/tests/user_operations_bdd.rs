//! Behavioural tests for the user operations.
//!
//! Scenarios replay recorded server responses through `FixtureTransport`
//! and check the entities or API errors each operation returns.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

mod support;

use std::future::Future;
use std::sync::Arc;

use ewallet::domain::ports::FixtureTransport;
use ewallet::{AuthenticationToken, Client, Error, List, TransferParams, User, UserParams, Wallet};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use tokio::runtime::Runtime;

use support::{PROVIDER_USER_ID, RecordingLogger, TOKEN_ID, configuration, replaying_client};

#[derive(Clone)]
struct RuntimeHandle(Arc<Runtime>);

/// Scenario state shared between steps.
#[derive(Default, ScenarioState)]
struct World {
    runtime: Slot<RuntimeHandle>,
    client: Slot<Client>,
    transport: Slot<Arc<FixtureTransport>>,
    logger: Slot<Arc<RecordingLogger>>,
    user: Slot<User>,
    token: Slot<AuthenticationToken>,
    wallets: Slot<List<Wallet>>,
    error: Slot<Error>,
}

impl World {
    fn block_on<F: Future>(&self, future: F) -> F::Output {
        let runtime = self.runtime.get().expect("runtime should be set");
        runtime.0.block_on(future)
    }

    fn client(&self) -> Client {
        self.client.get().expect("client should be set")
    }

    fn transport(&self) -> Arc<FixtureTransport> {
        self.transport.get().expect("transport should be set")
    }

    fn user(&self) -> User {
        self.user.get().expect("user should be fetched")
    }

    fn error(&self) -> Error {
        self.error.get().expect("operation should have failed")
    }

    fn replay(&self, names: &[&str]) {
        let (client, transport) = replaying_client(configuration(), names);
        self.client.set(client);
        self.transport.set(transport);
    }

    fn record<T>(&self, outcome: Result<T, Error>, slot: &Slot<T>) {
        match outcome {
            Ok(value) => slot.set(value),
            Err(error) => self.error.set(error),
        }
    }

    fn fetch_user(&self) {
        let client = self.client();
        let user = self
            .block_on(User::find(&client, Some(PROVIDER_USER_ID)))
            .expect("user exists");
        self.user.set(user);
    }
}

#[fixture]
fn world() -> World {
    let world = World::default();
    world
        .runtime
        .set(RuntimeHandle(Arc::new(Runtime::new().expect("create runtime"))));
    world
}

// ============================================================================
// Given steps
// ============================================================================

#[given("a client replaying {fixture}")]
fn a_client_replaying(world: &World, fixture: String) {
    world.replay(&[fixture.as_str()]);
}

#[given("a logged client replaying {fixture}")]
fn a_logged_client_replaying(world: &World, fixture: String) {
    let logger = Arc::new(RecordingLogger::default());
    let config = configuration().with_logger(logger.clone());
    let (client, transport) = replaying_client(config, &[fixture.as_str()]);
    world.client.set(client);
    world.transport.set(transport);
    world.logger.set(logger);
}

#[given("a client with no recorded responses")]
fn a_client_with_no_recorded_responses(world: &World) {
    world.replay(&[]);
}

#[given("a fetched user whose next response is {fixture}")]
fn a_fetched_user_whose_next_response_is(world: &World, fixture: String) {
    world.replay(&["find_existing", fixture.as_str()]);
    world.fetch_user();
}

#[given("a fetched user with no further responses")]
fn a_fetched_user_with_no_further_responses(world: &World) {
    world.replay(&["find_existing"]);
    world.fetch_user();
}

// ============================================================================
// When steps
// ============================================================================

#[when("the user {provider_user_id} logs in")]
fn the_user_logs_in(world: &World, provider_user_id: String) {
    let client = world.client();
    let outcome = world.block_on(User::login(&client, &provider_user_id));
    world.record(outcome, &world.token);
}

#[when("the user {provider_user_id} is looked up")]
fn the_user_is_looked_up(world: &World, provider_user_id: String) {
    let client = world.client();
    let outcome = world.block_on(User::find(&client, Some(provider_user_id.as_str())));
    world.record(outcome, &world.user);
}

#[when("a user is looked up without an id")]
fn a_user_is_looked_up_without_an_id(world: &World) {
    let client = world.client();
    let outcome = world.block_on(User::find(&client, None));
    world.record(outcome, &world.user);
}

#[when("the user {provider_user_id} is given a blank username")]
fn the_user_is_given_a_blank_username(world: &World, provider_user_id: String) {
    let client = world.client();
    let params = UserParams::new(provider_user_id, "");
    let outcome = world.block_on(User::update(&client, &params));
    world.record(outcome, &world.user);
}

#[when("the user is credited {amount:u64} with token {token}")]
fn the_user_is_credited(world: &World, amount: u64, token: String) {
    let client = world.client();
    let params = TransferParams::new(TOKEN_ID, u128::from(amount), token);
    let outcome = world.block_on(world.user().credit(&client, &params));
    world.record(outcome, &world.wallets);
}

#[when("the user is debited {amount:u64} with token {token}")]
fn the_user_is_debited(world: &World, amount: u64, token: String) {
    let client = world.client();
    let params = TransferParams::new(TOKEN_ID, u128::from(amount), token);
    let outcome = world.block_on(world.user().debit(&client, &params));
    world.record(outcome, &world.wallets);
}

// ============================================================================
// Then steps
// ============================================================================

#[then("an authentication token is returned")]
fn an_authentication_token_is_returned(world: &World) {
    let token = world.token.get().expect("login should succeed");
    assert!(!token.authentication_token().is_empty());
}

#[then("the logger recorded the login request and its response")]
fn the_logger_recorded_the_login_request_and_its_response(world: &World) {
    let logger = world.logger.get().expect("logger should be set");
    assert_eq!(
        logger.lines(),
        vec![
            "[OmiseGO] Request: POST login\n".to_owned(),
            "[OmiseGO] Response: HTTP/200\n".to_owned(),
        ]
    );
}

#[then("the API error code is {code}")]
fn the_api_error_code_is(world: &World, code: String) {
    assert_eq!(world.error().code(), Some(code.as_str()));
}

#[then("the API error description is {description}")]
fn the_api_error_description_is(world: &World, description: String) {
    let error = world.error();
    let api = error.as_api().expect("api error");
    assert_eq!(api.description(), description);
}

#[then("{count:usize} requests were sent")]
fn requests_were_sent(world: &World, count: usize) {
    assert_eq!(world.transport().calls(), count);
}

#[then("the wallet balance is {amount:u64}")]
fn the_wallet_balance_is(world: &World, amount: u64) {
    let wallets = world.wallets.get().expect("transfer should succeed");
    let balance = wallets
        .first()
        .and_then(|wallet| wallet.balance_for(TOKEN_ID))
        .map(ewallet::Balance::amount);
    assert_eq!(balance, Some(u128::from(amount)));
}

#[then("the last request carried idempotency token {token}")]
fn the_last_request_carried_idempotency_token(world: &World, token: String) {
    let request = world
        .transport()
        .requests()
        .pop()
        .expect("a request was sent");
    assert_eq!(request.header("Idempotency-Token"), Some(token.as_str()));
}

// ============================================================================
// Scenario bindings
// ============================================================================

#[scenario(
    path = "tests/features/user_operations.feature",
    name = "Logging in an existing user"
)]
fn logging_in_an_existing_user(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/user_operations.feature",
    name = "Finding an unknown user"
)]
fn finding_an_unknown_user(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/user_operations.feature",
    name = "Finding a user without an id"
)]
fn finding_a_user_without_an_id(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/user_operations.feature",
    name = "Updating a user with a blank username"
)]
fn updating_a_user_with_a_blank_username(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/user_operations.feature",
    name = "Crediting a user's wallet"
)]
fn crediting_a_users_wallet(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/user_operations.feature",
    name = "Rejecting a zero-amount debit locally"
)]
fn rejecting_a_zero_amount_debit_locally(world: World) {
    let _ = world;
}
