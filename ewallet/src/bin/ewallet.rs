//! Command-line access to the eWallet user operations.
//!
//! Credentials come from `EWALLET_*` variables or an `ortho_config` file;
//! results are printed to stdout as JSON.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Context, Report, Result, eyre};
use ewallet::domain::ports::TracingRequestLogger;
use ewallet::{Client, EwalletSettings, TransferParams, User, UserParams};
use ortho_config::OrthoConfig;
use serde::Serialize;
use serde_json::{Map, Value};
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
use uuid::Uuid;

/// `ewallet` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ewallet",
    about = "Call the eWallet user and wallet endpoints",
    version
)]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Issue an authentication token for a user.
    Login(UserRef),
    /// Fetch a user.
    Find(UserRef),
    /// Create a user.
    Create(UserFields),
    /// Update a user's username and metadata.
    Update(UserFields),
    /// List a user's wallets.
    Wallets(UserRef),
    /// Credit a user's wallet.
    Credit(Transfer),
    /// Debit a user's wallet.
    Debit(Transfer),
}

#[derive(Debug, Clone, Args)]
struct UserRef {
    /// Provider-assigned user identifier.
    #[arg(long = "provider-user-id", value_name = "id")]
    provider_user_id: String,
}

impl UserRef {
    fn user(&self) -> User {
        User::with_provider_user_id(self.provider_user_id.clone())
    }
}

#[derive(Debug, Clone, Args)]
struct UserFields {
    #[command(flatten)]
    user: UserRef,
    /// Username to set.
    #[arg(long, value_name = "name")]
    username: String,
    /// Metadata as a JSON object.
    #[arg(long, value_name = "json", value_parser = parse_metadata)]
    metadata: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Args)]
struct Transfer {
    #[command(flatten)]
    user: UserRef,
    /// Token identifier.
    #[arg(long = "token-id", value_name = "id")]
    token_id: String,
    /// Amount in the token's minor unit.
    #[arg(long, value_name = "amount", value_parser = parse_amount)]
    amount: u128,
    /// Account on the other side of the transfer.
    #[arg(long = "account-id", value_name = "id")]
    account_id: Option<String>,
    /// Wallet address of that account.
    #[arg(long = "account-address", value_name = "address")]
    account_address: Option<String>,
    /// Reuse a token when retrying; a fresh UUID is generated otherwise.
    #[arg(long = "idempotency-token", value_name = "token")]
    idempotency_token: Option<String>,
    /// Transaction metadata as a JSON object.
    #[arg(long, value_name = "json", value_parser = parse_metadata)]
    metadata: Option<Map<String, Value>>,
}

impl Transfer {
    fn params(&self) -> TransferParams {
        let token = self
            .idempotency_token
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let mut params = TransferParams::new(self.token_id.clone(), self.amount, token)
            .with_metadata(self.metadata.clone().unwrap_or_default());
        if let Some(account_id) = &self.account_id {
            params = params.with_account_id(account_id.clone());
        }
        if let Some(account_address) = &self.account_address {
            params = params.with_account_address(account_address.clone());
        }
        params
    }
}

impl UserFields {
    fn params(&self) -> UserParams {
        UserParams::new(self.user.provider_user_id.clone(), self.username.clone())
            .with_metadata(self.metadata.clone().unwrap_or_default())
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(std::io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build ewallet runtime")?;
    runtime.block_on(run(args.command))
}

async fn run(command: Command) -> Result<()> {
    let client = build_client()?;
    match command {
        Command::Login(user) => print_json(
            &User::login(&client, &user.provider_user_id)
                .await
                .map_err(failed("login"))?,
        ),
        Command::Find(user) => print_json(
            &User::find(&client, Some(user.provider_user_id.as_str()))
                .await
                .map_err(failed("find"))?,
        ),
        Command::Create(fields) => print_json(
            &User::create(&client, &fields.params())
                .await
                .map_err(failed("create"))?,
        ),
        Command::Update(fields) => print_json(
            &User::update(&client, &fields.params())
                .await
                .map_err(failed("update"))?,
        ),
        Command::Wallets(user) => print_json(
            &user
                .user()
                .wallets(&client)
                .await
                .map_err(failed("wallets"))?,
        ),
        Command::Credit(transfer) => print_json(
            &transfer
                .user
                .user()
                .credit(&client, &transfer.params())
                .await
                .map_err(failed("credit"))?,
        ),
        Command::Debit(transfer) => print_json(
            &transfer
                .user
                .user()
                .debit(&client, &transfer.params())
                .await
                .map_err(failed("debit"))?,
        ),
    }
}

fn build_client() -> Result<Client> {
    // Subcommand flags are parsed by clap; settings come from env and files.
    let settings = EwalletSettings::load_from_iter([OsString::from("ewallet")])
        .map_err(|error| eyre!("failed to load ewallet settings: {error}"))?;
    let config = settings
        .into_configuration()
        .wrap_err("invalid ewallet settings")?
        .with_logger(Arc::new(TracingRequestLogger));
    Client::new(config).wrap_err("failed to build ewallet client")
}

fn failed(operation: &'static str) -> impl Fn(ewallet::Error) -> Report {
    move |error| Report::new(error).wrap_err(format!("{operation} failed"))
}

fn print_json(value: &impl Serialize) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).wrap_err("failed to render result")?;
    println!("{rendered}");
    Ok(())
}

fn parse_metadata(raw: &str) -> Result<Map<String, Value>, String> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err("metadata must be a JSON object".to_owned()),
        Err(error) => Err(format!("metadata is not valid JSON: {error}")),
    }
}

fn parse_amount(raw: &str) -> Result<u128, String> {
    let amount = raw
        .trim()
        .parse::<u128>()
        .map_err(|error| format!("amount must be a whole number of minor units: {error}"))?;
    if amount == 0 {
        return Err("amount must be greater than zero".to_owned());
    }
    Ok(amount)
}
