//! Shared helpers for the ewallet integration tests.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::sync::{Arc, Mutex, PoisonError};

use ewallet::domain::ports::{FixtureTransport, HttpResponse, RequestLogger};
use ewallet::{Client, Configuration};

pub const BASE_URL: &str = "https://ewallet.example.com/api";
pub const PROVIDER_USER_ID: &str = "provider_user_id01";
pub const TOKEN_ID: &str = "tok_OMG_01cbffwvj6ma9a9gg1tb24880q";
pub const NOT_FOUND_DESCRIPTION: &str =
    "There is no user corresponding to the provided provider_user_id";

/// Recorded response body by name, e.g. `login_existing`.
pub fn fixture(name: &str) -> &'static str {
    match name {
        "login_existing" => include_str!("../fixtures/login_existing.json"),
        "login_not_existing" => include_str!("../fixtures/login_not_existing.json"),
        "find_existing" => include_str!("../fixtures/find_existing.json"),
        "find_not_existing" => include_str!("../fixtures/find_not_existing.json"),
        "create_valid" => include_str!("../fixtures/create_valid.json"),
        "create_invalid" => include_str!("../fixtures/create_invalid.json"),
        "update_valid" => include_str!("../fixtures/update_valid.json"),
        "update_invalid" => include_str!("../fixtures/update_invalid.json"),
        "update_not_existing" => include_str!("../fixtures/update_not_existing.json"),
        "wallets" => include_str!("../fixtures/wallets.json"),
        "credit_valid" => include_str!("../fixtures/credit_valid.json"),
        "debit_valid" => include_str!("../fixtures/debit_valid.json"),
        "debit_insufficient_funds" => include_str!("../fixtures/debit_insufficient_funds.json"),
        "credit_large_amount" => include_str!("../fixtures/credit_large_amount.json"),
        other => panic!("unknown fixture `{other}`"),
    }
}

pub fn configuration() -> Configuration {
    Configuration::new("access", "secret", BASE_URL).expect("valid configuration")
}

/// Client replaying the named fixtures, one per call, as `200` responses.
pub fn replaying_client(
    config: Configuration,
    names: &[&str],
) -> (Client, Arc<FixtureTransport>) {
    let transport = Arc::new(FixtureTransport::new(
        names
            .iter()
            .map(|name| Ok(HttpResponse::new(200, fixture(name)))),
    ));
    (Client::with_transport(config, transport.clone()), transport)
}

/// Logger keeping every line it receives.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    lines: Mutex<Vec<String>>,
}

impl RecordingLogger {
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl RequestLogger for RecordingLogger {
    fn info(&self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_owned());
    }
}
