//! Client SDK for the eWallet server API.
//!
//! Build a [`Configuration`], wrap it in a [`Client`], then call the user
//! operations on [`User`]:
//!
//! ```no_run
//! use ewallet::{Client, Configuration, TransferParams, User};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Configuration::new("access", "secret", "https://ewallet.example.com/api")?;
//! let client = Client::new(config)?;
//!
//! let user = User::find(&client, Some("provider_user_id01")).await?;
//! let wallets = user
//!     .credit(&client, &TransferParams::new("tok_OMG_01", 10_000, "5d0f1f5a"))
//!     .await?;
//! println!("{} wallets", wallets.len());
//! # Ok(())
//! # }
//! ```
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

pub mod client;
pub mod config;
pub mod domain;
pub mod outbound;
pub mod resources;

pub use client::{ApiRequest, Client, Envelope};
pub use config::{ConfigError, Configuration, EwalletSettings};
pub use domain::ports::Method;
pub use domain::{
    ApiError, AuthenticationToken, Balance, Error, List, Pagination, Token, User, Wallet,
};
pub use resources::{TransferParams, UserParams};
