//! Wallets and the balances they hold.

use serde::{Deserialize, Serialize};

use super::null_as_default;
use super::token::Token;

/// Amount of one token held by a wallet, in the token's minor unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    #[serde(default, deserialize_with = "null_as_default")]
    amount: u128,
    #[serde(default, alias = "minted_token", deserialize_with = "null_as_default")]
    token: Token,
}

impl Balance {
    /// Build a balance from its parts.
    pub fn new(amount: u128, token: Token) -> Self {
        Self { amount, token }
    }

    /// Amount in minor units.
    pub fn amount(&self) -> u128 {
        self.amount
    }

    /// Token the amount is denominated in.
    pub fn token(&self) -> &Token {
        &self.token
    }
}

/// Wallet address and its balances, in response order.
///
/// Wallets are owned by the response that produced them and hold no
/// reference back to their user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    #[serde(default, deserialize_with = "null_as_default")]
    address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    identifier: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    balances: Vec<Balance>,
}

impl Wallet {
    /// Build a wallet from an address and balances.
    pub fn new(address: impl Into<String>, balances: Vec<Balance>) -> Self {
        Self {
            address: address.into(),
            name: None,
            identifier: None,
            balances,
        }
    }

    /// Wallet address.
    pub fn address(&self) -> &str {
        self.address.as_str()
    }

    /// Display name, e.g. `primary`, when the server sent one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Wallet kind identifier, e.g. `primary` or `burn`.
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// Balances in response order.
    pub fn balances(&self) -> &[Balance] {
        self.balances.as_slice()
    }

    /// Balance for `token_id`, if the wallet holds that token.
    pub fn balance_for(&self, token_id: &str) -> Option<&Balance> {
        self.balances
            .iter()
            .find(|balance| balance.token().id() == token_id)
    }
}
