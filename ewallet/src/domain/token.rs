//! Token (currency) definitions.

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Currency a balance is denominated in.
///
/// Amounts are integers in the token's smallest unit; `subunit_to_unit`
/// says how many of those make one whole token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    #[serde(default, deserialize_with = "null_as_default")]
    id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    symbol: String,
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    subunit_to_unit: u128,
}

impl Token {
    /// Build a token from its parts.
    pub fn new(
        id: impl Into<String>,
        symbol: impl Into<String>,
        name: impl Into<String>,
        subunit_to_unit: u128,
    ) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.into(),
            name: name.into(),
            subunit_to_unit,
        }
    }

    /// Server identifier, e.g. `tok_OMG_01c...`.
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Ticker symbol.
    pub fn symbol(&self) -> &str {
        self.symbol.as_str()
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Number of minor units in one whole token.
    pub fn subunit_to_unit(&self) -> u128 {
        self.subunit_to_unit
    }
}
