//! Supported currencies.
//!
//! The set is closed: an unknown code is rejected when a request is
//! deserialized, and a stored row carrying an unknown code fails to load.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Currency of an account. Balances are always held in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Cad,
    Inr,
}

/// Error returned when a currency code is not one of [`Currency::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported currency: {0}")]
pub struct UnsupportedCurrency(pub String);

impl Currency {
    /// Every supported currency.
    pub const ALL: [Currency; 4] = [Currency::Usd, Currency::Eur, Currency::Cad, Currency::Inr];

    /// ISO 4217 code as stored in the `accounts.currency` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Cad => "CAD",
            Currency::Inr => "INR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = UnsupportedCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "CAD" => Ok(Currency::Cad),
            "INR" => Ok(Currency::Inr),
            other => Err(UnsupportedCurrency(other.to_string())),
        }
    }
}

/// Used by sqlx (`#[sqlx(try_from = "String")]`) when decoding account rows.
impl TryFrom<String> for Currency {
    type Error = UnsupportedCurrency;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
