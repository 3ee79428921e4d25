//! Supported currencies.
//!
//! Amounts are stored as integer minor units (cents, pence); the currency
//! only carries the ISO code used for display and mismatch checks.

use serde::{Deserialize, Serialize};

use crate::EngineError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    pub fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
        }
    }
}

impl TryFrom<&str> for Currency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            "GBP" => Ok(Self::Gbp),
            other => Err(EngineError::CurrencyMismatch(format!(
                "unknown currency: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_round_trips() {
        for currency in [Currency::Usd, Currency::Eur, Currency::Gbp] {
            assert_eq!(Currency::try_from(currency.code()).unwrap(), currency);
        }
    }

    #[test]
    fn unknown_code_is_rejected() {
        assert!(Currency::try_from("XTS").is_err());
    }
}
