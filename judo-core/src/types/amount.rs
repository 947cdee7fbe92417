//! [`Amount`] represents the monetary value of a transaction request.
//!
//! This module holds its type definition, the supported [`Currency`] set and
//! the `"<value> <CODE>"` literal parser.

use std::{fmt::Display, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::JudoError;

/// ISO 4217 currencies accepted by the gateway.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Aed,
    Aud,
    Brl,
    Cad,
    Chf,
    Czk,
    Dkk,
    Eur,
    #[default]
    Gbp,
    Hkd,
    Huf,
    Jpy,
    Nok,
    Nzd,
    Pln,
    Qar,
    Sar,
    Sek,
    Sgd,
    Usd,
    Zar,
}

impl Currency {
    pub const ALL: [Currency; 21] = [
        Currency::Aed,
        Currency::Aud,
        Currency::Brl,
        Currency::Cad,
        Currency::Chf,
        Currency::Czk,
        Currency::Dkk,
        Currency::Eur,
        Currency::Gbp,
        Currency::Hkd,
        Currency::Huf,
        Currency::Jpy,
        Currency::Nok,
        Currency::Nzd,
        Currency::Pln,
        Currency::Qar,
        Currency::Sar,
        Currency::Sek,
        Currency::Sgd,
        Currency::Usd,
        Currency::Zar,
    ];

    /// The three letter ISO code, e.g. `"GBP"`.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Aed => "AED",
            Currency::Aud => "AUD",
            Currency::Brl => "BRL",
            Currency::Cad => "CAD",
            Currency::Chf => "CHF",
            Currency::Czk => "CZK",
            Currency::Dkk => "DKK",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Hkd => "HKD",
            Currency::Huf => "HUF",
            Currency::Jpy => "JPY",
            Currency::Nok => "NOK",
            Currency::Nzd => "NZD",
            Currency::Pln => "PLN",
            Currency::Qar => "QAR",
            Currency::Sar => "SAR",
            Currency::Sek => "SEK",
            Currency::Sgd => "SGD",
            Currency::Usd => "USD",
            Currency::Zar => "ZAR",
        }
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = JudoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| JudoError::parameter(format!("unsupported currency: {s}")))
    }
}

/// A non-negative decimal value in a supported currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAmount")]
pub struct Amount {
    #[serde(rename = "amount")]
    value: Decimal,
    currency: Currency,
}

#[derive(Deserialize)]
struct RawAmount {
    amount: Decimal,
    #[serde(default)]
    currency: Currency,
}

impl TryFrom<RawAmount> for Amount {
    type Error = JudoError;

    fn try_from(raw: RawAmount) -> Result<Self, Self::Error> {
        Amount::new(raw.amount, raw.currency)
    }
}

impl Amount {
    /// Create an amount, rejecting negative values.
    pub fn new(value: impl Into<Decimal>, currency: Currency) -> Result<Self, JudoError> {
        let value = value.into();
        if value.is_sign_negative() && !value.is_zero() {
            return Err(JudoError::parameter(format!(
                "amount must not be negative, got {value}"
            )));
        }
        Ok(Amount { value, currency })
    }

    /// Create an amount in the default currency (GBP).
    pub fn gbp(value: impl Into<Decimal>) -> Result<Self, JudoError> {
        Amount::new(value, Currency::default())
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value, self.currency)
    }
}

/// Parses `"35"`, `"2 GBP"` or `"9.99 EUR"`. A missing currency means GBP.
impl FromStr for Amount {
    type Err = JudoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let value = parts
            .next()
            .ok_or_else(|| JudoError::parameter("amount must not be empty"))?;
        let value = Decimal::from_str(value)
            .map_err(|err| JudoError::parameter(format!("invalid amount '{value}': {err}")))?;
        let currency = match parts.next() {
            Some(code) => code.parse()?,
            None => Currency::default(),
        };
        if parts.next().is_some() {
            return Err(JudoError::parameter(format!("invalid amount literal '{s}'")));
        }
        Amount::new(value, currency)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn test_parse_amount_literal() {
        let amount: Amount = "2 GBP".parse().unwrap();
        assert_eq!(amount.value(), dec!(2));
        assert_eq!(amount.currency(), Currency::Gbp);

        let amount: Amount = "9.99 eur".parse().unwrap();
        assert_eq!(amount.value(), dec!(9.99));
        assert_eq!(amount.currency(), Currency::Eur);

        let amount: Amount = "35".parse().unwrap();
        assert_eq!(amount.currency(), Currency::Gbp);
    }

    #[test]
    fn test_rejects_invalid_amounts() {
        let err = Amount::new(dec!(-1), Currency::Usd).unwrap_err();
        assert_eq!(err.code, ErrorCode::ParameterError);

        assert!("".parse::<Amount>().is_err());
        assert!("ten GBP".parse::<Amount>().is_err());
        assert!("10 XYZ".parse::<Amount>().is_err());
        assert!("10 GBP extra".parse::<Amount>().is_err());
    }

    #[test]
    fn test_zero_is_allowed() {
        assert!(Amount::gbp(dec!(0)).is_ok());
        assert!(Amount::gbp(dec!(-0)).is_ok());
    }

    #[test]
    fn test_amount_json_shape() {
        let amount = Amount::new(dec!(35), Currency::Gbp).unwrap();
        assert_eq!(
            serde_json::to_value(amount).unwrap(),
            json!({ "amount": "35", "currency": "GBP" })
        );

        let negative = serde_json::from_value::<Amount>(json!({ "amount": -5, "currency": "GBP" }));
        assert!(negative.is_err());
    }
}
