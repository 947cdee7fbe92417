//! Card descriptors and the gateway-issued payment token.

use std::{fmt::Display, str::FromStr};

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::errors::JudoError;

/// Card networks known to the gateway.
///
/// The numeric values are the gateway's `cardType` identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CardNetwork {
    Visa,
    MasterCard,
    Maestro,
    Amex,
    ChinaUnionPay,
    Jcb,
    Discover,
    DinersClub,
    Unknown,
}

impl CardNetwork {
    pub fn from_card_type(card_type: i64) -> CardNetwork {
        match card_type {
            1 | 3 | 11 | 13 => CardNetwork::Visa,
            2 | 12 => CardNetwork::MasterCard,
            10 => CardNetwork::Maestro,
            8 => CardNetwork::Amex,
            7 => CardNetwork::ChinaUnionPay,
            9 => CardNetwork::Jcb,
            14 => CardNetwork::Discover,
            17 => CardNetwork::DinersClub,
            _ => CardNetwork::Unknown,
        }
    }
}

/// An accepted card network and the card number length expected for it.
///
/// Only a hint for card entry collaborators; nothing here enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardConfiguration {
    pub network: CardNetwork,
    pub length: u8,
}

impl CardConfiguration {
    pub const fn new(network: CardNetwork, length: u8) -> Self {
        CardConfiguration { network, length }
    }

    /// Visa, MasterCard and Maestro with 16 digits, Amex with 15.
    pub fn defaults() -> Vec<CardConfiguration> {
        vec![
            CardConfiguration::new(CardNetwork::Visa, 16),
            CardConfiguration::new(CardNetwork::MasterCard, 16),
            CardConfiguration::new(CardNetwork::Maestro, 16),
            CardConfiguration::new(CardNetwork::Amex, 15),
        ]
    }
}

/// Card expiry month and year.
///
/// On the wire this is `MMYY`; [`Display`] renders `MM/YY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardExpiry {
    month: u8,
    year: u16,
}

impl CardExpiry {
    /// `year` may be given with two or four digits.
    pub fn new(month: u8, year: u16) -> Result<Self, JudoError> {
        if !(1..=12).contains(&month) {
            return Err(JudoError::parameter(format!(
                "expiry month must be between 1 and 12, got {month}"
            )));
        }
        let year = if year < 100 { 2000 + year } else { year };
        if year > 2099 {
            return Err(JudoError::parameter(format!("expiry year {year} is out of range")));
        }
        Ok(CardExpiry { month, year })
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    /// The gateway's `MMYY` form.
    pub fn end_date(&self) -> String {
        format!("{:02}{:02}", self.month, self.year % 100)
    }
}

impl Display for CardExpiry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.year % 100)
    }
}

/// Accepts `MMYY` and `MM/YY`.
impl FromStr for CardExpiry {
    type Err = JudoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits: String = s.chars().filter(|c| *c != '/').collect();
        if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(JudoError::parameter(format!("invalid expiry date '{s}'")));
        }
        let month = digits[..2]
            .parse::<u8>()
            .map_err(|err| JudoError::parameter(format!("invalid expiry month: {err}")))?;
        let year = digits[2..]
            .parse::<u16>()
            .map_err(|err| JudoError::parameter(format!("invalid expiry year: {err}")))?;
        CardExpiry::new(month, year)
    }
}

impl Serialize for CardExpiry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.end_date())
    }
}

impl<'de> Deserialize<'de> for CardExpiry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Display-level details of a card.
///
/// Either typed in by a card entry collaborator or echoed back by the gateway
/// in a receipt. Never holds a security code.
#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    /// Card number in display form, e.g. `"**** 3436"` for gateway-echoed cards.
    #[builder(into)]
    pub card_number: String,
    /// Card expiry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry: Option<CardExpiry>,
    /// Name of the cardholder.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub cardholder_name: Option<String>,
    /// Card network, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<CardNetwork>,
}

impl CardDetails {
    /// Build display details from the last four digits the gateway echoes back.
    pub fn from_last_four(last_four: &str) -> Self {
        CardDetails {
            card_number: format!("**** {last_four}"),
            expiry: None,
            cardholder_name: None,
            network: None,
        }
    }

    /// Expiry as `MM/YY`, used to pre-fill expiry fields.
    pub fn formatted_end_date(&self) -> Option<String> {
        self.expiry.map(|e| e.to_string())
    }

    /// The last four digits of the card number, ignoring spaces and masking.
    pub fn last_four(&self) -> String {
        let digits: Vec<char> = self
            .card_number
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        digits[digits.len().saturating_sub(4)..].iter().collect()
    }
}

/// Consumer and card tokens issued by the gateway for repeat transactions.
///
/// There is no public constructor: a token only comes out of a gateway
/// receipt, or back out of storage through `Deserialize` after the caller
/// persisted one.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentToken {
    pub(crate) consumer_token: String,
    pub(crate) card_token: String,
}

impl PaymentToken {
    pub fn consumer_token(&self) -> &str {
        &self.consumer_token
    }

    pub fn card_token(&self) -> &str {
        &self.card_token
    }
}

impl std::fmt::Debug for PaymentToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentToken")
            .field("consumer_token", &"<redacted>")
            .field("card_token", &"<redacted>")
            .finish()
    }
}
