//! Transaction kinds and the request builder.
//!
//! [`TransactionRequest::build`] is the single entry point for both the card
//! path and the wallet path: the difference is carried by [`TransactionInput`].

use std::fmt::Display;

use serde::Serialize;

use crate::{
    errors::{JudoError, Result},
    types::{
        AnyJson, Amount, CardDetails, CardExpiry, Currency, Decimal, PaymentToken, Record,
        Reference, WalletCredential,
    },
};

/// The closed set of transactions the gateway supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Payment,
    PreAuth,
    RegisterCard,
    TokenPayment,
    TokenPreAuth,
}

impl TransactionKind {
    /// Path of the endpoint, relative to the session's base URL.
    pub fn endpoint(&self) -> &'static str {
        match self {
            TransactionKind::Payment | TransactionKind::TokenPayment => "transactions/payments",
            TransactionKind::PreAuth | TransactionKind::TokenPreAuth => "transactions/preauths",
            TransactionKind::RegisterCard => "transactions/registercard",
        }
    }

    /// Whether the transaction reuses a previously issued [`PaymentToken`].
    pub fn is_token_based(&self) -> bool {
        matches!(
            self,
            TransactionKind::TokenPayment | TransactionKind::TokenPreAuth
        )
    }

    /// Whether a wallet credential can fund this kind of transaction.
    pub fn accepts_wallet(&self) -> bool {
        matches!(self, TransactionKind::Payment | TransactionKind::PreAuth)
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TransactionKind::Payment => "payment",
            TransactionKind::PreAuth => "pre-auth",
            TransactionKind::RegisterCard => "register card",
            TransactionKind::TokenPayment => "token payment",
            TransactionKind::TokenPreAuth => "token pre-auth",
        };
        write!(f, "{s}")
    }
}

/// Card-side inputs: details typed in by the card entry collaborator and/or a
/// pair carried over from an earlier receipt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardInput {
    pub card_details: Option<CardDetails>,
    pub payment_token: Option<PaymentToken>,
}

/// How a transaction is funded.
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionInput {
    Card(CardInput),
    Wallet(WalletCredential),
}

impl Default for TransactionInput {
    fn default() -> Self {
        TransactionInput::Card(CardInput::default())
    }
}

impl TransactionInput {
    /// Card input, optionally pre-filled with card details.
    pub fn card(card_details: Option<CardDetails>) -> Self {
        TransactionInput::Card(CardInput {
            card_details,
            payment_token: None,
        })
    }

    /// Card input carrying a details/token pair for a repeat transaction.
    pub fn token(card_details: Option<CardDetails>, payment_token: Option<PaymentToken>) -> Self {
        TransactionInput::Card(CardInput {
            card_details,
            payment_token,
        })
    }

    pub fn wallet(credential: WalletCredential) -> Self {
        TransactionInput::Wallet(credential)
    }
}

/// JSON body sent to the gateway.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPayload {
    pub judo_id: String,
    pub amount: Decimal,
    pub currency: Currency,
    pub your_consumer_reference: String,
    pub your_payment_reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub your_payment_meta_data: Option<Record<AnyJson>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_last_four: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<CardExpiry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_holder_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumer_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_token: Option<String>,
    #[serde(rename = "pkPayment", skip_serializing_if = "Option::is_none")]
    pub wallet_credential: Option<WalletCredential>,
}

impl TransactionPayload {
    fn new(amount: &Amount, reference: &Reference, judo_id: &str) -> Self {
        TransactionPayload {
            judo_id: judo_id.to_string(),
            amount: amount.value(),
            currency: amount.currency(),
            your_consumer_reference: reference.consumer_reference().to_string(),
            your_payment_reference: reference.payment_reference().to_string(),
            your_payment_meta_data: reference.metadata().cloned(),
            card_number: None,
            card_last_four: None,
            expiry_date: None,
            card_holder_name: None,
            consumer_token: None,
            card_token: None,
            wallet_credential: None,
        }
    }

    fn with_card(mut self, card: CardDetails, token_based: bool) -> Self {
        if token_based {
            self.card_last_four = Some(card.last_four());
        } else {
            self.card_number = Some(card.card_number);
        }
        self.expiry_date = card.expiry;
        self.card_holder_name = card.cardholder_name;
        self
    }

    fn with_token(mut self, token: PaymentToken) -> Self {
        self.consumer_token = Some(token.consumer_token);
        self.card_token = Some(token.card_token);
        self
    }
}

/// A validated request: where to send it and what to send.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRequest {
    pub kind: TransactionKind,
    pub endpoint: &'static str,
    pub payload: TransactionPayload,
}

impl TransactionRequest {
    /// Validate the inputs for `kind` and produce the request.
    ///
    /// Fails with `ParameterError` on an empty merchant id or a wallet credential
    /// used with a kind that does not take one, and with `MissingTokenState`
    /// when a token transaction lacks its card details or payment token.
    pub fn build(
        kind: TransactionKind,
        amount: &Amount,
        reference: &Reference,
        judo_id: &str,
        input: TransactionInput,
    ) -> Result<Self> {
        if judo_id.is_empty() {
            return Err(JudoError::parameter("judo id must not be empty"));
        }

        let payload = TransactionPayload::new(amount, reference, judo_id);

        let payload = match input {
            TransactionInput::Wallet(credential) => {
                if !kind.accepts_wallet() {
                    return Err(JudoError::parameter(format!(
                        "a wallet credential cannot fund a {kind}"
                    )));
                }
                TransactionPayload {
                    wallet_credential: Some(credential),
                    ..payload
                }
            }
            TransactionInput::Card(CardInput {
                card_details,
                payment_token,
            }) if kind.is_token_based() => match (card_details, payment_token) {
                (Some(card), Some(token)) => payload.with_card(card, true).with_token(token),
                _ => return Err(JudoError::missing_token_state()),
            },
            TransactionInput::Card(CardInput {
                card_details,
                payment_token,
            }) => {
                let payload = match card_details {
                    Some(card) => payload.with_card(card, false),
                    None => payload,
                };
                match payment_token {
                    Some(token) => payload.with_token(token),
                    None => payload,
                }
            }
        };

        Ok(TransactionRequest {
            kind,
            endpoint: kind.endpoint(),
            payload,
        })
    }
}
