//! Error taxonomy shared by every Judo Kit operation.
//!
//! Every failure reaches the caller as a [`JudoError`]: a code from the closed
//! [`ErrorCode`] set, an optional display category and a human readable message.
//! Gateway-reported classification is carried verbatim.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The kind of failure a [`JudoError`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// A request was attempted before a token and secret were set.
    NotConfigured,
    /// The device integrity check failed while enforcement was enabled.
    DeviceIntegrityError,
    /// A required field was missing or malformed.
    ParameterError,
    /// A token transaction was attempted without a card details / payment token pair.
    MissingTokenState,
    /// The user abandoned the card entry or wallet flow.
    UserCancelled,
    /// The transport failed before the gateway produced an answer.
    NetworkError,
    /// The gateway rejected the request or answered with something unreadable.
    GatewayError,
}

impl ErrorCode {
    /// Gateway error code reporting that the user abandoned the flow.
    pub const GATEWAY_USER_CANCELLED: i64 = 3;

    /// Map a numeric gateway error code into the local taxonomy.
    ///
    /// Only a user cancellation has a local counterpart. Every other code the
    /// gateway reports is a [`ErrorCode::GatewayError`]; local-only kinds such as
    /// `NetworkError` or `DeviceIntegrityError` never come out of a reply.
    pub fn from_gateway_code(code: i64) -> ErrorCode {
        match code {
            Self::GATEWAY_USER_CANCELLED => ErrorCode::UserCancelled,
            _ => ErrorCode::GatewayError,
        }
    }

    /// Whether a caller may sensibly try the transaction again after this failure.
    ///
    /// Parameter and token-state failures need corrected input first; network and
    /// gateway failures can be retried as a fresh request.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ErrorCode::ParameterError
                | ErrorCode::MissingTokenState
                | ErrorCode::NetworkError
                | ErrorCode::GatewayError
        )
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorCode::NotConfigured => "not configured",
            ErrorCode::DeviceIntegrityError => "device integrity error",
            ErrorCode::ParameterError => "parameter error",
            ErrorCode::MissingTokenState => "missing token state",
            ErrorCode::UserCancelled => "user cancelled",
            ErrorCode::NetworkError => "network error",
            ErrorCode::GatewayError => "gateway error",
        };
        write!(f, "{s}")
    }
}

/// Field-level detail attached to a gateway error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// A failed Judo Kit operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct JudoError {
    /// What went wrong.
    pub code: ErrorCode,
    /// Display classification, forwarded verbatim from the gateway when present.
    pub category: Option<String>,
    /// Human readable description.
    pub message: String,
    /// The raw gateway error code, if the gateway produced this error.
    pub gateway_code: Option<i64>,
    /// Field-level details reported by the gateway.
    pub details: Vec<ErrorDetail>,
}

impl JudoError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        JudoError {
            code,
            category: None,
            message: message.into(),
            gateway_code: None,
            details: Vec::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn not_configured() -> Self {
        JudoError::new(
            ErrorCode::NotConfigured,
            "a token and secret must be set before making transactions",
        )
    }

    pub fn device_integrity() -> Self {
        JudoError::new(
            ErrorCode::DeviceIntegrityError,
            "transactions are not allowed on a device that failed the integrity check",
        )
    }

    pub fn parameter(message: impl Into<String>) -> Self {
        JudoError::new(ErrorCode::ParameterError, message)
    }

    pub fn missing_token_state() -> Self {
        JudoError::new(
            ErrorCode::MissingTokenState,
            "a card must be registered before making a token payment or pre-auth",
        )
    }

    pub fn user_cancelled() -> Self {
        JudoError::new(ErrorCode::UserCancelled, "the user cancelled the transaction")
    }

    pub fn network(message: impl Display) -> Self {
        JudoError::new(ErrorCode::NetworkError, message.to_string())
    }

    pub fn gateway(message: impl Into<String>) -> Self {
        JudoError::new(ErrorCode::GatewayError, message)
    }

    pub fn is_user_cancelled(&self) -> bool {
        self.code == ErrorCode::UserCancelled
    }
}

/// A specialized `Result` type for Judo Kit operations.
pub type Result<T> = std::result::Result<T, JudoError>;
