use serde::{Deserialize, Serialize};

use crate::types::AnyJson;

/// An opaque payment credential produced by a device wallet authorization flow.
///
/// Judo Kit never looks inside it: the credential is forwarded to the gateway,
/// the only party able to decrypt it.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletCredential(AnyJson);

impl WalletCredential {
    pub fn new(credential: AnyJson) -> Self {
        WalletCredential(credential)
    }

    pub fn into_inner(self) -> AnyJson {
        self.0
    }
}

impl From<AnyJson> for WalletCredential {
    fn from(value: AnyJson) -> Self {
        WalletCredential(value)
    }
}

impl std::fmt::Debug for WalletCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("WalletCredential(<opaque>)")
    }
}

/// What the wallet authorization sheet handed back.
#[derive(Debug, Clone, PartialEq)]
pub enum WalletAuthorization {
    /// The user authorized the payment.
    Authorized(WalletCredential),
    /// The user dismissed the sheet.
    Cancelled,
}

impl From<WalletCredential> for WalletAuthorization {
    fn from(credential: WalletCredential) -> Self {
        WalletAuthorization::Authorized(credential)
    }
}
