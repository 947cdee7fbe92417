//! Wallet transactions.
//!
//! The device wallet owns the authorization sheet; this module only takes the
//! outcome of that sheet and forwards the opaque credential to the gateway as
//! the payment instrument.

use judo_core::{
    errors::{JudoError, Result},
    response::Response,
    transaction::{TransactionInput, TransactionKind},
    transport::Transport,
    types::{Amount, Reference, WalletAuthorization},
};

use crate::kit::JudoKit;

impl<T: Transport> JudoKit<T> {
    /// Run a transaction with the outcome of a wallet authorization.
    ///
    /// A dismissed authorization resolves to `UserCancelled` without
    /// contacting the gateway. Only [`TransactionKind::Payment`] and
    /// [`TransactionKind::PreAuth`] accept a wallet credential; other kinds
    /// fail with `ParameterError`.
    pub async fn from_wallet_credential(
        &self,
        authorization: impl Into<WalletAuthorization>,
        kind: TransactionKind,
        judo_id: &str,
        amount: &Amount,
        reference: &Reference,
    ) -> Result<Response> {
        let credential = match authorization.into() {
            WalletAuthorization::Authorized(credential) => credential,
            WalletAuthorization::Cancelled => {
                #[cfg(feature = "tracing")]
                tracing::debug!("Wallet authorization dismissed, nothing dispatched");
                return Err(JudoError::user_cancelled());
            }
        };

        self.execute(
            kind,
            judo_id,
            amount,
            reference,
            TransactionInput::wallet(credential),
        )
        .await
    }

    /// Pay with a wallet credential.
    pub async fn wallet_payment(
        &self,
        authorization: impl Into<WalletAuthorization>,
        judo_id: &str,
        amount: &Amount,
        reference: &Reference,
    ) -> Result<Response> {
        self.from_wallet_credential(
            authorization,
            TransactionKind::Payment,
            judo_id,
            amount,
            reference,
        )
        .await
    }

    /// Pre-authorize with a wallet credential.
    pub async fn wallet_pre_auth(
        &self,
        authorization: impl Into<WalletAuthorization>,
        judo_id: &str,
        amount: &Amount,
        reference: &Reference,
    ) -> Result<Response> {
        self.from_wallet_credential(
            authorization,
            TransactionKind::PreAuth,
            judo_id,
            amount,
            reference,
        )
        .await
    }
}
