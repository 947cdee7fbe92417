mod common;

use judo_kit::{
    errors::ErrorCode,
    transaction::TransactionKind,
    types::{Amount, Reference, WalletAuthorization, WalletCredential},
};
use serde_json::json;

use common::sandbox_kit;

fn credential() -> WalletCredential {
    WalletCredential::new(json!({
        "paymentData": { "version": "EC_v1", "data": "b64-opaque" },
        "paymentMethod": { "network": "Visa", "type": "debit" },
        "transactionIdentifier": "txn-1"
    }))
}

fn amount() -> Amount {
    "2 GBP".parse().unwrap()
}

fn reference() -> Reference {
    Reference::new("r1", "p1").unwrap()
}

#[tokio::test]
async fn test_wallet_payment_forwards_credential_unchanged() {
    let kit = sandbox_kit([(200, json!({ "receiptId": "1", "result": "Success" }))]);

    let response = kit
        .wallet_payment(credential(), "100200300", &amount(), &reference())
        .await
        .unwrap();
    assert_eq!(response.len(), 1);

    let request = kit.transport().last_request();
    assert_eq!(request.url.path(), "/transactions/payments");
    assert_eq!(request.body["pkPayment"], credential().into_inner());
    assert_eq!(request.body["amount"], json!("2"));
    assert!(request.body.get("cardNumber").is_none());
}

#[tokio::test]
async fn test_wallet_pre_auth_uses_pre_auth_endpoint() {
    let kit = sandbox_kit([(200, json!({ "receiptId": "1", "result": "Success" }))]);

    kit.wallet_pre_auth(
        WalletAuthorization::Authorized(credential()),
        "100200300",
        &amount(),
        &reference(),
    )
    .await
    .unwrap();

    assert_eq!(
        kit.transport().last_request().url.path(),
        "/transactions/preauths"
    );
}

#[tokio::test]
async fn test_dismissed_wallet_sheet_is_user_cancelled() {
    let kit = sandbox_kit([]);

    let err = kit
        .wallet_payment(
            WalletAuthorization::Cancelled,
            "100200300",
            &amount(),
            &reference(),
        )
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::UserCancelled);
    assert_eq!(kit.transport().dispatched(), 0);
}

#[tokio::test]
async fn test_wallet_credential_with_token_kind_is_rejected() {
    let kit = sandbox_kit([]);

    for kind in [
        TransactionKind::TokenPayment,
        TransactionKind::TokenPreAuth,
        TransactionKind::RegisterCard,
    ] {
        let err = kit
            .from_wallet_credential(credential(), kind, "100200300", &amount(), &reference())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ParameterError);
    }

    assert_eq!(kit.transport().dispatched(), 0);
}

#[tokio::test]
async fn test_wallet_gateway_decline_is_reported() {
    let kit = sandbox_kit([(
        402,
        json!({ "code": 11, "category": 2, "message": "Payment declined" }),
    )]);

    let err = kit
        .wallet_payment(credential(), "100200300", &amount(), &reference())
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::GatewayError);
    assert_eq!(err.category.as_deref(), Some("2"));
    assert_eq!(err.gateway_code, Some(11));
}
