//! Gateway receipts and error payloads.

use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    errors::{ErrorCode, ErrorDetail, JudoError},
    types::{AnyJson, CardDetails, CardNetwork, Decimal, PaymentToken},
};

/// Outcome reported on a receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionResult {
    Success,
    Declined,
    Error,
    #[serde(other)]
    Unknown,
}

/// Card as echoed on a receipt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptCardDetails {
    #[serde(rename = "cardLastfour", default)]
    pub card_last_four: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub card_token: Option<String>,
    #[serde(default)]
    pub card_type: Option<i64>,
    #[serde(default)]
    pub cardholder_name: Option<String>,
}

/// Consumer as echoed on a receipt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptConsumer {
    #[serde(default)]
    pub consumer_token: Option<String>,
    #[serde(default)]
    pub your_consumer_reference: Option<String>,
}

/// A single transaction result record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionData {
    pub receipt_id: String,
    pub result: TransactionResult,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(rename = "type", default)]
    pub transaction_type: Option<String>,
    #[serde(default)]
    pub your_payment_reference: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub card_details: Option<ReceiptCardDetails>,
    #[serde(default)]
    pub consumer: Option<ReceiptConsumer>,
}

impl TransactionData {
    pub fn is_success(&self) -> bool {
        self.result == TransactionResult::Success
    }

    /// Display details of the card used, if the gateway echoed any.
    pub fn card_details(&self) -> Option<CardDetails> {
        let echoed = self.card_details.as_ref()?;
        let last_four = echoed.card_last_four.as_deref()?;

        let mut card = CardDetails::from_last_four(last_four);
        card.expiry = echoed.end_date.as_deref().and_then(|d| d.parse().ok());
        card.cardholder_name = echoed.cardholder_name.clone();
        card.network = echoed.card_type.map(CardNetwork::from_card_type);
        Some(card)
    }

    /// The consumer/card token pair for repeat transactions, if both were issued.
    pub fn payment_token(&self) -> Option<PaymentToken> {
        let consumer_token = self.consumer.as_ref()?.consumer_token.clone()?;
        let card_token = self.card_details.as_ref()?.card_token.clone()?;
        Some(PaymentToken {
            consumer_token,
            card_token,
        })
    }
}

/// The decoded answer to a transaction request: an ordered list of records.
///
/// An empty list is a valid response without card details or a token.
///
/// Serializes as a bare list of records, which decodes back into the same value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Response {
    items: Vec<TransactionData>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ResponseBody {
    Page { results: Vec<TransactionData> },
    List(Vec<TransactionData>),
    Single(Box<TransactionData>),
}

impl<'de> Deserialize<'de> for Response {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let items = match ResponseBody::deserialize(deserializer)? {
            ResponseBody::Page { results } => results,
            ResponseBody::List(items) => items,
            ResponseBody::Single(item) => vec![*item],
        };
        Ok(Response { items })
    }
}

impl From<Vec<TransactionData>> for Response {
    fn from(items: Vec<TransactionData>) -> Self {
        Response { items }
    }
}

impl Response {
    pub fn items(&self) -> &[TransactionData] {
        &self.items
    }

    pub fn first(&self) -> Option<&TransactionData> {
        self.items.first()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Card details from the first record.
    pub fn card_details(&self) -> Option<CardDetails> {
        self.first().and_then(TransactionData::card_details)
    }

    /// Payment token from the first record.
    pub fn payment_token(&self) -> Option<PaymentToken> {
        self.first().and_then(TransactionData::payment_token)
    }
}

impl IntoIterator for Response {
    type Item = TransactionData;
    type IntoIter = std::vec::IntoIter<TransactionData>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Error body returned by the gateway.
///
/// Each field is decoded on its own: an off-shape field is dropped without
/// losing the rest of the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayErrorPayload {
    #[serde(default, deserialize_with = "lenient_code")]
    pub code: Option<i64>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: Option<String>,
    #[serde(default, alias = "modelErrors", deserialize_with = "lenient_details")]
    pub details: Vec<ErrorDetail>,
}

impl GatewayErrorPayload {
    /// Recognise an error payload inside a reply body.
    ///
    /// Receipts also carry a `message`, so anything with a `receiptId` is not an error.
    pub fn from_body(body: &AnyJson) -> Option<Self> {
        let object = body.as_object()?;
        if object.contains_key("receiptId") {
            return None;
        }
        if !(object.contains_key("code") || object.contains_key("category")) {
            return None;
        }
        serde_json::from_value(body.clone()).ok()
    }
}

impl From<GatewayErrorPayload> for JudoError {
    fn from(payload: GatewayErrorPayload) -> Self {
        let code = payload
            .code
            .map(ErrorCode::from_gateway_code)
            .unwrap_or(ErrorCode::GatewayError);
        JudoError {
            code,
            category: payload.category,
            message: payload
                .message
                .unwrap_or_else(|| "the gateway reported an error".to_string()),
            gateway_code: payload.code,
            details: payload.details,
        }
    }
}

/// A number or a numeric string.
fn lenient_code<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match AnyJson::deserialize(deserializer)? {
        AnyJson::Number(n) => n.as_i64(),
        AnyJson::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// A string or a number, kept as its decimal string.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match AnyJson::deserialize(deserializer)? {
        AnyJson::String(s) => Some(s),
        AnyJson::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match AnyJson::deserialize(deserializer)? {
        AnyJson::String(s) => Some(s),
        _ => None,
    })
}

/// Keeps the well-formed entries of a details array; anything else is empty.
fn lenient_details<'de, D>(deserializer: D) -> Result<Vec<ErrorDetail>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match AnyJson::deserialize(deserializer)? {
        AnyJson::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn receipt() -> AnyJson {
        json!({
            "receiptId": "1234567",
            "yourPaymentReference": "p1",
            "type": "Payment",
            "createdAt": "2016-03-01T10:15:00.0000+00:00",
            "result": "Success",
            "message": "AuthCode: 476590",
            "amount": 35.00,
            "currency": "GBP",
            "cardDetails": {
                "cardLastfour": "3436",
                "endDate": "1220",
                "cardToken": "ktok",
                "cardType": 1
            },
            "consumer": {
                "consumerToken": "ctok",
                "yourConsumerReference": "r1"
            }
        })
    }

    #[test]
    fn test_single_receipt() {
        let response: Response = serde_json::from_value(receipt()).unwrap();
        assert_eq!(response.len(), 1);

        let record = response.first().unwrap();
        assert!(record.is_success());
        assert_eq!(record.receipt_id, "1234567");

        let card = response.card_details().unwrap();
        assert_eq!(card.card_number, "**** 3436");
        assert_eq!(card.formatted_end_date().as_deref(), Some("12/20"));
        assert_eq!(card.network, Some(CardNetwork::Visa));

        let token = response.payment_token().unwrap();
        assert_eq!(token.consumer_token(), "ctok");
        assert_eq!(token.card_token(), "ktok");
    }

    #[test]
    fn test_list_and_page_shapes() {
        let list: Response = serde_json::from_value(json!([receipt(), receipt()])).unwrap();
        assert_eq!(list.len(), 2);

        let page: Response = serde_json::from_value(json!({ "results": [receipt()] })).unwrap();
        assert_eq!(page.len(), 1);

        let empty: Response = serde_json::from_value(json!([])).unwrap();
        assert!(empty.is_empty());
        assert!(empty.payment_token().is_none());
        assert!(empty.card_details().is_none());
    }

    #[test]
    fn test_declined_without_token() {
        let response: Response = serde_json::from_value(json!({
            "receiptId": "98",
            "result": "Declined",
            "message": "Card declined"
        }))
        .unwrap();
        let record = response.first().unwrap();
        assert_eq!(record.result, TransactionResult::Declined);
        assert!(record.payment_token().is_none());
        assert!(record.card_details().is_none());
    }

    #[test]
    fn test_unknown_result_value() {
        let record: TransactionData =
            serde_json::from_value(json!({ "receiptId": "1", "result": "Pending" })).unwrap();
        assert_eq!(record.result, TransactionResult::Unknown);
    }

    #[test]
    fn test_error_payload_mapping() {
        let body = json!({
            "code": 71,
            "category": "3DS_required",
            "message": "Additional authentication is required",
            "details": [{ "code": 1, "fieldName": "cardNumber", "message": "Invalid" }]
        });
        let payload = GatewayErrorPayload::from_body(&body).unwrap();
        let err = JudoError::from(payload);

        assert_eq!(err.code, ErrorCode::GatewayError);
        assert_eq!(err.category.as_deref(), Some("3DS_required"));
        assert_eq!(err.message, "Additional authentication is required");
        assert_eq!(err.gateway_code, Some(71));
        assert_eq!(err.details[0].field_name.as_deref(), Some("cardNumber"));
    }

    #[test]
    fn test_numeric_category_and_cancel_code() {
        let body = json!({ "code": 3, "category": 2, "message": "Cancelled" });
        let err = JudoError::from(GatewayErrorPayload::from_body(&body).unwrap());
        assert_eq!(err.code, ErrorCode::UserCancelled);
        assert_eq!(err.category.as_deref(), Some("2"));
    }

    #[test]
    fn test_off_shape_fields_keep_the_rest_of_the_payload() {
        let body = json!({
            "code": "71",
            "category": "3DS_required",
            "message": "Needs 3DS",
            "details": null
        });
        let err = JudoError::from(GatewayErrorPayload::from_body(&body).unwrap());
        assert_eq!(err.code, ErrorCode::GatewayError);
        assert_eq!(err.gateway_code, Some(71));
        assert_eq!(err.category.as_deref(), Some("3DS_required"));
        assert_eq!(err.message, "Needs 3DS");
        assert!(err.details.is_empty());

        let body = json!({
            "code": 3,
            "category": { "kind": "user" },
            "message": ["Cancelled"],
            "details": [{ "fieldName": "cardNumber" }, "garbage"]
        });
        let err = JudoError::from(GatewayErrorPayload::from_body(&body).unwrap());
        assert_eq!(err.code, ErrorCode::UserCancelled);
        assert!(err.category.is_none());
        assert_eq!(err.message, "the gateway reported an error");
        assert_eq!(err.details.len(), 1);
    }

    #[test]
    fn test_persisted_response_reads_back() {
        let response: Response = serde_json::from_value(json!([receipt()])).unwrap();

        let stored = serde_json::to_value(&response).unwrap();
        assert!(stored.is_array());

        let restored: Response = serde_json::from_value(stored).unwrap();
        assert_eq!(restored, response);
        assert_eq!(restored.payment_token(), response.payment_token());
    }

    #[test]
    fn test_receipts_are_not_error_payloads() {
        assert!(GatewayErrorPayload::from_body(&receipt()).is_none());
        assert!(GatewayErrorPayload::from_body(&json!([])).is_none());
        assert!(GatewayErrorPayload::from_body(&json!({ "message": "hi" })).is_none());
    }
}
