#![allow(dead_code)]

use std::{collections::VecDeque, sync::Mutex};

use judo_kit::{
    config::JudoConfig,
    kit::JudoKit,
    transport::{GatewayReply, GatewayRequest, Transport},
};
use serde_json::{Value, json};

#[derive(Debug, thiserror::Error)]
#[error("connection refused")]
pub struct ConnectionRefused;

/// Records every request and answers from a queue of canned replies.
///
/// An exhausted queue answers with `ConnectionRefused`.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<GatewayRequest>>,
    replies: Mutex<VecDeque<GatewayReply>>,
}

impl RecordingTransport {
    pub fn replying(replies: impl IntoIterator<Item = (u16, Value)>) -> Self {
        RecordingTransport {
            requests: Mutex::new(Vec::new()),
            replies: Mutex::new(
                replies
                    .into_iter()
                    .map(|(status, body)| GatewayReply { status, body })
                    .collect(),
            ),
        }
    }

    pub fn dispatched(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> GatewayRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was dispatched")
    }
}

impl Transport for RecordingTransport {
    type Error = ConnectionRefused;

    async fn send(&self, request: GatewayRequest) -> Result<GatewayReply, Self::Error> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(ConnectionRefused)
    }
}

pub fn sandbox_config() -> JudoConfig {
    JudoConfig::builder()
        .token("tok_1")
        .secret("sec_1")
        .sandboxed(true)
        .build()
}

pub fn sandbox_kit(replies: impl IntoIterator<Item = (u16, Value)>) -> JudoKit<RecordingTransport> {
    JudoKit::from_config(sandbox_config(), RecordingTransport::replying(replies)).unwrap()
}

/// A successful receipt carrying a consumer/card token pair.
pub fn receipt_with_token() -> Value {
    json!({
        "receiptId": "880001",
        "result": "Success",
        "message": "AuthCode: 123456",
        "type": "Payment",
        "yourPaymentReference": "p1",
        "amount": "35.00",
        "currency": "GBP",
        "cardDetails": {
            "cardLastfour": "3436",
            "endDate": "1220",
            "cardToken": "card_tok_1",
            "cardType": 1
        },
        "consumer": {
            "consumerToken": "cons_tok_1",
            "yourConsumerReference": "r1"
        }
    })
}
