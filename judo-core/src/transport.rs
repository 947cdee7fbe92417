//! The seam between Judo Kit and whatever HTTP client carries requests to the gateway.

use url::Url;

use crate::types::AnyJson;

/// A fully resolved request, ready to be sent.
///
/// Always a `POST` of a JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayRequest {
    /// Absolute endpoint URL.
    pub url: Url,
    /// Value of the `Authorization` header.
    pub authorization: String,
    /// Value of the `API-Version` header.
    pub api_version: &'static str,
    /// JSON request body.
    pub body: AnyJson,
}

/// What the gateway answered.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayReply {
    /// HTTP status code.
    pub status: u16,
    /// Response body, `Null` when the gateway sent nothing.
    pub body: AnyJson,
}

impl GatewayReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends [`GatewayRequest`]s.
///
/// Implementations own connection handling, TLS and timeouts. An `Err` means
/// no reply was obtained; any reply, including a non-2xx one, is `Ok`.
pub trait Transport {
    type Error: std::error::Error;

    fn send(
        &self,
        request: GatewayRequest,
    ) -> impl Future<Output = Result<GatewayReply, Self::Error>> + Send;
}
