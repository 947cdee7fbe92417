//! HTTP transport backed by `reqwest`.

use std::time::Duration;

use http::{
    HeaderMap, HeaderName, HeaderValue,
    header::{ACCEPT, AUTHORIZATION},
};
use judo_core::{
    transport::{GatewayReply, GatewayRequest, Transport},
    types::AnyJson,
};

const API_VERSION: HeaderName = HeaderName::from_static("api-version");

/// Sends gateway requests over HTTPS with a shared [`reqwest::Client`].
///
/// ```no_run
/// # fn main() -> Result<(), judo_kit::http_transport::HttpTransportError> {
/// use std::time::Duration;
/// use judo_kit::http_transport::HttpTransport;
///
/// let transport = HttpTransport::builder()
///     .timeout(Duration::from_secs(60))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    pub client: reqwest::Client,
}

#[bon::bon]
impl HttpTransport {
    #[builder]
    pub fn new(
        #[builder(default = Duration::from_secs(30))] timeout: Duration,
        #[builder(default = Duration::from_secs(10))] connect_timeout: Duration,
    ) -> Result<Self, HttpTransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        Ok(HttpTransport { client })
    }

    /// Reuse an existing client as is.
    pub fn from_client(client: reqwest::Client) -> Self {
        HttpTransport { client }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HttpTransportError {
    #[error("HTTP request error: {0}")]
    HttpRequestError(#[from] reqwest::Error),
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] http::header::InvalidHeaderValue),
}

fn request_headers(request: &GatewayRequest) -> Result<HeaderMap, HttpTransportError> {
    let mut authorization = HeaderValue::from_str(&request.authorization)?;
    authorization.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, authorization);
    headers.insert(API_VERSION, HeaderValue::from_str(request.api_version)?);
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    Ok(headers)
}

/// JSON when the body parses as JSON, the raw text otherwise, `Null` when empty.
fn decode_body(text: String) -> AnyJson {
    if text.trim().is_empty() {
        return AnyJson::Null;
    }
    serde_json::from_str(&text).unwrap_or(AnyJson::String(text))
}

impl Transport for HttpTransport {
    type Error = HttpTransportError;

    async fn send(&self, request: GatewayRequest) -> Result<GatewayReply, Self::Error> {
        let headers = request_headers(&request)?;

        let response = self
            .client
            .post(request.url)
            .headers(headers)
            .json(&request.body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = decode_body(response.text().await?);

        Ok(GatewayReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use url::Url;

    use super::*;

    #[test]
    fn test_request_headers() {
        let request = GatewayRequest {
            url: Url::parse("https://gw1.judopay-sandbox.com/transactions/payments").unwrap(),
            authorization: "Basic dG9rXzE6c2VjXzE=".to_string(),
            api_version: "5.0.0",
            body: json!({}),
        };
        let headers = request_headers(&request).unwrap();

        assert_eq!(headers[AUTHORIZATION], "Basic dG9rXzE6c2VjXzE=");
        assert!(headers[AUTHORIZATION].is_sensitive());
        assert_eq!(headers[API_VERSION], "5.0.0");
        assert_eq!(headers[ACCEPT], "application/json");
    }

    #[test]
    fn test_invalid_authorization_header() {
        let request = GatewayRequest {
            url: Url::parse("https://gw1.judopay-sandbox.com/transactions/payments").unwrap(),
            authorization: "Basic \n".to_string(),
            api_version: "5.0.0",
            body: json!({}),
        };
        assert!(matches!(
            request_headers(&request),
            Err(HttpTransportError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_invalid_api_version_header() {
        let request = GatewayRequest {
            url: Url::parse("https://gw1.judopay-sandbox.com/transactions/payments").unwrap(),
            authorization: "Basic dG9rXzE6c2VjXzE=".to_string(),
            api_version: "5.0.0\r\n",
            body: json!({}),
        };
        assert!(matches!(
            request_headers(&request),
            Err(HttpTransportError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_decode_body() {
        assert_eq!(decode_body(String::new()), AnyJson::Null);
        assert_eq!(
            decode_body(r#"{"receiptId":"1"}"#.to_string()),
            json!({ "receiptId": "1" })
        );
        assert_eq!(
            decode_body("Service Unavailable".to_string()),
            json!("Service Unavailable")
        );
    }

    #[test]
    fn test_builder_defaults() {
        assert!(HttpTransport::builder().build().is_ok());
    }
}
