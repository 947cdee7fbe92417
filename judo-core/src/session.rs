//! Authentication and endpoint state for talking to the gateway.
//!
//! A [`Session`] holds the derived `Authorization` header and the
//! sandbox/production switch. It performs no I/O: it turns a
//! [`TransactionRequest`] into a [`GatewayRequest`] ready for a transport.

use base64::{Engine, prelude::BASE64_STANDARD};
use url::Url;

use crate::{
    errors::{JudoError, Result},
    transaction::TransactionRequest,
    transport::GatewayRequest,
};

/// Base host for sandboxed (test) transactions.
pub const SANDBOX_URL: &str = "https://gw1.judopay-sandbox.com/";

/// Base host for live transactions.
pub const PRODUCTION_URL: &str = "https://gw1.judopay.com/";

/// Value of the `API-Version` header sent with every request.
pub const API_VERSION: &str = "5.0.0";

#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    authorization_header: Option<String>,
    sandboxed: bool,
    sandbox_url: String,
    production_url: String,
}

impl Default for Session {
    fn default() -> Self {
        Session {
            authorization_header: None,
            sandboxed: false,
            sandbox_url: SANDBOX_URL.to_string(),
            production_url: PRODUCTION_URL.to_string(),
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("configured", &self.is_configured())
            .field("sandboxed", &self.sandboxed)
            .field("base_url", &self.base_url())
            .finish()
    }
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    /// Replace the default sandbox host.
    pub fn with_sandbox_url(mut self, sandbox_url: Url) -> Self {
        self.sandbox_url = sandbox_url.into();
        self
    }

    /// Replace the default production host.
    pub fn with_production_url(mut self, production_url: Url) -> Self {
        self.production_url = production_url.into();
        self
    }

    /// Derive and store the `Authorization` header from a token and secret.
    pub fn configure(&mut self, identifier: &str, secret: &str) {
        self.authorization_header = Some(authorization_header(identifier, secret));
    }

    /// Configure from caller-supplied credentials.
    ///
    /// An empty token or secret leaves the session unconfigured, dropping any
    /// header derived earlier.
    pub fn set_credentials(&mut self, token: &str, secret: &str) {
        if token.is_empty() || secret.is_empty() {
            self.authorization_header = None;
        } else {
            self.configure(token, secret);
        }
    }

    pub fn set_sandboxed(&mut self, sandboxed: bool) {
        self.sandboxed = sandboxed;
    }

    pub fn is_sandboxed(&self) -> bool {
        self.sandboxed
    }

    /// Whether a token and secret have been set.
    pub fn is_configured(&self) -> bool {
        self.authorization_header.is_some()
    }

    /// The host requests are currently routed to.
    pub fn base_url(&self) -> &str {
        if self.sandboxed {
            &self.sandbox_url
        } else {
            &self.production_url
        }
    }

    /// The derived `Authorization` header value.
    pub fn authorization_header(&self) -> Result<&str> {
        self.authorization_header
            .as_deref()
            .ok_or_else(JudoError::not_configured)
    }

    /// Resolve the request against the active host and stamp it with the credentials.
    pub fn prepare(&self, request: TransactionRequest) -> Result<GatewayRequest> {
        let authorization = self.authorization_header()?.to_string();

        let url = Url::parse(self.base_url())
            .and_then(|base| base.join(request.endpoint))
            .map_err(|err| JudoError::parameter(format!("invalid gateway endpoint: {err}")))?;

        let body = serde_json::to_value(&request.payload)
            .map_err(|err| JudoError::parameter(format!("failed to encode request: {err}")))?;

        Ok(GatewayRequest {
            url,
            authorization,
            api_version: API_VERSION,
            body,
        })
    }
}

/// `"Basic " + base64(identifier + ":" + secret)`.
pub fn authorization_header(identifier: &str, secret: &str) -> String {
    let plain = format!("{identifier}:{secret}");
    format!("Basic {}", BASE64_STANDARD.encode(plain))
}
