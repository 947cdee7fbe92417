use bon::Builder;
use url::Url;

use judo_core::{session::Session, types::CardConfiguration};

/// Everything needed to set up a [`JudoKit`](crate::kit::JudoKit).
#[derive(Builder, Clone)]
pub struct JudoConfig {
    /// API token issued for the merchant account. Leaving it or the secret
    /// empty leaves the kit unconfigured until
    /// [`set_token`](crate::kit::JudoKit::set_token) is called.
    #[builder(into)]
    pub token: String,
    /// API secret paired with the token.
    #[builder(into)]
    pub secret: String,
    /// Route requests to the sandbox host.
    #[builder(default)]
    pub sandboxed: bool,
    /// Refuse to start on a device that fails the integrity check.
    #[builder(default)]
    pub enforce_device_integrity: bool,
    /// Card networks and lengths the card entry collaborator should accept.
    #[builder(default = CardConfiguration::defaults())]
    pub accepted_card_networks: Vec<CardConfiguration>,
    /// Override for the sandbox host.
    pub sandbox_url: Option<Url>,
    /// Override for the production host.
    pub production_url: Option<Url>,
}

impl JudoConfig {
    pub(crate) fn session(&self) -> Session {
        let mut session = Session::new();
        if let Some(url) = &self.sandbox_url {
            session = session.with_sandbox_url(url.clone());
        }
        if let Some(url) = &self.production_url {
            session = session.with_production_url(url.clone());
        }
        session.set_credentials(&self.token, &self.secret);
        session.set_sandboxed(self.sandboxed);
        session
    }
}

impl std::fmt::Debug for JudoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JudoConfig")
            .field("token", &self.token)
            .field("secret", &"<redacted>")
            .field("sandboxed", &self.sandboxed)
            .field("enforce_device_integrity", &self.enforce_device_integrity)
            .field("accepted_card_networks", &self.accepted_card_networks)
            .field("sandbox_url", &self.sandbox_url)
            .field("production_url", &self.production_url)
            .finish()
    }
}
