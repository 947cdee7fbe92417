//! # Judo Kit
//!
//! Judo Kit runs card and wallet transactions against the Judo payment gateway
//! on behalf of a merchant application. The host application never builds
//! gateway requests or handles the API credentials itself: it configures a
//! [`kit::JudoKit`] once and calls one operation per transaction.
//!
//! Judo Kit does **not** render card entry forms or wallet sheets. Those are
//! collaborators that hand the kit card details or an opaque wallet credential.
//!
//! ## Core Components Overview
//!
//! - **[`types`]**: Amounts, references, card details, payment tokens and wallet credentials.
//! - **[`session`]**: Credentials and the sandbox/production switch.
//! - **[`transaction`]**: Transaction kinds and the request builder.
//! - **[`response`]**: Gateway receipts and error payloads.
//! - **[`errors`]**: The error taxonomy every operation resolves to.
//! - **[`transport`]**: The trait any HTTP client implements to carry requests.
//!
//! ### Running Transactions
//!
//! - **[`kit`]**: The [`JudoKit`](kit::JudoKit) facade: payments, pre-auths, card
//!   registration and token transactions.
//! - **[`wallet`]**: Wallet payments and pre-auths.
//! - **[`config`]**: Construction options.
//! - **[`integrity`]**: Device integrity probing.
//! - **[`http_transport`]**: A `reqwest` transport (feature `http-transport`).
//!
//! ## Example: Pay, Then Pay Again With the Token
//!
//! ```no_run
//! use judo_kit::{
//!     config::JudoConfig,
//!     http_transport::HttpTransport,
//!     kit::JudoKit,
//!     types::{Amount, Reference},
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = JudoConfig::builder()
//!     .token("my-token")
//!     .secret("my-secret")
//!     .sandboxed(true)
//!     .build();
//! let kit = JudoKit::from_config(config, HttpTransport::builder().build()?)?;
//!
//! let amount: Amount = "35 GBP".parse()?;
//! let reference = Reference::new("consumer-1", "payment-1")?;
//!
//! let first = kit.payment("100200300", &amount, &reference, None).await?;
//!
//! let reference = Reference::new("consumer-1", "payment-2")?;
//! let again = kit
//!     .token_payment(
//!         "100200300",
//!         &amount,
//!         &reference,
//!         first.card_details(),
//!         first.payment_token(),
//!     )
//!     .await?;
//! println!("{:?}", again.first());
//! # Ok(())
//! # }
//! ```

pub mod types {
    pub use judo_core::types::*;
}

pub mod session {
    pub use judo_core::session::*;
}

pub mod transaction {
    pub use judo_core::transaction::*;
}

pub mod response {
    pub use judo_core::response::*;
}

pub mod errors {
    pub use judo_core::errors::*;
}

pub mod transport {
    pub use judo_core::transport::*;
}

pub mod config;
pub mod integrity;
pub mod kit;
pub mod wallet;

#[cfg(feature = "http-transport")]
pub mod http_transport;
