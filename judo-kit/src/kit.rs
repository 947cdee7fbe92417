//! The transaction facade.
//!
//! For details, see the [`JudoKit`] struct documentation.

use judo_core::{
    errors::{JudoError, Result},
    response::{GatewayErrorPayload, Response},
    session::Session,
    transaction::{TransactionInput, TransactionKind, TransactionRequest},
    transport::{GatewayReply, Transport},
    types::{Amount, CardConfiguration, CardDetails, PaymentToken, Reference},
};

use crate::{
    config::JudoConfig,
    integrity::{FilesystemIntegrityChecker, IntegrityChecker},
};

/// Entry point for running transactions against the gateway.
///
/// A `JudoKit` owns exactly one [`Session`] and one transport. Every
/// transaction operation validates its inputs, dispatches at most one request
/// and resolves to either a [`Response`] or a [`JudoError`]; it never panics
/// across this boundary.
///
/// ## Token state
///
/// The kit keeps no state between transactions. A successful payment,
/// pre-auth or card registration returns a [`Response`] whose
/// [`card_details`](Response::card_details) and
/// [`payment_token`](Response::payment_token) the caller keeps and hands to
/// [`token_payment`](JudoKit::token_payment) or
/// [`token_pre_auth`](JudoKit::token_pre_auth) later.
///
/// ## Concurrency
///
/// Transactions borrow the kit immutably and may run concurrently;
/// configuration setters need `&mut self`, so they cannot overlap with an
/// in-flight request on the same instance.
#[derive(Debug)]
pub struct JudoKit<T: Transport> {
    session: Session,
    transport: T,
    accepted_card_networks: Vec<CardConfiguration>,
}

#[bon::bon]
impl<T: Transport> JudoKit<T> {
    /// Create a kit from its configuration and transport.
    ///
    /// The device is probed with `integrity_checker`, or
    /// [`FilesystemIntegrityChecker`] when none is given. Construction fails
    /// with `DeviceIntegrityError` only when
    /// [`enforce_device_integrity`](JudoConfig::enforce_device_integrity) is set
    /// and the probe reports a compromised device.
    #[builder(start_fn = builder)]
    pub fn new(
        config: JudoConfig,
        transport: T,
        integrity_checker: Option<Box<dyn IntegrityChecker>>,
    ) -> Result<Self> {
        if config.enforce_device_integrity {
            let compromised = match integrity_checker {
                Some(checker) => checker.is_compromised(),
                None => FilesystemIntegrityChecker::default().is_compromised(),
            };
            if compromised {
                #[cfg(feature = "tracing")]
                tracing::error!("Refusing to start: device failed the integrity check");
                return Err(JudoError::device_integrity());
            }
        }

        Ok(JudoKit {
            session: config.session(),
            transport,
            accepted_card_networks: config.accepted_card_networks,
        })
    }

    /// Create a kit probing the device with [`FilesystemIntegrityChecker`].
    pub fn from_config(config: JudoConfig, transport: T) -> Result<Self> {
        Self::new(config, transport, None)
    }

    /// Switch between the sandbox and production hosts.
    pub fn set_sandboxed(&mut self, sandboxed: bool) {
        self.session.set_sandboxed(sandboxed);
    }

    /// Replace the token and secret.
    ///
    /// An empty token or secret leaves the kit unconfigured, as it does in
    /// [`JudoConfig`].
    pub fn set_token(&mut self, token: &str, secret: &str) {
        self.session.set_credentials(token, secret);
    }

    /// Whether a token and secret have been set.
    pub fn is_configured(&self) -> bool {
        self.session.is_configured()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Card networks the card entry collaborator should accept.
    pub fn accepted_card_networks(&self) -> &[CardConfiguration] {
        &self.accepted_card_networks
    }

    /// Make a payment. `card_details` only pre-fills the card entry.
    pub async fn payment(
        &self,
        judo_id: &str,
        amount: &Amount,
        reference: &Reference,
        card_details: Option<CardDetails>,
    ) -> Result<Response> {
        self.execute(
            TransactionKind::Payment,
            judo_id,
            amount,
            reference,
            TransactionInput::card(card_details),
        )
        .await
    }

    /// Reserve funds on a card.
    pub async fn pre_auth(
        &self,
        judo_id: &str,
        amount: &Amount,
        reference: &Reference,
        card_details: Option<CardDetails>,
    ) -> Result<Response> {
        self.execute(
            TransactionKind::PreAuth,
            judo_id,
            amount,
            reference,
            TransactionInput::card(card_details),
        )
        .await
    }

    /// Register a card for later token transactions.
    ///
    /// No funds are captured, so `amount` is conventionally the smallest unit
    /// of the currency.
    pub async fn register_card(
        &self,
        judo_id: &str,
        amount: &Amount,
        reference: &Reference,
        card_details: Option<CardDetails>,
    ) -> Result<Response> {
        self.execute(
            TransactionKind::RegisterCard,
            judo_id,
            amount,
            reference,
            TransactionInput::card(card_details),
        )
        .await
    }

    /// Repeat a payment with a stored card.
    ///
    /// Fails with `MissingTokenState`, without contacting the gateway, unless
    /// both `card_details` and `payment_token` are given.
    pub async fn token_payment(
        &self,
        judo_id: &str,
        amount: &Amount,
        reference: &Reference,
        card_details: Option<CardDetails>,
        payment_token: Option<PaymentToken>,
    ) -> Result<Response> {
        self.execute(
            TransactionKind::TokenPayment,
            judo_id,
            amount,
            reference,
            TransactionInput::token(card_details, payment_token),
        )
        .await
    }

    /// Pre-authorize with a stored card. Same token requirements as
    /// [`token_payment`](JudoKit::token_payment).
    pub async fn token_pre_auth(
        &self,
        judo_id: &str,
        amount: &Amount,
        reference: &Reference,
        card_details: Option<CardDetails>,
        payment_token: Option<PaymentToken>,
    ) -> Result<Response> {
        self.execute(
            TransactionKind::TokenPreAuth,
            judo_id,
            amount,
            reference,
            TransactionInput::token(card_details, payment_token),
        )
        .await
    }

    /// Build, dispatch and interpret a single transaction.
    ///
    /// Validation failures return before the transport is touched. Exactly one
    /// request is sent otherwise; there is no retry.
    pub async fn execute(
        &self,
        kind: TransactionKind,
        judo_id: &str,
        amount: &Amount,
        reference: &Reference,
        input: TransactionInput,
    ) -> Result<Response> {
        let request = TransactionRequest::build(kind, amount, reference, judo_id, input)
            .inspect_err(|_err| {
                #[cfg(feature = "tracing")]
                tracing::debug!("Rejected {kind} before dispatch: {_err}");
            })?;
        let request = self.session.prepare(request)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Dispatching {kind}: endpoint='{}', sandboxed={}",
            request.url,
            self.session.is_sandboxed()
        );

        let reply = self
            .transport
            .send(request)
            .await
            .map_err(JudoError::network)
            .inspect_err(|_err| {
                #[cfg(feature = "tracing")]
                tracing::warn!("Transport failed for {kind}: {_err}");
            })?;

        interpret_reply(reply)
    }
}

/// Turn a gateway reply into a [`Response`] or an error.
///
/// An error payload wins over the status code, so a cancellation reported in
/// a 2xx reply still surfaces as `UserCancelled`. A 2xx reply with no body is
/// an empty response.
pub fn interpret_reply(reply: GatewayReply) -> Result<Response> {
    if let Some(payload) = GatewayErrorPayload::from_body(&reply.body) {
        let err = JudoError::from(payload);

        #[cfg(feature = "tracing")]
        {
            if err.is_user_cancelled() {
                tracing::debug!("Transaction cancelled by the user");
            } else {
                tracing::warn!(
                    "Gateway error: code={:?}, category={:?}, status={}",
                    err.gateway_code,
                    err.category,
                    reply.status
                );
            }
        }

        return Err(err);
    }

    if !reply.is_success() {
        #[cfg(feature = "tracing")]
        tracing::warn!("Gateway answered with status {}", reply.status);
        return Err(JudoError::gateway(format!(
            "the gateway answered with status {}",
            reply.status
        )));
    }

    if reply.body.is_null() {
        return Ok(Response::default());
    }

    let response: Response = serde_json::from_value(reply.body).map_err(|err| {
        JudoError::gateway(format!("failed to decode gateway response: {err}"))
    })?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
        "Transaction completed: records={}, receipt='{}'",
        response.len(),
        response.first().map(|r| r.receipt_id.as_str()).unwrap_or("-")
    );

    Ok(response)
}

/// Deliver the outcome of a transaction to a `(Response?, Error?)` callback.
///
/// The callback runs exactly once, with exactly one side populated.
///
/// ```no_run
/// # async fn run(kit: &judo_kit::kit::JudoKit<judo_kit::http_transport::HttpTransport>) {
/// use judo_kit::{kit::with_completion, types::{Amount, Reference}};
///
/// let amount = Amount::gbp(35).unwrap();
/// let reference = Reference::new("r1", "p1").unwrap();
///
/// with_completion(
///     kit.payment("100200300", &amount, &reference, None),
///     |response, error| match (response, error) {
///         (Some(response), _) => println!("receipt {:?}", response.first()),
///         (_, Some(error)) => eprintln!("{error}"),
///         _ => unreachable!(),
///     },
/// )
/// .await;
/// # }
/// ```
pub async fn with_completion<Fut, C>(transaction: Fut, completion: C)
where
    Fut: Future<Output = Result<Response>>,
    C: FnOnce(Option<Response>, Option<JudoError>),
{
    match transaction.await {
        Ok(response) => completion(Some(response), None),
        Err(err) => completion(None, Some(err)),
    }
}
