use judo_kit::{
    config::JudoConfig,
    http_transport::HttpTransport,
    kit::JudoKit,
    types::{Amount, Reference},
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let token = std::env::var("JUDO_TOKEN").expect("Please set `JUDO_TOKEN` in environment variables");
    let secret =
        std::env::var("JUDO_SECRET").expect("Please set `JUDO_SECRET` in environment variables");
    let judo_id = std::env::var("JUDO_ID").expect("Please set `JUDO_ID` in environment variables");

    let config = JudoConfig::builder()
        .token(token)
        .secret(secret)
        .sandboxed(true)
        .build();
    let transport = HttpTransport::builder()
        .build()
        .expect("Failed to build HTTP transport");
    let kit = JudoKit::from_config(config, transport).expect("Failed to create Judo Kit");

    let amount: Amount = "0.01 GBP".parse().expect("Invalid amount");
    let reference = Reference::new("demo-consumer", "demo-register")
        .expect("Invalid reference")
        .with_metadata([("source", "sandbox_payment".into())]);

    tracing::info!("Registering a card for {}", reference.consumer_reference());
    let registered = match kit.register_card(&judo_id, &amount, &reference, None).await {
        Ok(response) => response,
        Err(err) => {
            tracing::error!("Card registration failed: {err}");
            return;
        }
    };

    let Some(receipt) = registered.first() else {
        tracing::warn!("The gateway returned no receipt");
        return;
    };
    tracing::info!("Card registered: receipt='{}'", receipt.receipt_id);

    let amount: Amount = "35 GBP".parse().expect("Invalid amount");
    let reference = Reference::new("demo-consumer", "demo-token-payment").expect("Invalid reference");

    match kit
        .token_payment(
            &judo_id,
            &amount,
            &reference,
            registered.card_details(),
            registered.payment_token(),
        )
        .await
    {
        Ok(response) => tracing::info!(
            "Token payment done: receipt='{}'",
            response.first().map(|r| r.receipt_id.as_str()).unwrap_or("-")
        ),
        Err(err) if err.is_user_cancelled() => tracing::info!("Payment cancelled"),
        Err(err) => tracing::error!(
            "Token payment failed: {err} (category={:?}, retryable={})",
            err.category,
            err.code.is_retryable()
        ),
    }
}
