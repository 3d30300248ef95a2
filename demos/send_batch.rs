//! Sends one message per phone number in `CMSMS_PHONES` (comma separated) as a single batch.
//!
//! `CMSMS_OPTIONS` may hold a JSON object of per-call options, e.g.
//! `{"unicode": "force", "maximum_number_of_message_parts": 2}`.
//! Set `CMSMS_REDIRECT` to redirect every message to one test number, or
//! `CMSMS_DISABLE_DELIVERY=1` to skip sending entirely.

use std::io;

use cmsms::{GatewayClient, Message, OptionOverrides, PhoneNumber, ProductToken, Recipient};

fn required_env(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("cmsms=debug,warn")),
        )
        .init();

    let token = required_env("CMSMS_PRODUCT_TOKEN")?;
    let phones = required_env("CMSMS_PHONES")?;
    let client_options = OptionOverrides::from_pairs(
        std::env::var("CMSMS_SENDER")
            .ok()
            .map(|sender| (OptionOverrides::SENDER, sender)),
    )?;
    let call_options = match std::env::var("CMSMS_OPTIONS") {
        Ok(raw) => OptionOverrides::try_from(&serde_json::from_str::<serde_json::Value>(&raw)?)?,
        Err(_) => OptionOverrides::default(),
    };

    let mut builder = GatewayClient::builder(ProductToken::new(token)?)
        .options(client_options)
        .disable_delivery(std::env::var("CMSMS_DISABLE_DELIVERY").is_ok_and(|v| v == "1"));
    if let Ok(redirect) = std::env::var("CMSMS_REDIRECT") {
        builder = builder.delivery_phone_numbers(vec![Recipient::new(redirect)?]);
    }
    let client = builder.build()?;

    let mut batch = phones
        .split(',')
        .enumerate()
        .map(|(idx, phone)| {
            let number = PhoneNumber::parse(None, phone)?;
            Ok(Message::new(vec![number.into()], format!("Batch message #{idx}"))
                .with_reference(format!("batch-{idx}")))
        })
        .collect::<Result<Vec<_>, cmsms::ValidationError>>()?;

    client.send_batch(&mut batch, &call_options).await?;

    for message in &batch {
        println!(
            "{:?} -> {:?}",
            message.reference(),
            message.status()
        );
    }
    Ok(())
}
