use std::io;

use cmsms::{GatewayClient, Message, OptionOverrides, ProductToken, Recipient};

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
    let phone = required_env("CMSMS_PHONE")?;
    let sender = required_env("CMSMS_SENDER")?;
    let body = std::env::var("CMSMS_MESSAGE")
        .unwrap_or_else(|_| "Hello from the cmsms demo.".to_owned());

    let client = GatewayClient::builder(ProductToken::new(token)?)
        .options(OptionOverrides::new().with_sender(sender))
        .build()?;

    let mut message = Message::new(vec![Recipient::new(phone)?], body).with_reference("demo-1");
    client
        .send_message(&mut message, &OptionOverrides::default())
        .await?;

    println!("status: {:?}", message.status());
    Ok(())
}
