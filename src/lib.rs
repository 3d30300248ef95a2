//! Typed Rust client for the CM.com text messaging gateway.
//!
//! The crate is split in three layers: a domain layer of strong types (messages, options,
//! sender rules), a transport layer that builds the gateway's JSON envelope, and a small
//! client layer that resolves options, submits a batch and records the outcome on each
//! message.
//!
//! ```rust,no_run
//! use cmsms::{GatewayClient, Message, OptionOverrides, ProductToken, Recipient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), cmsms::GatewayError> {
//!     let client = GatewayClient::builder(ProductToken::new("...")?)
//!         .options(OptionOverrides::new().with_sender("MyApp"))
//!         .build()?;
//!     let mut msg = Message::new(vec![Recipient::new("+31612345678")?], "hello")
//!         .with_reference("order-42");
//!     client.send_message(&mut msg, &OptionOverrides::default()).await?;
//!     assert!(msg.is_sent());
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    GatewayClient, GatewayClientBuilder, GatewayError, HttpResponse, HttpTransport,
    RequestFailure,
};
pub use domain::{
    Message, MessageStatus, OptionOverrides, PhoneNumber, ProductToken, Recipient, SendOptions,
    SenderRule, UnicodeMode, ValidationError, assert_valid_sender,
};
