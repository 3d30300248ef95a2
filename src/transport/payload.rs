use serde::Serialize;

use crate::domain::{
    Message, ProductToken, Recipient, SendOptions, UnicodeMode, ValidationError,
    assert_valid_sender,
};

/// Data coding scheme the gateway uses for UCS-2 bodies.
const UNICODE_DCS: u8 = 8;

const AUTO_BODY_TYPE: &str = "AUTO";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WirePayload {
    pub messages: WireMessages,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WireMessages {
    pub authentication: WireAuthentication,
    pub msg: Vec<WireMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WireAuthentication {
    pub producttoken: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WireMessage {
    pub from: String,
    pub to: Vec<WireRecipient>,
    pub body: WireBody,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dcs: Option<u8>,
    pub reference: Option<String>,
    pub minimum_number_of_message_parts: u32,
    pub maximum_number_of_message_parts: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WireRecipient {
    pub number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WireBody {
    pub content: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
}

/// Build the request envelope for a batch.
///
/// Any invalid message aborts the whole batch. Messages keep their batch order in `msg`.
pub fn build_payload(
    messages: &[Message],
    options: &SendOptions,
    token: &ProductToken,
) -> Result<WirePayload, ValidationError> {
    let msg = messages
        .iter()
        .enumerate()
        .map(|(index, message)| build_message(index, message, options))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(WirePayload {
        messages: WireMessages {
            authentication: WireAuthentication {
                producttoken: token.as_str().to_owned(),
            },
            msg,
        },
    })
}

fn build_message(
    index: usize,
    message: &Message,
    options: &SendOptions,
) -> Result<WireMessage, ValidationError> {
    if message.to().is_empty() {
        return Err(ValidationError::InvalidRecipient { index });
    }

    // An unset sender is checked as "" so it fails the alphanumeric rule.
    let from = message.from().or(options.sender()).unwrap_or_default();
    assert_valid_sender(from)?;

    let mut wire = WireMessage {
        from: from.to_owned(),
        to: message.to().iter().map(WireRecipient::from).collect(),
        body: WireBody {
            content: message.body().to_owned(),
            kind: None,
        },
        dcs: None,
        reference: message.reference().map(str::to_owned),
        minimum_number_of_message_parts: options.minimum_message_parts(),
        maximum_number_of_message_parts: options.maximum_message_parts(),
    };

    match options.unicode() {
        UnicodeMode::Auto => wire.body.kind = Some(AUTO_BODY_TYPE),
        UnicodeMode::Force => wire.dcs = Some(UNICODE_DCS),
        UnicodeMode::Never => {}
    }

    Ok(wire)
}

pub fn encode_payload(payload: &WirePayload) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(payload)
}

impl From<&Recipient> for WireRecipient {
    fn from(value: &Recipient) -> Self {
        Self {
            number: value.as_str().to_owned(),
        }
    }
}
