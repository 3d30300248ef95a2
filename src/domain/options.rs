use std::fmt;
use std::str::FromStr;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::domain::validation::ValidationError;

/// Encoding policy applied to every message in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum UnicodeMode {
    /// Let the gateway detect whether the body needs Unicode (`body.type = "AUTO"`).
    #[default]
    Auto,
    /// Always send as UCS-2 (`dcs = 8`).
    Force,
    /// Send with the gateway's default encoding.
    Never,
}

impl UnicodeMode {
    /// Every supported mode, in declaration order.
    pub const ALL: [UnicodeMode; 3] = [Self::Auto, Self::Force, Self::Never];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Force => "force",
            Self::Never => "never",
        }
    }
}

impl fmt::Display for UnicodeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for UnicodeMode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for UnicodeMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::InvalidOptionValue {
                key: OptionOverrides::UNICODE.to_owned(),
                reason: format!("expected one of auto, force, never; got {s:?}"),
            })
    }
}

/// Fully resolved send options.
///
/// Invariant: `1 <= minimum_message_parts <= maximum_message_parts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendOptions {
    sender: Option<String>,
    unicode: UnicodeMode,
    minimum_message_parts: u32,
    maximum_message_parts: u32,
}

impl SendOptions {
    pub const DEFAULT_MINIMUM_MESSAGE_PARTS: u32 = 1;
    pub const DEFAULT_MAXIMUM_MESSAGE_PARTS: u32 = 8;

    /// Merge `overrides` over `self`. Keys set in `overrides` win; unset keys keep the current value.
    pub fn resolve(&self, overrides: &OptionOverrides) -> Result<Self, ValidationError> {
        let resolved = Self {
            sender: overrides.sender.clone().or_else(|| self.sender.clone()),
            unicode: overrides.unicode.unwrap_or(self.unicode),
            minimum_message_parts: overrides
                .minimum_message_parts
                .unwrap_or(self.minimum_message_parts),
            maximum_message_parts: overrides
                .maximum_message_parts
                .unwrap_or(self.maximum_message_parts),
        };

        if resolved.minimum_message_parts < 1
            || resolved.minimum_message_parts > resolved.maximum_message_parts
        {
            return Err(ValidationError::MessagePartsOutOfRange {
                minimum: resolved.minimum_message_parts,
                maximum: resolved.maximum_message_parts,
            });
        }
        Ok(resolved)
    }

    /// Default sender used for messages without their own `from`.
    pub fn sender(&self) -> Option<&str> {
        self.sender.as_deref()
    }

    pub fn unicode(&self) -> UnicodeMode {
        self.unicode
    }

    pub fn minimum_message_parts(&self) -> u32 {
        self.minimum_message_parts
    }

    pub fn maximum_message_parts(&self) -> u32 {
        self.maximum_message_parts
    }
}

impl Default for SendOptions {
    fn default() -> Self {
        Self {
            sender: None,
            unicode: UnicodeMode::Auto,
            minimum_message_parts: Self::DEFAULT_MINIMUM_MESSAGE_PARTS,
            maximum_message_parts: Self::DEFAULT_MAXIMUM_MESSAGE_PARTS,
        }
    }
}

/// Partial options layered over [`SendOptions`] with [`SendOptions::resolve`].
///
/// Loosely-typed input goes through [`OptionOverrides::from_json_map`] or
/// [`OptionOverrides::from_pairs`], which reject unknown keys instead of ignoring them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptionOverrides {
    pub sender: Option<String>,
    pub unicode: Option<UnicodeMode>,
    #[serde(
        rename = "minimum_number_of_message_parts",
        deserialize_with = "message_parts"
    )]
    pub minimum_message_parts: Option<u32>,
    #[serde(
        rename = "maximum_number_of_message_parts",
        deserialize_with = "message_parts"
    )]
    pub maximum_message_parts: Option<u32>,
}

impl OptionOverrides {
    pub const SENDER: &'static str = "sender";
    pub const UNICODE: &'static str = "unicode";
    pub const MINIMUM_MESSAGE_PARTS: &'static str = "minimum_number_of_message_parts";
    pub const MAXIMUM_MESSAGE_PARTS: &'static str = "maximum_number_of_message_parts";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    pub fn with_unicode(mut self, unicode: UnicodeMode) -> Self {
        self.unicode = Some(unicode);
        self
    }

    pub fn with_message_parts(mut self, minimum: u32, maximum: u32) -> Self {
        self.minimum_message_parts = Some(minimum);
        self.maximum_message_parts = Some(maximum);
        self
    }

    /// Read overrides from a JSON object. `null` values leave the key unset.
    pub fn from_json_map(map: &Map<String, Value>) -> Result<Self, ValidationError> {
        serde_json::from_value(Value::Object(map.clone())).map_err(option_error)
    }

    /// Read overrides from string key/value pairs, e.g. environment or INI-style config.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let map = pairs
            .into_iter()
            .map(|(key, value)| {
                (
                    key.as_ref().to_owned(),
                    Value::String(value.as_ref().to_owned()),
                )
            })
            .collect::<Map<String, Value>>();
        Self::from_json_map(&map)
    }
}

impl TryFrom<&Value> for OptionOverrides {
    type Error = ValidationError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Self::from_json_map(map),
            Value::Null => Ok(Self::default()),
            _ => Err(ValidationError::InvalidOptionValue {
                key: "options".to_owned(),
                reason: "expected a JSON object".to_owned(),
            }),
        }
    }
}

/// Message part counts arrive as JSON integers or, from string config, as decimal text.
#[derive(Deserialize)]
#[serde(untagged)]
enum MessagePartsInput {
    Count(u32),
    Text(String),
}

fn message_parts<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<MessagePartsInput>::deserialize(deserializer)? {
        None => Ok(None),
        Some(MessagePartsInput::Count(parts)) => Ok(Some(parts)),
        Some(MessagePartsInput::Text(text)) => text.trim().parse().map(Some).map_err(|_| {
            DeError::custom(format!("expected a non-negative integer, got {text:?}"))
        }),
    }
}

fn option_error(err: serde_json::Error) -> ValidationError {
    let message = err.to_string();
    // serde reports unknown keys as "unknown field `<key>`, expected ...".
    if let Some((key, _)) = message
        .strip_prefix("unknown field `")
        .and_then(|rest| rest.split_once('`'))
    {
        return ValidationError::InvalidOption {
            key: key.to_owned(),
        };
    }
    ValidationError::InvalidOptionValue {
        key: "options".to_owned(),
        reason: message,
    }
}
