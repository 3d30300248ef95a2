use std::fmt;

/// Which sender rule rejected a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SenderRule {
    /// The sender is empty or contains something other than ASCII letters and digits.
    NonAlphanumeric,
    /// An all-digit sender is longer than 14 characters.
    NumericTooLong,
    /// The sender is longer than 11 characters.
    AlphanumericTooLong,
}

impl fmt::Display for SenderRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NonAlphanumeric => "non-alphanumeric",
            Self::NumericTooLong => "numeric sender too long",
            Self::AlphanumericTooLong => "alphanumeric sender too long",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidPhoneNumber { input: String },
    InvalidSender { sender: String, rule: SenderRule },
    InvalidRecipient { index: usize },
    InvalidOption { key: String },
    InvalidOptionValue { key: String, reason: String },
    MessagePartsOutOfRange { minimum: u32, maximum: u32 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::InvalidSender { sender, rule } => {
                write!(f, "invalid sender {sender:?}: {rule}")
            }
            Self::InvalidRecipient { index } => {
                write!(f, "message #{index} has no recipients")
            }
            Self::InvalidOption { key } => write!(f, "unknown option: {key}"),
            Self::InvalidOptionValue { key, reason } => {
                write!(f, "invalid value for option {key}: {reason}")
            }
            Self::MessagePartsOutOfRange { minimum, maximum } => {
                write!(
                    f,
                    "message parts out of range: minimum {minimum}, maximum {maximum} (expected 1 <= minimum <= maximum)"
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::{SenderRule, ValidationError};

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty { field: "to" };
        assert_eq!(err.to_string(), "to must not be empty");

        let err = ValidationError::InvalidSender {
            sender: "My App".to_owned(),
            rule: SenderRule::NonAlphanumeric,
        };
        assert_eq!(err.to_string(), "invalid sender \"My App\": non-alphanumeric");

        let err = ValidationError::InvalidRecipient { index: 2 };
        assert_eq!(err.to_string(), "message #2 has no recipients");

        let err = ValidationError::InvalidOption {
            key: "sendr".to_owned(),
        };
        assert_eq!(err.to_string(), "unknown option: sendr");

        let err = ValidationError::MessagePartsOutOfRange {
            minimum: 3,
            maximum: 2,
        };
        assert_eq!(
            err.to_string(),
            "message parts out of range: minimum 3, maximum 2 (expected 1 <= minimum <= maximum)"
        );
    }

    #[test]
    fn sender_rules_describe_the_failure() {
        assert_eq!(SenderRule::NumericTooLong.to_string(), "numeric sender too long");
        assert_eq!(
            SenderRule::AlphanumericTooLong.to_string(),
            "alphanumeric sender too long"
        );
    }
}
