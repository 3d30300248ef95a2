use crate::domain::validation::{SenderRule, ValidationError};

/// Longest all-digit sender the gateway accepts before the general length rule applies.
pub const MAX_NUMERIC_SENDER_LEN: usize = 14;
/// Longest sender the gateway accepts.
pub const MAX_SENDER_LEN: usize = 11;

/// Check a sender identifier against the gateway's originator rules.
///
/// Rules are applied in order and the first one that fails is reported:
/// 1. only ASCII letters and digits, at least one character ([`SenderRule::NonAlphanumeric`]);
/// 2. an all-digit sender must not exceed 14 characters ([`SenderRule::NumericTooLong`]);
/// 3. no sender may exceed 11 characters ([`SenderRule::AlphanumericTooLong`]).
///
/// Rule 3 is stricter than rule 2, so numeric senders of 12 to 14 digits are rejected too.
pub fn assert_valid_sender(sender: &str) -> Result<(), ValidationError> {
    let reject = |rule| {
        Err(ValidationError::InvalidSender {
            sender: sender.to_owned(),
            rule,
        })
    };

    if sender.is_empty() || !sender.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return reject(SenderRule::NonAlphanumeric);
    }

    let len = sender.len();
    if sender.bytes().all(|b| b.is_ascii_digit()) && len > MAX_NUMERIC_SENDER_LEN {
        return reject(SenderRule::NumericTooLong);
    }
    if len > MAX_SENDER_LEN {
        return reject(SenderRule::AlphanumericTooLong);
    }

    Ok(())
}
