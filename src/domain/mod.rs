//! Domain layer: strong types with validation and invariants (no I/O).

mod message;
mod options;
mod sender;
mod validation;
mod value;

pub use message::{Message, MessageStatus};
pub use options::{OptionOverrides, SendOptions, UnicodeMode};
pub use sender::{MAX_NUMERIC_SENDER_LEN, MAX_SENDER_LEN, assert_valid_sender};
pub use validation::{SenderRule, ValidationError};
pub use value::{PhoneNumber, ProductToken, Recipient};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_sender_within_limits_passes_regardless_of_composition() {
        let alphabet: Vec<char> = ('a'..='z').chain('A'..='Z').chain('0'..='9').collect();
        for len in 1..=MAX_SENDER_LEN {
            for offset in [0, 26, 52] {
                let sender: String = alphabet.iter().cycle().skip(offset).take(len).collect();
                assert!(assert_valid_sender(&sender).is_ok(), "sender {sender:?}");
            }
        }
    }

    #[test]
    fn option_layers_resolve_in_order() {
        let client = SendOptions::default()
            .resolve(
                &OptionOverrides::new()
                    .with_sender("Client")
                    .with_unicode(UnicodeMode::Never),
            )
            .unwrap();
        let call = client
            .resolve(&OptionOverrides::new().with_sender("Call"))
            .unwrap();

        assert_eq!(call.sender(), Some("Call"));
        assert_eq!(call.unicode(), UnicodeMode::Never);
        assert_eq!(
            call.maximum_message_parts(),
            SendOptions::DEFAULT_MAXIMUM_MESSAGE_PARTS
        );
    }

    #[test]
    fn message_recipients_can_come_from_parsed_numbers() {
        let number = PhoneNumber::parse(None, "+31 6 12345678").unwrap();
        let msg = Message::new(vec![number.into()], "hi");
        assert_eq!(msg.to()[0].as_str(), "+31612345678");
    }
}
