use crate::domain::value::Recipient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Delivery state tracked on a [`Message`].
///
/// A failed send never changes this value; failures are reported through the returned error.
pub enum MessageStatus {
    #[default]
    Unsent,
    /// The gateway accepted the batch this message was part of.
    Sent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One logical SMS.
///
/// The recipient list may be empty while the message is being assembled; it must be non-empty
/// (possibly after a client-level delivery override) by the time it is sent.
pub struct Message {
    to: Vec<Recipient>,
    from: Option<String>,
    body: String,
    reference: Option<String>,
    status: MessageStatus,
}

impl Message {
    pub fn new(to: Vec<Recipient>, body: impl Into<String>) -> Self {
        Self {
            to,
            from: None,
            body: body.into(),
            reference: None,
            status: MessageStatus::Unsent,
        }
    }

    /// Set the sender for this message, taking precedence over the `sender` option.
    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Set the correlation reference echoed by the gateway in delivery reports.
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn to(&self) -> &[Recipient] {
        &self.to
    }

    pub fn from(&self) -> Option<&str> {
        self.from.as_deref()
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    pub fn status(&self) -> MessageStatus {
        self.status
    }

    pub fn is_sent(&self) -> bool {
        self.status == MessageStatus::Sent
    }

    pub(crate) fn redirect(&mut self, recipients: &[Recipient]) {
        self.to = recipients.to_vec();
    }

    pub(crate) fn mark_sent(&mut self) {
        self.status = MessageStatus::Sent;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_message_starts_unsent_without_sender_or_reference() {
        let to = vec![Recipient::new("+3161234567").unwrap()];
        let msg = Message::new(to.clone(), "hi");
        assert_eq!(msg.to(), to.as_slice());
        assert_eq!(msg.body(), "hi");
        assert_eq!(msg.from(), None);
        assert_eq!(msg.reference(), None);
        assert_eq!(msg.status(), MessageStatus::Unsent);
        assert!(!msg.is_sent());
    }

    #[test]
    fn redirect_replaces_recipients_and_mark_sent_updates_status() {
        let mut msg = Message::new(Vec::new(), "hi")
            .with_from("MyApp")
            .with_reference("ref-1");
        let redirect = vec![Recipient::new("+3160000000").unwrap()];

        msg.redirect(&redirect);
        msg.mark_sent();

        assert_eq!(msg.to(), redirect.as_slice());
        assert_eq!(msg.from(), Some("MyApp"));
        assert_eq!(msg.reference(), Some("ref-1"));
        assert!(msg.is_sent());
    }
}
