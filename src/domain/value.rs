use std::fmt;

use phonenumber::country;

use crate::domain::validation::ValidationError;

#[derive(Clone, PartialEq, Eq, Hash)]
/// CM.com product token sent as `messages.authentication.producttoken`.
///
/// Invariant: non-empty after trimming. `Debug` redacts the value.
pub struct ProductToken(String);

impl ProductToken {
    /// Wire field name (`producttoken`).
    pub const FIELD: &'static str = "producttoken";

    /// Create a validated [`ProductToken`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ProductToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ProductToken(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Recipient phone number as sent to the gateway (`to[].number`).
///
/// Invariant: non-empty after trimming. No normalization is applied; parse into
/// [`PhoneNumber`] first if you want E.164.
pub struct Recipient(String);

impl Recipient {
    /// Wire field name (`number`).
    pub const FIELD: &'static str = "number";

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for Recipient {
    fn from(value: PhoneNumber) -> Self {
        Self(value.e164)
    }
}

#[derive(Debug, Clone)]
/// Phone number parsed with the `phonenumber` crate and formatted as E.164.
///
/// Equality is based on the E.164 form.
pub struct PhoneNumber {
    e164: String,
}

impl PhoneNumber {
    /// Parse a phone number, using `default_region` when the input has no country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl AsRef<str>,
    ) -> Result<Self, ValidationError> {
        let input = input.as_ref().trim();
        if input.is_empty() {
            return Err(ValidationError::Empty {
                field: Recipient::FIELD,
            });
        }

        let parsed = phonenumber::parse(default_region, input).map_err(|_| {
            ValidationError::InvalidPhoneNumber {
                input: input.to_owned(),
            }
        })?;
        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { e164 })
    }

    pub fn e164(&self) -> &str {
        &self.e164
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_token_trims_and_rejects_empty() {
        let token = ProductToken::new("  00000000-0000-0000-0000-000000000000 ").unwrap();
        assert_eq!(token.as_str(), "00000000-0000-0000-0000-000000000000");
        assert!(matches!(
            ProductToken::new("   "),
            Err(ValidationError::Empty {
                field: ProductToken::FIELD
            })
        ));
    }

    #[test]
    fn product_token_debug_is_redacted() {
        let token = ProductToken::new("secret").unwrap();
        assert_eq!(format!("{token:?}"), "ProductToken(***)");
    }

    #[test]
    fn recipient_trims_and_exposes_raw() {
        let recipient = Recipient::new(" +3161234567 ").unwrap();
        assert_eq!(recipient.as_str(), "+3161234567");
        assert!(Recipient::new("").is_err());
    }

    #[test]
    fn phone_number_parsing_normalizes_to_e164() {
        let p1 = PhoneNumber::parse(None, "+31 6 12345678").unwrap();
        let p2 = PhoneNumber::parse(Some(country::Id::NL), "0612345678").unwrap();
        assert_eq!(p1, p2);
        assert_eq!(p1.e164(), "+31612345678");

        let recipient: Recipient = p1.into();
        assert_eq!(recipient.as_str(), "+31612345678");
        assert!(PhoneNumber::parse(None, "not-a-number").is_err());
    }
}
