//! Input validation helpers shared by the request payloads.
//!
//! `validator` reports errors in a map with no stable order, while clients
//! only ever see a single message. Payloads therefore declare the order their
//! fields are checked in and only the first violation is surfaced.

use crate::errors::{ServiceError, ServiceResult};
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

/// A validated payload with a fixed field precedence.
pub trait OrderedValidate: Validate {
    /// Field names in the order their rules are reported.
    const FIELD_ORDER: &'static [&'static str];

    /// Validates the payload, returning the first violated rule as a `ServiceError`.
    fn validate_first(&self) -> ServiceResult<()> {
        self.validate()
            .map_err(|errors| ServiceError::validation(first_violation(&errors, Self::FIELD_ORDER)))
    }
}

/// Picks the message of the first violated rule, walking fields in `field_order`.
pub fn first_violation(errors: &ValidationErrors, field_order: &[&str]) -> String {
    let field_errors = errors.field_errors();

    field_order
        .iter()
        .filter_map(|field| field_errors.get(*field))
        .chain(field_errors.values())
        .flat_map(|errors| errors.iter())
        .map(|error| match &error.message {
            Some(message) => message.to_string(),
            None => error.code.to_string(),
        })
        .next()
        .unwrap_or_else(|| "Invalid value".to_string())
}

/// Rejects names that are empty once surrounding whitespace is removed.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.chars().count() > 255 {
        return Err(ValidationError::new("name")
            .with_message(Cow::Borrowed("Name must be between 1-255 characters")));
    }
    Ok(())
}

/// bcrypt only reads the first 72 bytes of its input.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Requires 8 to 72 characters that also fit in bcrypt's 72-byte input.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let chars = password.chars().count();
    if !(8..=72).contains(&chars) {
        return Err(ValidationError::new("password")
            .with_message(Cow::Borrowed("Password must be between 8 and 72 characters")));
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(ValidationError::new("password")
            .with_message(Cow::Borrowed("Password must be at most 72 bytes")));
    }
    Ok(())
}

/// Accepts an optional leading `+` followed by 4 to 15 digits.
pub fn validate_phone_number(phone_number: &str) -> Result<(), ValidationError> {
    let digits = phone_number.strip_prefix('+').unwrap_or(phone_number);
    let valid = (4..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit());

    if !valid {
        return Err(ValidationError::new("phone_number")
            .with_message(Cow::Borrowed("Please enter a valid phone number")));
    }
    Ok(())
}
