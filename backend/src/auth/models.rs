//! Data structures for authentication-related requests and responses.
//!
//! Request payloads arrive either as JSON or as multipart form fields, so
//! every field defaults to empty and the validation rules report what is
//! missing instead of a deserialization error.

use crate::database::models::UserProfile;
use crate::utils::validation::{
    OrderedValidate, validate_name, validate_password, validate_phone_number,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Signup payload, shared by user signup and admin creation
#[derive(Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(custom(function = "validate_name"))]
    pub name: String,

    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,

    #[validate(custom(function = "validate_password"))]
    pub password: String,

    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: String,
}

impl OrderedValidate for SignupRequest {
    const FIELD_ORDER: &'static [&'static str] = &["name", "email", "password", "phone_number"];
}

/// Signin payload. `credential` is an email when it contains `@`, otherwise a phone number.
#[derive(Default, Deserialize, Validate)]
#[serde(default)]
pub struct SigninRequest {
    #[validate(length(min = 1, message = "Please enter your email or phone number"))]
    pub credential: String,

    #[validate(length(min = 1, message = "Password cannot be blank"))]
    pub password: String,
}

impl OrderedValidate for SigninRequest {
    const FIELD_ORDER: &'static [&'static str] = &["credential", "password"];
}

/// How a signin credential is looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKind<'a> {
    Email(&'a str),
    PhoneNumber(&'a str),
}

impl SigninRequest {
    pub fn credential_kind(&self) -> CredentialKind<'_> {
        if self.credential.contains('@') {
            CredentialKind::Email(&self.credential)
        } else {
            CredentialKind::PhoneNumber(&self.credential)
        }
    }
}

/// Profile change payload. Absent or blank fields are left untouched.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
}

impl UpdateProfileRequest {
    /// The new name, if one was actually supplied.
    pub fn supplied_name(&self) -> Option<String> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
    }
}

/// Response after creating an account
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub token: String,
    pub success: bool,
    pub message: String,
}

/// Response after a successful signin
#[derive(Debug, Serialize)]
pub struct SigninResponse {
    pub success: bool,
    pub token: String,
    pub user: UserProfile,
    pub message: String,
}

/// Response carrying the caller's own profile
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub success: bool,
    pub user: UserProfile,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(name: &str, email: &str, password: &str, phone: &str) -> SignupRequest {
        SignupRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            phone_number: phone.to_string(),
        }
    }

    #[test]
    fn test_credential_kind_uses_at_sign() {
        let by_email = SigninRequest {
            credential: "a@x.com".to_string(),
            password: "pw".to_string(),
        };
        assert_eq!(by_email.credential_kind(), CredentialKind::Email("a@x.com"));

        let by_phone = SigninRequest {
            credential: "1111".to_string(),
            password: "pw".to_string(),
        };
        assert_eq!(by_phone.credential_kind(), CredentialKind::PhoneNumber("1111"));
    }

    #[test]
    fn test_signup_reports_first_violation_only() {
        let err = signup("", "bad", "short", "x").validate_first().unwrap_err();
        assert_eq!(err.to_string(), "Name must be between 1-255 characters");

        let err = signup("A", "a@x.com", "short", "x").validate_first().unwrap_err();
        assert_eq!(err.to_string(), "Password must be between 8 and 72 characters");

        let err = signup("A", "a@x.com", &"é".repeat(40), "1111")
            .validate_first()
            .unwrap_err();
        assert_eq!(err.to_string(), "Password must be at most 72 bytes");

        let err = signup("A", "a@x.com", "pw123456", "x").validate_first().unwrap_err();
        assert_eq!(err.to_string(), "Please enter a valid phone number");
    }

    #[test]
    fn test_signup_accepts_reference_input() {
        assert!(
            signup("A", "a@x.com", "pw123456", "1111")
                .validate_first()
                .is_ok()
        );
    }

    #[test]
    fn test_signup_fields_default_when_missing() {
        let request: SignupRequest = serde_json::from_str(r#"{"name":"A"}"#).unwrap();
        let err = request.validate_first().unwrap_err();
        assert_eq!(err.to_string(), "Please enter a valid email");
    }

    #[test]
    fn test_signup_reads_camel_case_phone_number() {
        let request: SignupRequest =
            serde_json::from_str(r#"{"phoneNumber":"1111"}"#).unwrap();
        assert_eq!(request.phone_number, "1111");
    }

    #[test]
    fn test_blank_name_is_not_supplied() {
        let blank = UpdateProfileRequest {
            name: Some("   ".to_string()),
        };
        assert_eq!(blank.supplied_name(), None);

        let named = UpdateProfileRequest {
            name: Some(" Bob ".to_string()),
        };
        assert_eq!(named.supplied_name(), Some("Bob".to_string()));
    }
}
