//! JWT token utilities for authentication.
//!
//! Provides token creation, validation, and claims access for user
//! authentication. Tokens are HS256-signed and carry the user id in `sub`.
//!
//! Tokens are issued without an `exp` claim and validation does not require
//! one, so a token stays valid until the signing secret is rotated.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::errors::ServiceError;

/// JWT Claims identifying the caller
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Token issued at timestamp
    pub iat: usize,
}

/// JWT token utility for creating and validating tokens
#[derive(Clone)]
pub struct JwtUtils {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtUtils {
    /// Create a new JwtUtils instance from the configured signing secret
    pub fn new(secret: &str) -> Self {
        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims = HashSet::new();

        JwtUtils {
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Generate a new JWT token for the given user
    pub fn generate_token(&self, user_id: impl Into<String>) -> Result<String, ServiceError> {
        let claims = Claims {
            sub: user_id.into(),
            iat: Utc::now().timestamp() as usize,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::internal_error(format!("Token generation failed: {}", e)))
    }

    /// Validate and decode a JWT token
    pub fn validate_token(&self, token: &str) -> Result<Claims, ServiceError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| {
                tracing::debug!("Token validation failed: {}", e);
                ServiceError::InvalidToken
            })
    }
}

impl Claims {
    pub fn user_id(&self) -> &str {
        &self.sub
    }
}
