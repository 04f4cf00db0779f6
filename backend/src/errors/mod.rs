//! Global application error types.
//!
//! This module defines the error type returned by every service operation.
//! The mapping from these errors to HTTP responses lives in `api::common`.

use thiserror::Error;

/// Service error shared by all account and admin operations
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{message}")]
    Validation { message: String },

    #[error("User with this email already exists. Please enter a unique email.")]
    DuplicateEmail,

    #[error("This phone number is already used by someone. Use a different one.")]
    DuplicatePhone,

    #[error("{entity} not found: {identifier}")]
    NotFound { entity: String, identifier: String },

    #[error("Please enter valid credentials.")]
    InvalidCredentials,

    #[error("{message}")]
    Forbidden { message: String },

    #[error("Please authenticate using a valid token.")]
    InvalidToken,

    #[error("Request body is too large")]
    PayloadTooLarge,

    #[error("Database error: {source}")]
    Database {
        #[from]
        source: anyhow::Error,
    },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    // Helper constructors for common patterns

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(entity: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            identifier: identifier.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(error: sqlx::Error) -> Self {
        Self::Database {
            source: error.into(),
        }
    }
}
