//! Error handling utilities for API responses.
//!
//! Provides the standard response envelope and the conversion between
//! service-layer errors and HTTP responses.
//!
//! # Response Format
//! Every response carries `success`. Successful responses add `data` and/or
//! `message`; errors carry only `success: false` and a human-readable
//! `message`. Unexpected failures are logged and replaced with a generic
//! message so internal error text never reaches the client.

use crate::errors::ServiceError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Message returned for every unexpected failure.
pub const GENERIC_ERROR_MESSAGE: &str = "Server error occurred. Please try again.";

/// Standard API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Indicates if the request was successful
    pub success: bool,
    /// Response data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response carrying data and a message
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        }
    }

    /// Create a successful response carrying only data
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }
}

impl ApiResponse<()> {
    /// Create a successful response carrying only a message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// Converts ServiceError to appropriate HTTP response with standard format
pub fn service_error_to_http(error: ServiceError) -> (StatusCode, Json<ApiResponse<()>>) {
    let status = match &error {
        ServiceError::Validation { .. }
        | ServiceError::DuplicateEmail
        | ServiceError::DuplicatePhone
        | ServiceError::InvalidCredentials => StatusCode::BAD_REQUEST,
        ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
        ServiceError::Forbidden { .. } => StatusCode::FORBIDDEN,
        ServiceError::InvalidToken => StatusCode::UNAUTHORIZED,
        ServiceError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        ServiceError::Database { .. } | ServiceError::InternalError { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let message = match error {
        ServiceError::NotFound { entity, identifier } => {
            tracing::debug!("{} not found: {}", entity, identifier);
            format!("{} not found.", entity)
        }
        ServiceError::Database { source } => {
            tracing::error!("Database error: {:#}", source);
            GENERIC_ERROR_MESSAGE.to_string()
        }
        ServiceError::InternalError { message } => {
            tracing::error!("Internal error: {}", message);
            GENERIC_ERROR_MESSAGE.to_string()
        }
        other => other.to_string(),
    };

    (status, Json(ApiResponse::error(message)))
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        service_error_to_http(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(error: ServiceError) -> (StatusCode, serde_json::Value) {
        let (status, Json(body)) = service_error_to_http(error);
        (status, serde_json::to_value(body).unwrap())
    }

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (ServiceError::validation("bad"), StatusCode::BAD_REQUEST),
            (ServiceError::DuplicateEmail, StatusCode::BAD_REQUEST),
            (ServiceError::DuplicatePhone, StatusCode::BAD_REQUEST),
            (ServiceError::InvalidCredentials, StatusCode::BAD_REQUEST),
            (ServiceError::not_found("User", "1"), StatusCode::NOT_FOUND),
            (ServiceError::forbidden("no"), StatusCode::FORBIDDEN),
            (ServiceError::InvalidToken, StatusCode::UNAUTHORIZED),
            (ServiceError::PayloadTooLarge, StatusCode::PAYLOAD_TOO_LARGE),
            (
                ServiceError::internal_error("boom"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(render(error).0, expected);
        }
    }

    #[test]
    fn test_error_body_shape() {
        let (_, body) = render(ServiceError::validation("Please enter a valid email"));
        assert_eq!(
            body,
            serde_json::json!({"success": false, "message": "Please enter a valid email"})
        );
    }

    #[test]
    fn test_unexpected_errors_do_not_leak_details() {
        let (_, body) = render(ServiceError::Database {
            source: anyhow::anyhow!("disk I/O error at /var/lib/secret.db"),
        });
        assert_eq!(body["message"], GENERIC_ERROR_MESSAGE);

        let (_, body) = render(ServiceError::internal_error("bcrypt exploded"));
        assert_eq!(body["message"], GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_not_found_hides_identifier() {
        let (_, body) = render(ServiceError::not_found("User", "0192-secret-id"));
        assert_eq!(body["message"], "User not found.");
    }

    #[test]
    fn test_success_shapes() {
        let body = serde_json::to_value(ApiResponse::message("User Deleted Successfully")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"success": true, "message": "User Deleted Successfully"})
        );

        let body = serde_json::to_value(ApiResponse::ok(vec![1, 2])).unwrap();
        assert_eq!(body, serde_json::json!({"success": true, "data": [1, 2]}));
    }
}
