//! Middleware for protecting authenticated routes and handling authorization.
//!
//! `jwt_auth` validates the bearer token and stores its `Claims` in the
//! request extensions without touching the database. `admin_auth` runs after
//! it and resolves the caller's stored record into an `AdminCaller`.

use crate::errors::ServiceError;
use crate::services::admin_service::authorize_admin;
use crate::services::credential_service::CredentialService;
use crate::utils::jwt::Claims;
use axum::{
    extract::{Extension, Request},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use sqlx::SqlitePool;

/// Pulls the token out of an `Authorization: Bearer <token>` header.
fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// JWT authentication middleware
pub async fn jwt_auth(
    Extension(credentials): Extension<CredentialService>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServiceError> {
    let token = bearer_token(&request).ok_or(ServiceError::InvalidToken)?;
    let claims = credentials.verify_token(token)?;

    // Add claims to request extensions for use in handlers
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Admin authorization middleware. Must be layered inside `jwt_auth`.
pub async fn admin_auth(
    Extension(pool): Extension<SqlitePool>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServiceError> {
    let caller_id = request
        .extensions()
        .get::<Claims>()
        .map(|claims| claims.user_id().to_string())
        .ok_or(ServiceError::InvalidToken)?;

    let admin = authorize_admin(&pool, &caller_id).await?;

    request.extensions_mut().insert(admin);
    Ok(next.run(request).await)
}
