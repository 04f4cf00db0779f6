//! Handler functions for user account API endpoints.
//!
//! These functions parse request data, delegate to `AccountService` and shape
//! the JSON responses. Password hashes never leave this layer: every user is
//! converted into a `UserProfile` before serialization.

use crate::api::common::ApiResponse;
use crate::api::extract::FormPayload;
use crate::auth::models::{
    ProfileResponse, SigninRequest, SigninResponse, SignupRequest, SignupResponse,
    UpdateProfileRequest,
};
use crate::database::models::UserProfile;
use crate::errors::ServiceError;
use crate::services::account_service::AccountService;
use crate::services::credential_service::CredentialService;
use crate::utils::jwt::Claims;
use crate::utils::uploads::ImageStore;
use axum::extract::{Extension, Json};
use sqlx::SqlitePool;

/// Creates a regular user account.
#[axum::debug_handler]
pub async fn create_user(
    Extension(pool): Extension<SqlitePool>,
    Extension(credentials): Extension<CredentialService>,
    Extension(images): Extension<ImageStore>,
    payload: FormPayload<SignupRequest>,
) -> Result<Json<SignupResponse>, ServiceError> {
    let service = AccountService::new(&pool, &credentials, &images);
    let created = service.signup(payload.data, payload.image).await?;

    Ok(Json(SignupResponse {
        token: created.token,
        success: true,
        message: "Account Created Successfully".to_string(),
    }))
}

/// Signs a user (or admin) in by email or phone number.
#[axum::debug_handler]
pub async fn signin(
    Extension(pool): Extension<SqlitePool>,
    Extension(credentials): Extension<CredentialService>,
    Extension(images): Extension<ImageStore>,
    payload: FormPayload<SigninRequest>,
) -> Result<Json<SigninResponse>, ServiceError> {
    let service = AccountService::new(&pool, &credentials, &images);
    let signed_in = service.signin(payload.data).await?;

    Ok(Json(SigninResponse {
        success: true,
        token: signed_in.token,
        user: signed_in.user.into(),
        message: "Logged In Successfully".to_string(),
    }))
}

/// Returns the caller's own profile.
#[axum::debug_handler]
pub async fn get_user(
    Extension(pool): Extension<SqlitePool>,
    Extension(credentials): Extension<CredentialService>,
    Extension(images): Extension<ImageStore>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ProfileResponse>, ServiceError> {
    let service = AccountService::new(&pool, &credentials, &images);
    let user = service.get_user_required(claims.user_id()).await?;

    Ok(Json(ProfileResponse {
        success: true,
        user: user.into(),
    }))
}

/// Changes the caller's name and/or profile image.
#[axum::debug_handler]
pub async fn change_info(
    Extension(pool): Extension<SqlitePool>,
    Extension(credentials): Extension<CredentialService>,
    Extension(images): Extension<ImageStore>,
    Extension(claims): Extension<Claims>,
    payload: FormPayload<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<UserProfile>>, ServiceError> {
    let service = AccountService::new(&pool, &credentials, &images);
    let user = service
        .update_profile(claims.user_id(), payload.data, payload.image)
        .await?;

    Ok(Json(ApiResponse::success(
        user.into(),
        "User information updated successfully",
    )))
}

/// Deletes the caller's account.
#[axum::debug_handler]
pub async fn delete_account(
    Extension(pool): Extension<SqlitePool>,
    Extension(credentials): Extension<CredentialService>,
    Extension(images): Extension<ImageStore>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ApiResponse<()>>, ServiceError> {
    let service = AccountService::new(&pool, &credentials, &images);
    service.delete_account(claims.user_id()).await?;

    Ok(Json(ApiResponse::message("User Deleted Successfully")))
}
