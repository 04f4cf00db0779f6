//! Handler functions for admin API endpoints.
//!
//! Protected handlers receive the `AdminCaller` inserted by `admin_auth`.

use crate::api::common::ApiResponse;
use crate::api::extract::FormPayload;
use crate::auth::models::{SignupRequest, SignupResponse, UpdateProfileRequest};
use crate::config::Config;
use crate::database::models::UserProfile;
use crate::errors::ServiceError;
use crate::services::admin_service::{AdminCaller, AdminService};
use crate::services::credential_service::CredentialService;
use crate::utils::uploads::ImageStore;
use axum::extract::{Extension, Json, Path};
use sqlx::SqlitePool;

/// Creates an admin account.
#[axum::debug_handler]
pub async fn create_admin(
    Extension(pool): Extension<SqlitePool>,
    Extension(credentials): Extension<CredentialService>,
    Extension(images): Extension<ImageStore>,
    Extension(config): Extension<Config>,
    payload: FormPayload<SignupRequest>,
) -> Result<Json<SignupResponse>, ServiceError> {
    let service = AdminService::new(&pool, &credentials, &images, config.allow_admin_signup);
    let created = service.create_admin(payload.data, payload.image).await?;

    Ok(Json(SignupResponse {
        token: created.token,
        success: true,
        message: "Account Created Successfully".to_string(),
    }))
}

/// Lists every non-admin user.
#[axum::debug_handler]
pub async fn get_all_users(
    Extension(pool): Extension<SqlitePool>,
    Extension(credentials): Extension<CredentialService>,
    Extension(images): Extension<ImageStore>,
    Extension(config): Extension<Config>,
    Extension(admin): Extension<AdminCaller>,
) -> Result<Json<ApiResponse<Vec<UserProfile>>>, ServiceError> {
    let service = AdminService::new(&pool, &credentials, &images, config.allow_admin_signup);
    let users = service.list_users(&admin).await?;

    Ok(Json(ApiResponse::ok(
        users.into_iter().map(UserProfile::from).collect(),
    )))
}

/// Changes a user's name and/or profile image.
#[axum::debug_handler]
pub async fn change_user_info(
    Extension(pool): Extension<SqlitePool>,
    Extension(credentials): Extension<CredentialService>,
    Extension(images): Extension<ImageStore>,
    Extension(config): Extension<Config>,
    Extension(admin): Extension<AdminCaller>,
    Path(user_id): Path<String>,
    payload: FormPayload<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<UserProfile>>, ServiceError> {
    let service = AdminService::new(&pool, &credentials, &images, config.allow_admin_signup);
    let user = service
        .update_user(&admin, &user_id, payload.data, payload.image)
        .await?;

    Ok(Json(ApiResponse::ok(user.into())))
}

/// Deletes a user.
#[axum::debug_handler]
pub async fn delete_user(
    Extension(pool): Extension<SqlitePool>,
    Extension(credentials): Extension<CredentialService>,
    Extension(images): Extension<ImageStore>,
    Extension(config): Extension<Config>,
    Extension(admin): Extension<AdminCaller>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ServiceError> {
    let service = AdminService::new(&pool, &credentials, &images, config.allow_admin_signup);
    service.delete_user(&admin, &user_id).await?;

    Ok(Json(ApiResponse::message("User Deleted Successfully")))
}
