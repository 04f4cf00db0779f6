//! Central module for organizing the application's API endpoints.
//!
//! `router` assembles the user and admin routers, the shared extensions and
//! the HTTP layers into the application served by `main`.

pub mod admin;
pub mod common;
pub mod extract;
pub mod user;

use crate::config::Config;
use crate::services::credential_service::CredentialService;
use crate::utils::uploads::ImageStore;
use axum::{
    Extension, Json, Router,
    extract::DefaultBodyLimit,
    routing::get,
};
use sqlx::SqlitePool;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Builds the complete application router.
pub fn router(pool: SqlitePool, config: &Config) -> Router {
    let credentials = CredentialService::new(config);
    let images = ImageStore::new(&config.upload_dir);

    Router::new()
        .route("/", get(root_handler))
        .nest("/api/user", user::routes::user_router())
        .nest("/api/admin", admin::routes::admin_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(config.max_upload_bytes))
                .layer(Extension(pool))
                .layer(Extension(credentials))
                .layer(Extension(images))
                .layer(Extension(config.clone())),
        )
}

async fn root_handler() -> Json<common::ApiResponse<serde_json::Value>> {
    Json(common::ApiResponse::success(
        serde_json::json!({
            "service": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
        }),
        "Account API is running",
    ))
}
