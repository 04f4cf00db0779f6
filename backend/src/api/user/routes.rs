//! Defines the HTTP routes for self-service account management.

use super::handlers::{change_info, create_user, delete_account, get_user, signin};
use crate::auth::middleware::jwt_auth;
use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};

pub fn user_router() -> Router {
    Router::new()
        .route("/create", post(create_user))
        .route("/signin", post(signin))
        .route(
            "/getuser",
            get(get_user).layer(middleware::from_fn(jwt_auth)),
        )
        .route(
            "/changeinfo",
            patch(change_info).layer(middleware::from_fn(jwt_auth)),
        )
        .route(
            "/deleteaccount",
            delete(delete_account).layer(middleware::from_fn(jwt_auth)),
        )
}
