//! Defines the HTTP routes for admin operations.

use super::handlers::{change_user_info, create_admin, delete_user, get_all_users};
use crate::api::user::handlers::signin;
use crate::auth::middleware::{admin_auth, jwt_auth};
use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};

pub fn admin_router() -> Router {
    // Route layers wrap outside-in: jwt_auth runs first, then admin_auth.
    let protected = Router::new()
        .route("/getallusers", get(get_all_users))
        .route("/changeuserinfo/{userId}", patch(change_user_info))
        .route("/deleteuser/{userId}", delete(delete_user))
        .route_layer(middleware::from_fn(admin_auth))
        .route_layer(middleware::from_fn(jwt_auth));

    Router::new()
        .route("/createadmin", post(create_admin))
        .route("/signin", post(signin))
        .merge(protected)
}
