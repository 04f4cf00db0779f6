//! Module for self-service account API endpoints.
//!
//! Signup, signin and the token-protected profile operations.

pub mod handlers;
pub mod routes;
