//! Authentication module for request payloads and access control.
//!
//! This module provides the signup/signin payload types and the middleware
//! that authenticates tokens and authorizes admin-only routes.

pub mod middleware;
pub mod models;
