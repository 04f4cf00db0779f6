//! Module for admin API endpoints.
//!
//! Admin creation and signin are open; everything else requires a token whose
//! user has the admin flag set.

pub mod handlers;
pub mod routes;
