//! Module for core business logic services.
//!
//! This module encapsulates services that perform specific business operations
//! and orchestrate interactions between the repositories, the credential
//! primitives and the image store.

pub mod account_service;
pub mod admin_service;
pub mod credential_service;
