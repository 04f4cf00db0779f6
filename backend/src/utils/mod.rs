//! Collection of general utility functions.
//!
//! Small, reusable helpers that do not belong to a single service: token
//! signing, password hashing, input validation and profile image storage.

pub mod jwt;
pub mod password;
pub mod uploads;
pub mod validation;

#[cfg(test)]
pub mod test_support;
