//! Rust structs that represent database table mappings.
//!
//! These models define the structure of data as it is stored in and retrieved
//! from the database. `User` carries the password hash and is never serialized;
//! `UserProfile` is the view handed to API clients.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A row of the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub password_hash: String,
    pub profile_img: Option<String>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Everything needed to insert a new user row.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub password_hash: String,
    pub profile_img: Option<String>,
    pub is_admin: bool,
}

/// Partial update of the mutable profile columns. `None` leaves a column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub profile_img: Option<String>,
}

impl UpdateUser {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.profile_img.is_none()
    }
}

/// Public representation of a user. Has no password field.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub profile_img: Option<String>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone_number: user.phone_number,
            profile_img: user.profile_img,
            is_admin: user.is_admin,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
