//! User Entity
//!
//! The account record: identity, optional display name, unique email and
//! password hash. Created on registration and never mutated afterwards.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    display_name::DisplayName, email::Email, user_id::UserId, user_password::UserPassword,
};

/// User entity
///
/// `password_hash` must never leave the service; responses are built from
/// `presentation::dto::UserResponse`, which has no password field.
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub name: Option<DisplayName>,
    /// Unique, normalized login email
    pub email: Email,
    pub password_hash: UserPassword,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh id
    pub fn new(name: Option<DisplayName>, email: Email, password_hash: UserPassword) -> Self {
        Self {
            user_id: UserId::new(),
            name,
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }
}
