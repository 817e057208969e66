//! API DTOs (Data Transfer Objects)
//!
//! Request types deliberately do not derive `Debug`: they carry passwords.

use serde::{Deserialize, Serialize};

use crate::domain::entity::User;

// ============================================================================
// Requests
// ============================================================================

/// Register request. Presence of `email` and `password` is checked by the
/// use case so that a missing field is a 422 with a `{msg}` body.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

// ============================================================================
// Responses
// ============================================================================

/// `{msg}` body used by `/` and `/auth/register`
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub msg: String,
}

impl MessageResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub msg: String,
    pub token: String,
}

/// Public view of a user. Has no password field by construction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: Option<String>,
    pub email: String,
    pub created_at: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.user_id.to_string(),
            name: user.name.as_ref().map(|n| n.as_str().to_string()),
            email: user.email.as_str().to_string(),
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

/// `GET /user/{id}` body: `{"user": {...}}`
#[derive(Debug, Clone, Serialize)]
pub struct UserEnvelope {
    pub user: UserResponse,
}
