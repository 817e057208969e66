//! Authenticate Use Case
//!
//! Turns a bearer token into the identity it was issued for.

use std::sync::Arc;

use platform::token::TokenService;

use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

/// Verified caller identity, attached to requests on protected routes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

pub struct AuthenticateUseCase {
    tokens: Arc<TokenService>,
}

impl AuthenticateUseCase {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    /// Stateless check: signature, expiry and a well-formed user id.
    /// Whether the user still exists is not checked here.
    pub fn execute(&self, token: &str) -> AuthResult<AuthenticatedUser> {
        let claims = self.tokens.verify(token)?;

        let user_id = UserId::parse_str(&claims.id).map_err(|_| AuthError::InvalidToken)?;

        Ok(AuthenticatedUser { user_id })
    }
}
