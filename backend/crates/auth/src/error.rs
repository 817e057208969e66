//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::token::TokenError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
///
/// Display strings of 4xx variants are returned to clients as `{msg}`.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Missing or malformed input field
    #[error("{0}")]
    Validation(String),

    /// Registration with an email that already has an account
    #[error("This email is already in use")]
    EmailTaken,

    /// Login with an email that has no account
    #[error("User does not exist")]
    UnknownEmail,

    /// Login with a wrong password
    #[error("Invalid password")]
    InvalidPassword,

    /// Lookup of an id with no account
    #[error("User not found")]
    UserNotFound,

    /// No bearer token on a protected route
    #[error("Access denied")]
    MissingToken,

    /// Bearer token failed verification
    #[error("Invalid token")]
    InvalidToken,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn validation(message: impl Into<String>) -> Self {
        AuthError::Validation(message.into())
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_)
            | AuthError::EmailTaken
            | AuthError::UnknownEmail
            | AuthError::InvalidPassword => ErrorKind::UnprocessableEntity,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::MissingToken => ErrorKind::Unauthorized,
            AuthError::InvalidToken => ErrorKind::BadRequest,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidPassword => {
                tracing::warn!("Login attempt with wrong password");
            }
            AuthError::InvalidToken => {
                tracing::warn!("Rejected bearer token");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

/// Value objects validate into `AppError`; client-side kinds become
/// validation failures, anything else is internal.
impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        if err.is_client_error() {
            AuthError::Validation(err.message().to_string())
        } else {
            AuthError::Internal(err.to_string())
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Signing(e) => AuthError::Internal(format!("Token signing failed: {e}")),
            TokenError::Expired | TokenError::Invalid(_) => AuthError::InvalidToken,
        }
    }
}
