//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod config;
pub mod get_user;
pub mod login;
pub mod register;

use crate::error::{AuthError, AuthResult};

// Re-exports
pub use authenticate::{AuthenticateUseCase, AuthenticatedUser};
pub use config::AuthConfig;
pub use get_user::GetUserUseCase;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};

/// Absent, empty and whitespace-only fields are all "missing"
pub(crate) fn required(value: Option<String>, message: &str) -> AuthResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AuthError::validation(message)),
    }
}
