//! Login Use Case
//!
//! Verifies email + password and issues a signed bearer token.

use std::fmt;
use std::sync::Arc;

use platform::token::TokenService;

use crate::application::config::AuthConfig;
use crate::application::required;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

pub struct LoginOutput {
    pub user_id: String,
    /// Signed bearer token
    pub token: String,
}

impl fmt::Debug for LoginOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginOutput")
            .field("user_id", &self.user_id)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

pub struct LoginUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
    tokens: Arc<TokenService>,
}

impl<U> LoginUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>, tokens: Arc<TokenService>) -> Self {
        Self {
            user_repo,
            config,
            tokens,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let email = required(input.email, "Email is required")?;
        let password = required(input.password, "Password is required")?;

        // A malformed address cannot belong to any account
        let email = Email::new(email).map_err(|_| AuthError::UnknownEmail)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UnknownEmail)?;

        let raw_password = RawPassword::new(password).map_err(|_| AuthError::InvalidPassword)?;

        let password_valid = verify_password(
            user.password_hash.clone(),
            raw_password,
            self.config.pepper(),
        )
        .await?;

        if !password_valid {
            return Err(AuthError::InvalidPassword);
        }

        let user_id = user.user_id.to_string();
        let token = self.tokens.issue(&user_id)?;

        tracing::info!(user_id = %user_id, "User logged in");

        Ok(LoginOutput { user_id, token })
    }
}

async fn verify_password(
    hash: UserPassword,
    raw: RawPassword,
    pepper: Option<&[u8]>,
) -> AuthResult<bool> {
    let pepper = pepper.map(<[u8]>::to_vec);

    tokio::task::spawn_blocking(move || hash.verify(&raw, pepper.as_deref()))
        .await
        .map_err(|e| AuthError::Internal(format!("Password verification task failed: {e}")))
}
