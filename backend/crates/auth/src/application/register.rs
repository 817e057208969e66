//! Register Use Case
//!
//! Creates a new user account. No token is issued; the client logs in next.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::required;
use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    display_name::DisplayName,
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Register input; every field may be absent in the request body
pub struct RegisterInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug)]
pub struct RegisterOutput {
    pub user_id: String,
}

pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let email = required(input.email, "Email is required")?;
        let password = required(input.password, "Password is required")?;

        let email = Email::new(email)?;
        let raw_password = RawPassword::new(password)?;
        let name = DisplayName::parse(input.name.as_deref())?;

        // Fast path; `create` below still enforces uniqueness atomically
        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = hash_password(raw_password, self.config.pepper()).await?;

        let user = User::new(name, email, password_hash);
        self.user_repo.create(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            email_domain = %user.email.domain(),
            "User registered"
        );

        Ok(RegisterOutput {
            user_id: user.user_id.to_string(),
        })
    }
}

/// Argon2 is CPU-bound; keep it off the async workers
async fn hash_password(raw: RawPassword, pepper: Option<&[u8]>) -> AuthResult<UserPassword> {
    let pepper = pepper.map(<[u8]>::to_vec);

    let hashed = tokio::task::spawn_blocking(move || UserPassword::from_raw(&raw, pepper.as_deref()))
        .await
        .map_err(|e| AuthError::Internal(format!("Password hashing task failed: {e}")))??;

    Ok(hashed)
}
