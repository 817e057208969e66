//! Get User Use Case

use std::sync::Arc;

use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

pub struct GetUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> GetUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// Look up a user by the textual id from the URL
    ///
    /// Ids that cannot name a user (not a UUID) are reported as not found.
    pub async fn execute(&self, raw_id: &str) -> AuthResult<User> {
        let user_id = UserId::parse_str(raw_id).map_err(|_| AuthError::UserNotFound)?;

        self.user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}
