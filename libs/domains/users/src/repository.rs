use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::UserResult;
use crate::models::{UpdateProfile, User, UserFilter};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// `EmailTaken` if the unique email index rejects the insert
    async fn create(&self, user: User) -> UserResult<User>;

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// `email` must already be lowercased
    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>>;

    /// Sets the present fields and `updated_at`; None if the user is gone
    async fn update_profile(
        &self,
        id: Uuid,
        update: UpdateProfile,
        now: DateTime<Utc>,
    ) -> UserResult<Option<User>>;

    /// Oldest first
    async fn list(&self, filter: &UserFilter) -> UserResult<Vec<User>>;

    async fn count(&self) -> UserResult<u64>;
}
