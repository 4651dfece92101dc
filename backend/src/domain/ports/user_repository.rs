//! Driven port for account persistence.
use async_trait::async_trait;

use crate::domain::{UserAggregate, UserId, UserSpecification};

use super::RepositoryError;

/// Data access for account holders.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user with exactly the relations flagged in `spec`.
    async fn find_user(
        &self,
        id: UserId,
        spec: UserSpecification,
    ) -> Result<Option<UserAggregate>, RepositoryError>;

    /// Remove a user. Returns `false` when no such user exists.
    async fn delete_user(&self, id: UserId) -> Result<bool, RepositoryError>;
}
