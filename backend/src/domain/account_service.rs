//! Account use cases for the signed-in caller.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    AccountCommand, AccountQuery, OutcomeCall, ServiceCall, UserRepository,
};
use crate::domain::{ServiceOutcome, ServiceResult, UserAggregate, UserId, UserSpecification};

const ACCOUNT_NOT_FOUND: &str = "Account not found";

/// Account service implementing [`AccountQuery`] and [`AccountCommand`].
#[derive(Clone)]
pub struct AccountService<U> {
    users: Arc<U>,
}

impl<U> AccountService<U> {
    /// Create a new service over the given repository.
    #[must_use]
    pub const fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<U> AccountQuery for AccountService<U>
where
    U: UserRepository,
{
    async fn profile(&self, user: UserId, spec: UserSpecification) -> ServiceCall<UserAggregate> {
        let found = self.users.find_user(user, spec).await?;
        Ok(found.map_or_else(
            || ServiceResult::not_found(ACCOUNT_NOT_FOUND),
            ServiceResult::success,
        ))
    }
}

#[async_trait]
impl<U> AccountCommand for AccountService<U>
where
    U: UserRepository,
{
    async fn delete_account(&self, user: UserId) -> OutcomeCall {
        if self.users.delete_user(user).await? {
            tracing::info!(user_id = %user, "account deleted");
            Ok(ServiceOutcome::success_with_status(204))
        } else {
            Ok(ServiceOutcome::failure_with_status(ACCOUNT_NOT_FOUND, 404))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockUserRepository, RepositoryError};
    use crate::domain::{Role, User};
    use mockall::predicate::eq;
    use rstest::rstest;

    fn service(repo: MockUserRepository) -> AccountService<MockUserRepository> {
        AccountService::new(Arc::new(repo))
    }

    fn grace() -> UserAggregate {
        UserAggregate::bare(User {
            id: UserId::new(3),
            email: "grace@example.com".to_owned(),
            full_name: "Grace Hopper".to_owned(),
            role: Role::Customer,
        })
    }

    #[rstest]
    #[tokio::test]
    async fn profile_forwards_specification_to_repository() {
        let spec = UserSpecification {
            include_reviews: true,
            ..UserSpecification::default()
        };
        let mut repo = MockUserRepository::new();
        repo.expect_find_user()
            .with(eq(UserId::new(3)), eq(spec))
            .times(1)
            .return_once(|_, _| Ok(Some(grace())));

        let result = service(repo)
            .profile(UserId::new(3), spec)
            .await
            .expect("repository succeeds");

        assert_eq!(result, ServiceResult::success(grace()));
    }

    #[rstest]
    #[tokio::test]
    async fn profile_reports_missing_account_as_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_user().return_once(|_, _| Ok(None));

        let result = service(repo)
            .profile(UserId::new(8), UserSpecification::default())
            .await
            .expect("repository succeeds");

        assert_eq!(result.status_code(), 404);
        assert_eq!(result.error_message(), Some(ACCOUNT_NOT_FOUND));
    }

    #[rstest]
    #[tokio::test]
    async fn profile_propagates_infrastructure_failures() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_user()
            .return_once(|_, _| Err(RepositoryError::connection("refused")));

        let err = service(repo)
            .profile(UserId::new(3), UserSpecification::default())
            .await
            .expect_err("infrastructure failure is not an envelope");

        assert_eq!(err, RepositoryError::connection("refused"));
    }

    #[rstest]
    #[case(true, ServiceOutcome::success_with_status(204))]
    #[case(false, ServiceOutcome::failure_with_status(ACCOUNT_NOT_FOUND, 404))]
    #[tokio::test]
    async fn delete_account_maps_repository_answer(
        #[case] existed: bool,
        #[case] expected: ServiceOutcome,
    ) {
        let mut repo = MockUserRepository::new();
        repo.expect_delete_user()
            .with(eq(UserId::new(3)))
            .return_once(move |_| Ok(existed));

        let outcome = service(repo)
            .delete_account(UserId::new(3))
            .await
            .expect("repository succeeds");

        assert_eq!(outcome, expected);
    }
}
