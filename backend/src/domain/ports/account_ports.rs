//! Driving ports for the caller's own account.

use async_trait::async_trait;

use crate::domain::{UserAggregate, UserId, UserSpecification};

use super::{OutcomeCall, ServiceCall};

/// Read-side use cases for an account.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountQuery: Send + Sync {
    /// Load the caller's profile shaped by `spec`; 404 when the account is gone.
    async fn profile(&self, user: UserId, spec: UserSpecification)
    -> ServiceCall<UserAggregate>;
}

/// Write-side use cases for an account.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Delete the caller's account; 204 on success, 404 when already gone.
    async fn delete_account(&self, user: UserId) -> OutcomeCall;
}
