//! Driven port for the business directory.
use async_trait::async_trait;

use crate::domain::{BusinessAggregate, BusinessId, BusinessSpecification};

use super::RepositoryError;

/// Data access for businesses and their satellite records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BusinessRepository: Send + Sync {
    /// Fetch one business with exactly the relations flagged in `spec`.
    async fn find_business(
        &self,
        id: BusinessId,
        spec: BusinessSpecification,
    ) -> Result<Option<BusinessAggregate>, RepositoryError>;

    /// Fetch every business, ordered by id, shaped by `spec`.
    async fn list_businesses(
        &self,
        spec: BusinessSpecification,
    ) -> Result<Vec<BusinessAggregate>, RepositoryError>;
}
