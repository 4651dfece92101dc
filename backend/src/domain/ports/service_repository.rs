//! Driven port for the service catalog.
use async_trait::async_trait;

use crate::domain::{ServiceAggregate, ServiceId, ServiceSpecification};

use super::RepositoryError;

/// Data access for bookable services.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    /// Fetch a service with exactly the relations flagged in `spec`.
    async fn find_service(
        &self,
        id: ServiceId,
        spec: ServiceSpecification,
    ) -> Result<Option<ServiceAggregate>, RepositoryError>;
}
