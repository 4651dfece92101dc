//! Driving ports for browsing businesses and their services.

use async_trait::async_trait;

use crate::domain::{
    BusinessAggregate, BusinessId, BusinessSpecification, ServiceAggregate, ServiceId,
    ServiceSpecification, Viewer,
};

use super::ServiceCall;

/// Directory lookups available to anonymous and signed-in callers alike.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BusinessQuery: Send + Sync {
    /// Load one business. Bookings are withheld unless `viewer` may see them.
    async fn get_business(
        &self,
        viewer: Viewer,
        id: BusinessId,
        spec: BusinessSpecification,
    ) -> ServiceCall<BusinessAggregate>;

    /// Load every business, applying the same visibility rule per entry.
    async fn list_businesses(
        &self,
        viewer: Viewer,
        spec: BusinessSpecification,
    ) -> ServiceCall<Vec<BusinessAggregate>>;
}

/// Service catalog lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceQuery: Send + Sync {
    /// Load one service; 404 when it does not exist.
    async fn get_service(
        &self,
        id: ServiceId,
        spec: ServiceSpecification,
    ) -> ServiceCall<ServiceAggregate>;
}
