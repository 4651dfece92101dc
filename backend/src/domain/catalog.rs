//! Services a business offers and how they are grouped.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Business, BusinessId, Employee, EmployeeId, ServiceGroupId, ServiceId};

/// Bookable service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// Service identifier.
    pub id: ServiceId,
    /// Business offering the service.
    pub business_id: BusinessId,
    /// Employee dedicated to this service, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<EmployeeId>,
    /// Group the service is listed under, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_group_id: Option<ServiceGroupId>,
    /// Display name.
    pub name: String,
    /// Length of one appointment.
    pub duration_minutes: u32,
    /// Price in the smallest currency unit.
    pub price_cents: i64,
}

/// Named grouping of services within a business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceGroup {
    /// Group identifier.
    pub id: ServiceGroupId,
    /// Business owning the group.
    pub business_id: BusinessId,
    /// Display name.
    pub name: String,
}

/// Service with the relations requested by a
/// [`ServiceSpecification`](super::ServiceSpecification).
///
/// A requested employee relation for a service without a dedicated employee
/// stays `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAggregate {
    /// The service itself.
    #[serde(flatten)]
    pub service: Service,
    /// Offering business, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business: Option<Business>,
    /// Dedicated employee, when requested and present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee: Option<Employee>,
    /// Group, when requested and present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_group: Option<ServiceGroup>,
}

impl ServiceAggregate {
    /// Aggregate with no relations loaded.
    #[must_use]
    pub fn bare(service: Service) -> Self {
        Self {
            service,
            business: None,
            employee: None,
            service_group: None,
        }
    }
}
