//! Reservations of a service slot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Business, BookingId, BusinessId, Employee, EmployeeId, Service, ServiceId, User, UserId};

/// Lifecycle state of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// The slot is reserved.
    Confirmed,
    /// The customer released the slot.
    Cancelled,
}

/// A customer's reservation of a service slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Booking identifier.
    pub id: BookingId,
    /// Customer who made the booking.
    pub user_id: UserId,
    /// Business providing the service.
    pub business_id: BusinessId,
    /// Booked service.
    pub service_id: ServiceId,
    /// Employee serving the slot, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<EmployeeId>,
    /// Slot start (inclusive).
    #[schema(value_type = String, example = "2031-05-04T10:00:00Z")]
    pub starts_at: DateTime<Utc>,
    /// Slot end (exclusive).
    #[schema(value_type = String, example = "2031-05-04T10:30:00Z")]
    pub ends_at: DateTime<Utc>,
    /// Lifecycle state.
    pub status: BookingStatus,
}

impl Booking {
    /// Whether the booking still holds its slot.
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        self.status == BookingStatus::Confirmed
    }

    /// Whether `[starts_at, ends_at)` intersects this booking's slot.
    #[must_use]
    pub fn overlaps(&self, starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> bool {
        self.starts_at < ends_at && starts_at < self.ends_at
    }
}

/// Payload of `POST /api/v1/bookings`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    /// Service to book.
    pub service_id: ServiceId,
    /// Preferred employee; defaults to the service's dedicated employee.
    #[serde(default)]
    pub employee_id: Option<EmployeeId>,
    /// Requested slot start.
    #[schema(value_type = String, example = "2031-05-04T10:00:00Z")]
    pub starts_at: DateTime<Utc>,
}

/// Validated booking ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    /// Customer making the booking.
    pub user_id: UserId,
    /// Business owning the service.
    pub business_id: BusinessId,
    /// Booked service.
    pub service_id: ServiceId,
    /// Resolved employee, if any.
    pub employee_id: Option<EmployeeId>,
    /// Slot start.
    pub starts_at: DateTime<Utc>,
    /// Slot end, derived from the service's duration.
    pub ends_at: DateTime<Utc>,
}

/// Booking with the relations requested by a
/// [`BookingSpecification`](super::BookingSpecification).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingAggregate {
    /// The booking itself.
    #[serde(flatten)]
    pub booking: Booking,
    /// Customer, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// Business, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business: Option<Business>,
    /// Booked service, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<Service>,
    /// Assigned employee, when requested and present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee: Option<Employee>,
}

impl BookingAggregate {
    /// Aggregate with no relations loaded.
    #[must_use]
    pub fn bare(booking: Booking) -> Self {
        Self {
            booking,
            user: None,
            business: None,
            service: None,
            employee: None,
        }
    }
}
