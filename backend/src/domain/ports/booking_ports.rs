//! Driving ports for reservations.

use async_trait::async_trait;

use crate::domain::{
    Booking, BookingAggregate, BookingId, BookingRequest, BookingSpecification, UserId,
};

use super::{OutcomeCall, ServiceCall};

/// Read-side booking use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingQuery: Send + Sync {
    /// Load a booking visible to `caller` (its customer or business owner).
    async fn get_booking(
        &self,
        caller: UserId,
        id: BookingId,
        spec: BookingSpecification,
    ) -> ServiceCall<BookingAggregate>;

    /// Load the caller's own bookings.
    async fn list_bookings(
        &self,
        caller: UserId,
        spec: BookingSpecification,
    ) -> ServiceCall<Vec<BookingAggregate>>;
}

/// Write-side booking use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingCommand: Send + Sync {
    /// Reserve a slot for `caller`; 201 with the stored booking on success.
    async fn create_booking(&self, caller: UserId, request: BookingRequest)
    -> ServiceCall<Booking>;

    /// Cancel one of the caller's bookings; 204 on success.
    async fn cancel_booking(&self, caller: UserId, id: BookingId) -> OutcomeCall;
}
