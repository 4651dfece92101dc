//! Driven port for reservations.
use async_trait::async_trait;

use crate::domain::{
    Booking, BookingAggregate, BookingId, BookingSpecification, BookingStatus, NewBooking, UserId,
};

use super::RepositoryError;

/// Data access for bookings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Fetch a booking with exactly the relations flagged in `spec`.
    async fn find_booking(
        &self,
        id: BookingId,
        spec: BookingSpecification,
    ) -> Result<Option<BookingAggregate>, RepositoryError>;

    /// Bookings made by `user`, ordered by start time.
    async fn list_bookings_for_user(
        &self,
        user: UserId,
        spec: BookingSpecification,
    ) -> Result<Vec<BookingAggregate>, RepositoryError>;

    /// Store `candidate` as a confirmed booking unless its slot is taken.
    ///
    /// A slot is taken when a confirmed booking overlaps it on the
    /// employee's calendar, or on the service's calendar when the candidate
    /// names no employee. The check and the insert are one atomic step.
    /// Returns `None` when the slot is taken.
    async fn insert_if_free(
        &self,
        candidate: NewBooking,
    ) -> Result<Option<Booking>, RepositoryError>;

    /// Change a booking's status. Returns `false` when no such booking exists.
    async fn update_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> Result<bool, RepositoryError>;
}
