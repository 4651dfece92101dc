//! Reservation use cases.
//!
//! Rule violations (slot in the past, overlapping booking, wrong owner) are
//! reported through the envelope with a 4xx status. Repository failures are
//! propagated untouched.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use mockable::Clock;

use crate::domain::ports::{
    BookingCommand, BookingQuery, BookingRepository, BusinessRepository, OutcomeCall,
    RepositoryError, ServiceCall, ServiceRepository,
};
use crate::domain::{
    Booking, BookingAggregate, BookingId, BookingRequest, BookingSpecification, BookingStatus,
    BusinessAggregate, BusinessId, BusinessSettings, BusinessSpecification, NewBooking,
    ServiceAggregate, ServiceOutcome, ServiceResult, ServiceSpecification, UserId,
};

pub(crate) const BOOKING_NOT_FOUND: &str = "Booking not found";
pub(crate) const SERVICE_NOT_FOUND: &str = "Service not found";
pub(crate) const BUSINESS_NOT_FOUND: &str = "Business not found";
pub(crate) const BOOKING_FORBIDDEN: &str = "You do not have access to this booking";
pub(crate) const START_IN_PAST: &str = "Booking must start in the future";
pub(crate) const ONLINE_BOOKING_DISABLED: &str = "Business does not accept online bookings";
pub(crate) const FOREIGN_EMPLOYEE: &str = "Employee does not work at this business";
pub(crate) const SLOT_TAKEN: &str = "Requested slot is already booked";
pub(crate) const ALREADY_CANCELLED: &str = "Booking is already cancelled";
pub(crate) const NOTICE_PERIOD_PASSED: &str = "Cancellation notice period has passed";

const CREATED: u16 = 201;
const NO_CONTENT: u16 = 204;
const NOT_FOUND: u16 = 404;
const FORBIDDEN: u16 = 403;
const CONFLICT: u16 = 409;

/// Booking service implementing [`BookingQuery`] and [`BookingCommand`].
#[derive(Clone)]
pub struct BookingService<K, S, B> {
    bookings: Arc<K>,
    services: Arc<S>,
    businesses: Arc<B>,
    clock: Arc<dyn Clock>,
}

impl<K, S, B> BookingService<K, S, B> {
    /// Create a new service with the given repositories and clock.
    #[must_use]
    pub fn new(
        bookings: Arc<K>,
        services: Arc<S>,
        businesses: Arc<B>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            bookings,
            services,
            businesses,
            clock,
        }
    }
}

impl<K, S, B> BookingService<K, S, B>
where
    K: BookingRepository,
    S: ServiceRepository,
    B: BusinessRepository,
{
    async fn load_business(
        &self,
        id: BusinessId,
        spec: BusinessSpecification,
    ) -> Result<Option<BusinessAggregate>, RepositoryError> {
        self.businesses.find_business(id, spec).await
    }

    fn is_visible_to(aggregate: &BookingAggregate, caller: UserId) -> bool {
        aggregate.booking.user_id == caller
            || aggregate
                .business
                .as_ref()
                .is_some_and(|business| business.owner_id == caller)
    }
}

#[async_trait]
impl<K, S, B> BookingQuery for BookingService<K, S, B>
where
    K: BookingRepository,
    S: ServiceRepository,
    B: BusinessRepository,
{
    async fn get_booking(
        &self,
        caller: UserId,
        id: BookingId,
        spec: BookingSpecification,
    ) -> ServiceCall<BookingAggregate> {
        let lookup = BookingSpecification {
            include_business: true,
            ..spec
        };
        let Some(mut aggregate) = self.bookings.find_booking(id, lookup).await? else {
            return Ok(ServiceResult::not_found(BOOKING_NOT_FOUND));
        };
        if !Self::is_visible_to(&aggregate, caller) {
            tracing::debug!(booking_id = %id, caller = %caller, "booking access denied");
            return Ok(ServiceResult::forbidden(BOOKING_FORBIDDEN));
        }
        if !spec.include_business {
            aggregate.business = None;
        }
        Ok(ServiceResult::success(aggregate))
    }

    async fn list_bookings(
        &self,
        caller: UserId,
        spec: BookingSpecification,
    ) -> ServiceCall<Vec<BookingAggregate>> {
        let bookings = self.bookings.list_bookings_for_user(caller, spec).await?;
        Ok(ServiceResult::success(bookings))
    }
}

#[async_trait]
impl<K, S, B> BookingCommand for BookingService<K, S, B>
where
    K: BookingRepository,
    S: ServiceRepository,
    B: BusinessRepository,
{
    async fn create_booking(
        &self,
        caller: UserId,
        request: BookingRequest,
    ) -> ServiceCall<Booking> {
        if request.starts_at <= self.clock.utc() {
            return Ok(ServiceResult::failure(START_IN_PAST));
        }

        let Some(ServiceAggregate { service, .. }) = self
            .services
            .find_service(request.service_id, ServiceSpecification::default())
            .await?
        else {
            return Ok(ServiceResult::not_found(SERVICE_NOT_FOUND));
        };

        let business_spec = BusinessSpecification {
            include_settings: true,
            include_employees: true,
            ..BusinessSpecification::default()
        };
        let Some(business) = self.load_business(service.business_id, business_spec).await? else {
            return Ok(ServiceResult::not_found(BUSINESS_NOT_FOUND));
        };

        let settings = business.settings.unwrap_or_default();
        if !settings.accepts_online_bookings {
            return Ok(ServiceResult::failure(ONLINE_BOOKING_DISABLED));
        }

        let employee_id = request.employee_id.or(service.employee_id);
        if let Some(requested) = employee_id {
            let employs = business
                .employees
                .as_deref()
                .unwrap_or_default()
                .iter()
                .any(|employee| employee.id == requested);
            if !employs {
                return Ok(ServiceResult::failure(FOREIGN_EMPLOYEE));
            }
        }

        let candidate = NewBooking {
            user_id: caller,
            business_id: service.business_id,
            service_id: service.id,
            employee_id,
            starts_at: request.starts_at,
            ends_at: request.starts_at + Duration::minutes(i64::from(service.duration_minutes)),
        };
        let Some(booking) = self.bookings.insert_if_free(candidate).await? else {
            return Ok(ServiceResult::conflict(SLOT_TAKEN));
        };
        tracing::info!(
            booking_id = %booking.id,
            user_id = %caller,
            service_id = %booking.service_id,
            "booking created"
        );
        Ok(ServiceResult::success_with_status(booking, CREATED))
    }

    async fn cancel_booking(&self, caller: UserId, id: BookingId) -> OutcomeCall {
        let Some(aggregate) = self
            .bookings
            .find_booking(id, BookingSpecification::default())
            .await?
        else {
            return Ok(ServiceOutcome::failure_with_status(BOOKING_NOT_FOUND, NOT_FOUND));
        };
        let booking = aggregate.booking;
        if booking.user_id != caller {
            return Ok(ServiceOutcome::failure_with_status(BOOKING_FORBIDDEN, FORBIDDEN));
        }
        if booking.status == BookingStatus::Cancelled {
            return Ok(ServiceOutcome::failure_with_status(ALREADY_CANCELLED, CONFLICT));
        }

        let settings_spec = BusinessSpecification {
            include_settings: true,
            ..BusinessSpecification::default()
        };
        let settings = self
            .load_business(booking.business_id, settings_spec)
            .await?
            .and_then(|business| business.settings)
            .unwrap_or_else(BusinessSettings::default);
        let notice = Duration::hours(i64::from(settings.cancellation_notice_hours));
        if booking.starts_at - self.clock.utc() < notice {
            return Ok(ServiceOutcome::failure(NOTICE_PERIOD_PASSED));
        }

        if !self
            .bookings
            .update_status(id, BookingStatus::Cancelled)
            .await?
        {
            return Ok(ServiceOutcome::failure_with_status(BOOKING_NOT_FOUND, NOT_FOUND));
        }
        tracing::info!(booking_id = %id, user_id = %caller, "booking cancelled");
        Ok(ServiceOutcome::success_with_status(NO_CONTENT))
    }
}

#[cfg(test)]
#[path = "booking_service_tests.rs"]
mod tests;
