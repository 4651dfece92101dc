//! Declarative descriptions of which related data to load with an entity.
//!
//! A specification is a bag of independent boolean flags, one per relation.
//! Inbound adapters build them from query strings (for example
//! `?includeBookings=true&includeReviews=true`) and pass them by value to a
//! data-access port. Adapters must populate exactly the relations whose flag
//! is `true`; every other relation stays unloaded.
//!
//! The types carry no identifiers and no query logic. An all-`false`
//! specification (the [`Default`]) requests the bare entity.

use serde::Deserialize;
use utoipa::IntoParams;

/// Relations to attach to a booking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[serde(default, rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct BookingSpecification {
    /// Load the customer who made the booking.
    pub include_user: bool,
    /// Load the business the booking belongs to.
    pub include_business: bool,
    /// Load the booked service.
    pub include_service: bool,
    /// Load the assigned employee, when one is assigned.
    pub include_employee: bool,
}

/// Relations to attach to a business.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[serde(default, rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct BusinessSpecification {
    /// Load the postal address.
    pub include_address: bool,
    /// Load the legal registration details.
    pub include_registration: bool,
    /// Load the booking settings.
    pub include_settings: bool,
    /// Load the weekly opening schedule.
    pub include_schedule: bool,
    /// Load the gallery images.
    pub include_images: bool,
    /// Load the employees.
    pub include_employees: bool,
    /// Load the offered services.
    pub include_services: bool,
    /// Load customer reviews.
    pub include_reviews: bool,
    /// Load bookings made with the business.
    pub include_bookings: bool,
}

impl BusinessSpecification {
    /// Copy of this specification with the bookings flag cleared.
    #[must_use]
    pub const fn without_bookings(self) -> Self {
        Self {
            include_bookings: false,
            ..self
        }
    }
}

/// Relations to attach to a service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[serde(default, rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ServiceSpecification {
    /// Load the business offering the service.
    pub include_business: bool,
    /// Load the employee dedicated to the service, when one is assigned.
    pub include_employee: bool,
    /// Load the group the service is listed under.
    pub include_service_group: bool,
}

/// Relations to attach to a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[serde(default, rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UserSpecification {
    /// Load the user's bookings.
    pub include_bookings: bool,
    /// Load reviews written by the user.
    pub include_reviews: bool,
    /// Load the user's favourite businesses.
    pub include_favorites: bool,
}
