//! Assembly of aggregates from flat rows.
//!
//! Each relation is loaded only when its specification flag is set; an unset
//! flag always yields `None`. A requested single-valued relation with no row
//! is also `None`, a requested collection with no rows is an empty list.

use crate::domain::{
    Booking, BookingAggregate, BookingSpecification, Business, BusinessAggregate, BusinessId,
    BusinessSpecification, Service, ServiceAggregate, ServiceSpecification, User, UserAggregate,
    UserSpecification,
};

use super::dataset::Dataset;

pub(super) fn user_aggregate(data: &Dataset, user: &User, spec: UserSpecification) -> UserAggregate {
    let id = user.id;
    UserAggregate {
        user: user.clone(),
        bookings: spec.include_bookings.then(|| {
            data.bookings
                .iter()
                .filter(|booking| booking.user_id == id)
                .cloned()
                .collect()
        }),
        reviews: spec.include_reviews.then(|| {
            data.reviews
                .iter()
                .filter(|review| review.user_id == id)
                .cloned()
                .collect()
        }),
        favorites: spec.include_favorites.then(|| {
            data.favorites
                .iter()
                .filter(|favorite| favorite.user_id == id)
                .copied()
                .collect()
        }),
    }
}

pub(super) fn business_aggregate(
    data: &Dataset,
    business: &Business,
    spec: BusinessSpecification,
) -> BusinessAggregate {
    let id = business.id;
    BusinessAggregate {
        business: business.clone(),
        address: spec
            .include_address
            .then(|| data.addresses.get(&id).cloned())
            .flatten(),
        registration: spec
            .include_registration
            .then(|| data.registrations.get(&id).cloned())
            .flatten(),
        settings: spec
            .include_settings
            .then(|| data.settings.get(&id).copied().unwrap_or_default()),
        schedule: spec
            .include_schedule
            .then(|| data.schedules.get(&id).cloned().unwrap_or_default()),
        images: spec
            .include_images
            .then(|| data.images.get(&id).cloned().unwrap_or_default()),
        employees: spec.include_employees.then(|| {
            data.employees
                .iter()
                .filter(|employee| employee.business_id == id)
                .cloned()
                .collect()
        }),
        services: spec.include_services.then(|| {
            data.services
                .iter()
                .filter(|service| service.business_id == id)
                .cloned()
                .collect()
        }),
        reviews: spec.include_reviews.then(|| {
            data.reviews
                .iter()
                .filter(|review| review.business_id == id)
                .cloned()
                .collect()
        }),
        bookings: spec.include_bookings.then(|| {
            data.bookings
                .iter()
                .filter(|booking| booking.business_id == id)
                .cloned()
                .collect()
        }),
    }
}

pub(super) fn service_aggregate(
    data: &Dataset,
    service: &Service,
    spec: ServiceSpecification,
) -> ServiceAggregate {
    ServiceAggregate {
        service: service.clone(),
        business: spec
            .include_business
            .then(|| find_business(data, service.business_id))
            .flatten(),
        employee: spec
            .include_employee
            .then(|| {
                service.employee_id.and_then(|employee_id| {
                    data.employees
                        .iter()
                        .find(|employee| employee.id == employee_id)
                        .cloned()
                })
            })
            .flatten(),
        service_group: spec
            .include_service_group
            .then(|| {
                service.service_group_id.and_then(|group_id| {
                    data.service_groups
                        .iter()
                        .find(|group| group.id == group_id)
                        .cloned()
                })
            })
            .flatten(),
    }
}

pub(super) fn booking_aggregate(
    data: &Dataset,
    booking: &Booking,
    spec: BookingSpecification,
) -> BookingAggregate {
    BookingAggregate {
        booking: booking.clone(),
        user: spec
            .include_user
            .then(|| data.users.iter().find(|user| user.id == booking.user_id).cloned())
            .flatten(),
        business: spec
            .include_business
            .then(|| find_business(data, booking.business_id))
            .flatten(),
        service: spec
            .include_service
            .then(|| {
                data.services
                    .iter()
                    .find(|service| service.id == booking.service_id)
                    .cloned()
            })
            .flatten(),
        employee: spec
            .include_employee
            .then(|| {
                booking.employee_id.and_then(|employee_id| {
                    data.employees
                        .iter()
                        .find(|employee| employee.id == employee_id)
                        .cloned()
                })
            })
            .flatten(),
    }
}

fn find_business(data: &Dataset, id: BusinessId) -> Option<Business> {
    data.businesses.iter().find(|business| business.id == id).cloned()
}
