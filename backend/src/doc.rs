//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint of the inbound layer, the
//! response schemas they reference, and the bearer-token security scheme.
//! The document backs Swagger UI in debug builds and is exported by
//! `cargo run --bin openapi-dump`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    Address, Booking, BookingAggregate, BookingRequest, BookingStatus, Business,
    BusinessAggregate, BusinessImage, BusinessSettings, Employee, Favorite, Registration, Review,
    Role, ScheduleEntry, Service, ServiceAggregate, ServiceGroup, User, UserAggregate,
};
use crate::inbound::http::FailureMessage;
use crate::middleware::FailureBody;

/// Enrich the generated document with the bearer security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("HS256 token carrying `sub`, `email` and `role` claims."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Booking backend API",
        description = "Businesses, services and bookings. Unexpected failures share one JSON body \
                       carrying the request's trace id."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::accounts::current_user,
        crate::inbound::http::accounts::delete_current_user,
        crate::inbound::http::businesses::list_businesses,
        crate::inbound::http::businesses::get_business,
        crate::inbound::http::services::get_service,
        crate::inbound::http::bookings::list_bookings,
        crate::inbound::http::bookings::get_booking,
        crate::inbound::http::bookings::create_booking,
        crate::inbound::http::bookings::cancel_booking,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        FailureBody,
        FailureMessage,
        User,
        Role,
        Review,
        Favorite,
        UserAggregate,
        Business,
        Address,
        Registration,
        BusinessSettings,
        ScheduleEntry,
        BusinessImage,
        Employee,
        BusinessAggregate,
        Service,
        ServiceGroup,
        ServiceAggregate,
        Booking,
        BookingStatus,
        BookingRequest,
        BookingAggregate,
    )),
    tags(
        (name = "accounts", description = "The caller's own account"),
        (name = "businesses", description = "Business directory"),
        (name = "services", description = "Bookable services"),
        (name = "bookings", description = "The caller's bookings"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
