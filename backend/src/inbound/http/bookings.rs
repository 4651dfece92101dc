//! Booking handlers.
//!
//! ```text
//! GET /api/v1/bookings?includeService=true
//! GET /api/v1/bookings/{id}
//! POST /api/v1/bookings {"serviceId":1,"startsAt":"2031-05-04T10:00:00Z"}
//! DELETE /api/v1/bookings/{id}
//! ```
//!
//! Every endpoint requires a user id claim.

use actix_web::{delete, get, post, web};

use crate::domain::{
    Booking, BookingAggregate, BookingId, BookingRequest, BookingSpecification, ServiceOutcome,
    ServiceResult,
};
use crate::inbound::http::envelope::FailureMessage;
use crate::inbound::http::identity::Identity;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;
use crate::middleware::FailureBody;

/// List the caller's bookings.
#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    params(BookingSpecification),
    responses(
        (status = 200, description = "Caller's bookings", body = [BookingAggregate]),
        (status = 401, description = "Missing user id claim", body = FailureBody),
        (status = 500, description = "Unexpected failure", body = FailureBody)
    ),
    tags = ["bookings"],
    operation_id = "listBookings"
)]
#[get("/bookings")]
pub async fn list_bookings(
    state: web::Data<HttpState>,
    identity: Identity,
    spec: web::Query<BookingSpecification>,
) -> ApiResult<ServiceResult<Vec<BookingAggregate>>> {
    let caller = identity.require_user_id()?;
    Ok(state.bookings.list_bookings(caller, spec.into_inner()).await?)
}

/// Fetch one booking visible to the caller.
#[utoipa::path(
    get,
    path = "/api/v1/bookings/{id}",
    params(
        ("id" = i64, Path, description = "Booking identifier"),
        BookingSpecification
    ),
    responses(
        (status = 200, description = "Booking", body = BookingAggregate),
        (status = 401, description = "Missing user id claim", body = FailureBody),
        (status = 403, description = "Booking belongs to someone else", body = FailureMessage),
        (status = 404, description = "Booking not found", body = FailureMessage),
        (status = 500, description = "Unexpected failure", body = FailureBody)
    ),
    tags = ["bookings"],
    operation_id = "getBooking"
)]
#[get("/bookings/{id}")]
pub async fn get_booking(
    state: web::Data<HttpState>,
    identity: Identity,
    id: web::Path<BookingId>,
    spec: web::Query<BookingSpecification>,
) -> ApiResult<ServiceResult<BookingAggregate>> {
    let caller = identity.require_user_id()?;
    Ok(state
        .bookings
        .get_booking(caller, id.into_inner(), spec.into_inner())
        .await?)
}

/// Book a service slot.
#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    request_body = BookingRequest,
    responses(
        (status = 201, description = "Booking created", body = Booking),
        (status = 400, description = "Booking rules violated", body = FailureMessage),
        (status = 401, description = "Missing user id claim", body = FailureBody),
        (status = 404, description = "Service not found", body = FailureMessage),
        (status = 409, description = "Slot already taken", body = FailureMessage),
        (status = 500, description = "Unexpected failure", body = FailureBody)
    ),
    tags = ["bookings"],
    operation_id = "createBooking"
)]
#[post("/bookings")]
pub async fn create_booking(
    state: web::Data<HttpState>,
    identity: Identity,
    payload: web::Json<BookingRequest>,
) -> ApiResult<ServiceResult<Booking>> {
    let caller = identity.require_user_id()?;
    Ok(state
        .booking_commands
        .create_booking(caller, payload.into_inner())
        .await?)
}

/// Cancel one of the caller's bookings.
#[utoipa::path(
    delete,
    path = "/api/v1/bookings/{id}",
    params(("id" = i64, Path, description = "Booking identifier")),
    responses(
        (status = 204, description = "Booking cancelled"),
        (status = 400, description = "Cancellation notice window has passed", body = FailureMessage),
        (status = 401, description = "Missing user id claim", body = FailureBody),
        (status = 403, description = "Booking belongs to someone else", body = FailureMessage),
        (status = 404, description = "Booking not found", body = FailureMessage),
        (status = 409, description = "Booking already cancelled", body = FailureMessage),
        (status = 500, description = "Unexpected failure", body = FailureBody)
    ),
    tags = ["bookings"],
    operation_id = "cancelBooking"
)]
#[delete("/bookings/{id}")]
pub async fn cancel_booking(
    state: web::Data<HttpState>,
    identity: Identity,
    id: web::Path<BookingId>,
) -> ApiResult<ServiceOutcome> {
    let caller = identity.require_user_id()?;
    Ok(state
        .booking_commands
        .cancel_booking(caller, id.into_inner())
        .await?)
}
