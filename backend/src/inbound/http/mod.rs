//! HTTP inbound adapter exposing REST endpoints.

pub mod accounts;
pub mod bookings;
pub mod businesses;
pub mod envelope;
pub mod fault;
pub mod health;
pub mod identity;
pub mod services;
pub mod state;
#[cfg(test)]
pub mod test_utils;

use actix_web::web;

pub use envelope::FailureMessage;
pub use fault::{ApiResult, Fault, FaultKind};
pub use identity::Identity;

/// Register every `/api/v1` endpoint.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use booking_backend::inbound::http::api_routes;
///
/// let app = App::new().configure(api_routes);
/// ```
pub fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(accounts::current_user)
            .service(accounts::delete_current_user)
            .service(businesses::list_businesses)
            .service(businesses::get_business)
            .service(services::get_service)
            .service(bookings::list_bookings)
            .service(bookings::get_booking)
            .service(bookings::create_booking)
            .service(bookings::cancel_booking),
    );
}
