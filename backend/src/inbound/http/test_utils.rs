//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, web};

use crate::domain::ports::{
    FixtureTokenVerifier, MockAccountCommand, MockAccountQuery, MockBookingCommand,
    MockBookingQuery, MockBusinessQuery, MockServiceQuery,
};
use crate::domain::{ADMIN_ROLE, Claim, ClaimKind, Principal};
use crate::inbound::http::api_routes;
use crate::inbound::http::state::HttpState;
use crate::middleware::Authenticate;

/// Bearer token resolving to customer `7`.
pub const CUSTOMER_TOKEN: &str = "customer-token";
/// Bearer token resolving to admin `1`.
pub const ADMIN_TOKEN: &str = "admin-token";

/// Driving-port mocks; unconfigured mocks fail the test if called.
#[derive(Default)]
pub struct MockPorts {
    /// Backs `HttpState::accounts`.
    pub accounts: MockAccountQuery,
    /// Backs `HttpState::account_commands`.
    pub account_commands: MockAccountCommand,
    /// Backs `HttpState::businesses`.
    pub businesses: MockBusinessQuery,
    /// Backs `HttpState::services`.
    pub services: MockServiceQuery,
    /// Backs `HttpState::bookings`.
    pub bookings: MockBookingQuery,
    /// Backs `HttpState::booking_commands`.
    pub booking_commands: MockBookingCommand,
}

impl MockPorts {
    fn into_state(self) -> HttpState {
        HttpState {
            accounts: Arc::new(self.accounts),
            account_commands: Arc::new(self.account_commands),
            businesses: Arc::new(self.businesses),
            services: Arc::new(self.services),
            bookings: Arc::new(self.bookings),
            booking_commands: Arc::new(self.booking_commands),
        }
    }
}

/// `Authorization` header carrying `token`.
pub fn bearer(token: &str) -> (actix_web::http::header::HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {token}"))
}

fn verifier() -> FixtureTokenVerifier {
    FixtureTokenVerifier::default()
        .with_token(
            CUSTOMER_TOKEN,
            Principal::authenticated(vec![Claim::new(ClaimKind::NameIdentifier, "7")]),
        )
        .with_token(
            ADMIN_TOKEN,
            Principal::authenticated(vec![
                Claim::new(ClaimKind::NameIdentifier, "1"),
                Claim::new(ClaimKind::Role, ADMIN_ROLE),
            ]),
        )
}

/// API routes over mocked ports, behind the authentication stage only.
pub fn test_app(
    ports: MockPorts,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(ports.into_state()))
        .wrap(Authenticate::new(Arc::new(verifier())))
        .configure(api_routes)
}
