//! Test utilities for the backend crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`, via
//! the `test-support` feature). The application assembled here mirrors the
//! production wiring over the demo catalogue, with a fixed clock and static
//! bearer tokens.

use std::sync::Arc;

use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::{DateTime, Local, Utc};
use mockable::Clock;

use crate::domain::ports::FixtureTokenVerifier;
use crate::domain::{
    AccountService, BookingService, Claim, ClaimKind, DirectoryService, Principal, Role,
};
use crate::inbound::http::api_routes;
use crate::inbound::http::state::HttpState;
use crate::middleware::{Authenticate, DeploymentMode, FailureBoundary, FailureSink, Trace};
use crate::outbound::memory::{InMemoryStore, demo_slot};

/// Token for demo user 1 (admin).
pub const ADMIN_TOKEN: &str = "admin-token";
/// Token for demo user 2, who owns both demo businesses.
pub const OWNER_TOKEN: &str = "owner-token";
/// Token for demo user 3, a customer with bookings 1 and 3.
pub const CUSTOMER_TOKEN: &str = "customer-token";
/// Token for demo user 4, a customer with booking 2.
pub const OTHER_CUSTOMER_TOKEN: &str = "other-customer-token";
/// Token whose principal carries only an email claim.
pub const EMAIL_ONLY_TOKEN: &str = "email-only-token";
/// Token whose user id claim is not an integer.
pub const MALFORMED_TOKEN: &str = "malformed-token";

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    /// Freeze the clock at `now`.
    pub const fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.now
    }
}

/// "Now" for demo-backed tests: 2031-05-01 09:00 UTC, before every demo
/// booking.
pub fn demo_now() -> DateTime<Utc> {
    demo_slot(1, 9, 0)
}

fn principal(user_id: &str, role: Role) -> Principal {
    Principal::authenticated(vec![
        Claim::new(ClaimKind::NameIdentifier, user_id),
        Claim::new(ClaimKind::Role, role.as_str()),
    ])
}

/// Verifier accepting the tokens declared in this module.
pub fn fixture_verifier() -> FixtureTokenVerifier {
    FixtureTokenVerifier::default()
        .with_token(ADMIN_TOKEN, principal("1", Role::Admin))
        .with_token(OWNER_TOKEN, principal("2", Role::BusinessOwner))
        .with_token(CUSTOMER_TOKEN, principal("3", Role::Customer))
        .with_token(OTHER_CUSTOMER_TOKEN, principal("4", Role::Customer))
        .with_token(
            EMAIL_ONLY_TOKEN,
            Principal::authenticated(vec![Claim::new(ClaimKind::Email, "guest@example.com")]),
        )
        .with_token(
            MALFORMED_TOKEN,
            Principal::authenticated(vec![Claim::new(ClaimKind::NameIdentifier, "abc")]),
        )
}

/// Handler state over a fresh demo store.
pub fn demo_state(clock: Arc<dyn Clock>) -> HttpState {
    let store = Arc::new(InMemoryStore::demo());
    HttpState::from_services(
        Arc::new(AccountService::new(Arc::clone(&store))),
        Arc::new(DirectoryService::new(Arc::clone(&store), Arc::clone(&store))),
        Arc::new(BookingService::new(
            Arc::clone(&store),
            Arc::clone(&store),
            store,
            clock,
        )),
    )
}

/// The full middleware stack over the demo catalogue.
pub fn demo_app(
    mode: DeploymentMode,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<EitherBody<BoxBody>>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    app_with_boundary(FailureBoundary::new(mode))
}

/// Like [`demo_app`], recording failures into `sink`.
pub fn demo_app_with_sink(
    mode: DeploymentMode,
    sink: Arc<dyn FailureSink>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<EitherBody<BoxBody>>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    app_with_boundary(FailureBoundary::new(mode).with_sink(sink))
}

fn app_with_boundary(
    boundary: FailureBoundary,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<EitherBody<BoxBody>>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(demo_state(Arc::new(FixedClock::at(demo_now())))))
        .wrap(Authenticate::new(Arc::new(fixture_verifier())))
        .wrap(boundary)
        .wrap(Trace)
        .configure(api_routes)
}
