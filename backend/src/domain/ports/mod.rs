//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`TokenVerifier`]) are implemented by
//! outbound adapters. Driving ports (`*Query`, `*Command`) are implemented by
//! the domain services and called by inbound adapters.
//!
//! Driving ports return [`ServiceCall`]: expected business failures travel
//! inside the [`ServiceResult`] envelope, while infrastructure failures
//! travel in the `Err` arm and are left for the failure boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account_ports;
mod booking_ports;
mod booking_repository;
mod business_repository;
mod directory_ports;
mod repository_error;
mod service_repository;
mod token_verifier;
mod user_repository;

use crate::domain::{ServiceOutcome, ServiceResult};

/// Result of a driving-port call that yields a payload.
pub type ServiceCall<T> = Result<ServiceResult<T>, RepositoryError>;

/// Result of a driving-port call without a payload.
pub type OutcomeCall = Result<ServiceOutcome, RepositoryError>;

#[cfg(test)]
pub use account_ports::{MockAccountCommand, MockAccountQuery};
pub use account_ports::{AccountCommand, AccountQuery};
#[cfg(test)]
pub use booking_ports::{MockBookingCommand, MockBookingQuery};
pub use booking_ports::{BookingCommand, BookingQuery};
#[cfg(test)]
pub use booking_repository::MockBookingRepository;
pub use booking_repository::BookingRepository;
#[cfg(test)]
pub use business_repository::MockBusinessRepository;
pub use business_repository::BusinessRepository;
#[cfg(test)]
pub use directory_ports::{MockBusinessQuery, MockServiceQuery};
pub use directory_ports::{BusinessQuery, ServiceQuery};
pub use repository_error::RepositoryError;
#[cfg(test)]
pub use service_repository::MockServiceRepository;
pub use service_repository::ServiceRepository;
#[cfg(test)]
pub use token_verifier::MockTokenVerifier;
pub use token_verifier::{FixtureTokenVerifier, TokenVerificationError, TokenVerifier};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::UserRepository;
