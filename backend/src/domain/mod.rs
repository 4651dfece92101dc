//! Domain primitives, aggregates, ports and services.
//!
//! Purpose: define the booking model and its use cases without any HTTP or
//! storage concerns. Inbound adapters talk to the driving ports in
//! [`ports`]; outbound adapters implement the driven ones.
//!
//! Public surface:
//! - [`ServiceResult`] / [`ServiceOutcome`]: outcome envelope of every use case.
//! - `*Specification`: which relations to load with an entity.
//! - [`Principal`] and the identity helpers: who is calling.
//! - [`TraceId`]: per-request correlation identifier.

pub mod account;
pub mod account_service;
pub mod booking;
pub mod booking_service;
pub mod business;
pub mod catalog;
pub mod directory_service;
pub mod identity;
pub mod ids;
pub mod ports;
pub mod result;
pub mod specification;
pub mod trace_id;

pub use self::account::{Favorite, Review, Role, User, UserAggregate};
pub use self::account_service::AccountService;
pub use self::booking::{Booking, BookingAggregate, BookingRequest, BookingStatus, NewBooking};
pub use self::booking_service::BookingService;
pub use self::business::{
    Address, Business, BusinessAggregate, BusinessImage, BusinessSettings, Employee,
    Registration, ScheduleEntry,
};
pub use self::catalog::{Service, ServiceAggregate, ServiceGroup};
pub use self::directory_service::DirectoryService;
pub use self::identity::{
    ADMIN_ROLE, Claim, ClaimKind, IdentityError, MISSING_USER_ID_MESSAGE, Principal, Viewer,
    email, require_user_id, role, try_user_id,
};
pub use self::ids::{
    BookingId, BusinessId, EmployeeId, ImageId, ReviewId, ServiceGroupId, ServiceId, UserId,
};
pub use self::result::{
    DEFAULT_FAILURE_STATUS, DEFAULT_SUCCESS_STATUS, ServiceOutcome, ServiceResult,
};
pub use self::specification::{
    BookingSpecification, BusinessSpecification, ServiceSpecification, UserSpecification,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
