//! Request middleware.
//!
//! Purpose: define the stages every API request passes through, outermost
//! first: [`Trace`] assigns the correlation id, [`FailureBoundary`] turns
//! unhandled failures into JSON responses, and [`Authenticate`] attaches the
//! verified caller.

pub mod authentication;
pub mod failure;
pub mod trace;

pub use authentication::Authenticate;
pub use failure::{
    DeploymentMode, FailureBody, FailureBoundary, FailureOrigin, FailureRecord, FailureSink,
    TracingFailureSink,
};
pub use trace::Trace;
