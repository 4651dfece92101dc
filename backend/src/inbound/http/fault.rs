//! Unexpected failures raised by HTTP handlers.
//!
//! Handlers return [`ApiResult`]: expected business failures are already
//! inside the `ServiceResult` envelope, so anything reaching the `Err` arm is
//! a [`Fault`]. Any `?`-propagated error that converts into an
//! [`eyre::Report`] becomes a `Fault`; the failure boundary then logs it and
//! renders the client response.

use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use color_eyre::eyre::Report;

use crate::domain::IdentityError;
use crate::middleware::failure::redacted_response;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Fault>;

/// Classification of a [`Fault`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// The request lacks the identity the endpoint requires.
    AuthorizationDenied,
    /// Infrastructure fault or programming error.
    Unexpected,
}

/// An unrecovered failure on its way to the failure boundary.
///
/// # Examples
/// ```
/// use actix_web::http::StatusCode;
/// use booking_backend::domain::ports::RepositoryError;
/// use booking_backend::inbound::http::{Fault, FaultKind};
///
/// let fault = Fault::from(RepositoryError::connection("refused"));
/// assert_eq!(fault.kind(), FaultKind::Unexpected);
/// assert_eq!(fault.status(), StatusCode::INTERNAL_SERVER_ERROR);
/// ```
#[derive(Debug)]
pub struct Fault {
    kind: FaultKind,
    message: String,
    trace: String,
}

impl Fault {
    /// Fault classification.
    #[must_use]
    pub const fn kind(&self) -> FaultKind {
        self.kind
    }

    /// Raw failure message. Never shown to clients in production.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Diagnostic report including the cause chain.
    #[must_use]
    pub fn trace(&self) -> &str {
        &self.trace
    }

    /// HTTP status the boundary renders for this fault.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self.kind {
            FaultKind::AuthorizationDenied => StatusCode::UNAUTHORIZED,
            FaultKind::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl<E> From<E> for Fault
where
    E: Into<Report>,
{
    fn from(error: E) -> Self {
        let report: Report = error.into();
        let kind = match report.downcast_ref::<IdentityError>() {
            Some(identity) if identity.is_authorization_denied() => FaultKind::AuthorizationDenied,
            _ => FaultKind::Unexpected,
        };
        Self {
            kind,
            message: report.to_string(),
            trace: format!("{report:?}"),
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl ResponseError for Fault {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    // Used only when no failure boundary is installed; never leaks details.
    fn error_response(&self) -> HttpResponse {
        redacted_response(self.status())
    }
}
