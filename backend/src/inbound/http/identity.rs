//! Caller identity extractor for HTTP handlers.
//!
//! Wraps the [`Principal`] the `Authenticate` middleware left in the request
//! extensions, so handlers only deal with domain-level identity helpers.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{Ready, ready};

use crate::domain::{self, IdentityError, Principal, UserId, Viewer};

/// The (possibly anonymous) caller of the current request.
///
/// Extraction never fails; strictness is applied by
/// [`Identity::require_user_id`].
#[derive(Debug, Clone, Default)]
pub struct Identity(Option<Principal>);

impl Identity {
    /// Wrap an already-resolved principal.
    #[must_use]
    pub const fn new(principal: Option<Principal>) -> Self {
        Self(principal)
    }

    /// The verified principal, if any.
    #[must_use]
    pub const fn principal(&self) -> Option<&Principal> {
        self.0.as_ref()
    }

    /// Caller's user id, or an authorization-denied error.
    ///
    /// # Errors
    /// See [`domain::require_user_id`].
    pub fn require_user_id(&self) -> Result<UserId, IdentityError> {
        domain::require_user_id(self.principal())
    }

    /// Caller's user id when available.
    #[must_use]
    pub fn try_user_id(&self) -> Option<UserId> {
        domain::try_user_id(self.principal())
    }

    /// Caller's email claim.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        domain::email(self.principal())
    }

    /// Caller's role claim.
    #[must_use]
    pub fn role(&self) -> Option<&str> {
        domain::role(self.principal())
    }

    /// Visibility profile of the caller.
    #[must_use]
    pub fn viewer(&self) -> Viewer {
        Viewer::from_principal(self.principal())
    }
}

impl FromRequest for Identity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self(req.extensions().get::<Principal>().cloned())))
    }
}
