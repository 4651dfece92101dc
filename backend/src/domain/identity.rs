//! Caller identity as seen by the domain.
//!
//! The authentication stage turns a bearer token into a [`Principal`]: an
//! authenticated flag plus a list of typed claims. The helpers in this module
//! read the well-known claims from an optional principal.
//!
//! Two flavours of user id extraction exist:
//! - [`require_user_id`] is strict. Endpoints that must know the caller use
//!   it; a missing claim is an authorization failure.
//! - [`try_user_id`] is permissive. Endpoints that merely personalise output
//!   use it; any problem yields `None`.

use std::num::ParseIntError;

use super::UserId;

/// Message carried by [`IdentityError::MissingUserId`].
pub const MISSING_USER_ID_MESSAGE: &str = "User ID claim not found in token";

/// Role value granting administrative visibility.
pub const ADMIN_ROLE: &str = "admin";

/// Well-known claim types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaimKind {
    /// Unique identifier of the subject.
    NameIdentifier,
    /// Email address of the subject.
    Email,
    /// Role assigned to the subject.
    Role,
}

/// A single typed claim asserted about the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    kind: ClaimKind,
    value: String,
}

impl Claim {
    /// Build a claim of the given kind.
    #[must_use]
    pub fn new(kind: ClaimKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// Claim type.
    #[must_use]
    pub const fn kind(&self) -> ClaimKind {
        self.kind
    }

    /// Raw claim value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// The authenticated (or anonymous) caller of a request.
///
/// # Examples
/// ```
/// use booking_backend::domain::{Claim, ClaimKind, Principal};
///
/// let principal = Principal::authenticated(vec![Claim::new(ClaimKind::Email, "a@b.c")]);
/// assert!(principal.is_authenticated());
/// assert_eq!(principal.find_claim(ClaimKind::Email), Some("a@b.c"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Principal {
    authenticated: bool,
    claims: Vec<Claim>,
}

impl Principal {
    /// Principal without claims that is not authenticated.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Authenticated principal carrying the supplied claims.
    #[must_use]
    pub const fn authenticated(claims: Vec<Claim>) -> Self {
        Self {
            authenticated: true,
            claims,
        }
    }

    /// Whether the caller passed authentication.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// All claims, in insertion order.
    #[must_use]
    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    /// Value of the first claim of the given kind.
    #[must_use]
    pub fn find_claim(&self, kind: ClaimKind) -> Option<&str> {
        self.claims
            .iter()
            .find(|claim| claim.kind == kind)
            .map(Claim::value)
    }
}

/// Failures raised by strict identity extraction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    /// No user id claim is present; the caller is not authorised.
    #[error("User ID claim not found in token")]
    MissingUserId,
    /// The user id claim is present but is not an integer.
    #[error("user id claim is not an integer: {source}")]
    MalformedUserId {
        /// Underlying parse failure.
        #[source]
        source: ParseIntError,
    },
}

impl IdentityError {
    /// Whether this failure denies access rather than signalling a defect.
    #[must_use]
    pub const fn is_authorization_denied(&self) -> bool {
        matches!(self, Self::MissingUserId)
    }
}

/// Strictly read the caller's integer user id.
///
/// # Errors
/// - [`IdentityError::MissingUserId`] when there is no principal or no
///   name-identifier claim.
/// - [`IdentityError::MalformedUserId`] when the claim is not an integer.
///
/// # Examples
/// ```
/// use booking_backend::domain::{require_user_id, Claim, ClaimKind, IdentityError, Principal};
///
/// let principal = Principal::authenticated(vec![Claim::new(ClaimKind::NameIdentifier, "42")]);
/// assert_eq!(require_user_id(Some(&principal)).map(|id| id.get()), Ok(42));
/// assert_eq!(require_user_id(None), Err(IdentityError::MissingUserId));
/// ```
pub fn require_user_id(principal: Option<&Principal>) -> Result<UserId, IdentityError> {
    let raw = principal
        .and_then(|p| p.find_claim(ClaimKind::NameIdentifier))
        .ok_or(IdentityError::MissingUserId)?;
    raw.parse()
        .map_err(|source| IdentityError::MalformedUserId { source })
}

/// Permissively read the caller's integer user id.
///
/// Returns `None` for an absent or unauthenticated principal, a missing
/// claim, or a value that does not parse. Never fails.
#[must_use]
pub fn try_user_id(principal: Option<&Principal>) -> Option<UserId> {
    principal
        .filter(|p| p.is_authenticated())?
        .find_claim(ClaimKind::NameIdentifier)?
        .parse()
        .ok()
}

/// Caller's email claim, if any.
#[must_use]
pub fn email(principal: Option<&Principal>) -> Option<&str> {
    principal.and_then(|p| p.find_claim(ClaimKind::Email))
}

/// Caller's role claim, if any.
#[must_use]
pub fn role(principal: Option<&Principal>) -> Option<&str> {
    principal.and_then(|p| p.find_claim(ClaimKind::Role))
}

/// What a possibly anonymous caller may see.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewer {
    user_id: Option<UserId>,
    is_admin: bool,
}

impl Viewer {
    /// Viewer for a caller without identity.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Build a viewer from explicit parts.
    #[must_use]
    pub const fn new(user_id: Option<UserId>, is_admin: bool) -> Self {
        Self { user_id, is_admin }
    }

    /// Derive a viewer using permissive extraction.
    #[must_use]
    pub fn from_principal(principal: Option<&Principal>) -> Self {
        let user_id = try_user_id(principal);
        let is_admin = user_id.is_some() && role(principal) == Some(ADMIN_ROLE);
        Self { user_id, is_admin }
    }

    /// Caller's user id when known.
    #[must_use]
    pub const fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    /// Whether the caller holds the admin role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// Whether the caller may see bookings belonging to `owner`.
    #[must_use]
    pub fn may_view_bookings_of(&self, owner: UserId) -> bool {
        self.is_admin || self.user_id == Some(owner)
    }
}
