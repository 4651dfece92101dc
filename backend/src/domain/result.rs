//! Uniform outcome envelope returned by service-layer operations.
//!
//! Services report expected business failures (missing records, invalid
//! requests, conflicts) through these envelopes instead of returning errors,
//! so every inbound adapter applies one translation rule: a success carries a
//! payload and a status, a failure carries a message and a status.
//!
//! Unexpected failures (infrastructure faults, programming errors) never
//! travel inside an envelope; see [`crate::domain::ports::ServiceCall`].

/// Status used by [`ServiceResult::success`] and [`ServiceOutcome::success`].
pub const DEFAULT_SUCCESS_STATUS: u16 = 200;
/// Status used by [`ServiceResult::failure`] and [`ServiceOutcome::failure`].
pub const DEFAULT_FAILURE_STATUS: u16 = 400;

const NOT_FOUND_STATUS: u16 = 404;
const FORBIDDEN_STATUS: u16 = 403;
const CONFLICT_STATUS: u16 = 409;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Outcome<T> {
    Data(T),
    Failure(String),
}

/// Success or failure of a service call that produces a payload.
///
/// ## Invariants
/// - Exactly one of the payload or the error message is present.
/// - The envelope is immutable once constructed.
///
/// # Examples
/// ```
/// use booking_backend::domain::ServiceResult;
///
/// let ok = ServiceResult::success(vec![1, 2, 3]);
/// assert!(ok.is_success());
/// assert_eq!(ok.status_code(), 200);
///
/// let missing: ServiceResult<Vec<i32>> = ServiceResult::not_found("no such booking");
/// assert_eq!(missing.error_message(), Some("no such booking"));
/// assert!(missing.data().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceResult<T> {
    status_code: u16,
    outcome: Outcome<T>,
}

impl<T> ServiceResult<T> {
    /// Successful outcome with status 200.
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self::success_with_status(data, DEFAULT_SUCCESS_STATUS)
    }

    /// Successful outcome with an explicit status, e.g. 201 for creations.
    #[must_use]
    pub const fn success_with_status(data: T, status_code: u16) -> Self {
        Self {
            status_code,
            outcome: Outcome::Data(data),
        }
    }

    /// Failed outcome with status 400.
    ///
    /// The message is expected to be non-empty; it is not validated here.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self::failure_with_status(message, DEFAULT_FAILURE_STATUS)
    }

    /// Failed outcome with an explicit status.
    #[must_use]
    pub fn failure_with_status(message: impl Into<String>, status_code: u16) -> Self {
        Self {
            status_code,
            outcome: Outcome::Failure(message.into()),
        }
    }

    /// Failed outcome with status 404.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::failure_with_status(message, NOT_FOUND_STATUS)
    }

    /// Failed outcome with status 403.
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::failure_with_status(message, FORBIDDEN_STATUS)
    }

    /// Failed outcome with status 409.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::failure_with_status(message, CONFLICT_STATUS)
    }

    /// Whether the operation completed as intended.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Data(_))
    }

    /// Semantic status of the outcome.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Payload of a successful outcome.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        match &self.outcome {
            Outcome::Data(data) => Some(data),
            Outcome::Failure(_) => None,
        }
    }

    /// Human-readable cause of a failed outcome.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Data(_) => None,
            Outcome::Failure(message) => Some(message.as_str()),
        }
    }

    /// Consume the envelope, yielding the payload or the failure message.
    ///
    /// # Errors
    /// Returns the failure message when the envelope is a failure.
    pub fn into_result(self) -> Result<T, String> {
        match self.outcome {
            Outcome::Data(data) => Ok(data),
            Outcome::Failure(message) => Err(message),
        }
    }

    /// Transform the payload of a success, keeping the status.
    ///
    /// Failures are carried over unchanged, which lets a service forward a
    /// failure produced for a different payload type.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ServiceResult<U> {
        let outcome = match self.outcome {
            Outcome::Data(data) => Outcome::Data(f(data)),
            Outcome::Failure(message) => Outcome::Failure(message),
        };
        ServiceResult {
            status_code: self.status_code,
            outcome,
        }
    }
}

/// Success or failure of a service call without a payload.
///
/// # Examples
/// ```
/// use booking_backend::domain::ServiceOutcome;
///
/// let deleted = ServiceOutcome::success_with_status(204);
/// assert!(deleted.is_success());
/// assert!(deleted.error_message().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceOutcome {
    status_code: u16,
    error_message: Option<String>,
}

impl ServiceOutcome {
    /// Successful outcome with status 200.
    #[must_use]
    pub const fn success() -> Self {
        Self::success_with_status(DEFAULT_SUCCESS_STATUS)
    }

    /// Successful outcome with an explicit status.
    #[must_use]
    pub const fn success_with_status(status_code: u16) -> Self {
        Self {
            status_code,
            error_message: None,
        }
    }

    /// Failed outcome with status 400.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self::failure_with_status(message, DEFAULT_FAILURE_STATUS)
    }

    /// Failed outcome with an explicit status.
    #[must_use]
    pub fn failure_with_status(message: impl Into<String>, status_code: u16) -> Self {
        Self {
            status_code,
            error_message: Some(message.into()),
        }
    }

    /// Whether the operation completed as intended.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.error_message.is_none()
    }

    /// Semantic status of the outcome.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Human-readable cause of a failed outcome.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

impl<T> From<ServiceResult<T>> for ServiceOutcome {
    fn from(value: ServiceResult<T>) -> Self {
        let status_code = value.status_code;
        match value.outcome {
            Outcome::Data(_) => Self::success_with_status(status_code),
            Outcome::Failure(message) => Self::failure_with_status(message, status_code),
        }
    }
}
