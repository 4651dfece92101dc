//! Last-resort failure boundary around the API.
//!
//! Each request moves from *running* to either *completed* or *faulted*.
//! A request is faulted when the downstream pipeline
//! - responds with a [`Fault`] attached (a handler returned `Err`),
//! - returns `Err` from the service call itself, or
//! - panics while building or polling the downstream future.
//!
//! A faulted request is recorded once through the [`FailureSink`] and then
//! answered with a JSON [`FailureBody`]. Faults keep the original request;
//! service errors and panics consume it, so those answers travel outward as
//! an `Err` wrapping the finished JSON response. Development mode exposes the raw
//! message and stack trace; production mode replaces both with a fixed
//! message. The boundary never retries and never raises: a panicking sink is
//! contained and a body that fails to serialise falls back to a literal.
//!
//! Completed responses, including handled 4xx errors such as extractor
//! rejections or envelope failures, pass through untouched.

use std::any::Any;
use std::backtrace::Backtrace;
use std::cell::RefCell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Once};
use std::task::{Context, Poll};

use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{Error, HttpRequest, HttpResponse};
use futures_util::FutureExt;
use futures_util::future::{LocalBoxFuture, Ready, ready};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::domain::TraceId;
use crate::inbound::http::Fault;

/// Client message for unexpected failures outside development mode.
pub const GENERIC_FAILURE_MESSAGE: &str = "An unexpected error occurred.";
/// Client message for identity failures outside development mode.
pub const GENERIC_UNAUTHORIZED_MESSAGE: &str = "Authentication is required.";

/// How much diagnostic detail failure responses may carry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeploymentMode {
    /// Local development: raw messages and stack traces are returned.
    Development,
    /// Anything else: responses are redacted.
    #[default]
    Production,
}

impl DeploymentMode {
    /// Mode named by an environment setting.
    ///
    /// Only `development`/`dev` enable diagnostics. Every other name,
    /// including typos, selects production and logs a warning.
    ///
    /// # Examples
    /// ```
    /// use booking_backend::middleware::DeploymentMode;
    ///
    /// assert_eq!(DeploymentMode::from_name(" Dev "), DeploymentMode::Development);
    /// assert_eq!(DeploymentMode::from_name("staging"), DeploymentMode::Production);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Self::Development,
            "production" | "prod" => Self::Production,
            _ => {
                warn!(environment = name, "unknown deployment mode; using production");
                Self::Production
            }
        }
    }

    /// Whether raw diagnostics may reach clients.
    #[must_use]
    pub const fn exposes_diagnostics(self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Where a faulted request's failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureOrigin {
    /// A handler returned a [`Fault`].
    Fault,
    /// The downstream service call returned `Err`.
    ServiceError,
    /// The downstream pipeline panicked.
    Panic,
}

impl fmt::Display for FailureOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fault => "fault",
            Self::ServiceError => "service_error",
            Self::Panic => "panic",
        })
    }
}

/// Everything the operational log receives about one faulted request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRecord {
    /// Correlation id of the faulted request.
    pub trace_id: TraceId,
    /// Status the client receives.
    pub status: StatusCode,
    /// Raw, unredacted message.
    pub message: String,
    /// Stack trace at the point of failure.
    pub stack_trace: String,
    /// Which path produced the failure.
    pub origin: FailureOrigin,
}

/// Receives failure records. Implementations must not block.
#[cfg_attr(test, mockall::automock)]
pub trait FailureSink: Send + Sync {
    /// Record one faulted request.
    fn record(&self, record: &FailureRecord);
}

/// Sink writing failure records as `tracing` error events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingFailureSink;

impl FailureSink for TracingFailureSink {
    fn record(&self, record: &FailureRecord) {
        error!(
            trace_id = %record.trace_id,
            status = record.status.as_u16(),
            origin = %record.origin,
            error = %record.message,
            stack_trace = %record.stack_trace,
            "unhandled request failure"
        );
    }
}

/// JSON body written for a faulted request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FailureBody {
    /// HTTP status, repeated in the body.
    pub status_code: u16,
    /// Raw message in development, generic message otherwise.
    pub message: String,
    /// Correlation identifier matching the log record and `trace-id` header.
    pub trace_id: String,
    /// Stack trace; development mode only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,
}

impl FailureBody {
    fn for_record(record: &FailureRecord, mode: DeploymentMode) -> Self {
        let status_code = record.status.as_u16();
        let trace_id = record.trace_id.to_string();
        if mode.exposes_diagnostics() {
            Self {
                status_code,
                message: record.message.clone(),
                trace_id,
                stack_trace: Some(record.stack_trace.clone()),
            }
        } else {
            Self::redacted(record.status, trace_id)
        }
    }

    fn redacted(status: StatusCode, trace_id: String) -> Self {
        let message = if status == StatusCode::UNAUTHORIZED {
            GENERIC_UNAUTHORIZED_MESSAGE
        } else {
            GENERIC_FAILURE_MESSAGE
        };
        Self {
            status_code: status.as_u16(),
            message: message.to_owned(),
            trace_id,
            stack_trace: None,
        }
    }

    fn into_response(self) -> HttpResponse {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let payload = serde_json::to_string(&self).unwrap_or_else(|error| {
            warn!(%error, trace_id = %self.trace_id, "failed to serialise failure body");
            format!(
                r#"{{"statusCode":500,"message":"{GENERIC_FAILURE_MESSAGE}","traceId":"{}"}}"#,
                self.trace_id
            )
        });
        HttpResponse::build(status)
            .content_type(ContentType::json())
            .body(payload)
    }
}

/// Redacted failure response for the current request.
///
/// Used by [`Fault`]'s `ResponseError` fallback when no boundary is installed.
pub(crate) fn redacted_response(status: StatusCode) -> HttpResponse {
    let trace_id = TraceId::current_or_generate();
    FailureBody::redacted(status, trace_id.to_string()).into_response()
}

thread_local! {
    static PANIC_TRACE: RefCell<Option<String>> = const { RefCell::new(None) };
}

static PANIC_HOOK: Once = Once::new();

/// Chain a hook that keeps the panicking thread's backtrace for
/// [`Failure::from_panic`]. By the time `catch_unwind` returns the stack has
/// already unwound.
fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let trace = Backtrace::force_capture().to_string();
            PANIC_TRACE.with(|slot| *slot.borrow_mut() = Some(trace));
            previous(info);
        }));
    });
}

fn take_panic_trace() -> Option<String> {
    PANIC_TRACE.with(|slot| slot.borrow_mut().take())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "panic with non-string payload".to_owned())
}

/// A faulted request before it is recorded and rendered.
struct Failure {
    status: StatusCode,
    message: String,
    stack_trace: String,
    origin: FailureOrigin,
}

impl Failure {
    fn from_fault(fault: &Fault) -> Self {
        Self {
            status: fault.status(),
            message: fault.message().to_owned(),
            stack_trace: fault.trace().to_owned(),
            origin: FailureOrigin::Fault,
        }
    }

    fn from_service_error(error: &Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: error.to_string(),
            stack_trace: format!("{error:?}"),
            origin: FailureOrigin::ServiceError,
        }
    }

    fn from_panic(payload: &(dyn Any + Send)) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: panic_message(payload),
            stack_trace: take_panic_trace()
                .unwrap_or_else(|| Backtrace::force_capture().to_string()),
            origin: FailureOrigin::Panic,
        }
    }

    fn settle(self, mode: DeploymentMode, sink: &dyn FailureSink) -> HttpResponse {
        let record = FailureRecord {
            trace_id: TraceId::current_or_generate(),
            status: self.status,
            message: self.message,
            stack_trace: self.stack_trace,
            origin: self.origin,
        };
        // Logging is fire-and-forget: a panicking sink must not abort the response.
        if panic::catch_unwind(AssertUnwindSafe(|| sink.record(&record))).is_err() {
            warn!(trace_id = %record.trace_id, "failure sink panicked");
        }
        FailureBody::for_record(&record, mode).into_response()
    }
}

enum Settled<B> {
    Completed(ServiceResponse<B>),
    /// Faulted with the request still at hand.
    Answered(HttpRequest, Failure),
    /// Faulted after the request was consumed.
    Faulted(Failure),
}

impl<B> Settled<B> {
    fn from_response(response: ServiceResponse<B>) -> Self {
        let fault = response
            .response()
            .error()
            .and_then(|error| error.as_error::<Fault>())
            .map(Failure::from_fault);
        match fault {
            Some(failure) => {
                let (request, _) = response.into_parts();
                Self::Answered(request, failure)
            }
            None => Self::Completed(response),
        }
    }
}

/// Middleware translating unhandled failures into JSON responses.
///
/// Install it around every API route with only the `Trace` layer outside, so
/// the correlation id is in scope when a failure is recorded.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use booking_backend::middleware::{DeploymentMode, FailureBoundary, Trace};
///
/// let app = App::new()
///     .wrap(FailureBoundary::new(DeploymentMode::Production))
///     .wrap(Trace);
/// ```
#[derive(Clone)]
pub struct FailureBoundary {
    mode: DeploymentMode,
    sink: Arc<dyn FailureSink>,
}

impl FailureBoundary {
    /// Boundary logging through [`TracingFailureSink`].
    ///
    /// Also installs, once per process, the panic hook that keeps panic
    /// backtraces for failure records.
    #[must_use]
    pub fn new(mode: DeploymentMode) -> Self {
        install_panic_hook();
        Self {
            mode,
            sink: Arc::new(TracingFailureSink),
        }
    }

    /// Replace the sink that receives failure records.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn FailureSink>) -> Self {
        self.sink = sink;
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for FailureBoundary
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = FailureBoundaryMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(FailureBoundaryMiddleware {
            service,
            mode: self.mode,
            sink: Arc::clone(&self.sink),
        }))
    }
}

/// Service wrapper produced by [`FailureBoundary`].
pub struct FailureBoundaryMiddleware<S> {
    service: S,
    mode: DeploymentMode,
    sink: Arc<dyn FailureSink>,
}

impl<S, B> Service<ServiceRequest> for FailureBoundaryMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let mode = self.mode;
        let sink = Arc::clone(&self.sink);
        let called = panic::catch_unwind(AssertUnwindSafe(|| self.service.call(req)));

        Box::pin(async move {
            let settled = match called {
                Ok(fut) => match AssertUnwindSafe(fut).catch_unwind().await {
                    Ok(Ok(response)) => Settled::from_response(response),
                    Ok(Err(error)) => Settled::Faulted(Failure::from_service_error(&error)),
                    Err(payload) => Settled::Faulted(Failure::from_panic(payload.as_ref())),
                },
                Err(payload) => Settled::Faulted(Failure::from_panic(payload.as_ref())),
            };

            match settled {
                Settled::Completed(response) => Ok(response.map_into_left_body()),
                Settled::Answered(request, failure) => {
                    let response = failure.settle(mode, sink.as_ref());
                    Ok(ServiceResponse::new(request, response).map_into_right_body())
                }
                Settled::Faulted(failure) => {
                    let cause = failure.message.clone();
                    let response = failure.settle(mode, sink.as_ref());
                    Err(InternalError::from_response(cause, response).into())
                }
            }
        })
    }
}

#[cfg(test)]
#[path = "failure_tests.rs"]
mod tests;
