//! Tracing middleware attaching a request-scoped trace identifier.
//!
//! Each incoming request receives a UUID [`TraceId`]. The id is held in
//! task-local storage and in a `request` span while the downstream stages
//! run, then echoed in the `trace-id` response header. The header is echoed
//! on error responses too, including when an inner stage returns `Err`.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::error::InternalError;
use actix_web::http::header::{HeaderMap, HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{Instrument, debug, error, info_span};

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Outermost stage: assigns the trace id every later stage reports.
///
/// Handlers read it through [`TraceId::current`].
///
/// # Examples
/// ```
/// use actix_web::App;
/// use booking_backend::middleware::Trace;
///
/// let app = App::new().wrap(Trace);
/// ```
#[derive(Clone)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { service }))
    }
}

/// Service wrapper produced by [`Trace`].
pub struct TraceMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = TraceId::generate();
        let span = info_span!(
            "request",
            trace_id = %trace_id,
            method = %req.method(),
            path = %req.path(),
        );
        // Inner stages may log while building their future.
        let fut = span.in_scope(|| TraceId::sync_scope(trace_id, || self.service.call(req)));
        let scoped = TraceId::scope(trace_id, async move {
            match fut.await {
                Ok(mut res) => {
                    debug!(status = res.status().as_u16(), "request completed");
                    echo_header(res.headers_mut(), trace_id);
                    Ok(res)
                }
                Err(error) => {
                    let mut response = error.error_response();
                    debug!(status = response.status().as_u16(), "request failed");
                    echo_header(response.headers_mut(), trace_id);
                    Err(InternalError::from_response(error, response).into())
                }
            }
        });
        Box::pin(scoped.instrument(span))
    }
}

fn echo_header(headers: &mut HeaderMap, trace_id: TraceId) {
    match HeaderValue::from_str(&trace_id.to_string()) {
        Ok(value) => {
            headers.insert(HeaderName::from_static(TRACE_ID_HEADER), value);
        }
        Err(error) => error!(%error, "trace id is not a valid header value"),
    }
}
