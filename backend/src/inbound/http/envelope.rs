//! HTTP translation of service outcome envelopes.
//!
//! Handlers return [`ServiceResult`] or [`ServiceOutcome`] directly; these
//! `Responder` impls apply the single rule for every endpoint:
//! - success: the payload as JSON with the envelope status (no body for 204),
//! - failure: `{"message": ...}` with the envelope status.

use actix_web::body::BoxBody;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::domain::{ServiceOutcome, ServiceResult};

/// Body of an expected business failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FailureMessage {
    /// Human-readable reason.
    pub message: String,
}

fn resolve_status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or_else(|_| {
        warn!(status_code = code, "envelope carries an invalid HTTP status");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

fn failure_response(status: StatusCode, message: String) -> HttpResponse {
    HttpResponse::build(status).json(FailureMessage { message })
}

impl<T> Responder for ServiceResult<T>
where
    T: Serialize,
{
    type Body = BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        let status = resolve_status(self.status_code());
        match self.into_result() {
            Ok(_) if status == StatusCode::NO_CONTENT => HttpResponse::build(status).finish(),
            Ok(data) => HttpResponse::build(status).json(data),
            Err(message) => failure_response(status, message),
        }
    }
}

impl Responder for ServiceOutcome {
    type Body = BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        let status = resolve_status(self.status_code());
        self.error_message().map_or_else(
            || HttpResponse::build(status).finish(),
            |message| failure_response(status, message.to_owned()),
        )
    }
}
