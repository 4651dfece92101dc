//! Service catalogue handler.

use actix_web::{get, web};

use crate::domain::{ServiceAggregate, ServiceId, ServiceResult, ServiceSpecification};
use crate::inbound::http::envelope::FailureMessage;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;
use crate::middleware::FailureBody;

/// Fetch one service with the requested relations.
#[utoipa::path(
    get,
    path = "/api/v1/services/{id}",
    params(
        ("id" = i64, Path, description = "Service identifier"),
        ServiceSpecification
    ),
    responses(
        (status = 200, description = "Service", body = ServiceAggregate),
        (status = 404, description = "Service not found", body = FailureMessage),
        (status = 500, description = "Unexpected failure", body = FailureBody)
    ),
    tags = ["services"],
    operation_id = "getService",
    security([])
)]
#[get("/services/{id}")]
pub async fn get_service(
    state: web::Data<HttpState>,
    id: web::Path<ServiceId>,
    spec: web::Query<ServiceSpecification>,
) -> ApiResult<ServiceResult<ServiceAggregate>> {
    Ok(state
        .services
        .get_service(id.into_inner(), spec.into_inner())
        .await?)
}
