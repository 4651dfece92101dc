//! Business directory handlers.
//!
//! Anonymous callers may browse; the caller's identity only widens what is
//! visible (bookings for owners and admins).

use actix_web::{get, web};

use crate::domain::{BusinessAggregate, BusinessId, BusinessSpecification, ServiceResult};
use crate::inbound::http::envelope::FailureMessage;
use crate::inbound::http::identity::Identity;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;
use crate::middleware::FailureBody;

/// List businesses with the requested relations.
#[utoipa::path(
    get,
    path = "/api/v1/businesses",
    params(BusinessSpecification),
    responses(
        (status = 200, description = "Businesses", body = [BusinessAggregate]),
        (status = 500, description = "Unexpected failure", body = FailureBody)
    ),
    tags = ["businesses"],
    operation_id = "listBusinesses",
    security((), ("BearerToken" = []))
)]
#[get("/businesses")]
pub async fn list_businesses(
    state: web::Data<HttpState>,
    identity: Identity,
    spec: web::Query<BusinessSpecification>,
) -> ApiResult<ServiceResult<Vec<BusinessAggregate>>> {
    Ok(state
        .businesses
        .list_businesses(identity.viewer(), spec.into_inner())
        .await?)
}

/// Fetch one business with the requested relations.
#[utoipa::path(
    get,
    path = "/api/v1/businesses/{id}",
    params(
        ("id" = i64, Path, description = "Business identifier"),
        BusinessSpecification
    ),
    responses(
        (status = 200, description = "Business", body = BusinessAggregate),
        (status = 404, description = "Business not found", body = FailureMessage),
        (status = 500, description = "Unexpected failure", body = FailureBody)
    ),
    tags = ["businesses"],
    operation_id = "getBusiness",
    security((), ("BearerToken" = []))
)]
#[get("/businesses/{id}")]
pub async fn get_business(
    state: web::Data<HttpState>,
    identity: Identity,
    id: web::Path<BusinessId>,
    spec: web::Query<BusinessSpecification>,
) -> ApiResult<ServiceResult<BusinessAggregate>> {
    Ok(state
        .businesses
        .get_business(identity.viewer(), id.into_inner(), spec.into_inner())
        .await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Business, UserId, Viewer};
    use crate::inbound::http::test_utils::{ADMIN_TOKEN, MockPorts, bearer, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use mockall::predicate::eq;
    use rstest::rstest;
    use serde_json::Value;

    fn salon() -> BusinessAggregate {
        BusinessAggregate::bare(Business {
            id: BusinessId::new(4),
            owner_id: UserId::new(3),
            name: "Corte Fino".to_owned(),
            description: "Barbershop".to_owned(),
        })
    }

    #[rstest]
    #[actix_web::test]
    async fn anonymous_listing_uses_anonymous_viewer() {
        let mut ports = MockPorts::default();
        ports
            .businesses
            .expect_list_businesses()
            .with(
                eq(Viewer::anonymous()),
                eq(BusinessSpecification {
                    include_address: true,
                    ..BusinessSpecification::default()
                }),
            )
            .times(1)
            .returning(|_, _| Ok(ServiceResult::success(vec![salon()])));
        let app = actix_test::init_service(test_app(ports)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/businesses?includeAddress=true")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body.as_array().map(Vec::len), Some(1));
    }

    #[rstest]
    #[actix_web::test]
    async fn signed_in_viewer_is_forwarded() {
        let mut ports = MockPorts::default();
        ports
            .businesses
            .expect_get_business()
            .with(
                eq(Viewer::new(Some(UserId::new(1)), true)),
                eq(BusinessId::new(4)),
                eq(BusinessSpecification {
                    include_bookings: true,
                    ..BusinessSpecification::default()
                }),
            )
            .times(1)
            .returning(|_, _, _| Ok(ServiceResult::success(salon())));
        let app = actix_test::init_service(test_app(ports)).await;

        let req = actix_test::TestRequest::get()
            .uri("/api/v1/businesses/4?includeBookings=true")
            .insert_header(bearer(ADMIN_TOKEN))
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
    }

    #[rstest]
    #[actix_web::test]
    async fn missing_business_renders_message() {
        let mut ports = MockPorts::default();
        ports
            .businesses
            .expect_get_business()
            .returning(|_, _, _| Ok(ServiceResult::not_found("Business not found")));
        let app = actix_test::init_service(test_app(ports)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/v1/businesses/99").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("Business not found")
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn non_numeric_id_is_rejected() {
        let mut ports = MockPorts::default();
        ports.businesses.expect_get_business().never();
        let app = actix_test::init_service(test_app(ports)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/v1/businesses/abc").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
