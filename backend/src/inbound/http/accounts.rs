//! Account API handlers.
//!
//! ```text
//! GET /api/v1/users/me?includeBookings=true
//! DELETE /api/v1/users/me
//! ```

use actix_web::{delete, get, web};

use crate::domain::{ServiceOutcome, ServiceResult, UserAggregate, UserSpecification};
use crate::inbound::http::envelope::FailureMessage;
use crate::inbound::http::identity::Identity;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;
use crate::middleware::FailureBody;

/// Fetch the caller's account with the requested relations.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    params(UserSpecification),
    responses(
        (status = 200, description = "Caller's account", body = UserAggregate),
        (status = 401, description = "Missing user id claim", body = FailureBody),
        (status = 404, description = "Account not found", body = FailureMessage),
        (status = 500, description = "Unexpected failure", body = FailureBody)
    ),
    tags = ["accounts"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    identity: Identity,
    spec: web::Query<UserSpecification>,
) -> ApiResult<ServiceResult<UserAggregate>> {
    let user_id = identity.require_user_id()?;
    Ok(state.accounts.profile(user_id, spec.into_inner()).await?)
}

/// Delete the caller's account.
#[utoipa::path(
    delete,
    path = "/api/v1/users/me",
    responses(
        (status = 204, description = "Account deleted"),
        (status = 401, description = "Missing user id claim", body = FailureBody),
        (status = 404, description = "Account not found", body = FailureMessage),
        (status = 500, description = "Unexpected failure", body = FailureBody)
    ),
    tags = ["accounts"],
    operation_id = "deleteCurrentUser"
)]
#[delete("/users/me")]
pub async fn delete_current_user(
    state: web::Data<HttpState>,
    identity: Identity,
) -> ApiResult<ServiceOutcome> {
    let user_id = identity.require_user_id()?;
    Ok(state.account_commands.delete_account(user_id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::RepositoryError;
    use crate::domain::{Role, User, UserId};
    use crate::inbound::http::test_utils::{CUSTOMER_TOKEN, MockPorts, bearer, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use mockall::predicate::eq;
    use rstest::rstest;
    use serde_json::Value;

    fn customer_account() -> UserAggregate {
        UserAggregate::bare(User {
            id: UserId::new(7),
            email: "ana@example.com".to_owned(),
            full_name: "Ana Lima".to_owned(),
            role: Role::Customer,
        })
    }

    #[rstest]
    #[actix_web::test]
    async fn current_user_passes_query_specification() {
        let mut ports = MockPorts::default();
        ports
            .accounts
            .expect_profile()
            .with(
                eq(UserId::new(7)),
                eq(UserSpecification {
                    include_bookings: true,
                    include_favorites: true,
                    ..UserSpecification::default()
                }),
            )
            .times(1)
            .returning(|_, _| Ok(ServiceResult::success(customer_account())));
        let app = actix_test::init_service(test_app(ports)).await;

        let req = actix_test::TestRequest::get()
            .uri("/api/v1/users/me?includeBookings=true&includeFavorites=true")
            .insert_header(bearer(CUSTOMER_TOKEN))
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body.get("email").and_then(Value::as_str), Some("ana@example.com"));
        assert!(body.get("bookings").is_none());
    }

    #[rstest]
    #[actix_web::test]
    async fn anonymous_caller_is_rejected_before_the_service() {
        let mut ports = MockPorts::default();
        ports.accounts.expect_profile().never();
        let app = actix_test::init_service(test_app(ports)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/v1/users/me").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[case(ServiceOutcome::success_with_status(204), StatusCode::NO_CONTENT)]
    #[case(ServiceOutcome::failure_with_status("Account not found", 404), StatusCode::NOT_FOUND)]
    #[actix_web::test]
    async fn delete_translates_the_outcome(
        #[case] outcome: ServiceOutcome,
        #[case] expected: StatusCode,
    ) {
        let mut ports = MockPorts::default();
        ports
            .account_commands
            .expect_delete_account()
            .with(eq(UserId::new(7)))
            .return_once(move |_| Ok(outcome));
        let app = actix_test::init_service(test_app(ports)).await;

        let req = actix_test::TestRequest::delete()
            .uri("/api/v1/users/me")
            .insert_header(bearer(CUSTOMER_TOKEN))
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), expected);
    }

    #[rstest]
    #[actix_web::test]
    async fn repository_failure_surfaces_as_server_error() {
        let mut ports = MockPorts::default();
        ports
            .account_commands
            .expect_delete_account()
            .return_once(|_| Err(RepositoryError::connection("pool exhausted")));
        let app = actix_test::init_service(test_app(ports)).await;

        let req = actix_test::TestRequest::delete()
            .uri("/api/v1/users/me")
            .insert_header(bearer(CUSTOMER_TOKEN))
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
