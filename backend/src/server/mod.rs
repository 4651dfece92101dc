//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use std::sync::Arc;

use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

#[cfg(debug_assertions)]
use booking_backend::doc::ApiDoc;
use booking_backend::domain::ports::TokenVerifier;
use booking_backend::inbound::http::api_routes;
use booking_backend::inbound::http::health::{HealthState, live, ready};
use booking_backend::inbound::http::state::HttpState;
use booking_backend::middleware::{Authenticate, DeploymentMode, FailureBoundary, Trace};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    verifier: Arc<dyn TokenVerifier>,
    mode: DeploymentMode,
}

/// Stages run outermost first: trace id, failure boundary, authentication.
fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<EitherBody<BoxBody>>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        verifier,
        mode,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Authenticate::new(verifier))
        .wrap(FailureBoundary::new(mode))
        .wrap(Trace)
        .configure(api_routes)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        mode,
        verifier,
        dataset,
    } = config;
    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state: web::Data::new(build_http_state(dataset)),
        verifier,
        mode,
    };

    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(bind_addr)?
        .run();

    info!(%bind_addr, ?mode, "server listening");
    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use booking_backend::domain::ports::FixtureTokenVerifier;
    use booking_backend::domain::{Claim, ClaimKind, Principal, TRACE_ID_HEADER};
    use booking_backend::middleware::FailureBody;
    use booking_backend::outbound::memory::Dataset;
    use rstest::rstest;

    fn deps(mode: DeploymentMode) -> AppDependencies {
        let customer = Principal::authenticated(vec![Claim::new(ClaimKind::NameIdentifier, "3")]);
        AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state: web::Data::new(build_http_state(Dataset::demo())),
            verifier: Arc::new(FixtureTokenVerifier::default().with_token("customer", customer)),
            mode,
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn api_responses_carry_trace_ids() {
        let app = actix_test::init_service(build_app(deps(DeploymentMode::Production))).await;

        let req = actix_test::TestRequest::get()
            .uri("/api/v1/bookings")
            .insert_header(("Authorization", "Bearer customer"))
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key(TRACE_ID_HEADER));
    }

    #[rstest]
    #[actix_web::test]
    async fn unauthenticated_booking_access_uses_the_boundary_body() {
        let app = actix_test::init_service(build_app(deps(DeploymentMode::Production))).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/v1/bookings").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let header = res
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
            .expect("trace id header");
        let body: FailureBody = actix_test::read_body_json(res).await;
        assert_eq!(body.status_code, 401);
        assert_eq!(body.trace_id, header);
        assert!(body.stack_trace.is_none());
    }

    #[rstest]
    #[actix_web::test]
    async fn health_probes_are_mounted() {
        let app = actix_test::init_service(build_app(deps(DeploymentMode::Development))).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/health/live").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
    }
}
