//! Bearer-token authentication stage.
//!
//! Reads `Authorization: Bearer <token>`, asks the [`TokenVerifier`] who the
//! caller is, and leaves the resulting [`Principal`] in the request
//! extensions for the `Identity` extractor. A missing or rejected token
//! leaves the request anonymous; deciding whether anonymity is acceptable is
//! up to each endpoint.

use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{Error, HttpMessage};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::Principal;
use crate::domain::ports::TokenVerifier;

const BEARER_SCHEME: &str = "bearer";

/// Middleware attaching the verified caller to each request.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::App;
/// use booking_backend::domain::ports::FixtureTokenVerifier;
/// use booking_backend::middleware::Authenticate;
///
/// let app = App::new().wrap(Authenticate::new(Arc::new(FixtureTokenVerifier::default())));
/// ```
#[derive(Clone)]
pub struct Authenticate {
    verifier: Arc<dyn TokenVerifier>,
}

impl Authenticate {
    /// Authenticate requests with the given verifier.
    #[must_use]
    pub const fn new(verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { verifier }
    }
}

impl<S, B> Transform<S, ServiceRequest> for Authenticate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthenticateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthenticateMiddleware {
            service,
            verifier: Arc::clone(&self.verifier),
        }))
    }
}

/// Service wrapper produced by [`Authenticate`].
pub struct AuthenticateMiddleware<S> {
    service: S,
    verifier: Arc<dyn TokenVerifier>,
}

impl<S> AuthenticateMiddleware<S> {
    fn principal_for(&self, req: &ServiceRequest) -> Option<Principal> {
        let header = req.headers().get(AUTHORIZATION)?;
        let Some(token) = header
            .to_str()
            .ok()
            .and_then(|value| value.trim_start().split_once(' '))
            .filter(|(scheme, _)| scheme.eq_ignore_ascii_case(BEARER_SCHEME))
            .map(|(_, token)| token.trim())
            .filter(|token| !token.is_empty())
        else {
            debug!("authorization header is not a bearer token");
            return None;
        };
        match self.verifier.verify(token) {
            Ok(principal) => Some(principal),
            Err(error) => {
                debug!(%error, "bearer token rejected");
                None
            }
        }
    }
}

impl<S, B> Service<ServiceRequest> for AuthenticateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = S::Future;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if let Some(principal) = self.principal_for(&req) {
            req.extensions_mut().insert(principal);
        }
        self.service.call(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockTokenVerifier, TokenVerificationError};
    use crate::domain::{Claim, ClaimKind};
    use actix_web::{App, HttpRequest, HttpResponse, test as actix_test, web};
    use rstest::rstest;

    async fn echo_claim(req: HttpRequest) -> HttpResponse {
        let subject = req
            .extensions()
            .get::<Principal>()
            .and_then(|principal| principal.find_claim(ClaimKind::NameIdentifier))
            .map_or_else(|| "anonymous".to_owned(), str::to_owned);
        HttpResponse::Ok().body(subject)
    }

    async fn call_with(verifier: MockTokenVerifier, authorization: Option<&str>) -> String {
        let app = actix_test::init_service(
            App::new()
                .wrap(Authenticate::new(Arc::new(verifier)))
                .route("/", web::get().to(echo_claim)),
        )
        .await;
        let mut req = actix_test::TestRequest::get().uri("/");
        if let Some(value) = authorization {
            req = req.insert_header((AUTHORIZATION, value));
        }
        let body = actix_test::call_and_read_body(&app, req.to_request()).await;
        String::from_utf8(body.to_vec()).expect("utf8 body")
    }

    #[rstest]
    #[actix_web::test]
    async fn verified_token_attaches_principal() {
        let mut verifier = MockTokenVerifier::new();
        verifier
            .expect_verify()
            .withf(|token| token == "good")
            .times(1)
            .returning(|_| {
                Ok(Principal::authenticated(vec![Claim::new(
                    ClaimKind::NameIdentifier,
                    "42",
                )]))
            });

        assert_eq!(call_with(verifier, Some("Bearer good")).await, "42");
    }

    #[rstest]
    #[case("bearer good")]
    #[case("BEARER good")]
    #[actix_web::test]
    async fn scheme_is_matched_case_insensitively(#[case] authorization: &str) {
        let mut verifier = MockTokenVerifier::new();
        verifier
            .expect_verify()
            .withf(|token| token == "good")
            .times(1)
            .returning(|_| {
                Ok(Principal::authenticated(vec![Claim::new(
                    ClaimKind::NameIdentifier,
                    "42",
                )]))
            });

        assert_eq!(call_with(verifier, Some(authorization)).await, "42");
    }

    #[rstest]
    #[actix_web::test]
    async fn rejected_token_leaves_request_anonymous() {
        let mut verifier = MockTokenVerifier::new();
        verifier
            .expect_verify()
            .returning(|_| Err(TokenVerificationError::expired()));

        assert_eq!(call_with(verifier, Some("Bearer stale")).await, "anonymous");
    }

    #[rstest]
    #[case(None)]
    #[case(Some("Basic dXNlcjpwYXNz"))]
    #[case(Some("Bearer "))]
    #[case(Some("Bearerx good"))]
    #[actix_web::test]
    async fn non_bearer_requests_skip_verification(#[case] authorization: Option<&str>) {
        let mut verifier = MockTokenVerifier::new();
        verifier.expect_verify().never();

        assert_eq!(call_with(verifier, authorization).await, "anonymous");
    }
}
