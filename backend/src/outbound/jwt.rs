//! HS256 bearer-token verification.
//!
//! Maps the registered `sub` claim and the `email` and `role` private claims
//! onto [`Principal`] claims. Expiry is always enforced.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;

use crate::domain::ports::{TokenVerificationError, TokenVerifier};
use crate::domain::{Claim, ClaimKind, Principal};

#[derive(Debug, Deserialize)]
struct TokenClaims {
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    role: Option<String>,
}

impl TokenClaims {
    fn into_principal(self) -> Principal {
        let claims = [
            (ClaimKind::NameIdentifier, self.sub),
            (ClaimKind::Email, self.email),
            (ClaimKind::Role, self.role),
        ]
        .into_iter()
        .filter_map(|(kind, value)| value.map(|value| Claim::new(kind, value)))
        .collect();
        Principal::authenticated(claims)
    }
}

/// Verifier for tokens signed with a shared HMAC secret.
///
/// # Examples
/// ```
/// use booking_backend::domain::ports::TokenVerifier;
/// use booking_backend::outbound::jwt::JwtTokenVerifier;
///
/// let verifier = JwtTokenVerifier::hs256(b"development-secret");
/// assert!(verifier.verify("not-a-token").is_err());
/// ```
#[derive(Clone)]
pub struct JwtTokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtTokenVerifier {
    /// Verify HS256 tokens signed with `secret`.
    #[must_use]
    pub fn hs256(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        Self {
            key: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

impl TokenVerifier for JwtTokenVerifier {
    fn verify(&self, token: &str) -> Result<Principal, TokenVerificationError> {
        match decode::<TokenClaims>(token, &self.key, &self.validation) {
            Ok(data) => Ok(data.claims.into_principal()),
            Err(error) if matches!(error.kind(), ErrorKind::ExpiredSignature) => {
                Err(TokenVerificationError::expired())
            }
            Err(error) => Err(TokenVerificationError::invalid(error.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{UserId, require_user_id};
    use jsonwebtoken::{EncodingKey, Header, encode};
    use rstest::rstest;
    use serde::Serialize;

    const SECRET: &[u8] = b"test-secret";

    #[derive(Serialize)]
    struct Issued<'a> {
        #[serde(skip_serializing_if = "Option::is_none")]
        sub: Option<&'a str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        role: Option<&'a str>,
        exp: i64,
    }

    fn issue(claims: &Issued<'_>, secret: &[u8]) -> String {
        encode(&Header::default(), claims, &EncodingKey::from_secret(secret)).expect("encode")
    }

    fn in_one_hour() -> i64 {
        chrono::Utc::now().timestamp() + 3600
    }

    #[rstest]
    fn valid_token_maps_claims() {
        let token = issue(
            &Issued {
                sub: Some("42"),
                role: Some("admin"),
                exp: in_one_hour(),
            },
            SECRET,
        );

        let principal = JwtTokenVerifier::hs256(SECRET).verify(&token).expect("verified");

        assert_eq!(require_user_id(Some(&principal)), Ok(UserId::new(42)));
        assert_eq!(principal.find_claim(ClaimKind::Role), Some("admin"));
        assert_eq!(principal.find_claim(ClaimKind::Email), None);
    }

    #[rstest]
    fn token_without_subject_yields_principal_without_user_id() {
        let token = issue(
            &Issued {
                sub: None,
                role: None,
                exp: in_one_hour(),
            },
            SECRET,
        );

        let principal = JwtTokenVerifier::hs256(SECRET).verify(&token).expect("verified");

        assert!(principal.claims().is_empty());
    }

    #[rstest]
    fn expired_token_is_reported_as_expired() {
        let token = issue(
            &Issued {
                sub: Some("42"),
                role: None,
                exp: chrono::Utc::now().timestamp() - 3600,
            },
            SECRET,
        );

        let error = JwtTokenVerifier::hs256(SECRET)
            .verify(&token)
            .expect_err("expired");

        assert_eq!(error, TokenVerificationError::expired());
    }

    #[rstest]
    #[case(b"other-secret".as_slice())]
    #[case(b"".as_slice())]
    fn foreign_signature_is_invalid(#[case] signing_secret: &[u8]) {
        let token = issue(
            &Issued {
                sub: Some("42"),
                role: None,
                exp: in_one_hour(),
            },
            signing_secret,
        );

        let error = JwtTokenVerifier::hs256(SECRET)
            .verify(&token)
            .expect_err("bad signature");

        assert!(matches!(error, TokenVerificationError::Invalid { .. }));
    }
}
