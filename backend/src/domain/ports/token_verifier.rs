//! Driven port turning a bearer token into a [`Principal`].
//!
//! The authentication middleware depends on this trait only, so the HS256
//! adapter can be swapped for a fixture in tests and local development.

use std::collections::HashMap;

use crate::domain::Principal;

use super::define_port_error;

define_port_error! {
    /// Reasons a bearer token was rejected.
    pub enum TokenVerificationError {
        /// The token is malformed or its signature does not verify.
        Invalid { message: String } => "token rejected: {message}",
        /// The token verified but is past its expiry.
        Expired => "token expired",
    }
}

/// Verifies bearer tokens.
#[cfg_attr(test, mockall::automock)]
pub trait TokenVerifier: Send + Sync {
    /// Validate `token` and return the caller it identifies.
    fn verify(&self, token: &str) -> Result<Principal, TokenVerificationError>;
}

/// Verifier backed by a fixed token table.
#[derive(Debug, Default, Clone)]
pub struct FixtureTokenVerifier {
    tokens: HashMap<String, Principal>,
}

impl FixtureTokenVerifier {
    /// Register `token` as identifying `principal`.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>, principal: Principal) -> Self {
        self.tokens.insert(token.into(), principal);
        self
    }
}

impl TokenVerifier for FixtureTokenVerifier {
    fn verify(&self, token: &str) -> Result<Principal, TokenVerificationError> {
        self.tokens
            .get(token)
            .cloned()
            .ok_or_else(|| TokenVerificationError::invalid("unknown fixture token"))
    }
}
