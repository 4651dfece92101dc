//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use booking_backend::domain::ports::{FixtureTokenVerifier, TokenVerifier};
use booking_backend::domain::{Claim, ClaimKind, Principal, Role};
use booking_backend::middleware::DeploymentMode;
use booking_backend::outbound::jwt::JwtTokenVerifier;
use booking_backend::outbound::memory::Dataset;
use booking_backend::settings::{AppSettings, SettingsError};
use tracing::warn;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) mode: DeploymentMode,
    pub(crate) verifier: Arc<dyn TokenVerifier>,
    pub(crate) dataset: Dataset,
}

impl ServerConfig {
    /// Construct a configuration with an empty store.
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        mode: DeploymentMode,
        verifier: Arc<dyn TokenVerifier>,
    ) -> Self {
        Self {
            bind_addr,
            mode,
            verifier,
            dataset: Dataset::default(),
        }
    }

    /// Seed the in-memory store.
    #[must_use]
    pub fn with_dataset(mut self, dataset: Dataset) -> Self {
        self.dataset = dataset;
        self
    }

    /// Resolve settings into a server configuration.
    ///
    /// Without a JWT secret (development only) the well-known
    /// `dev-admin`, `dev-owner` and `dev-customer` tokens are accepted.
    ///
    /// # Errors
    /// Propagates [`SettingsError`] for invalid or missing values.
    pub fn from_settings(settings: &AppSettings) -> Result<Self, SettingsError> {
        let mode = settings.deployment_mode();
        let bind_addr = settings.bind_addr()?;
        let verifier = settings
            .jwt_secret(mode)?
            .map_or_else(development_verifier, jwt_verifier);
        let config = Self::new(bind_addr, mode, verifier);
        Ok(if settings.seed_demo_data() {
            config.with_dataset(Dataset::demo())
        } else {
            config
        })
    }
}

fn jwt_verifier(secret: &str) -> Arc<dyn TokenVerifier> {
    Arc::new(JwtTokenVerifier::hs256(secret.as_bytes()))
}

fn development_verifier() -> Arc<dyn TokenVerifier> {
    warn!("no JWT secret configured; accepting development tokens");
    Arc::new(development_tokens())
}

fn development_principal(user_id: i64, role: Role) -> Principal {
    Principal::authenticated(vec![
        Claim::new(ClaimKind::NameIdentifier, user_id.to_string()),
        Claim::new(ClaimKind::Role, role.as_str()),
    ])
}

/// Tokens matching the demo catalogue's users.
fn development_tokens() -> FixtureTokenVerifier {
    FixtureTokenVerifier::default()
        .with_token("dev-admin", development_principal(1, Role::Admin))
        .with_token("dev-owner", development_principal(2, Role::BusinessOwner))
        .with_token("dev-customer", development_principal(3, Role::Customer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn settings(environment: &str, jwt_secret: Option<&str>) -> AppSettings {
        AppSettings {
            environment: Some(environment.to_owned()),
            bind_addr: Some("127.0.0.1:0".to_owned()),
            jwt_secret: jwt_secret.map(str::to_owned),
            seed_demo_data: None,
        }
    }

    #[rstest]
    fn development_without_secret_accepts_demo_tokens() {
        let config = ServerConfig::from_settings(&settings("development", None)).expect("config");

        let principal = config.verifier.verify("dev-owner").expect("known token");
        assert_eq!(principal.find_claim(ClaimKind::NameIdentifier), Some("2"));
        assert_eq!(config.mode, DeploymentMode::Development);
        assert!(!config.dataset.businesses.is_empty());
    }

    #[rstest]
    fn production_requires_a_secret() {
        let error = ServerConfig::from_settings(&settings("production", None))
            .err()
            .expect("missing secret");
        assert_eq!(error, SettingsError::MissingJwtSecret);
    }

    #[rstest]
    fn configured_secret_rejects_development_tokens() {
        let config =
            ServerConfig::from_settings(&settings("production", Some("s3cret"))).expect("config");
        assert!(config.verifier.verify("dev-admin").is_err());
    }
}
