//! Application settings loaded via OrthoConfig.
//!
//! Values come from command-line flags, `BOOKING_*` environment variables and
//! configuration files, in OrthoConfig's usual precedence.

use std::net::{AddrParseError, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::middleware::DeploymentMode;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Invalid setting values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address `{value}`: {source}")]
    BindAddr {
        /// Rejected value.
        value: String,
        /// Parse failure.
        #[source]
        source: AddrParseError,
    },
    /// Production deployments must verify real tokens.
    #[error("a JWT secret is required in production")]
    MissingJwtSecret,
}

/// Server settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BOOKING")]
pub struct AppSettings {
    /// Deployment mode: `development`, or production for anything else.
    pub environment: Option<String>,
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Shared secret for HS256 bearer tokens.
    pub jwt_secret: Option<String>,
    /// Seed the in-memory store with the demo catalogue; on when unset.
    pub seed_demo_data: Option<bool>,
}

impl AppSettings {
    /// Configured deployment mode; production when unset or unrecognised.
    #[must_use]
    pub fn deployment_mode(&self) -> DeploymentMode {
        self.environment
            .as_deref()
            .map_or_else(DeploymentMode::default, DeploymentMode::from_name)
    }

    /// Whether to seed the demo catalogue.
    #[must_use]
    pub fn seed_demo_data(&self) -> bool {
        self.seed_demo_data.unwrap_or(true)
    }

    /// Configured listen address, `0.0.0.0:8080` when unset.
    ///
    /// # Errors
    /// [`SettingsError::BindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .trim()
            .parse()
            .map_err(|source| SettingsError::BindAddr {
                value: value.to_owned(),
                source,
            })
    }

    /// Token secret, mandatory outside development.
    ///
    /// # Errors
    /// [`SettingsError::MissingJwtSecret`] in production without a secret.
    pub fn jwt_secret(&self, mode: DeploymentMode) -> Result<Option<&str>, SettingsError> {
        let secret = self
            .jwt_secret
            .as_deref()
            .map(str::trim)
            .filter(|secret| !secret.is_empty());
        match (secret, mode) {
            (None, DeploymentMode::Production) => Err(SettingsError::MissingJwtSecret),
            (secret, _) => Ok(secret),
        }
    }
}
