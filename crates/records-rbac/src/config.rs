//! Authorization configuration.
//!
//! Names the built-in roles the resolver treats specially and controls how
//! graphs are loaded from a store. Configuration is loaded from environment
//! variables with defaults matching the platform's built-in role names.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{ANONYMOUS_ROLE, AUTHENTICATED_ROLE, SUPERUSER_ROLE};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue {
        /// Configuration key.
        key: String,
        /// Error message.
        message: String,
    },
}

/// Configuration for role graph resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RbacConfig {
    /// Role granted every privilege unconditionally.
    pub superuser_role: String,

    /// Role every principal holds implicitly.
    pub anonymous_role: String,

    /// Role every authenticated principal holds implicitly.
    pub authenticated_role: String,

    /// Whether [`RoleGraph::load`](crate::RoleGraph::load) keeps retired roles.
    pub include_retired_roles: bool,
}

impl Default for RbacConfig {
    fn default() -> Self {
        Self {
            superuser_role: SUPERUSER_ROLE.to_string(),
            anonymous_role: ANONYMOUS_ROLE.to_string(),
            authenticated_role: AUTHENTICATED_ROLE.to_string(),
            include_retired_roles: true,
        }
    }
}

impl RbacConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `RBAC_SUPERUSER_ROLE`: superuser role name (default: System Developer)
    /// - `RBAC_ANONYMOUS_ROLE`: implicit role for everyone (default: Anonymous)
    /// - `RBAC_AUTHENTICATED_ROLE`: implicit role for logged-in users (default: Authenticated)
    /// - `RBAC_INCLUDE_RETIRED`: keep retired roles when loading (default: true).
    ///   Accepts `true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off` in any case.
    pub fn from_env() -> Result<Self, ConfigError> {
        let default = Self::default();

        let include_retired_roles = match std::env::var("RBAC_INCLUDE_RETIRED") {
            Ok(value) => parse_flag("RBAC_INCLUDE_RETIRED", &value)?,
            Err(_) => default.include_retired_roles,
        };

        Ok(Self {
            superuser_role: std::env::var("RBAC_SUPERUSER_ROLE").unwrap_or(default.superuser_role),
            anonymous_role: std::env::var("RBAC_ANONYMOUS_ROLE").unwrap_or(default.anonymous_role),
            authenticated_role: std::env::var("RBAC_AUTHENTICATED_ROLE")
                .unwrap_or(default.authenticated_role),
            include_retired_roles,
        })
    }

    /// Check that the built-in role names are non-empty and distinct.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let names = [
            ("RBAC_SUPERUSER_ROLE", &self.superuser_role),
            ("RBAC_ANONYMOUS_ROLE", &self.anonymous_role),
            ("RBAC_AUTHENTICATED_ROLE", &self.authenticated_role),
        ];

        for (key, value) in names {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "role name must not be empty".to_string(),
                });
            }
        }

        for (i, (key, value)) in names.iter().enumerate() {
            if names[i + 1..].iter().any(|(_, other)| other == value) {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("role name '{}' is used for more than one built-in role", value),
                });
            }
        }

        Ok(())
    }
}

/// Parse a boolean environment value, rejecting anything unrecognised.
fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected a boolean, got '{}'", value),
        }),
    }
}
