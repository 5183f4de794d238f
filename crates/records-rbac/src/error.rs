//! Error types for authorization operations
//!
//! Graph reads (privilege checks, closure queries) never fail. Errors come
//! from mutations that address a role the graph does not hold, from failed
//! privilege requirements, and from the persistence collaborator.

use thiserror::Error;

use crate::config::ConfigError;

/// Authorization error types.
#[derive(Debug, Error)]
pub enum RbacError {
    /// No role with this name is loaded
    #[error("Role not found: {0}")]
    RoleNotFound(String),

    /// No privilege with this name is known to the store
    #[error("Privilege not found: {0}")]
    PrivilegeNotFound(String),

    /// The role or user does not hold the required privilege
    #[error("{role_or_user} lacks privilege '{privilege}'")]
    MissingPrivilege {
        /// Role name or username that was checked.
        role_or_user: String,
        /// The privilege that was required.
        privilege: String,
    },

    /// A role or privilege name is empty or otherwise unusable
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// Persistence collaborator failure
    #[error("Store error: {0}")]
    Store(String),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for authorization operations.
pub type RbacResult<T> = Result<T, RbacError>;

impl RbacError {
    /// Check if this error should be logged at error level.
    ///
    /// Denied privileges and unknown names are expected outcomes.
    pub fn is_server_error(&self) -> bool {
        matches!(self, RbacError::Store(_) | RbacError::Config(_))
    }

    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            RbacError::RoleNotFound(_) | RbacError::PrivilegeNotFound(_) => 404,
            RbacError::MissingPrivilege { .. } => 403,
            RbacError::InvalidName(_) => 400,
            RbacError::Store(_) | RbacError::Config(_) => 500,
        }
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            RbacError::RoleNotFound(_) => "ROLE_NOT_FOUND",
            RbacError::PrivilegeNotFound(_) => "PRIVILEGE_NOT_FOUND",
            RbacError::MissingPrivilege { .. } => "MISSING_PRIVILEGE",
            RbacError::InvalidName(_) => "INVALID_NAME",
            RbacError::Store(_) => "STORE_ERROR",
            RbacError::Config(_) => "CONFIG_ERROR",
        }
    }
}
