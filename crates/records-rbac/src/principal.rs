//! Acting user for privilege checks
//!
//! A [`Principal`] is passed explicitly into every check that depends on who
//! is acting. Nothing in this crate reads a process-wide "current user".

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{RbacError, RbacResult};
use crate::graph::RoleGraph;

/// The user (or absence of one) on whose behalf an operation runs.
///
/// # Examples
///
/// ```
/// use records_rbac::{Principal, Privilege, Role, RoleGraph};
/// use uuid::Uuid;
///
/// let graph = RoleGraph::from_roles([
///     Role::new("Anonymous"),
///     Role::new("Authenticated").with_privilege(Privilege::new("View Navigation Menu")),
/// ]);
///
/// let guest = Principal::anonymous();
/// assert!(!graph.principal_has_privilege(&guest, "View Navigation Menu"));
///
/// let user = Principal::authenticated(Uuid::now_v7(), "admin");
/// assert!(graph.principal_has_privilege(&user, "View Navigation Menu"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Authenticated user id, if any
    pub user_id: Option<Uuid>,

    /// Login name, if any
    pub username: Option<String>,

    /// Roles assigned to the user
    #[serde(default)]
    pub roles: BTreeSet<String>,
}

impl Principal {
    /// A principal with no authenticated user.
    pub fn anonymous() -> Self {
        Self {
            user_id: None,
            username: None,
            roles: BTreeSet::new(),
        }
    }

    /// A principal for an authenticated user with no assigned roles yet.
    pub fn authenticated(user_id: Uuid, username: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id),
            username: Some(username.into()),
            roles: BTreeSet::new(),
        }
    }

    /// Assign a role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.insert(role.into());
        self
    }

    /// Whether a user is authenticated.
    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    /// Name used in log lines and errors.
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or("anonymous")
    }

    /// Assigned roles plus the implicit anonymous and authenticated roles
    /// named by the graph's configuration.
    pub fn effective_roles<'a>(&'a self, graph: &'a RoleGraph) -> BTreeSet<&'a str> {
        let config = graph.config();
        let mut roles: BTreeSet<&str> = self.roles.iter().map(String::as_str).collect();
        roles.insert(config.anonymous_role.as_str());
        if self.is_authenticated() {
            roles.insert(config.authenticated_role.as_str());
        }
        roles
    }
}

impl RoleGraph {
    /// Whether any of the principal's effective roles holds `privilege`.
    pub fn principal_has_privilege<'a>(
        &self,
        principal: &Principal,
        privilege: impl Into<Option<&'a str>>,
    ) -> bool {
        let Some(privilege) = privilege.into() else {
            return false;
        };
        principal
            .effective_roles(self)
            .into_iter()
            .any(|role| self.has_privilege(role, privilege))
    }

    /// Fail with [`RbacError::MissingPrivilege`] unless the principal holds
    /// `privilege`.
    pub fn require_privilege(&self, principal: &Principal, privilege: &str) -> RbacResult<()> {
        if self.principal_has_privilege(principal, privilege) {
            debug!(user = %principal.display_name(), privilege = %privilege, "Privilege granted");
            return Ok(());
        }

        warn!(user = %principal.display_name(), privilege = %privilege, "Privilege denied");
        Err(RbacError::MissingPrivilege {
            role_or_user: principal.display_name().to_string(),
            privilege: privilege.to_string(),
        })
    }
}
