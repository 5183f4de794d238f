//! Role entity
//!
//! A role bundles directly granted privileges with the names of the roles it
//! inherits from. Each inherits-from edge is stored once, on the inheriting
//! role; the opposite (child) view is derived by [`RoleGraph`](crate::RoleGraph).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

use crate::constants::SUPERUSER_ROLE;
use crate::privilege::{Privilege, PrivilegeMatch, PrivilegeSet};

/// A named role in the authorization graph.
///
/// Roles are identified by name (case-sensitive). The numeric `id` is a
/// surrogate assigned by the store on first save.
///
/// # Examples
///
/// ```
/// use records_rbac::{Privilege, Role};
///
/// let mut clerk = Role::new("Data Clerk").with_inherited_role("Authenticated");
/// clerk.add_privilege(Privilege::new("View Patients"));
///
/// assert!(clerk.has_direct_privilege("view patients"));
/// assert!(clerk.inherits_roles());
/// assert!(!clerk.is_universal_grantor());
///
/// let root = Role::new("System Developer");
/// assert!(root.is_universal_grantor());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    name: String,

    /// Surrogate id assigned by the store
    #[serde(default)]
    pub id: Option<u64>,

    /// External identifier
    pub uuid: Uuid,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    privileges: PrivilegeSet,

    #[serde(default)]
    inherited_roles: BTreeSet<String>,

    /// Set only by [`Role::universal_grantor`]
    #[serde(default)]
    universal_grantor: bool,

    /// Whether the name is the reserved superuser name. Recomputed by the
    /// graph from its configuration on insert.
    #[serde(skip)]
    reserved_superuser: bool,

    /// Whether the role has been retired
    #[serde(default)]
    pub retired: bool,

    /// Who retired the role
    #[serde(default)]
    pub retired_by: Option<Uuid>,

    /// When the role was retired
    #[serde(default)]
    pub date_retired: Option<DateTime<Utc>>,

    /// Why the role was retired
    #[serde(default)]
    pub retire_reason: Option<String>,
}

impl Role {
    /// Creates a new, unsaved role.
    ///
    /// A role named [`SUPERUSER_ROLE`] holds every privilege until a
    /// [`RoleGraph`](crate::RoleGraph) configured with another superuser name
    /// takes it in.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let reserved_superuser = name == SUPERUSER_ROLE;
        Self {
            name,
            id: None,
            uuid: Uuid::now_v7(),
            description: None,
            privileges: PrivilegeSet::new(),
            inherited_roles: BTreeSet::new(),
            universal_grantor: false,
            reserved_superuser,
            retired: false,
            retired_by: None,
            date_retired: None,
            retire_reason: None,
        }
    }

    /// Creates a role that holds every privilege regardless of its name.
    pub fn universal_grantor(name: impl Into<String>) -> Self {
        let mut role = Self::new(name);
        role.universal_grantor = true;
        role
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a parent edge before the role is placed in a graph.
    pub fn with_inherited_role(mut self, parent: impl Into<String>) -> Self {
        self.inherited_roles.insert(parent.into());
        self
    }

    /// Grant a privilege before the role is placed in a graph.
    pub fn with_privilege(mut self, privilege: Privilege) -> Self {
        self.privileges.add(privilege);
        self
    }

    /// The role name (its identity).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this role holds every privilege unconditionally.
    pub fn is_universal_grantor(&self) -> bool {
        self.universal_grantor || self.reserved_superuser
    }

    pub(crate) fn set_reserved_superuser(&mut self, reserved_superuser: bool) {
        self.reserved_superuser = reserved_superuser;
    }

    /// Privileges granted directly to this role.
    pub fn privileges(&self) -> &PrivilegeSet {
        &self.privileges
    }

    /// Grant a privilege. No-op if one with the same name is present.
    pub fn add_privilege(&mut self, privilege: Privilege) -> bool {
        self.privileges.add(privilege)
    }

    /// Revoke a privilege, matched by name. Absent privileges are ignored.
    pub fn remove_privilege(&mut self, privilege: &Privilege) -> bool {
        self.privileges.remove(privilege)
    }

    /// Check only the directly granted privileges, ignoring case.
    ///
    /// Inheritance is resolved by [`RoleGraph::has_privilege`](crate::RoleGraph::has_privilege).
    pub fn has_direct_privilege(&self, name: &str) -> bool {
        self.is_universal_grantor() || self.privileges.contains_name(name, PrivilegeMatch::IgnoreCase)
    }

    /// Names of the roles this role inherits from.
    pub fn inherited_roles(&self) -> &BTreeSet<String> {
        &self.inherited_roles
    }

    /// Whether this role inherits from any role.
    pub fn inherits_roles(&self) -> bool {
        !self.inherited_roles.is_empty()
    }

    pub(crate) fn link_parent(&mut self, parent: &str) -> bool {
        self.inherited_roles.insert(parent.to_string())
    }

    pub(crate) fn unlink_parent(&mut self, parent: &str) -> bool {
        self.inherited_roles.remove(parent)
    }

    /// Retire the role. Retired roles still resolve privileges.
    pub fn retire(&mut self, reason: impl Into<String>, retired_by: Option<Uuid>) {
        self.retired = true;
        self.retired_by = retired_by;
        self.date_retired = Some(Utc::now());
        self.retire_reason = Some(reason.into());
    }

    /// Clear the retirement marker and its metadata.
    pub fn unretire(&mut self) {
        self.retired = false;
        self.retired_by = None;
        self.date_retired = None;
        self.retire_reason = None;
    }
}

impl PartialEq for Role {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Role {}

impl Hash for Role {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
