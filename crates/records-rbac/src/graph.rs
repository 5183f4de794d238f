//! # Role graph resolution
//!
//! [`RoleGraph`] owns a set of roles and answers the three questions the
//! authorization layer asks of them:
//!
//! - does a role hold a privilege, directly or by inheritance?
//! - which roles does a role inherit from, transitively?
//! - which roles inherit from a role, transitively?
//!
//! ## Edges
//!
//! An inherits-from edge is stored once, on the inheriting role, as the name
//! of its parent. The graph keeps a reverse index from parent name to child
//! names, updated by every mutation, so the parent and child views always
//! describe the same edge set.
//!
//! ```text
//!            Grandparent
//!          /     |      \
//!       Aunt   Uncle   Parent
//!          \    /      /    \
//!          Niece   Child1  Child2
//! ```
//!
//! ## Cycles
//!
//! The graph may contain cycles, including self-edges. Every query walks it
//! with a [`Traversal`], which visits each role at most once.

use std::collections::{BTreeSet, HashMap, HashSet};

use tracing::debug;

use crate::config::RbacConfig;
use crate::error::{RbacError, RbacResult};
use crate::privilege::{Privilege, PrivilegeMatch, PrivilegeSet};
use crate::role::Role;

/// Which edges a [`Traversal`] follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards the roles a role inherits from.
    Parents,
    /// Towards the roles that inherit from a role.
    Children,
}

/// An in-memory snapshot of roles and their inheritance edges.
///
/// The graph is not internally synchronized. Concurrent reads of a shared
/// `&RoleGraph` are fine; mutation requires `&mut RoleGraph`.
///
/// # Example
///
/// ```
/// use records_rbac::{Privilege, Role, RoleGraph};
///
/// let mut graph = RoleGraph::new();
/// graph.insert_role(Role::new("Clinician").with_privilege(Privilege::new("View Patients")));
/// graph.insert_role(Role::new("Physician").with_inherited_role("Clinician"));
///
/// assert!(graph.has_privilege("Physician", "view patients"));
/// assert_eq!(graph.all_parent_roles("Physician").len(), 1);
/// assert_eq!(graph.all_child_roles("Clinician").len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RoleGraph {
    roles: HashMap<String, Role>,
    /// Parent name to the names of roles that inherit from it.
    children: HashMap<String, BTreeSet<String>>,
    config: RbacConfig,
}

impl RoleGraph {
    /// Create an empty graph with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph with the given configuration.
    pub fn with_config(config: RbacConfig) -> Self {
        Self {
            roles: HashMap::new(),
            children: HashMap::new(),
            config,
        }
    }

    /// Build a graph from roles, e.g. a store snapshot.
    pub fn from_roles<I>(roles: I) -> Self
    where
        I: IntoIterator<Item = Role>,
    {
        Self::from_roles_with_config(roles, RbacConfig::default())
    }

    /// Build a graph from roles with the given configuration.
    pub fn from_roles_with_config<I>(roles: I, config: RbacConfig) -> Self
    where
        I: IntoIterator<Item = Role>,
    {
        let mut graph = Self::with_config(config);
        for role in roles {
            graph.insert_role(role);
        }
        graph
    }

    /// The configuration this graph resolves with.
    pub fn config(&self) -> &RbacConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Membership
    // ------------------------------------------------------------------

    /// Insert a role, replacing any role with the same name.
    ///
    /// The role's parent edges are indexed as given; parents need not be
    /// present yet. Only the configured superuser name, or a role built with
    /// [`Role::universal_grantor`], holds every privilege.
    pub fn insert_role(&mut self, mut role: Role) -> Option<Role> {
        let reserved = role.name() == self.config.superuser_role;
        role.set_reserved_superuser(reserved);

        let name = role.name().to_string();
        let previous = self.roles.remove(&name);
        if let Some(previous) = &previous {
            for parent in previous.inherited_roles() {
                self.unindex_edge(&name, parent);
            }
        }

        for parent in role.inherited_roles() {
            self.children
                .entry(parent.clone())
                .or_default()
                .insert(name.clone());
        }

        debug!(role = %name, parents = role.inherited_roles().len(), "Inserted role");
        self.roles.insert(name, role);
        previous
    }

    /// Remove a role and every edge that touches it.
    ///
    /// Roles that inherited from the removed role lose that edge.
    pub fn remove_role(&mut self, name: &str) -> Option<Role> {
        let role = self.roles.remove(name)?;

        for parent in role.inherited_roles() {
            self.unindex_edge(name, parent);
        }

        if let Some(children) = self.children.remove(name) {
            for child in children {
                if let Some(child_role) = self.roles.get_mut(&child) {
                    child_role.unlink_parent(name);
                }
            }
        }

        debug!(role = %name, "Removed role");
        Some(role)
    }

    /// Look up a role by name.
    pub fn role(&self, name: &str) -> Option<&Role> {
        self.roles.get(name)
    }

    /// Mutable access for description, privileges, id and retirement.
    ///
    /// Edges are changed through the graph so the child index stays current.
    pub fn role_mut(&mut self, name: &str) -> Option<&mut Role> {
        self.roles.get_mut(name)
    }

    /// A borrowed handle for resolving queries from one role.
    pub fn view(&self, name: &str) -> Option<RoleRef<'_>> {
        self.roles.get(name).map(|role| RoleRef { graph: self, role })
    }

    /// Whether a role with this name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.roles.contains_key(name)
    }

    /// Iterate over all roles in arbitrary order.
    pub fn roles(&self) -> impl Iterator<Item = &Role> {
        self.roles.values()
    }

    /// Number of roles.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Whether the graph holds no roles.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    // ------------------------------------------------------------------
    // Edges
    // ------------------------------------------------------------------

    /// Make `role` inherit from `parent`.
    ///
    /// Self-edges and cycles are accepted; see [`RoleGraph::would_create_cycle`]
    /// for callers that want to reject them.
    ///
    /// # Returns
    ///
    /// `true` if the edge is new
    pub fn add_inherited_role(&mut self, role: &str, parent: &str) -> RbacResult<bool> {
        self.require_present(parent)?;
        let inserted = self
            .roles
            .get_mut(role)
            .ok_or_else(|| RbacError::RoleNotFound(role.to_string()))?
            .link_parent(parent);

        if inserted {
            self.children
                .entry(parent.to_string())
                .or_default()
                .insert(role.to_string());
            debug!(role = %role, parent = %parent, "Linked inherited role");
        }
        Ok(inserted)
    }

    /// Stop `role` from inheriting from `parent`.
    ///
    /// # Returns
    ///
    /// `true` if the edge existed
    pub fn remove_inherited_role(&mut self, role: &str, parent: &str) -> RbacResult<bool> {
        let removed = self
            .roles
            .get_mut(role)
            .ok_or_else(|| RbacError::RoleNotFound(role.to_string()))?
            .unlink_parent(parent);

        if removed {
            self.unindex_edge(role, parent);
            debug!(role = %role, parent = %parent, "Unlinked inherited role");
        }
        Ok(removed)
    }

    /// Declare `child` as inheriting from `role`.
    ///
    /// This is the edge of [`RoleGraph::add_inherited_role`] addressed from the
    /// parent's end.
    pub fn add_child_role(&mut self, role: &str, child: &str) -> RbacResult<bool> {
        self.add_inherited_role(child, role)
    }

    /// Remove `child` from the roles inheriting from `role`.
    pub fn remove_child_role(&mut self, role: &str, child: &str) -> RbacResult<bool> {
        self.require_present(role)?;
        self.remove_inherited_role(child, role)
    }

    fn unindex_edge(&mut self, child: &str, parent: &str) {
        if let Some(children) = self.children.get_mut(parent) {
            children.remove(child);
            if children.is_empty() {
                self.children.remove(parent);
            }
        }
    }

    fn require_present(&self, name: &str) -> RbacResult<()> {
        if self.roles.contains_key(name) {
            Ok(())
        } else {
            Err(RbacError::RoleNotFound(name.to_string()))
        }
    }

    // ------------------------------------------------------------------
    // Privileges and retirement
    // ------------------------------------------------------------------

    /// Grant a privilege directly to a role.
    pub fn grant_privilege(&mut self, role: &str, privilege: Privilege) -> RbacResult<bool> {
        let granted = self
            .roles
            .get_mut(role)
            .ok_or_else(|| RbacError::RoleNotFound(role.to_string()))?
            .add_privilege(privilege);
        Ok(granted)
    }

    /// Revoke a directly granted privilege. Absent privileges are ignored.
    pub fn revoke_privilege(&mut self, role: &str, privilege: &Privilege) -> RbacResult<bool> {
        let revoked = self
            .roles
            .get_mut(role)
            .ok_or_else(|| RbacError::RoleNotFound(role.to_string()))?
            .remove_privilege(privilege);
        Ok(revoked)
    }

    /// Retire a role. It keeps its edges and privileges.
    pub fn retire_role(
        &mut self,
        role: &str,
        reason: impl Into<String>,
        retired_by: Option<uuid::Uuid>,
    ) -> RbacResult<()> {
        self.roles
            .get_mut(role)
            .ok_or_else(|| RbacError::RoleNotFound(role.to_string()))?
            .retire(reason, retired_by);
        debug!(role = %role, "Retired role");
        Ok(())
    }

    /// Clear a role's retirement.
    pub fn unretire_role(&mut self, role: &str) -> RbacResult<()> {
        self.roles
            .get_mut(role)
            .ok_or_else(|| RbacError::RoleNotFound(role.to_string()))?
            .unretire();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Walk the graph from `start`, yielding `start` first.
    ///
    /// Unknown start names yield nothing.
    pub fn traverse<'g>(&'g self, start: &str, direction: Direction) -> Traversal<'g> {
        let mut traversal = Traversal {
            graph: self,
            direction,
            stack: Vec::new(),
            visited: HashSet::new(),
        };
        if let Some((name, _)) = self.roles.get_key_value(start) {
            traversal.visited.insert(name.as_str());
            traversal.stack.push(name.as_str());
        }
        traversal
    }

    /// Roles `role` inherits from directly.
    pub fn parent_roles(&self, role: &str) -> Vec<&Role> {
        self.roles
            .get(role)
            .map(|r| {
                r.inherited_roles()
                    .iter()
                    .filter_map(|name| self.roles.get(name))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Roles that inherit from `role` directly.
    pub fn child_roles(&self, role: &str) -> Vec<&Role> {
        self.children
            .get(role)
            .map(|names| names.iter().filter_map(|name| self.roles.get(name)).collect())
            .unwrap_or_default()
    }

    /// Every role reachable through parent edges, excluding `role` itself.
    pub fn all_parent_roles(&self, role: &str) -> HashSet<&Role> {
        self.closure(role, Direction::Parents)
    }

    /// Every role reachable through child edges, excluding `role` itself.
    pub fn all_child_roles(&self, role: &str) -> HashSet<&Role> {
        self.closure(role, Direction::Children)
    }

    fn closure(&self, role: &str, direction: Direction) -> HashSet<&Role> {
        self.traverse(role, direction)
            .filter(|r| r.name() != role)
            .collect()
    }

    /// Whether `role` holds `privilege`, ignoring case.
    ///
    /// `None` holds nothing and returns `false`.
    ///
    /// ```
    /// use records_rbac::{Privilege, Role, RoleGraph};
    ///
    /// let graph = RoleGraph::from_roles([Role::new("Clerk").with_privilege(Privilege::new("PrIv1"))]);
    /// assert!(graph.has_privilege("Clerk", "priv1"));
    /// assert!(!graph.has_privilege("Clerk", None::<&str>));
    /// ```
    pub fn has_privilege<'a>(&self, role: &str, privilege: impl Into<Option<&'a str>>) -> bool {
        self.has_privilege_matching(role, privilege, PrivilegeMatch::IgnoreCase)
    }

    /// Whether `role` holds `privilege` under an explicit matching policy.
    ///
    /// A universal grantor answers `true` without consulting the graph. Any
    /// other role is checked together with its ancestors; inheriting from a
    /// universal grantor also grants everything.
    pub fn has_privilege_matching<'a>(
        &self,
        role: &str,
        privilege: impl Into<Option<&'a str>>,
        matching: PrivilegeMatch,
    ) -> bool {
        let Some(privilege) = privilege.into() else {
            return false;
        };
        let Some(start) = self.roles.get(role) else {
            return false;
        };
        if start.is_universal_grantor() {
            return true;
        }

        self.traverse(role, Direction::Parents).any(|r| {
            r.is_universal_grantor() || r.privileges().contains_name(privilege, matching)
        })
    }

    /// Union of the privileges of `role` and all of its ancestors.
    ///
    /// Universal grantors are not expanded; check them with
    /// [`RoleGraph::has_privilege`].
    pub fn effective_privileges(&self, role: &str) -> PrivilegeSet {
        let mut set = PrivilegeSet::new();
        for r in self.traverse(role, Direction::Parents) {
            set.merge(r.privileges());
        }
        set
    }

    /// Whether `role` inherits, directly or transitively, from `ancestor`.
    pub fn inherits_from(&self, role: &str, ancestor: &str) -> bool {
        role != ancestor
            && self
                .traverse(role, Direction::Parents)
                .any(|r| r.name() == ancestor)
    }

    /// Whether making `role` inherit from `parent` would close a cycle.
    pub fn would_create_cycle(&self, role: &str, parent: &str) -> bool {
        role == parent || self.inherits_from(parent, role)
    }
}

/// Depth-first walk over a [`RoleGraph`] that visits each role at most once.
///
/// Edge targets that are not in the graph are skipped.
#[derive(Debug)]
pub struct Traversal<'g> {
    graph: &'g RoleGraph,
    direction: Direction,
    stack: Vec<&'g str>,
    visited: HashSet<&'g str>,
}

impl<'g> Iterator for Traversal<'g> {
    type Item = &'g Role;

    fn next(&mut self) -> Option<&'g Role> {
        while let Some(name) = self.stack.pop() {
            let Some(role) = self.graph.roles.get(name) else {
                debug!(role = %name, "Skipping edge to unknown role");
                continue;
            };

            match self.direction {
                Direction::Parents => {
                    for parent in role.inherited_roles() {
                        if self.visited.insert(parent.as_str()) {
                            self.stack.push(parent.as_str());
                        }
                    }
                }
                Direction::Children => {
                    if let Some(children) = self.graph.children.get(name) {
                        for child in children {
                            if self.visited.insert(child.as_str()) {
                                self.stack.push(child.as_str());
                            }
                        }
                    }
                }
            }

            return Some(role);
        }
        None
    }
}

/// A role borrowed together with the graph it lives in.
///
/// Dereferences to [`Role`].
#[derive(Debug, Clone, Copy)]
pub struct RoleRef<'g> {
    graph: &'g RoleGraph,
    role: &'g Role,
}

impl<'g> RoleRef<'g> {
    /// The underlying role.
    pub fn role(&self) -> &'g Role {
        self.role
    }

    /// See [`RoleGraph::has_privilege`].
    pub fn has_privilege<'a>(&self, privilege: impl Into<Option<&'a str>>) -> bool {
        self.graph.has_privilege(self.role.name(), privilege)
    }

    /// See [`RoleGraph::has_privilege_matching`].
    pub fn has_privilege_matching<'a>(
        &self,
        privilege: impl Into<Option<&'a str>>,
        matching: PrivilegeMatch,
    ) -> bool {
        self.graph
            .has_privilege_matching(self.role.name(), privilege, matching)
    }

    /// See [`RoleGraph::parent_roles`].
    pub fn parent_roles(&self) -> Vec<&'g Role> {
        self.graph.parent_roles(self.role.name())
    }

    /// See [`RoleGraph::child_roles`].
    pub fn child_roles(&self) -> Vec<&'g Role> {
        self.graph.child_roles(self.role.name())
    }

    /// See [`RoleGraph::all_parent_roles`].
    pub fn all_parent_roles(&self) -> HashSet<&'g Role> {
        self.graph.all_parent_roles(self.role.name())
    }

    /// See [`RoleGraph::all_child_roles`].
    pub fn all_child_roles(&self) -> HashSet<&'g Role> {
        self.graph.all_child_roles(self.role.name())
    }

    /// See [`RoleGraph::effective_privileges`].
    pub fn effective_privileges(&self) -> PrivilegeSet {
        self.graph.effective_privileges(self.role.name())
    }
}

impl std::ops::Deref for RoleRef<'_> {
    type Target = Role;

    fn deref(&self) -> &Role {
        self.role
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SUPERUSER_ROLE;

    fn names<'a>(roles: impl IntoIterator<Item = &'a Role>) -> BTreeSet<&'a str> {
        roles.into_iter().map(Role::name).collect()
    }

    fn chain() -> RoleGraph {
        RoleGraph::from_roles([
            Role::new("Base").with_privilege(Privilege::new("View Locations")),
            Role::new("Middle")
                .with_inherited_role("Base")
                .with_privilege(Privilege::new("Edit Locations")),
            Role::new("Top").with_inherited_role("Middle"),
        ])
    }

    #[test]
    fn test_inherited_privilege() {
        let graph = chain();
        assert!(graph.has_privilege("Top", "View Locations"));
        assert!(graph.has_privilege("Top", "edit locations"));
        assert!(!graph.has_privilege("Base", "Edit Locations"));
        assert!(!graph.has_privilege("Missing", "View Locations"));
    }

    #[test]
    fn test_exact_matching() {
        let graph = chain();
        assert!(graph.has_privilege_matching("Top", "View Locations", PrivilegeMatch::Exact));
        assert!(!graph.has_privilege_matching("Top", "view locations", PrivilegeMatch::Exact));
    }

    #[test]
    fn test_none_privilege() {
        let graph = RoleGraph::from_roles([Role::new(SUPERUSER_ROLE), Role::new("Clerk")]);
        assert!(!graph.has_privilege("Clerk", None::<&str>));
        assert!(!graph.has_privilege(SUPERUSER_ROLE, None::<&str>));
    }

    #[test]
    fn test_superuser_bypass() {
        let graph = RoleGraph::from_roles([Role::new(SUPERUSER_ROLE)]);
        assert!(graph.has_privilege(SUPERUSER_ROLE, "Some Privilege Never Granted"));
    }

    #[test]
    fn test_configured_superuser_name() {
        let config = RbacConfig {
            superuser_role: "Root".to_string(),
            ..RbacConfig::default()
        };
        let graph = RoleGraph::from_roles_with_config([Role::new("Root")], config);
        assert!(graph.role("Root").unwrap().is_universal_grantor());
        assert!(graph.has_privilege("Root", "Anything"));
    }

    #[test]
    fn test_configured_superuser_replaces_default_name() {
        let config = RbacConfig {
            superuser_role: "Root".to_string(),
            ..RbacConfig::default()
        };
        let graph = RoleGraph::from_roles_with_config(
            [Role::new("Root"), Role::new(SUPERUSER_ROLE), Role::universal_grantor("Auditor")],
            config,
        );

        assert!(graph.has_privilege("Root", "Purge Patients"));
        assert!(!graph.role(SUPERUSER_ROLE).unwrap().is_universal_grantor());
        assert!(!graph.has_privilege(SUPERUSER_ROLE, "Purge Patients"));
        assert!(graph.has_privilege("Auditor", "Purge Patients"));
    }

    #[test]
    fn test_superuser_does_not_survive_config_change() {
        let config = RbacConfig {
            superuser_role: "Root".to_string(),
            ..RbacConfig::default()
        };
        let old = RoleGraph::from_roles_with_config([Role::new("Root")], config);
        let json = serde_json::to_value(old.role("Root").unwrap()).unwrap();

        let restored: Role = serde_json::from_value(json).unwrap();
        let graph = RoleGraph::from_roles([restored]);
        assert!(!graph.role("Root").unwrap().is_universal_grantor());
        assert!(!graph.has_privilege("Root", "Purge Patients"));
    }

    #[test]
    fn test_inheriting_from_universal_grantor() {
        let graph = RoleGraph::from_roles([
            Role::new(SUPERUSER_ROLE),
            Role::new("Delegate").with_inherited_role(SUPERUSER_ROLE),
        ]);
        assert!(graph.has_privilege("Delegate", "Purge Patients"));
    }

    #[test]
    fn test_self_edge_terminates() {
        let mut graph = RoleGraph::from_roles([Role::new("Loop")]);
        assert!(graph.add_inherited_role("Loop", "Loop").unwrap());

        assert!(graph.all_parent_roles("Loop").is_empty());
        assert!(graph.all_child_roles("Loop").is_empty());
        assert!(!graph.has_privilege("Loop", "Anything"));
        assert_eq!(names(graph.parent_roles("Loop")), BTreeSet::from(["Loop"]));
    }

    #[test]
    fn test_edges_from_both_ends_are_one_edge() {
        let mut graph = RoleGraph::from_roles([Role::new("Parent"), Role::new("Child")]);
        assert!(graph.add_child_role("Parent", "Child").unwrap());
        assert!(!graph.add_inherited_role("Child", "Parent").unwrap());

        assert_eq!(names(graph.parent_roles("Child")), BTreeSet::from(["Parent"]));
        assert_eq!(names(graph.child_roles("Parent")), BTreeSet::from(["Child"]));

        assert!(graph.remove_inherited_role("Child", "Parent").unwrap());
        assert!(graph.child_roles("Parent").is_empty());
        assert!(!graph.remove_child_role("Parent", "Child").unwrap());
    }

    #[test]
    fn test_edge_to_missing_role_is_rejected() {
        let mut graph = RoleGraph::from_roles([Role::new("Clerk")]);
        assert!(matches!(
            graph.add_inherited_role("Clerk", "Ghost"),
            Err(RbacError::RoleNotFound(name)) if name == "Ghost"
        ));
        assert!(matches!(
            graph.add_inherited_role("Ghost", "Clerk"),
            Err(RbacError::RoleNotFound(name)) if name == "Ghost"
        ));
    }

    #[test]
    fn test_remove_role_drops_edges() {
        let mut graph = chain();
        let removed = graph.remove_role("Middle").unwrap();
        assert_eq!(removed.name(), "Middle");

        assert!(graph.role("Top").unwrap().inherited_roles().is_empty());
        assert!(graph.child_roles("Base").is_empty());
        assert!(!graph.has_privilege("Top", "View Locations"));
    }

    #[test]
    fn test_replace_role_reindexes() {
        let mut graph = chain();
        graph.insert_role(Role::new("Top").with_inherited_role("Base"));

        assert!(graph.child_roles("Middle").is_empty());
        assert_eq!(names(graph.child_roles("Base")), BTreeSet::from(["Middle", "Top"]));
        assert!(!graph.has_privilege("Top", "Edit Locations"));
    }

    #[test]
    fn test_dangling_parent_is_skipped() {
        let graph = RoleGraph::from_roles([Role::new("Orphan").with_inherited_role("Not Loaded")]);
        assert!(graph.all_parent_roles("Orphan").is_empty());
        assert!(graph.parent_roles("Orphan").is_empty());
    }

    #[test]
    fn test_effective_privileges() {
        let graph = chain();
        let privileges = graph.effective_privileges("Top");
        assert_eq!(
            privileges.names().collect::<Vec<_>>(),
            vec!["Edit Locations", "View Locations"]
        );
        assert!(graph.effective_privileges("Missing").is_empty());
    }

    #[test]
    fn test_cycle_checks() {
        let graph = chain();
        assert!(graph.inherits_from("Top", "Base"));
        assert!(!graph.inherits_from("Base", "Top"));
        assert!(!graph.inherits_from("Top", "Top"));

        assert!(graph.would_create_cycle("Base", "Top"));
        assert!(graph.would_create_cycle("Base", "Base"));
        assert!(!graph.would_create_cycle("Top", "Base"));
    }

    #[test]
    fn test_grant_and_revoke_through_graph() {
        let mut graph = chain();
        assert!(graph.grant_privilege("Base", Privilege::new("Manage Programs")).unwrap());
        assert!(graph.has_privilege("Top", "manage programs"));

        assert!(graph.revoke_privilege("Base", &Privilege::new("Manage Programs")).unwrap());
        assert!(!graph.revoke_privilege("Base", &Privilege::new("Manage Programs")).unwrap());
        assert!(!graph.has_privilege("Top", "manage programs"));

        assert!(graph.grant_privilege("Ghost", Privilege::new("X")).is_err());
    }

    #[test]
    fn test_retired_role_still_resolves() {
        let mut graph = chain();
        graph.retire_role("Middle", "superseded", None).unwrap();
        assert!(graph.role("Middle").unwrap().retired);
        assert!(graph.has_privilege("Top", "Edit Locations"));

        graph.unretire_role("Middle").unwrap();
        assert!(!graph.role("Middle").unwrap().retired);
    }

    #[test]
    fn test_view_handle() {
        let graph = chain();
        let top = graph.view("Top").unwrap();
        assert_eq!(top.name(), "Top");
        assert!(top.has_privilege("VIEW LOCATIONS"));
        assert_eq!(names(top.all_parent_roles()), BTreeSet::from(["Base", "Middle"]));
        assert_eq!(names(top.parent_roles()), BTreeSet::from(["Middle"]));
        assert!(top.all_child_roles().is_empty());
        assert!(graph.view("Missing").is_none());
    }

    #[test]
    fn test_traversal_yields_start_first() {
        let graph = chain();
        let order: Vec<&str> = graph.traverse("Top", Direction::Parents).map(Role::name).collect();
        assert_eq!(order, vec!["Top", "Middle", "Base"]);
        assert_eq!(graph.traverse("Missing", Direction::Children).count(), 0);
    }
}
