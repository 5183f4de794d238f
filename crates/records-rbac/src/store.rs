//! Role persistence
//!
//! This module defines the contract the resolver expects from a persistence
//! collaborator, and an in-memory implementation for single-process use and
//! testing. Transactions and database mapping belong to real backends.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::RbacConfig;
use crate::error::{RbacError, RbacResult};
use crate::graph::RoleGraph;
use crate::privilege::Privilege;
use crate::role::Role;

/// Persistence operations for roles and privileges.
///
/// Lookups signal "not found" with `Ok(None)`; errors are reserved for
/// backend failures.
#[async_trait]
pub trait RoleStore: Send + Sync {
    /// Load a role by name.
    async fn get_role(&self, name: &str) -> RbacResult<Option<Role>>;

    /// Load a role by surrogate id.
    async fn get_role_by_id(&self, id: u64) -> RbacResult<Option<Role>>;

    /// Load a role by uuid.
    async fn get_role_by_uuid(&self, uuid: Uuid) -> RbacResult<Option<Role>>;

    /// Persist a role, assigning an id on first save.
    async fn save_role(&self, role: Role) -> RbacResult<Role>;

    /// Physically delete a role.
    async fn delete_role(&self, name: &str) -> RbacResult<()>;

    /// List roles, optionally keeping retired ones.
    async fn get_all_roles(&self, include_retired: bool) -> RbacResult<Vec<Role>>;

    /// Load a privilege by name.
    async fn get_privilege(&self, name: &str) -> RbacResult<Option<Privilege>>;

    /// Load a privilege by uuid.
    async fn get_privilege_by_uuid(&self, uuid: Uuid) -> RbacResult<Option<Privilege>>;

    /// Persist a privilege.
    async fn save_privilege(&self, privilege: Privilege) -> RbacResult<Privilege>;

    /// Physically delete a privilege.
    async fn delete_privilege(&self, name: &str) -> RbacResult<()>;

    /// List all privileges.
    async fn get_all_privileges(&self) -> RbacResult<Vec<Privilege>>;
}

/// In-memory role store.
///
/// Results are returned in name order.
pub struct MemoryRoleStore {
    roles: RwLock<HashMap<String, Role>>,
    privileges: RwLock<HashMap<String, Privilege>>,
    next_id: AtomicU64,
}

impl std::fmt::Debug for MemoryRoleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryRoleStore")
            .field("next_id", &self.next_id.load(Ordering::Relaxed))
            .finish()
    }
}

impl MemoryRoleStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            roles: RwLock::new(HashMap::new()),
            privileges: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl Default for MemoryRoleStore {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_name(name: &str) -> RbacResult<()> {
    if name.trim().is_empty() {
        return Err(RbacError::InvalidName(name.to_string()));
    }
    Ok(())
}

#[async_trait]
impl RoleStore for MemoryRoleStore {
    async fn get_role(&self, name: &str) -> RbacResult<Option<Role>> {
        Ok(self.roles.read().await.get(name).cloned())
    }

    async fn get_role_by_id(&self, id: u64) -> RbacResult<Option<Role>> {
        let roles = self.roles.read().await;
        Ok(roles.values().find(|r| r.id == Some(id)).cloned())
    }

    async fn get_role_by_uuid(&self, uuid: Uuid) -> RbacResult<Option<Role>> {
        let roles = self.roles.read().await;
        Ok(roles.values().find(|r| r.uuid == uuid).cloned())
    }

    async fn save_role(&self, mut role: Role) -> RbacResult<Role> {
        validate_name(role.name())?;

        let mut roles = self.roles.write().await;
        if role.id.is_none() {
            role.id = match roles.get(role.name()).and_then(|existing| existing.id) {
                Some(id) => Some(id),
                None => Some(self.next_id.fetch_add(1, Ordering::Relaxed)),
            };
        }

        debug!(role = %role.name(), id = ?role.id, "Saved role");
        roles.insert(role.name().to_string(), role.clone());
        Ok(role)
    }

    async fn delete_role(&self, name: &str) -> RbacResult<()> {
        self.roles
            .write()
            .await
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| RbacError::RoleNotFound(name.to_string()))
    }

    async fn get_all_roles(&self, include_retired: bool) -> RbacResult<Vec<Role>> {
        let roles = self.roles.read().await;
        let mut all: Vec<Role> = roles
            .values()
            .filter(|r| include_retired || !r.retired)
            .cloned()
            .collect();
        all.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(all)
    }

    async fn get_privilege(&self, name: &str) -> RbacResult<Option<Privilege>> {
        Ok(self.privileges.read().await.get(name).cloned())
    }

    async fn get_privilege_by_uuid(&self, uuid: Uuid) -> RbacResult<Option<Privilege>> {
        let privileges = self.privileges.read().await;
        Ok(privileges.values().find(|p| p.uuid == uuid).cloned())
    }

    async fn save_privilege(&self, privilege: Privilege) -> RbacResult<Privilege> {
        validate_name(privilege.name())?;
        self.privileges
            .write()
            .await
            .insert(privilege.name().to_string(), privilege.clone());
        Ok(privilege)
    }

    async fn delete_privilege(&self, name: &str) -> RbacResult<()> {
        self.privileges
            .write()
            .await
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| RbacError::PrivilegeNotFound(name.to_string()))
    }

    async fn get_all_privileges(&self) -> RbacResult<Vec<Privilege>> {
        let privileges = self.privileges.read().await;
        let mut all: Vec<Privilege> = privileges.values().cloned().collect();
        all.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(all)
    }
}

impl RoleGraph {
    /// Build a graph from every role in `store`.
    ///
    /// Retired roles are kept unless `config.include_retired_roles` is off.
    pub async fn load(store: &dyn RoleStore, config: RbacConfig) -> RbacResult<Self> {
        config.validate()?;
        let roles = store.get_all_roles(config.include_retired_roles).await?;
        info!(roles = roles.len(), "Loaded role graph");
        Ok(Self::from_roles_with_config(roles, config))
    }

    /// Persist one role and record the id the store assigned.
    pub async fn save_role(&mut self, store: &dyn RoleStore, name: &str) -> RbacResult<Role> {
        let role = self
            .role(name)
            .cloned()
            .ok_or_else(|| RbacError::RoleNotFound(name.to_string()))?;

        let saved = store.save_role(role).await?;
        if let Some(role) = self.role_mut(name) {
            role.id = saved.id;
        }
        Ok(saved)
    }
}
