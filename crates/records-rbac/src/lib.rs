//! # Records RBAC (Role/Privilege Authorization)
//!
//! This crate resolves privileges for the clinical records platform.
//!
//! ## Overview
//!
//! The records-rbac crate handles:
//! - **Privileges**: Named capabilities, identified by name
//! - **Roles**: Bundles of privileges that inherit from other roles
//! - **Role Graph**: Transitive, cycle-safe privilege and ancestry resolution
//! - **Principals**: The acting user, passed explicitly into checks
//! - **Stores**: The persistence contract the graph is loaded from
//!
//! ## Architecture
//!
//! ```text
//! RoleStore ──load──→ RoleGraph
//!                       ├─ Role ─ privileges: PrivilegeSet
//!                       │       └ inherited_roles: {parent names}
//!                       └─ child index (derived from inherited_roles)
//!
//! Principal ─ roles ──→ RoleGraph::require_privilege
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use records_rbac::{Privilege, Role, RoleGraph};
//!
//! let mut graph = RoleGraph::new();
//! graph.insert_role(Role::new("Clinician").with_privilege(Privilege::new("View Encounters")));
//! graph.insert_role(Role::new("Nurse"));
//! graph.add_inherited_role("Nurse", "Clinician").unwrap();
//!
//! // Inherited, case-insensitive
//! assert!(graph.has_privilege("Nurse", "view encounters"));
//!
//! // The reserved superuser role holds everything
//! graph.insert_role(Role::new("System Developer"));
//! assert!(graph.has_privilege("System Developer", "Purge Patients"));
//! ```
//!
//! ## Resolution Rules
//!
//! - Privilege names are compared ignoring case
//! - A universal grantor (the superuser role) holds every privilege
//! - Cycles and self-edges are tolerated; each role is visited once
//! - Retired roles keep resolving until a store filters them out

pub mod config;
pub mod constants;
pub mod error;
pub mod graph;
pub mod principal;
pub mod privilege;
pub mod role;
pub mod store;

// Re-export main types for convenience
pub use config::{ConfigError, RbacConfig};
pub use constants::{ANONYMOUS_ROLE, AUTHENTICATED_ROLE, PROVIDER_ROLE, SUPERUSER_ROLE};
pub use error::{RbacError, RbacResult};
pub use graph::{Direction, RoleGraph, RoleRef, Traversal};
pub use principal::Principal;
pub use privilege::{Privilege, PrivilegeMatch, PrivilegeSet};
pub use role::Role;
pub use store::{MemoryRoleStore, RoleStore};
