//! # Privileges
//!
//! A privilege is a named capability such as "View Patients". Privileges are
//! identified purely by name: two privilege values with the same name are the
//! same privilege, whatever their description or uuid.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// How a queried privilege name is compared against held privileges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrivilegeMatch {
    /// Names are lower-cased on both sides before comparison.
    #[default]
    IgnoreCase,
    /// Names must be byte-for-byte equal.
    Exact,
}

impl PrivilegeMatch {
    /// Compare a held privilege name with a queried one.
    pub fn matches(self, held: &str, query: &str) -> bool {
        match self {
            PrivilegeMatch::Exact => held == query,
            PrivilegeMatch::IgnoreCase => {
                held == query || normalize_privilege_name(held) == normalize_privilege_name(query)
            }
        }
    }
}

/// Normalize a privilege name for case-insensitive comparison.
pub fn normalize_privilege_name(name: &str) -> String {
    name.to_lowercase()
}

/// A named capability that can be granted to roles.
///
/// # Example
///
/// ```
/// use records_rbac::Privilege;
///
/// let a = Privilege::new("View Patients").with_description("Able to view patients");
/// let b = Privilege::new("View Patients");
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Privilege {
    name: String,

    /// Optional human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// External identifier.
    pub uuid: Uuid,
}

impl Privilege {
    /// Create a privilege with a fresh uuid.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            uuid: Uuid::now_v7(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The privilege name (its identity).
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Privilege {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Privilege {}

impl Hash for Privilege {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl std::fmt::Display for Privilege {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// A set of privileges holding exactly one entry per distinct name.
///
/// Adding a privilege whose name is already present is a no-op; the
/// first-added value is kept. Serializes as a list in name order.
///
/// # Example
///
/// ```
/// use records_rbac::{Privilege, PrivilegeMatch, PrivilegeSet};
///
/// let mut set = PrivilegeSet::new();
/// assert!(set.add(Privilege::new("Edit Orders")));
/// assert!(!set.add(Privilege::new("Edit Orders")));
/// assert_eq!(set.len(), 1);
///
/// assert!(set.contains_name("edit orders", PrivilegeMatch::IgnoreCase));
/// assert!(!set.contains_name("edit orders", PrivilegeMatch::Exact));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Privilege>", into = "Vec<Privilege>")]
pub struct PrivilegeSet {
    privileges: BTreeMap<String, Privilege>,
}

impl PrivilegeSet {
    /// Create a new empty privilege set.
    pub fn new() -> Self {
        Self {
            privileges: BTreeMap::new(),
        }
    }

    /// Add a privilege to the set.
    ///
    /// # Returns
    ///
    /// `true` if the privilege was inserted, `false` if one with the same name was already present
    pub fn add(&mut self, privilege: Privilege) -> bool {
        if self.privileges.contains_key(privilege.name()) {
            return false;
        }
        self.privileges.insert(privilege.name.clone(), privilege);
        true
    }

    /// Add multiple privileges to the set.
    pub fn add_all<I>(&mut self, privileges: I)
    where
        I: IntoIterator<Item = Privilege>,
    {
        for privilege in privileges {
            self.add(privilege);
        }
    }

    /// Remove a privilege, matched by name.
    ///
    /// # Returns
    ///
    /// `true` if the privilege was present, `false` otherwise
    pub fn remove(&mut self, privilege: &Privilege) -> bool {
        self.remove_named(privilege.name())
    }

    /// Remove the privilege with exactly this name.
    pub fn remove_named(&mut self, name: &str) -> bool {
        self.privileges.remove(name).is_some()
    }

    /// Check if the set contains a privilege with the same name.
    pub fn contains(&self, privilege: &Privilege) -> bool {
        self.privileges.contains_key(privilege.name())
    }

    /// Check if the set holds a privilege matching `name` under `matching`.
    pub fn contains_name(&self, name: &str, matching: PrivilegeMatch) -> bool {
        match matching {
            PrivilegeMatch::Exact => self.privileges.contains_key(name),
            PrivilegeMatch::IgnoreCase => {
                if self.privileges.contains_key(name) {
                    return true;
                }
                let wanted = normalize_privilege_name(name);
                self.privileges
                    .keys()
                    .any(|held| normalize_privilege_name(held) == wanted)
            }
        }
    }

    /// Look up a privilege by exact name.
    pub fn get(&self, name: &str) -> Option<&Privilege> {
        self.privileges.get(name)
    }

    /// Iterate over the privileges in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Privilege> {
        self.privileges.values()
    }

    /// Iterate over the privilege names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.privileges.keys().map(String::as_str)
    }

    /// Merge another privilege set into this one.
    pub fn merge(&mut self, other: &PrivilegeSet) {
        for privilege in other.iter() {
            self.add(privilege.clone());
        }
    }

    /// Get the count of privileges.
    pub fn len(&self) -> usize {
        self.privileges.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.privileges.is_empty()
    }

    /// Clear all privileges.
    pub fn clear(&mut self) {
        self.privileges.clear();
    }
}

impl FromIterator<Privilege> for PrivilegeSet {
    fn from_iter<T: IntoIterator<Item = Privilege>>(iter: T) -> Self {
        let mut set = PrivilegeSet::new();
        set.add_all(iter);
        set
    }
}

impl From<Vec<Privilege>> for PrivilegeSet {
    fn from(privileges: Vec<Privilege>) -> Self {
        privileges.into_iter().collect()
    }
}

impl From<PrivilegeSet> for Vec<Privilege> {
    fn from(set: PrivilegeSet) -> Self {
        set.privileges.into_values().collect()
    }
}

impl<'a> IntoIterator for &'a PrivilegeSet {
    type Item = &'a Privilege;
    type IntoIter = std::collections::btree_map::Values<'a, String, Privilege>;

    fn into_iter(self) -> Self::IntoIter {
        self.privileges.values()
    }
}
