//! Tests for loading and saving role graphs through a store.

use records_rbac::{
    MemoryRoleStore, Principal, Privilege, RbacConfig, RbacError, Role, RoleGraph, RoleStore,
    AUTHENTICATED_ROLE,
};
use uuid::Uuid;

async fn seeded_store() -> MemoryRoleStore {
    let store = MemoryRoleStore::new();

    let view = store
        .save_privilege(Privilege::new("View Programs").with_description("Able to view programs"))
        .await
        .unwrap();
    let manage = store
        .save_privilege(Privilege::new("Manage Programs"))
        .await
        .unwrap();

    store
        .save_role(Role::new(AUTHENTICATED_ROLE).with_privilege(view))
        .await
        .unwrap();
    store
        .save_role(
            Role::new("Program Manager")
                .with_inherited_role(AUTHENTICATED_ROLE)
                .with_privilege(manage),
        )
        .await
        .unwrap();

    let mut retired = Role::new("Old Manager").with_inherited_role("Program Manager");
    retired.retire("merged into Program Manager", None);
    store.save_role(retired).await.unwrap();

    store
}

#[tokio::test]
async fn test_load_resolves_inheritance() {
    let store = seeded_store().await;
    let graph = RoleGraph::load(&store, RbacConfig::default()).await.unwrap();

    assert_eq!(graph.len(), 3);
    assert!(graph.has_privilege("Program Manager", "view programs"));
    assert!(graph.has_privilege("Old Manager", "Manage Programs"));
    assert_eq!(graph.all_child_roles(AUTHENTICATED_ROLE).len(), 2);
}

#[tokio::test]
async fn test_load_without_retired_roles() {
    let store = seeded_store().await;
    let config = RbacConfig {
        include_retired_roles: false,
        ..RbacConfig::default()
    };
    let graph = RoleGraph::load(&store, config).await.unwrap();

    assert_eq!(graph.len(), 2);
    assert!(!graph.contains("Old Manager"));
    assert_eq!(graph.all_child_roles(AUTHENTICATED_ROLE).len(), 1);
}

#[tokio::test]
async fn test_load_rejects_invalid_config() {
    let store = seeded_store().await;
    let config = RbacConfig {
        superuser_role: String::new(),
        ..RbacConfig::default()
    };
    assert!(matches!(
        RoleGraph::load(&store, config).await,
        Err(RbacError::Config(_))
    ));
}

#[tokio::test]
async fn test_save_round_trip_keeps_edges_and_id() {
    let store = MemoryRoleStore::new();
    let mut graph = RoleGraph::new();
    graph.insert_role(Role::new("Registrar"));
    graph.insert_role(Role::new("Senior Registrar"));
    graph
        .add_inherited_role("Senior Registrar", "Registrar")
        .unwrap();
    graph
        .grant_privilege("Registrar", Privilege::new("Add Patients"))
        .unwrap();

    let registrar = graph.save_role(&store, "Registrar").await.unwrap();
    let senior = graph.save_role(&store, "Senior Registrar").await.unwrap();
    assert!(registrar.id.is_some());
    assert_eq!(graph.role("Registrar").unwrap().id, registrar.id);

    let by_id = store.get_role_by_id(senior.id.unwrap()).await.unwrap().unwrap();
    assert!(by_id.inherited_roles().contains("Registrar"));

    let reloaded = RoleGraph::load(&store, RbacConfig::default()).await.unwrap();
    assert!(reloaded.has_privilege("Senior Registrar", "add patients"));
}

#[tokio::test]
async fn test_save_unknown_role() {
    let store = MemoryRoleStore::new();
    let mut graph = RoleGraph::new();
    assert!(matches!(
        graph.save_role(&store, "Ghost").await,
        Err(RbacError::RoleNotFound(_))
    ));
}

#[tokio::test]
async fn test_principal_against_loaded_graph() {
    let store = seeded_store().await;
    let graph = RoleGraph::load(&store, RbacConfig::default()).await.unwrap();

    let manager = Principal::authenticated(Uuid::now_v7(), "pm").with_role("Program Manager");
    assert!(graph.require_privilege(&manager, "Manage Programs").is_ok());

    let user = Principal::authenticated(Uuid::now_v7(), "someone");
    assert!(graph.require_privilege(&user, "View Programs").is_ok());
    assert!(graph.require_privilege(&user, "Manage Programs").is_err());

    assert!(graph
        .require_privilege(&Principal::anonymous(), "View Programs")
        .is_err());
}
