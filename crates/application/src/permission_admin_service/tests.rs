use std::collections::BTreeSet;
use std::sync::Arc;

use outreach_core::{AccessScope, AppError};
use outreach_domain::AuditAction;

use crate::test_support::FakeStore;
use crate::{AuthorizationService, ProvisionPermissionInput};

use super::PermissionAdminService;

fn scope(role_key: &str, branch_key: &str) -> AccessScope {
    AccessScope::new(role_key, branch_key).unwrap_or_else(|_| unreachable!())
}

fn entry(feature_key: &str, action_keys: &[&str]) -> ProvisionPermissionInput {
    ProvisionPermissionInput {
        feature_key: feature_key.to_owned(),
        action_keys: action_keys.iter().map(|key| (*key).to_owned()).collect(),
    }
}

fn services(store: &Arc<FakeStore>) -> (PermissionAdminService, AuthorizationService) {
    (
        PermissionAdminService::new(store.clone(), store.clone(), store.clone()),
        AuthorizationService::new(store.clone()),
    )
}

async fn granted_set(
    authorization: &AuthorizationService,
    scope: &AccessScope,
) -> BTreeSet<(String, String)> {
    let mut granted = BTreeSet::new();
    for (feature_key, action_key) in [
        ("contacts", "read"),
        ("contacts", "write"),
        ("reports", "read"),
        ("reports", "export"),
    ] {
        if authorization
            .has_permission(scope, feature_key, Some(action_key))
            .await
        {
            granted.insert((feature_key.to_owned(), action_key.to_owned()));
        }
    }
    granted
}

#[tokio::test]
async fn provisioned_actions_are_granted_and_others_denied() {
    let store = Arc::new(FakeStore::with_contacts_catalog());
    let (admin, authorization) = services(&store);
    let agent = scope("agent", "b1");

    let result = admin
        .provision(&agent, Some("admin-1"), vec![entry("contacts", &["read"])])
        .await;
    assert!(result.is_ok());

    assert!(authorization.has_permission(&agent, "contacts", Some("read")).await);
    assert!(!authorization.has_permission(&agent, "contacts", Some("write")).await);

    let matrix = admin.permission_matrix(&agent).await.unwrap_or_default();
    let contacts = matrix
        .iter()
        .find(|feature| feature.feature_key == "contacts");
    assert!(contacts.is_some());
    let contacts = contacts.unwrap_or_else(|| unreachable!());
    let states: Vec<(&str, bool)> = contacts
        .actions
        .iter()
        .map(|action| (action.action_key.as_str(), action.has_permission))
        .collect();
    assert_eq!(states, vec![("read", true), ("write", false)]);
}

#[tokio::test]
async fn provisioned_rows_carry_actor_and_unique_ids() {
    let store = Arc::new(FakeStore::with_contacts_catalog());
    let (admin, _) = services(&store);

    let permissions = admin
        .provision(
            &scope("agent", "b1"),
            Some("admin-1"),
            vec![
                entry("contacts", &["read", "write", "read"]),
                entry("reports", &["export"]),
            ],
        )
        .await
        .unwrap_or_default();

    assert_eq!(permissions.len(), 2);
    assert_eq!(
        permissions[0].granted_action_keys(),
        vec!["read".to_owned(), "write".to_owned()]
    );
    assert_ne!(permissions[0].unique_id, permissions[1].unique_id);
    assert!(
        permissions
            .iter()
            .all(|permission| permission.created_by.as_deref() == Some("admin-1"))
    );
}

#[tokio::test]
async fn reprovisioning_deactivates_unlisted_features() {
    let store = Arc::new(FakeStore::with_contacts_catalog());
    let (admin, authorization) = services(&store);
    let agent = scope("agent", "b1");

    assert!(
        admin
            .provision(&agent, None, vec![entry("contacts", &["read"])])
            .await
            .is_ok()
    );
    assert!(
        admin
            .provision(&agent, None, vec![entry("reports", &["export"])])
            .await
            .is_ok()
    );

    assert!(!authorization.has_permission(&agent, "contacts", Some("read")).await);
    assert!(authorization.has_permission(&agent, "reports", Some("export")).await);
}

#[tokio::test]
async fn provisioning_is_idempotent() {
    let store = Arc::new(FakeStore::with_contacts_catalog());
    let (admin, authorization) = services(&store);
    let agent = scope("agent", "b1");
    let request = || vec![entry("contacts", &["read"]), entry("reports", &["read"])];

    assert!(admin.provision(&agent, None, request()).await.is_ok());
    let once = granted_set(&authorization, &agent).await;
    let rows_once = store.rows().await.len();

    assert!(admin.provision(&agent, None, request()).await.is_ok());
    assert_eq!(granted_set(&authorization, &agent).await, once);
    assert_eq!(store.rows().await.len(), rows_once);
}

#[tokio::test]
async fn rejected_action_leaves_existing_grants_unchanged() {
    let store = Arc::new(FakeStore::with_contacts_catalog());
    let (admin, authorization) = services(&store);
    let agent = scope("agent", "b1");

    assert!(
        admin
            .provision(&agent, None, vec![entry("contacts", &["read"])])
            .await
            .is_ok()
    );
    let before = granted_set(&authorization, &agent).await;

    let result = admin
        .provision(
            &agent,
            None,
            vec![
                entry("reports", &["read"]),
                entry("contacts", &["write", "purge", "archive"]),
            ],
        )
        .await;

    match result {
        Err(AppError::Validation(message)) => {
            assert_eq!(
                message,
                "invalid actions for feature 'contacts': archive, purge"
            );
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(granted_set(&authorization, &agent).await, before);
}

#[tokio::test]
async fn inactive_actions_cannot_be_provisioned() {
    let store = Arc::new(FakeStore::with_contacts_catalog());
    let (admin, _) = services(&store);

    let result = admin
        .provision(&scope("agent", "b1"), None, vec![entry("reports", &["purge"])])
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn malformed_entries_are_rejected_with_named_feature() {
    let store = Arc::new(FakeStore::with_contacts_catalog());
    let (admin, _) = services(&store);
    let agent = scope("agent", "b1");

    let cases = [
        (vec![entry(" ", &["read"])], "missing feature_key"),
        (
            vec![entry("contacts", &[])],
            "missing action_keys for feature 'contacts'",
        ),
        (
            vec![entry("billing", &["read"])],
            "feature 'billing' not found",
        ),
        (
            vec![entry("contacts", &["read"]), entry("contacts", &["write"])],
            "feature 'contacts' is listed more than once",
        ),
    ];

    for (request, expected) in cases {
        match admin.provision(&agent, None, request).await {
            Err(AppError::Validation(message)) => assert_eq!(message, expected),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
    assert!(store.rows().await.is_empty());
}

#[tokio::test]
async fn inactive_feature_still_resolves() {
    let store = Arc::new(FakeStore::with_contacts_catalog());
    let (admin, authorization) = services(&store);
    let agent = scope("agent", "b1");

    assert!(
        admin
            .provision(&agent, None, vec![entry("legacy", &["read"])])
            .await
            .is_ok()
    );
    assert!(authorization.has_permission(&agent, "legacy", Some("read")).await);
}

#[tokio::test]
async fn empty_request_revokes_everything() {
    let store = Arc::new(FakeStore::with_contacts_catalog());
    let (admin, authorization) = services(&store);
    let agent = scope("agent", "b1");

    assert!(
        admin
            .provision(&agent, None, vec![entry("contacts", &["read"])])
            .await
            .is_ok()
    );
    let permissions = admin.provision(&agent, None, Vec::new()).await;
    assert_eq!(permissions.unwrap_or_default().len(), 0);
    assert!(!authorization.has_permission(&agent, "contacts", None).await);
}

#[tokio::test]
async fn storage_failure_on_write_surfaces_as_error() {
    let store = Arc::new(FakeStore::with_contacts_catalog());
    store.fail_writes();
    let (admin, _) = services(&store);

    let result = admin
        .provision(&scope("agent", "b1"), None, vec![entry("contacts", &["read"])])
        .await;
    assert!(matches!(result, Err(AppError::Internal(_))));
    assert!(store.audit_events().await.is_empty());
}

#[tokio::test]
async fn role_lifecycle_signals_toggle_grants() {
    let store = Arc::new(FakeStore::with_contacts_catalog());
    let (admin, authorization) = services(&store);
    let agent = scope("agent", "b1");

    assert!(
        admin
            .provision(
                &agent,
                None,
                vec![entry("contacts", &["read"]), entry("reports", &["read"])],
            )
            .await
            .is_ok()
    );

    assert_eq!(
        admin
            .set_role_active(&agent, Some("admin-1"), false)
            .await
            .unwrap_or_default(),
        2
    );
    assert!(granted_set(&authorization, &agent).await.is_empty());

    assert!(admin.set_role_active(&agent, None, true).await.is_ok());
    assert_eq!(granted_set(&authorization, &agent).await.len(), 2);

    assert_eq!(admin.delete_role(&agent, None).await.unwrap_or_default(), 2);
    assert!(granted_set(&authorization, &agent).await.is_empty());

    assert!(
        admin
            .provision(&agent, None, vec![entry("contacts", &["read"])])
            .await
            .is_ok()
    );
    assert!(authorization.has_permission(&agent, "contacts", Some("read")).await);
    assert!(!authorization.has_permission(&agent, "reports", Some("read")).await);
}

#[tokio::test]
async fn admin_operations_append_audit_events() {
    let store = Arc::new(FakeStore::with_contacts_catalog());
    let (admin, _) = services(&store);
    let agent = scope("agent", "b1");

    assert!(
        admin
            .provision(&agent, Some("admin-1"), vec![entry("contacts", &["read"])])
            .await
            .is_ok()
    );
    assert!(admin.set_role_active(&agent, None, false).await.is_ok());
    assert!(admin.delete_role(&agent, None).await.is_ok());

    let events = store.audit_events().await;
    let actions: Vec<AuditAction> = events.iter().map(|event| event.action).collect();
    assert_eq!(
        actions,
        vec![
            AuditAction::SecurityPermissionsProvisioned,
            AuditAction::SecurityRoleStatusChanged,
            AuditAction::SecurityRoleDeleted,
        ]
    );
    assert_eq!(events[0].subject, "admin-1");
    assert_eq!(events[1].subject, "system");
    assert!(events.iter().all(|event| event.branch_key == "b1"));
    assert!(events.iter().all(|event| event.resource_id == "agent"));
}
