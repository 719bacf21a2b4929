//! List, grant and revoke over (role, principal) relations.
//!
//! Every call reads the catalog fresh. Grant and revoke check membership
//! first and only issue a mutation when it changes state:
//!
//! | State    | Grant            | Revoke         |
//! |----------|------------------|----------------|
//! | ABSENT   | assign → GRANTED | `NotGranted`   |
//! | GRANTED  | `AlreadyGranted` | unassign → ABSENT |
//!
//! The check and the mutation are two separate upstream calls, so two
//! concurrent identical requests can both pass the check. Jenkins offers no
//! compare-and-swap; a duplicate assign is left to the plugin.

use std::future::Future;
use std::sync::Arc;

use tokio::time::Instant;
use tracing::{info, warn};

use crate::catalog::RoleCatalog;
use crate::error::{RbacError, RbacResult};
use crate::groups::derive_groups;
use crate::membership::MembershipIndex;
use crate::strategy::{Mutation, MutationAction, RoleStrategyApi};
use crate::types::{GrantEdge, GroupIdentity, PrincipalType, RoleRecord};

/// Grant engine over a role-strategy backend.
pub struct GrantEngine<A: ?Sized> {
    catalog: RoleCatalog<A>,
}

impl<A: ?Sized> Clone for GrantEngine<A> {
    fn clone(&self) -> Self {
        Self {
            catalog: self.catalog.clone(),
        }
    }
}

impl<A: RoleStrategyApi + ?Sized> GrantEngine<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            catalog: RoleCatalog::new(api),
        }
    }

    pub fn catalog(&self) -> &RoleCatalog<A> {
        &self.catalog
    }

    /// Merged role records of every namespace.
    pub async fn list_roles(&self) -> RbacResult<Vec<RoleRecord>> {
        self.catalog.fetch_all().await
    }

    /// Groups derived from the current catalog.
    pub async fn list_groups(&self) -> RbacResult<Vec<GroupIdentity>> {
        let records = self.catalog.fetch_all().await?;
        Ok(derive_groups(&records))
    }

    /// Every assignment of every record named `role_name`.
    pub async fn list_grants(&self, role_name: &str) -> RbacResult<Vec<GrantEdge>> {
        let records = self.catalog.fetch_all().await?;
        Ok(MembershipIndex::new(&records).edges(role_name))
    }

    /// Whether `principal_id` holds `role_name` in any namespace.
    pub async fn exists(&self, role_name: &str, principal_id: &str) -> RbacResult<bool> {
        let records = self.catalog.fetch_all().await?;
        Ok(MembershipIndex::new(&records).holds(role_name, principal_id))
    }

    /// Assign `role_name` to a user or group (ABSENT → GRANTED).
    pub async fn grant(
        &self,
        role_name: &str,
        principal_id: &str,
        principal_type: &PrincipalType,
    ) -> RbacResult<()> {
        self.transition(MutationAction::Assign, role_name, principal_id, principal_type)
            .await
    }

    /// Remove `role_name` from a user or group (GRANTED → ABSENT).
    pub async fn revoke(
        &self,
        role_name: &str,
        principal_id: &str,
        principal_type: &PrincipalType,
    ) -> RbacResult<()> {
        self.transition(MutationAction::Unassign, role_name, principal_id, principal_type)
            .await
    }

    async fn transition(
        &self,
        action: MutationAction,
        role_name: &str,
        principal_id: &str,
        principal_type: &PrincipalType,
    ) -> RbacResult<()> {
        let mutation =
            Mutation::new(action, role_name, principal_id, principal_type).map_err(|e| {
                warn!(
                    role = role_name,
                    principal = principal_id,
                    principal_type = %principal_type,
                    "only users or groups can hold roles"
                );
                e
            })?;

        let held = self.exists(role_name, principal_id).await?;
        match (action, held) {
            (MutationAction::Assign, true) => {
                warn!(
                    role = role_name,
                    principal = principal_id,
                    principal_type = %principal_type,
                    "principal already has this role"
                );
                return Err(RbacError::AlreadyGranted {
                    role: role_name.to_string(),
                    principal: principal_id.to_string(),
                });
            }
            (MutationAction::Unassign, false) => {
                warn!(
                    role = role_name,
                    principal = principal_id,
                    principal_type = %principal_type,
                    "principal does not have this role"
                );
                return Err(RbacError::NotGranted {
                    role: role_name.to_string(),
                    principal: principal_id.to_string(),
                });
            }
            _ => {}
        }

        self.catalog
            .api()
            .apply(&mutation)
            .await
            .map_err(|source| mutation_failed(&mutation, source))?;

        info!(
            role = role_name,
            principal = principal_id,
            principal_type = %principal_type,
            action = ?action,
            "role assignment updated"
        );
        Ok(())
    }
}

fn mutation_failed(mutation: &Mutation, source: RbacError) -> RbacError {
    if matches!(source, RbacError::Timeout { .. }) {
        return source;
    }

    let role = mutation.role_name().to_string();
    let principal = mutation.sid().to_string();
    let endpoint = source.endpoint().unwrap_or(mutation.path()).to_string();
    let source = Box::new(source);

    match mutation.action() {
        MutationAction::Assign => RbacError::GrantFailed {
            role,
            principal,
            endpoint,
            source,
        },
        MutationAction::Unassign => RbacError::RevokeFailed {
            role,
            principal,
            endpoint,
            source,
        },
    }
}

/// Run `operation` until `deadline`; on expiry the operation (and any
/// in-flight request) is dropped and `Timeout` is returned.
pub async fn with_deadline<F, T>(deadline: Instant, operation: F) -> RbacResult<T>
where
    F: Future<Output = RbacResult<T>>,
{
    tokio::time::timeout_at(deadline, operation)
        .await
        .map_err(|_| RbacError::Timeout {
            message: "operation deadline expired".to_string(),
        })?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RoleAssignment, RoleNamespace};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    /// In-memory role-strategy state with a log of mutations.
    #[derive(Default)]
    struct MemoryStrategy {
        roles: Mutex<Vec<RoleRecord>>,
        mutations: Mutex<Vec<(MutationAction, String, String)>>,
        reads: Mutex<usize>,
        reject_mutations_with: Option<u16>,
    }

    impl MemoryStrategy {
        fn with_roles(roles: Vec<RoleRecord>) -> Arc<Self> {
            Arc::new(Self {
                roles: Mutex::new(roles),
                ..Default::default()
            })
        }

        fn mutation_count(&self) -> usize {
            self.mutations.lock().unwrap().len()
        }

        fn read_count(&self) -> usize {
            *self.reads.lock().unwrap()
        }
    }

    #[async_trait]
    impl RoleStrategyApi for MemoryStrategy {
        async fn fetch_roles(&self, namespace: RoleNamespace) -> RbacResult<Vec<RoleRecord>> {
            *self.reads.lock().unwrap() += 1;
            Ok(self
                .roles
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.namespace == namespace)
                .cloned()
                .collect())
        }

        async fn apply(&self, mutation: &Mutation) -> RbacResult<()> {
            if let Some(status) = self.reject_mutations_with {
                return Err(RbacError::Upstream {
                    endpoint: format!("http://jenkins/{}", mutation.path()),
                    status,
                    summary: "rejected".into(),
                });
            }

            self.mutations.lock().unwrap().push((
                mutation.action(),
                mutation.role_name().to_string(),
                mutation.sid().to_string(),
            ));

            let mut roles = self.roles.lock().unwrap();
            let record = roles
                .iter_mut()
                .find(|r| r.namespace == RoleNamespace::Global && r.role_name == mutation.role_name());
            match (mutation.action(), record) {
                (MutationAction::Assign, Some(record)) => record.assignments.push(
                    RoleAssignment::new(mutation.sid(), mutation.principal_type()),
                ),
                (MutationAction::Unassign, Some(record)) => {
                    record.assignments.retain(|a| a.sid != mutation.sid())
                }
                (_, None) => {}
            }
            Ok(())
        }
    }

    fn reviewer_catalog() -> Vec<RoleRecord> {
        vec![RoleRecord {
            role_name: "reviewer".into(),
            namespace: RoleNamespace::Global,
            assignments: vec![
                RoleAssignment::new("alice", PrincipalType::User),
                RoleAssignment::new("eng", PrincipalType::Group),
            ],
        }]
    }

    #[tokio::test]
    async fn test_list_grants_unions_namespaces() {
        let mut roles = reviewer_catalog();
        roles.push(RoleRecord {
            role_name: "reviewer".into(),
            namespace: RoleNamespace::Project,
            assignments: vec![RoleAssignment::new("carol", PrincipalType::User)],
        });
        let engine = GrantEngine::new(MemoryStrategy::with_roles(roles));

        let sids: Vec<_> = engine
            .list_grants("reviewer")
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.sid)
            .collect();
        assert_eq!(sids, ["alice", "eng", "carol"]);
    }

    #[tokio::test]
    async fn test_exists_ignores_principal_type() {
        let engine = GrantEngine::new(MemoryStrategy::with_roles(reviewer_catalog()));
        assert!(engine.exists("reviewer", "eng").await.unwrap());
        assert!(!engine.exists("reviewer", "bob").await.unwrap());
    }

    #[tokio::test]
    async fn test_grant_twice_issues_one_mutation() {
        let api = MemoryStrategy::with_roles(reviewer_catalog());
        let engine = GrantEngine::new(api.clone());

        engine
            .grant("reviewer", "bob", &PrincipalType::User)
            .await
            .unwrap();
        let err = engine
            .grant("reviewer", "bob", &PrincipalType::User)
            .await
            .unwrap_err();

        assert!(matches!(err, RbacError::AlreadyGranted { .. }));
        assert_eq!(api.mutation_count(), 1);
    }

    #[tokio::test]
    async fn test_revoke_never_granted_issues_nothing() {
        let api = MemoryStrategy::with_roles(reviewer_catalog());
        let engine = GrantEngine::new(api.clone());

        let err = engine
            .revoke("reviewer", "bob", &PrincipalType::User)
            .await
            .unwrap_err();

        assert!(matches!(err, RbacError::NotGranted { .. }));
        assert_eq!(api.mutation_count(), 0);
    }

    #[tokio::test]
    async fn test_grant_revoke_grant_cycle() {
        let api = MemoryStrategy::with_roles(reviewer_catalog());
        let engine = GrantEngine::new(api.clone());

        engine
            .grant("reviewer", "ops", &PrincipalType::Group)
            .await
            .unwrap();
        assert!(engine.exists("reviewer", "ops").await.unwrap());

        engine
            .revoke("reviewer", "ops", &PrincipalType::Group)
            .await
            .unwrap();
        assert!(!engine.exists("reviewer", "ops").await.unwrap());

        engine
            .grant("reviewer", "ops", &PrincipalType::Group)
            .await
            .unwrap();

        let log = api.mutations.lock().unwrap().clone();
        let actions: Vec<_> = log.iter().map(|(a, _, _)| *a).collect();
        assert_eq!(
            actions,
            [
                MutationAction::Assign,
                MutationAction::Unassign,
                MutationAction::Assign
            ]
        );
    }

    #[tokio::test]
    async fn test_invalid_principal_type_skips_reads_and_mutations() {
        let api = MemoryStrategy::with_roles(reviewer_catalog());
        let engine = GrantEngine::new(api.clone());

        let err = engine
            .grant("reviewer", "deploy", &PrincipalType::Other("job".into()))
            .await
            .unwrap_err();

        assert!(matches!(err, RbacError::InvalidPrincipalType { .. }));
        assert_eq!(api.read_count(), 0);
        assert_eq!(api.mutation_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_mutation_wraps_cause_and_endpoint() {
        let api = Arc::new(MemoryStrategy {
            roles: Mutex::new(reviewer_catalog()),
            reject_mutations_with: Some(500),
            ..Default::default()
        });
        let engine = GrantEngine::new(api);

        let grant_err = engine
            .grant("reviewer", "bob", &PrincipalType::User)
            .await
            .unwrap_err();
        match grant_err {
            RbacError::GrantFailed {
                endpoint, source, ..
            } => {
                assert_eq!(
                    endpoint,
                    "http://jenkins/role-strategy/strategy/assignUserRole"
                );
                assert!(matches!(*source, RbacError::Upstream { status: 500, .. }));
            }
            other => panic!("expected GrantFailed, got {other:?}"),
        }

        let revoke_err = engine
            .revoke("reviewer", "eng", &PrincipalType::Group)
            .await
            .unwrap_err();
        assert!(matches!(revoke_err, RbacError::RevokeFailed { .. }));
    }

    #[tokio::test]
    async fn test_list_groups() {
        let engine = GrantEngine::new(MemoryStrategy::with_roles(reviewer_catalog()));
        let groups = engine.list_groups().await.unwrap();
        let ids: Vec<_> = groups.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, ["eng", "authenticated"]);
    }

    #[tokio::test]
    async fn test_with_deadline_expires() {
        let deadline = Instant::now() + Duration::from_millis(20);
        let result: RbacResult<()> = with_deadline(deadline, async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await;

        assert!(matches!(result, Err(RbacError::Timeout { .. })));
    }

    #[tokio::test]
    async fn test_with_deadline_passes_result_through() {
        let deadline = Instant::now() + Duration::from_secs(5);
        let engine = GrantEngine::new(MemoryStrategy::with_roles(reviewer_catalog()));

        let exists = with_deadline(deadline, engine.exists("reviewer", "alice"))
            .await
            .unwrap();
        assert!(exists);
    }
}
