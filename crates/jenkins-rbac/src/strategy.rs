//! Seam between the engine and the role-strategy plugin.
//!
//! [`crate::client::JenkinsClient`] implements [`RoleStrategyApi`] over HTTP;
//! anything else that can read a namespace and apply a mutation can stand in
//! for it.

use async_trait::async_trait;

use crate::error::{RbacError, RbacResult};
use crate::types::{PrincipalType, RoleNamespace, RoleRecord};

/// Role-strategy operations the engine relies on.
#[async_trait]
pub trait RoleStrategyApi: Send + Sync {
    /// Fetch every role of one namespace.
    async fn fetch_roles(&self, namespace: RoleNamespace) -> RbacResult<Vec<RoleRecord>>;

    /// Apply one assign/unassign call. `Ok` only when Jenkins confirmed it.
    async fn apply(&self, mutation: &Mutation) -> RbacResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationAction {
    Assign,
    Unassign,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PrincipalKind {
    User,
    Group,
}

/// One assign/unassign call for a (role, principal) pair.
///
/// Only users and groups are representable; construction fails with
/// `InvalidPrincipalType` for anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    action: MutationAction,
    namespace: RoleNamespace,
    role_name: String,
    sid: String,
    kind: PrincipalKind,
}

impl Mutation {
    /// Mutations always target the global namespace: the assign endpoints do
    /// not reach project or agent roles through this path.
    pub fn new(
        action: MutationAction,
        role_name: impl Into<String>,
        sid: impl Into<String>,
        principal_type: &PrincipalType,
    ) -> RbacResult<Self> {
        let kind = match principal_type {
            PrincipalType::User => PrincipalKind::User,
            PrincipalType::Group => PrincipalKind::Group,
            PrincipalType::Other(raw) => {
                return Err(RbacError::InvalidPrincipalType {
                    principal_type: raw.clone(),
                })
            }
        };

        Ok(Self {
            action,
            namespace: RoleNamespace::Global,
            role_name: role_name.into(),
            sid: sid.into(),
            kind,
        })
    }

    pub fn action(&self) -> MutationAction {
        self.action
    }

    pub fn role_name(&self) -> &str {
        &self.role_name
    }

    pub fn sid(&self) -> &str {
        &self.sid
    }

    pub fn principal_type(&self) -> PrincipalType {
        match self.kind {
            PrincipalKind::User => PrincipalType::User,
            PrincipalKind::Group => PrincipalType::Group,
        }
    }

    /// Endpoint path relative to the Jenkins base URL.
    pub fn path(&self) -> &'static str {
        match (self.action, self.kind) {
            (MutationAction::Assign, PrincipalKind::User) => {
                "role-strategy/strategy/assignUserRole"
            }
            (MutationAction::Assign, PrincipalKind::Group) => {
                "role-strategy/strategy/assignGroupRole"
            }
            (MutationAction::Unassign, PrincipalKind::User) => {
                "role-strategy/strategy/unassignUserRole"
            }
            (MutationAction::Unassign, PrincipalKind::Group) => {
                "role-strategy/strategy/unassignGroupRole"
            }
        }
    }

    /// Form fields in wire order: `type`, `roleName`, then `user` or `group`.
    pub fn form_fields(&self) -> [(&'static str, &str); 3] {
        let principal_field = match self.kind {
            PrincipalKind::User => "user",
            PrincipalKind::Group => "group",
        };
        [
            ("type", self.namespace.as_query()),
            ("roleName", self.role_name.as_str()),
            (principal_field, self.sid.as_str()),
        ]
    }
}
