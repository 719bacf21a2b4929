//! Resource/entitlement/grant surface handed to the hosting framework.
//!
//! Each Jenkins concept is exposed by one [`ResourceSyncer`]:
//!
//! | Type    | List                        | Entitlements        | Grants / Grant / Revoke |
//! |---------|-----------------------------|---------------------|-------------------------|
//! | `role`  | one per role record         | one per role        | via [`GrantEngine`]     |
//! | `group` | derived groups              | `member`, `admin`   | no-ops                  |
//! | `user`  | people + `anonymous`        | none                | none                    |
//! | `node`, `job`, `view` | listings only | none                | none                    |

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::client::JenkinsClient;
use crate::config::JenkinsConfig;
use crate::engine::GrantEngine;
use crate::error::RbacResult;
use crate::types::RoleNamespace;

pub mod helpers;
mod group;
mod job;
mod node;
mod resource_types;
mod role;
mod user;
mod view;

pub use group::{GroupSyncer, GROUP_ENTITLEMENTS};
pub use job::JobSyncer;
pub use node::NodeSyncer;
pub use resource_types::*;
pub use role::RoleSyncer;
pub use user::{UserSyncer, ANONYMOUS_USER};
pub use view::ViewSyncer;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResourceId {
    pub resource_type: String,
    pub resource: String,
}

impl ResourceId {
    pub fn new(resource_type: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            resource: resource.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resource {
    pub id: ResourceId,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<ResourceId>,
    pub profile: Map<String, Value>,
}

impl Resource {
    pub(crate) fn new(
        resource_type: &ResourceType,
        id: impl Into<String>,
        display_name: impl Into<String>,
        parent: Option<&ResourceId>,
        profile: Map<String, Value>,
    ) -> Self {
        Self {
            id: ResourceId::new(resource_type.id, id),
            display_name: display_name.into(),
            parent: parent.cloned(),
            profile,
        }
    }
}

/// Permission a principal can hold on a resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entitlement {
    pub id: String,
    pub resource: Resource,
    pub slug: String,
    pub display_name: String,
    pub description: String,
    pub grantable_to: Vec<&'static str>,
}

impl Entitlement {
    pub(crate) fn permission(
        resource: &Resource,
        slug: &str,
        display_name: String,
        description: String,
        grantable_to: &[&ResourceType],
    ) -> Self {
        Self {
            id: helpers::entitlement_id(&resource.id, slug),
            resource: resource.clone(),
            slug: slug.to_string(),
            display_name,
            description,
            grantable_to: grantable_to.iter().map(|t| t.id).collect(),
        }
    }
}

/// A principal holding an entitlement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grant {
    pub id: String,
    pub entitlement: Entitlement,
    pub principal: ResourceId,
}

impl Grant {
    pub(crate) fn new(entitlement: Entitlement, principal: ResourceId) -> Self {
        Self {
            id: helpers::grant_id(&entitlement.id, &principal),
            entitlement,
            principal,
        }
    }
}

/// One resource type as seen by the host.
///
/// Entitlements, grants and provisioning default to "nothing to do".
#[async_trait]
pub trait ResourceSyncer: Send + Sync {
    fn resource_type(&self) -> &'static ResourceType;

    async fn list(&self, parent: Option<&ResourceId>) -> RbacResult<Vec<Resource>>;

    async fn entitlements(&self, _resource: &Resource) -> RbacResult<Vec<Entitlement>> {
        Ok(Vec::new())
    }

    async fn grants(&self, _resource: &Resource) -> RbacResult<Vec<Grant>> {
        Ok(Vec::new())
    }

    async fn grant(&self, _principal: &ResourceId, _entitlement: &Entitlement) -> RbacResult<()> {
        Ok(())
    }

    async fn revoke(&self, _grant: &Grant) -> RbacResult<()> {
        Ok(())
    }
}

/// Everything one full pass over the syncers produced.
#[derive(Debug, Default, Serialize)]
pub struct SyncReport {
    pub resources: Vec<Resource>,
    pub entitlements: Vec<Entitlement>,
    pub grants: Vec<Grant>,
}

/// Assembles the syncers around one shared client.
#[derive(Clone)]
pub struct JenkinsConnector {
    client: Arc<JenkinsClient>,
    engine: GrantEngine<JenkinsClient>,
}

impl JenkinsConnector {
    pub fn new(config: &JenkinsConfig) -> RbacResult<Self> {
        Ok(Self::from_client(JenkinsClient::new(config)?))
    }

    pub fn from_client(client: JenkinsClient) -> Self {
        let client = Arc::new(client);
        Self {
            engine: GrantEngine::new(Arc::clone(&client)),
            client,
        }
    }

    pub fn client(&self) -> &JenkinsClient {
        &self.client
    }

    pub fn engine(&self) -> &GrantEngine<JenkinsClient> {
        &self.engine
    }

    /// Confirms the credentials work and the role-strategy plugin answers.
    pub async fn validate(&self) -> RbacResult<()> {
        self.client.get_roles(RoleNamespace::Global).await.map(|_| ())
    }

    pub fn resource_types(&self) -> Vec<&'static ResourceType> {
        self.syncers().iter().map(|s| s.resource_type()).collect()
    }

    pub fn syncers(&self) -> Vec<Box<dyn ResourceSyncer>> {
        vec![
            Box::new(UserSyncer::new(Arc::clone(&self.client))),
            Box::new(GroupSyncer::new(self.engine.clone())),
            Box::new(RoleSyncer::new(self.engine.clone())),
            Box::new(NodeSyncer::new(Arc::clone(&self.client))),
            Box::new(JobSyncer::new(Arc::clone(&self.client))),
            Box::new(ViewSyncer::new(Arc::clone(&self.client))),
        ]
    }

    /// Syncer for a resource type id, if that type exists.
    pub fn syncer(&self, resource_type: &str) -> Option<Box<dyn ResourceSyncer>> {
        self.syncers()
            .into_iter()
            .find(|s| s.resource_type().id == resource_type)
    }

    /// List every resource, then its entitlements and grants. Fails on the
    /// first error.
    pub async fn sync(&self) -> RbacResult<SyncReport> {
        let mut report = SyncReport::default();
        for syncer in self.syncers() {
            let resources = syncer.list(None).await?;
            if !syncer.resource_type().skip_entitlements_and_grants {
                for resource in &resources {
                    report
                        .entitlements
                        .extend(syncer.entitlements(resource).await?);
                    report.grants.extend(syncer.grants(resource).await?);
                }
            }
            report.resources.extend(resources);
        }
        Ok(report)
    }
}

pub(crate) fn profile<const N: usize>(fields: [(&str, Value); N]) -> Map<String, Value> {
    fields
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}
