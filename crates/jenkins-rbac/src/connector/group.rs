use async_trait::async_trait;
use serde_json::Value;

use crate::engine::GrantEngine;
use crate::error::RbacResult;
use crate::strategy::RoleStrategyApi;
use crate::types::GroupIdentity;

use super::helpers::title_case;
use super::{
    profile, Entitlement, Grant, Resource, ResourceId, ResourceSyncer, ResourceType,
    RESOURCE_TYPE_GROUP,
};

/// Entitlements declared on every group.
///
/// Informational only: access is granted through `role` resources, so these
/// are never wired to grant or revoke.
pub const GROUP_ENTITLEMENTS: [&str; 2] = ["member", "admin"];

/// `group` resources derived from GROUP role assignments.
pub struct GroupSyncer<A: ?Sized> {
    engine: GrantEngine<A>,
}

impl<A: RoleStrategyApi + ?Sized> GroupSyncer<A> {
    pub fn new(engine: GrantEngine<A>) -> Self {
        Self { engine }
    }
}

fn group_resource(group: &GroupIdentity, parent: Option<&ResourceId>) -> Resource {
    Resource::new(
        &RESOURCE_TYPE_GROUP,
        group.id.as_str(),
        group.id.as_str(),
        parent,
        profile([
            ("group_id", Value::from(group.id.as_str())),
            ("group_name", Value::from(group.id.as_str())),
        ]),
    )
}

#[async_trait]
impl<A: RoleStrategyApi + ?Sized> ResourceSyncer for GroupSyncer<A> {
    fn resource_type(&self) -> &'static ResourceType {
        &RESOURCE_TYPE_GROUP
    }

    async fn list(&self, parent: Option<&ResourceId>) -> RbacResult<Vec<Resource>> {
        let groups = self.engine.list_groups().await?;
        Ok(groups
            .iter()
            .map(|group| group_resource(group, parent))
            .collect())
    }

    async fn entitlements(&self, resource: &Resource) -> RbacResult<Vec<Entitlement>> {
        Ok(GROUP_ENTITLEMENTS
            .iter()
            .map(|level| {
                Entitlement::permission(
                    resource,
                    level,
                    format!("{} Group {}", resource.display_name, title_case(level)),
                    format!("Access to {} group in Jenkins", resource.display_name),
                    &[&RESOURCE_TYPE_GROUP],
                )
            })
            .collect())
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
