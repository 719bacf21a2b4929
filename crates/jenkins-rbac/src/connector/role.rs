use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::engine::GrantEngine;
use crate::error::RbacResult;
use crate::strategy::RoleStrategyApi;
use crate::types::{PrincipalType, RoleRecord};

use super::helpers::title_case;
use super::{
    profile, Entitlement, Grant, Resource, ResourceId, ResourceSyncer, ResourceType,
    RESOURCE_TYPE_GROUP, RESOURCE_TYPE_ROLE, RESOURCE_TYPE_USER,
};

/// `role` resources: the only type whose grants are enforced.
pub struct RoleSyncer<A: ?Sized> {
    engine: GrantEngine<A>,
}

impl<A: RoleStrategyApi + ?Sized> RoleSyncer<A> {
    pub fn new(engine: GrantEngine<A>) -> Self {
        Self { engine }
    }
}

fn role_resource(record: &RoleRecord, parent: Option<&ResourceId>) -> Resource {
    Resource::new(
        &RESOURCE_TYPE_ROLE,
        record.role_name.as_str(),
        record.role_name.as_str(),
        parent,
        profile([
            ("role_name", Value::from(record.role_name.as_str())),
            ("namespace", Value::from(record.namespace.as_query())),
        ]),
    )
}

fn role_entitlement(resource: &Resource) -> Entitlement {
    let role_name = &resource.display_name;
    Entitlement::permission(
        resource,
        role_name,
        format!("{} Role", title_case(role_name)),
        format!("{} role in Jenkins", role_name),
        &[&RESOURCE_TYPE_USER, &RESOURCE_TYPE_GROUP],
    )
}

#[async_trait]
impl<A: RoleStrategyApi + ?Sized> ResourceSyncer for RoleSyncer<A> {
    fn resource_type(&self) -> &'static ResourceType {
        &RESOURCE_TYPE_ROLE
    }

    /// One resource per record; a name defined in several namespaces is
    /// listed once per namespace.
    async fn list(&self, parent: Option<&ResourceId>) -> RbacResult<Vec<Resource>> {
        let records = self.engine.list_roles().await?;
        Ok(records
            .iter()
            .map(|record| role_resource(record, parent))
            .collect())
    }

    async fn entitlements(&self, resource: &Resource) -> RbacResult<Vec<Entitlement>> {
        Ok(vec![role_entitlement(resource)])
    }

    async fn grants(&self, resource: &Resource) -> RbacResult<Vec<Grant>> {
        let entitlement = role_entitlement(resource);
        let edges = self.engine.list_grants(&resource.id.resource).await?;

        let mut grants = Vec::with_capacity(edges.len());
        for edge in edges {
            let principal_type = match edge.principal_type {
                PrincipalType::User => RESOURCE_TYPE_USER.id,
                PrincipalType::Group => RESOURCE_TYPE_GROUP.id,
                PrincipalType::Other(ref raw) => {
                    debug!(
                        role = %edge.role_name,
                        sid = %edge.sid,
                        principal_type = %raw,
                        "skipping assignment with no principal resource type"
                    );
                    continue;
                }
            };
            grants.push(Grant::new(
                entitlement.clone(),
                ResourceId::new(principal_type, edge.sid),
            ));
        }
        Ok(grants)
    }

    async fn grant(&self, principal: &ResourceId, entitlement: &Entitlement) -> RbacResult<()> {
        let principal_type = PrincipalType::from_resource_type(&principal.resource_type);
        self.engine
            .grant(
                &entitlement.resource.id.resource,
                &principal.resource,
                &principal_type,
            )
            .await
    }

    /// The role name comes from the entitlement's resource, not its id:
    /// role names may contain `:`.
    async fn revoke(&self, grant: &Grant) -> RbacResult<()> {
        let principal_type = PrincipalType::from_resource_type(&grant.principal.resource_type);
        self.engine
            .revoke(
                &grant.entitlement.resource.id.resource,
                &grant.principal.resource,
                &principal_type,
            )
            .await
    }
}
