use serde::Serialize;

/// Shape a resource type takes in the host's model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceTrait {
    User,
    Group,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceType {
    pub id: &'static str,
    pub display_name: &'static str,
    pub resource_trait: ResourceTrait,
    /// When set, the host does not ask this type for entitlements or grants.
    pub skip_entitlements_and_grants: bool,
}

pub static RESOURCE_TYPE_USER: ResourceType = ResourceType {
    id: "user",
    display_name: "User",
    resource_trait: ResourceTrait::User,
    skip_entitlements_and_grants: true,
};

pub static RESOURCE_TYPE_GROUP: ResourceType = ResourceType {
    id: "group",
    display_name: "Group",
    resource_trait: ResourceTrait::Group,
    skip_entitlements_and_grants: false,
};

pub static RESOURCE_TYPE_ROLE: ResourceType = ResourceType {
    id: "role",
    display_name: "Role",
    resource_trait: ResourceTrait::Group,
    skip_entitlements_and_grants: false,
};

pub static RESOURCE_TYPE_NODE: ResourceType = ResourceType {
    id: "node",
    display_name: "Node",
    resource_trait: ResourceTrait::Group,
    skip_entitlements_and_grants: false,
};

pub static RESOURCE_TYPE_JOB: ResourceType = ResourceType {
    id: "job",
    display_name: "Job",
    resource_trait: ResourceTrait::Group,
    skip_entitlements_and_grants: false,
};

pub static RESOURCE_TYPE_VIEW: ResourceType = ResourceType {
    id: "view",
    display_name: "View",
    resource_trait: ResourceTrait::Group,
    skip_entitlements_and_grants: false,
};
