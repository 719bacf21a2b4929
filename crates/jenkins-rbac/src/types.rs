//! Role-strategy and Jenkins API types.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Role scope in the role-strategy plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleNamespace {
    Global,
    Project,
    Slave,
}

impl RoleNamespace {
    /// Catalog order: global, project, slave.
    pub const ALL: [RoleNamespace; 3] = [Self::Global, Self::Project, Self::Slave];

    /// Value of the `type` query/form parameter.
    pub fn as_query(&self) -> &'static str {
        match self {
            Self::Global => "globalRoles",
            Self::Project => "projectRoles",
            Self::Slave => "slaveRoles",
        }
    }
}

impl fmt::Display for RoleNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query())
    }
}

/// Kind of principal attached to a role.
///
/// Anything other than `USER` or `GROUP` (e.g. `EITHER` from newer plugin
/// versions) is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PrincipalType {
    User,
    Group,
    Other(String),
}

impl PrincipalType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::User => "USER",
            Self::Group => "GROUP",
            Self::Other(raw) => raw,
        }
    }

    /// Map a downstream resource type id (`user`, `group`) to a principal type.
    pub fn from_resource_type(resource_type: &str) -> Self {
        match resource_type {
            "user" => Self::User,
            "group" => Self::Group,
            other => Self::Other(other.to_string()),
        }
    }

    /// Whether this principal type can be assigned a role.
    pub fn is_grantable(&self) -> bool {
        matches!(self, Self::User | Self::Group)
    }
}

impl From<&str> for PrincipalType {
    fn from(raw: &str) -> Self {
        match raw {
            "USER" => Self::User,
            "GROUP" => Self::Group,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for PrincipalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PrincipalType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PrincipalType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from(raw.as_str()))
    }
}

/// One principal attached to one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub sid: String,

    #[serde(rename = "type")]
    pub principal_type: PrincipalType,
}

impl RoleAssignment {
    pub fn new(sid: impl Into<String>, principal_type: PrincipalType) -> Self {
        Self {
            sid: sid.into(),
            principal_type,
        }
    }
}

/// One role as returned by one namespace query.
///
/// Role names are only unique within a namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleRecord {
    pub role_name: String,
    pub namespace: RoleNamespace,
    pub assignments: Vec<RoleAssignment>,
}

/// Group identity derived from GROUP assignments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GroupIdentity {
    pub id: String,
}

/// Materialized (role, principal) relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrantEdge {
    pub role_name: String,
    pub sid: String,
    pub principal_type: PrincipalType,
}

/// Entry of `GET /asynchPeople/api/json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeopleEntry {
    pub user: User,

    #[serde(rename = "lastChange", default)]
    pub last_change: Option<i64>,
}

/// Response from `GET /asynchPeople/api/json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeopleResponse {
    #[serde(default)]
    pub users: Vec<PeopleEntry>,
}

/// Jenkins user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,

    #[serde(rename = "fullName", default)]
    pub full_name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(rename = "absoluteUrl", default)]
    pub absolute_url: Option<String>,
}

/// Response from `GET /computer/api/json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputersResponse {
    #[serde(default)]
    pub computer: Vec<Computer>,
}

/// Jenkins build node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Computer {
    #[serde(rename = "displayName")]
    pub display_name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub idle: bool,

    #[serde(rename = "manualLaunchAllowed", default)]
    pub manual_launch_allowed: bool,

    #[serde(rename = "assignedLabels", default)]
    pub assigned_labels: Vec<AssignedLabel>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignedLabel {
    pub name: String,
}

/// Response from `GET /api/json?tree=jobs[...]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobsResponse {
    #[serde(default)]
    pub jobs: Vec<Job>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub name: String,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub color: Option<String>,

    #[serde(default)]
    pub buildable: Option<bool>,
}

/// Response from `GET /api/json?tree=views[...]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewsResponse {
    #[serde(default)]
    pub views: Vec<View>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct View {
    pub name: String,

    #[serde(default)]
    pub url: Option<String>,
}
