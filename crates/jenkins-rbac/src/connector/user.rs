use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::client::JenkinsClient;
use crate::error::RbacResult;
use crate::types::User;

use super::helpers::split_full_name;
use super::{profile, Resource, ResourceId, ResourceSyncer, ResourceType, RESOURCE_TYPE_USER};

/// Synthetic user Jenkins applies to unauthenticated requests.
pub const ANONYMOUS_USER: &str = "anonymous";

pub struct UserSyncer {
    client: Arc<JenkinsClient>,
}

impl UserSyncer {
    pub fn new(client: Arc<JenkinsClient>) -> Self {
        Self { client }
    }
}

fn user_resource(user: &User, parent: Option<&ResourceId>) -> Resource {
    let (first_name, last_name) = split_full_name(&user.full_name);
    let display_name = if user.full_name.is_empty() {
        user.id.as_str()
    } else {
        user.full_name.as_str()
    };

    Resource::new(
        &RESOURCE_TYPE_USER,
        user.id.as_str(),
        display_name,
        parent,
        profile([
            ("first_name", Value::from(first_name)),
            ("last_name", Value::from(last_name)),
            ("user_id", Value::from(user.id.as_str())),
        ]),
    )
}

#[async_trait]
impl ResourceSyncer for UserSyncer {
    fn resource_type(&self) -> &'static ResourceType {
        &RESOURCE_TYPE_USER
    }

    async fn list(&self, parent: Option<&ResourceId>) -> RbacResult<Vec<Resource>> {
        let mut users = self.client.get_users().await?;
        if !users.iter().any(|u| u.id == ANONYMOUS_USER) {
            users.push(User {
                id: ANONYMOUS_USER.to_string(),
                full_name: "Anonymous".to_string(),
                description: Some("Default user".to_string()),
                absolute_url: None,
            });
        }

        Ok(users
            .iter()
            .map(|user| user_resource(user, parent))
            .collect())
    }
}
