use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::client::JenkinsClient;
use crate::error::RbacResult;

use super::{profile, Resource, ResourceId, ResourceSyncer, ResourceType, RESOURCE_TYPE_VIEW};

pub struct ViewSyncer {
    client: Arc<JenkinsClient>,
}

impl ViewSyncer {
    pub fn new(client: Arc<JenkinsClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceSyncer for ViewSyncer {
    fn resource_type(&self) -> &'static ResourceType {
        &RESOURCE_TYPE_VIEW
    }

    async fn list(&self, parent: Option<&ResourceId>) -> RbacResult<Vec<Resource>> {
        let views = self.client.get_views().await?;
        Ok(views
            .iter()
            .map(|view| {
                Resource::new(
                    &RESOURCE_TYPE_VIEW,
                    view.name.as_str(),
                    view.name.as_str(),
                    parent,
                    profile([
                        ("view_name", Value::from(view.name.as_str())),
                        ("url", view.url.clone().map(Value::from).unwrap_or(Value::Null)),
                    ]),
                )
            })
            .collect())
    }
}
