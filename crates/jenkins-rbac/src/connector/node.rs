use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::client::JenkinsClient;
use crate::error::RbacResult;

use super::{profile, Resource, ResourceId, ResourceSyncer, ResourceType, RESOURCE_TYPE_NODE};

/// Build nodes (computers), listed without entitlements.
pub struct NodeSyncer {
    client: Arc<JenkinsClient>,
}

impl NodeSyncer {
    pub fn new(client: Arc<JenkinsClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceSyncer for NodeSyncer {
    fn resource_type(&self) -> &'static ResourceType {
        &RESOURCE_TYPE_NODE
    }

    async fn list(&self, parent: Option<&ResourceId>) -> RbacResult<Vec<Resource>> {
        let nodes = self.client.get_nodes().await?;
        Ok(nodes
            .iter()
            .map(|node| {
                let labels: Vec<Value> = node
                    .assigned_labels
                    .iter()
                    .map(|l| Value::from(l.name.as_str()))
                    .collect();
                Resource::new(
                    &RESOURCE_TYPE_NODE,
                    node.display_name.as_str(),
                    node.display_name.as_str(),
                    parent,
                    profile([
                        ("node_name", Value::from(node.display_name.as_str())),
                        ("idle", Value::from(node.idle)),
                        ("labels", Value::Array(labels)),
                    ]),
                )
            })
            .collect())
    }
}
