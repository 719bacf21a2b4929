use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::client::JenkinsClient;
use crate::error::RbacResult;

use super::{profile, Resource, ResourceId, ResourceSyncer, ResourceType, RESOURCE_TYPE_JOB};

pub struct JobSyncer {
    client: Arc<JenkinsClient>,
}

impl JobSyncer {
    pub fn new(client: Arc<JenkinsClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceSyncer for JobSyncer {
    fn resource_type(&self) -> &'static ResourceType {
        &RESOURCE_TYPE_JOB
    }

    async fn list(&self, parent: Option<&ResourceId>) -> RbacResult<Vec<Resource>> {
        let jobs = self.client.get_jobs().await?;
        Ok(jobs
            .iter()
            .map(|job| {
                Resource::new(
                    &RESOURCE_TYPE_JOB,
                    job.name.as_str(),
                    job.name.as_str(),
                    parent,
                    profile([
                        ("job_name", Value::from(job.name.as_str())),
                        ("url", job.url.clone().map(Value::from).unwrap_or(Value::Null)),
                    ]),
                )
            })
            .collect())
    }
}
