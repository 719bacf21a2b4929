use jenkins_rbac::{JenkinsConnector, RbacResult};
use tracing::info;

use super::Output;

pub async fn users(connector: &JenkinsConnector) -> RbacResult<Output> {
    connector.client().get_users().await.map(Output::Users)
}

pub async fn nodes(connector: &JenkinsConnector) -> RbacResult<Output> {
    connector.client().get_nodes().await.map(Output::Nodes)
}

pub async fn jobs(connector: &JenkinsConnector) -> RbacResult<Output> {
    connector.client().get_jobs().await.map(Output::Jobs)
}

pub async fn views(connector: &JenkinsConnector) -> RbacResult<Output> {
    connector.client().get_views().await.map(Output::Views)
}

pub async fn sync(connector: &JenkinsConnector) -> RbacResult<Output> {
    let report = connector.sync().await?;
    info!(
        resources = report.resources.len(),
        entitlements = report.entitlements.len(),
        grants = report.grants.len(),
        "sync complete"
    );
    Ok(Output::Sync(report))
}

pub async fn validate(connector: &JenkinsConnector) -> RbacResult<Output> {
    connector.validate().await?;
    Ok(Output::Validated {
        base_url: connector.client().base_url().to_string(),
        status: "ok",
    })
}
