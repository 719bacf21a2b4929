use jenkins_rbac::{JenkinsConnector, RbacResult};

use super::Output;
use crate::cli::args::{PrincipalArgs, RoleArg};

pub async fn list_roles(connector: &JenkinsConnector) -> RbacResult<Output> {
    connector.engine().list_roles().await.map(Output::Roles)
}

pub async fn list_groups(connector: &JenkinsConnector) -> RbacResult<Output> {
    connector.engine().list_groups().await.map(Output::Groups)
}

pub async fn list_grants(connector: &JenkinsConnector, args: RoleArg) -> RbacResult<Output> {
    connector
        .engine()
        .list_grants(&args.role)
        .await
        .map(Output::Grants)
}

/// `--type` is accepted but ignored: membership matches on the sid alone.
pub async fn exists(connector: &JenkinsConnector, args: PrincipalArgs) -> RbacResult<Output> {
    let exists = connector
        .engine()
        .exists(&args.role, &args.principal)
        .await?;
    Ok(Output::Exists {
        role: args.role,
        principal: args.principal,
        exists,
    })
}
