use jenkins_rbac::{JenkinsConnector, MutationAction, PrincipalType, RbacResult};

use super::Output;
use crate::cli::args::PrincipalArgs;

pub async fn grant(connector: &JenkinsConnector, args: PrincipalArgs) -> RbacResult<Output> {
    apply(connector, MutationAction::Assign, args).await
}

pub async fn revoke(connector: &JenkinsConnector, args: PrincipalArgs) -> RbacResult<Output> {
    apply(connector, MutationAction::Unassign, args).await
}

async fn apply(
    connector: &JenkinsConnector,
    action: MutationAction,
    args: PrincipalArgs,
) -> RbacResult<Output> {
    let principal_type = parse_principal_type(&args.principal_type);
    let engine = connector.engine();

    let action = match action {
        MutationAction::Assign => {
            engine
                .grant(&args.role, &args.principal, &principal_type)
                .await?;
            "granted"
        }
        MutationAction::Unassign => {
            engine
                .revoke(&args.role, &args.principal, &principal_type)
                .await?;
            "revoked"
        }
    };

    Ok(Output::Mutation {
        action,
        role: args.role,
        principal: args.principal,
        principal_type: principal_type.to_string(),
    })
}

/// Unknown names become `PrincipalType::Other` so the engine rejects them.
fn parse_principal_type(raw: &str) -> PrincipalType {
    PrincipalType::from_resource_type(&raw.to_ascii_lowercase())
}
