use std::time::Duration;

use jenkins_rbac::{
    with_deadline, Computer, ConfigBuilder, GrantEdge, GroupIdentity, JenkinsConnector, Job,
    RbacResult, RoleRecord, SyncReport, User, View,
};
use serde::Serialize;

use super::args::{Cli, Command, ConnectionArgs};
use crate::exit_codes::SUCCESS;

pub mod listing;
pub mod mutate;
pub mod roles;

/// What a command prints, as JSON on stdout.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Output {
    Roles(Vec<RoleRecord>),
    Groups(Vec<GroupIdentity>),
    Grants(Vec<GrantEdge>),
    Exists {
        role: String,
        principal: String,
        exists: bool,
    },
    Mutation {
        action: &'static str,
        role: String,
        principal: String,
        principal_type: String,
    },
    Users(Vec<User>),
    Nodes(Vec<Computer>),
    Jobs(Vec<Job>),
    Views(Vec<View>),
    Sync(SyncReport),
    Validated {
        base_url: String,
        status: &'static str,
    },
}

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    let connector = connect(&cli.conn)?;

    let output = match cli.conn.deadline_secs {
        Some(secs) => {
            let deadline = tokio::time::Instant::now() + Duration::from_secs(secs);
            with_deadline(deadline, run(cli.cmd, &connector)).await?
        }
        None => run(cli.cmd, &connector).await?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(SUCCESS)
}

fn connect(conn: &ConnectionArgs) -> RbacResult<JenkinsConnector> {
    let mut builder = ConfigBuilder::default();
    if let Some(url) = &conn.base_url {
        builder = builder.with_base_url(url);
    }
    if let Some(username) = &conn.username {
        builder = builder.with_username(username);
    }
    if let Some(password) = &conn.password {
        builder = builder.with_password(password);
    }
    if let Some(token) = &conn.token {
        builder = builder.with_api_token(token);
    }
    if let Some(secs) = conn.timeout {
        builder = builder.with_timeout_secs(secs);
    }
    JenkinsConnector::new(&builder.build()?)
}

async fn run(cmd: Command, connector: &JenkinsConnector) -> RbacResult<Output> {
    match cmd {
        Command::Roles => roles::list_roles(connector).await,
        Command::Groups => roles::list_groups(connector).await,
        Command::Grants(args) => roles::list_grants(connector, args).await,
        Command::Exists(args) => roles::exists(connector, args).await,
        Command::Grant(args) => mutate::grant(connector, args).await,
        Command::Revoke(args) => mutate::revoke(connector, args).await,
        Command::Users => listing::users(connector).await,
        Command::Nodes => listing::nodes(connector).await,
        Command::Jobs => listing::jobs(connector).await,
        Command::Views => listing::views(connector).await,
        Command::Sync => listing::sync(connector).await,
        Command::Validate => listing::validate(connector).await,
    }
}
