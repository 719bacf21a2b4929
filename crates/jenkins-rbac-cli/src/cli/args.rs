use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "jenkins-rbac",
    version,
    about = "Inspect and change Jenkins role-strategy grants"
)]
pub struct Cli {
    #[command(flatten)]
    pub conn: ConnectionArgs,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every role record across the global, project and slave namespaces
    Roles,
    /// List groups derived from GROUP assignments (plus "authenticated")
    Groups,
    /// List the principals holding a role
    Grants(RoleArg),
    /// Check whether a principal holds a role (any namespace, any type)
    Exists(PrincipalArgs),
    /// Assign a global role to a user or group
    Grant(PrincipalArgs),
    /// Unassign a global role from a user or group
    Revoke(PrincipalArgs),
    /// List Jenkins users
    Users,
    /// List build nodes
    Nodes,
    /// List jobs
    Jobs,
    /// List views
    Views,
    /// Walk every resource type and print resources, entitlements and grants
    Sync,
    /// Check credentials and that the role-strategy plugin responds
    Validate,
}

#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Jenkins base URL
    #[arg(long, global = true, env = "JENKINS_BASE_URL")]
    pub base_url: Option<String>,

    /// Account name
    #[arg(long, global = true, env = "JENKINS_USERNAME")]
    pub username: Option<String>,

    /// Account password (exclusive with --token)
    #[arg(long, global = true, env = "JENKINS_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// API token (exclusive with --password)
    #[arg(long, global = true, env = "JENKINS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, env = "JENKINS_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Abort the whole command after this many seconds
    #[arg(long, global = true)]
    pub deadline_secs: Option<u64>,
}

#[derive(Args, Debug, Clone)]
pub struct RoleArg {
    /// Role name
    pub role: String,
}

#[derive(Args, Debug, Clone)]
pub struct PrincipalArgs {
    /// Role name
    pub role: String,

    /// User id or group name
    pub principal: String,

    /// Principal type: user or group
    #[arg(long = "type", default_value = "user")]
    pub principal_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_grant_with_type() {
        let cli = Cli::try_parse_from([
            "jenkins-rbac",
            "grant",
            "reviewer",
            "eng",
            "--type",
            "group",
            "--base-url",
            "http://ci:8080",
        ])
        .unwrap();

        assert_eq!(cli.conn.base_url.as_deref(), Some("http://ci:8080"));
        match cli.cmd {
            Command::Grant(args) => {
                assert_eq!(args.role, "reviewer");
                assert_eq!(args.principal, "eng");
                assert_eq!(args.principal_type, "group");
            }
            other => panic!("expected grant, got {other:?}"),
        }
    }

    #[test]
    fn test_principal_type_defaults_to_user() {
        let cli = Cli::try_parse_from(["jenkins-rbac", "revoke", "reviewer", "bob"]).unwrap();
        match cli.cmd {
            Command::Revoke(args) => assert_eq!(args.principal_type, "user"),
            other => panic!("expected revoke, got {other:?}"),
        }
    }
}
