//! Role-strategy authorization mapping for Jenkins.
//!
//! This crate reconciles the Jenkins role-strategy plugin's three role
//! namespaces (global, project, slave) into a resource/entitlement/grant
//! graph, and performs idempotent grant/revoke calls against it:
//!
//! - HTTP client for the role-strategy and listing endpoints with Basic auth
//! - Fail-fast merged role catalog
//! - Group derivation from GROUP assignments
//! - Grant/revoke guarded by a membership check
//! - Resource syncers for `role`, `group`, `user`, `node`, `job`, `view`
//!
//! Nothing is cached: every operation reads Jenkins fresh.
//!
//! # Quick Start
//!
//! ```no_run
//! use jenkins_rbac::{JenkinsConfig, JenkinsConnector, PrincipalType};
//!
//! # async fn example() -> jenkins_rbac::RbacResult<()> {
//! let config = JenkinsConfig::builder()
//!     .with_base_url("https://ci.example.com")
//!     .with_username("admin")
//!     .with_api_token("11aa22bb")
//!     .build()?;
//!
//! let connector = JenkinsConnector::new(&config)?;
//! let engine = connector.engine();
//!
//! for edge in engine.list_grants("reviewer").await? {
//!     println!("{} ({})", edge.sid, edge.principal_type);
//! }
//! engine.grant("reviewer", "alice", &PrincipalType::User).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `JENKINS_BASE_URL` | Base URL (default: `http://localhost:8080`) |
//! | `JENKINS_USERNAME` | Account name (required) |
//! | `JENKINS_PASSWORD` | Account password (exclusive with token) |
//! | `JENKINS_TOKEN` | API token (exclusive with password) |
//! | `JENKINS_TIMEOUT` | Request timeout in seconds (default: 30) |

pub mod auth;
pub mod catalog;
pub mod client;
pub mod config;
pub mod connector;
pub mod engine;
pub mod error;
pub mod groups;
pub mod membership;
pub mod strategy;
pub mod types;

// Re-export main types
pub use auth::Credentials;
pub use catalog::RoleCatalog;
pub use client::{JenkinsClient, CLIENT_USER_AGENT};
pub use config::{ConfigBuilder, JenkinsConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use connector::{
    Entitlement, Grant, JenkinsConnector, Resource, ResourceId, ResourceSyncer, ResourceType,
    SyncReport,
};
pub use engine::{with_deadline, GrantEngine};
pub use error::{RbacError, RbacResult};
pub use groups::{derive_groups, AUTHENTICATED_GROUP};
pub use membership::MembershipIndex;
pub use strategy::{Mutation, MutationAction, RoleStrategyApi};
pub use types::{
    Computer, GrantEdge, GroupIdentity, Job, PrincipalType, RoleAssignment, RoleNamespace,
    RoleRecord, User, View,
};
