//! Jenkins client for the role-strategy plugin and the read-only listings.
//!
//! Public API: no status code knowledge. All HTTP/status mapping in http.rs.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;

use crate::config::JenkinsConfig;
use crate::error::{RbacError, RbacResult};
use crate::strategy::{Mutation, RoleStrategyApi};
use crate::types::{
    Computer, ComputersResponse, Job, JobsResponse, PeopleResponse, RoleNamespace, RoleRecord,
    User, View, ViewsResponse,
};

mod helpers;
mod http;

use helpers::{decode_roles, roles_path};
use http::HttpBackend;

pub const CLIENT_USER_AGENT: &str = concat!("jenkins-rbac/", env!("CARGO_PKG_VERSION"));

const ALL_NODES: &str = "computer/api/json?tree=computer[displayName,description,idle,manualLaunchAllowed,assignedLabels[name]]";
const ALL_JOBS: &str = "api/json?tree=jobs[name,url,color,buildable]";
const ALL_VIEWS: &str = "api/json?tree=views[name,url]";
const ALL_USERS: &str = "asynchPeople/api/json?depth=3";

/// Jenkins API client.
#[derive(Debug, Clone)]
pub struct JenkinsClient {
    http: HttpBackend,
}

impl JenkinsClient {
    pub fn new(config: &JenkinsConfig) -> RbacResult<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

        // A 3xx on a mutation (e.g. to the login page) must reach post_form
        // as-is rather than be followed.
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .redirect(reqwest::redirect::Policy::none())
            .default_headers(default_headers)
            .build()
            .map_err(|e| RbacError::Config {
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            http: HttpBackend {
                client,
                base_url: config.base_url().to_string(),
                credentials: config.credentials().clone(),
            },
        })
    }

    pub fn from_env() -> RbacResult<Self> {
        Self::new(&JenkinsConfig::from_env()?)
    }

    /// Roles of one namespace, one record per role name.
    pub async fn get_roles(&self, namespace: RoleNamespace) -> RbacResult<Vec<RoleRecord>> {
        let fetched = self.http.get_text(&roles_path(namespace)).await?;
        let records = decode_roles(namespace, &fetched.endpoint, &fetched.body)?;
        debug!(namespace = %namespace, roles = records.len(), "fetched roles");
        Ok(records)
    }

    /// Issue one assign/unassign call.
    pub async fn apply_mutation(&self, mutation: &Mutation) -> RbacResult<()> {
        self.http
            .post_form(mutation.path(), &mutation.form_fields())
            .await
    }

    pub async fn get_users(&self) -> RbacResult<Vec<User>> {
        let people: PeopleResponse = self.http.get_json(ALL_USERS).await?;
        Ok(people.users.into_iter().map(|entry| entry.user).collect())
    }

    pub async fn get_nodes(&self) -> RbacResult<Vec<Computer>> {
        let nodes: ComputersResponse = self.http.get_json(ALL_NODES).await?;
        Ok(nodes.computer)
    }

    pub async fn get_jobs(&self) -> RbacResult<Vec<Job>> {
        let jobs: JobsResponse = self.http.get_json(ALL_JOBS).await?;
        Ok(jobs.jobs)
    }

    pub async fn get_views(&self) -> RbacResult<Vec<View>> {
        let views: ViewsResponse = self.http.get_json(ALL_VIEWS).await?;
        Ok(views.views)
    }

    pub fn base_url(&self) -> &str {
        &self.http.base_url
    }
}

#[async_trait]
impl RoleStrategyApi for JenkinsClient {
    async fn fetch_roles(&self, namespace: RoleNamespace) -> RbacResult<Vec<RoleRecord>> {
        self.get_roles(namespace).await
    }

    async fn apply(&self, mutation: &Mutation) -> RbacResult<()> {
        self.apply_mutation(mutation).await
    }
}
