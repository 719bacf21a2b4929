//! Client configuration.
//!
//! A [`JenkinsConfig`] is built once (from a [`ConfigBuilder`] or the
//! environment), validated, and never mutated afterwards.

use std::time::Duration;

use url::Url;

use crate::auth::Credentials;
use crate::error::{RbacError, RbacResult};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Validated, immutable configuration.
#[derive(Debug, Clone)]
pub struct JenkinsConfig {
    base_url: Url,
    credentials: Credentials,
    timeout: Duration,
}

impl JenkinsConfig {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `JENKINS_BASE_URL` | Base URL (default `http://localhost:8080`) |
    /// | `JENKINS_USERNAME` | Account name |
    /// | `JENKINS_PASSWORD` | Account password |
    /// | `JENKINS_TOKEN` | API token (instead of the password) |
    /// | `JENKINS_TIMEOUT` | Request timeout in seconds (default 30) |
    pub fn from_env() -> RbacResult<Self> {
        ConfigBuilder::from_env().build()
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Collects raw settings; [`ConfigBuilder::build`] validates them.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    base_url: Option<String>,
    username: Option<String>,
    password: Option<String>,
    token: Option<String>,
    timeout_secs: Option<String>,
}

impl ConfigBuilder {
    pub fn from_env() -> Self {
        Self {
            base_url: non_empty_var("JENKINS_BASE_URL"),
            username: non_empty_var("JENKINS_USERNAME"),
            password: non_empty_var("JENKINS_PASSWORD"),
            token: non_empty_var("JENKINS_TOKEN"),
            timeout_secs: non_empty_var("JENKINS_TIMEOUT"),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs.to_string());
        self
    }

    pub fn build(self) -> RbacResult<JenkinsConfig> {
        let raw_url = self
            .base_url
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = parse_base_url(&raw_url)?;

        let username = self
            .username
            .filter(|u| !u.is_empty())
            .ok_or_else(|| config_error("jenkins username must be provided"))?;

        let password = self.password.filter(|p| !p.is_empty());
        let token = self.token.filter(|t| !t.is_empty());
        let credentials = match (password, token) {
            (Some(_), Some(_)) => {
                return Err(config_error(
                    "jenkins token and password cannot be provided simultaneously",
                ))
            }
            (Some(password), None) => Credentials::password(username, password),
            (None, Some(token)) => Credentials::api_token(username, token),
            (None, None) => {
                return Err(config_error(
                    "either a jenkins token or a jenkins password must be provided",
                ))
            }
        };

        let timeout_secs = match self.timeout_secs {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                config_error(format!(
                    "JENKINS_TIMEOUT must be a whole number of seconds, got {:?}",
                    raw
                ))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(config_error("timeout must be at least one second"));
        }

        Ok(JenkinsConfig {
            base_url,
            credentials,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_base_url(raw: &str) -> RbacResult<Url> {
    let url = Url::parse(raw)
        .map_err(|e| config_error(format!("the url {} is not valid: {}", raw, e)))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(config_error(format!("the url {} is not valid", raw)));
    }
    Ok(url)
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn config_error(message: impl Into<String>) -> RbacError {
    RbacError::Config {
        message: message.into(),
    }
}
