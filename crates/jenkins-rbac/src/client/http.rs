//! HTTP layer: auth header, status mapping, body decoding.
//!
//! This is the ONLY place for status code handling. client/mod.rs never
//! interprets status codes. There is no retry loop; retry policy belongs to
//! the caller.

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::auth::Credentials;
use crate::error::{RbacError, RbacResult};

use super::helpers::{endpoint_url, form_body, summarize_body};

/// Body fetched from a GET endpoint.
#[derive(Debug)]
pub(crate) struct Fetched {
    pub endpoint: String,
    pub body: String,
}

/// HTTP backend for making requests (holds reqwest client, base URL, credentials).
#[derive(Debug, Clone)]
pub(crate) struct HttpBackend {
    pub(crate) client: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) credentials: Credentials,
}

impl HttpBackend {
    /// GET a path and return the raw body; any non-2xx is an `Upstream` error.
    pub(crate) async fn get_text(&self, path: &str) -> RbacResult<Fetched> {
        let endpoint = endpoint_url(&self.base_url, path);
        debug!(url = %endpoint, "GET");

        let response = self
            .client
            .get(&endpoint)
            .header(AUTHORIZATION, self.credentials.authorization_header())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| RbacError::from_reqwest(e, &endpoint))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RbacError::from_reqwest(e, &endpoint))?;

        if !status.is_success() {
            return Err(upstream_error(&endpoint, status, &body));
        }

        Ok(Fetched { endpoint, body })
    }

    /// GET a path and decode its JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> RbacResult<T> {
        let fetched = self.get_text(path).await?;
        serde_json::from_str(&fetched.body).map_err(|e| RbacError::Decode {
            endpoint: fetched.endpoint,
            message: e.to_string(),
        })
    }

    /// POST a form; only HTTP 200 counts as success.
    pub(crate) async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> RbacResult<()> {
        let endpoint = endpoint_url(&self.base_url, path);
        debug!(url = %endpoint, "POST");

        let response = self
            .client
            .post(&endpoint)
            .header(AUTHORIZATION, self.credentials.authorization_header())
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(form_body(fields))
            .send()
            .await
            .map_err(|e| RbacError::from_reqwest(e, &endpoint))?;

        let status = response.status();
        if status == StatusCode::OK {
            return Ok(());
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                debug!(url = %endpoint, error = %e, "failed to read error response body");
                String::new()
            }
        };
        Err(upstream_error(&endpoint, status, &body))
    }
}

fn upstream_error(endpoint: &str, status: StatusCode, body: &str) -> RbacError {
    let summary = if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("no response body")
            .to_string()
    } else {
        summarize_body(body)
    };

    RbacError::Upstream {
        endpoint: endpoint.to_string(),
        status: status.as_u16(),
        summary,
    }
}
