//! Pure helpers: URL joining, form encoding, role decoding (no HTTP, no status logic).

use std::collections::BTreeMap;

use crate::error::{RbacError, RbacResult};
use crate::types::{RoleAssignment, RoleNamespace, RoleRecord};

const SUMMARY_MAX_CHARS: usize = 200;

/// Join base URL and a relative API path.
pub(crate) fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Path of the `getAllRoles` query for one namespace.
pub(crate) fn roles_path(namespace: RoleNamespace) -> String {
    format!(
        "role-strategy/strategy/getAllRoles?type={}",
        namespace.as_query()
    )
}

/// `application/x-www-form-urlencoded` body, fields kept in order.
pub(crate) fn form_body(fields: &[(&str, &str)]) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in fields {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// Short, single-line excerpt of a response body for error messages.
pub(crate) fn summarize_body(body: &str) -> String {
    let flat: String = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > SUMMARY_MAX_CHARS {
        let mut cut: String = flat.chars().take(SUMMARY_MAX_CHARS).collect();
        cut.push_str("...");
        cut
    } else {
        flat
    }
}

/// Decode a `getAllRoles` body: `{ roleName: [ {sid, type}, ... ] }`.
///
/// One record per role name, ordered by name.
pub(crate) fn decode_roles(
    namespace: RoleNamespace,
    endpoint: &str,
    body: &str,
) -> RbacResult<Vec<RoleRecord>> {
    let roles: BTreeMap<String, Vec<RoleAssignment>> =
        serde_json::from_str(body).map_err(|e| RbacError::Decode {
            endpoint: endpoint.to_string(),
            message: format!("unexpected {} shape: {}", namespace, e),
        })?;

    Ok(roles
        .into_iter()
        .map(|(role_name, assignments)| RoleRecord {
            role_name,
            namespace,
            assignments,
        })
        .collect())
}
