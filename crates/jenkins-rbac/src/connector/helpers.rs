//! Identifier and display helpers shared by the resource syncers.

use crate::error::{RbacError, RbacResult};

use super::ResourceId;

/// `{resource_type}:{resource}:{slug}`
pub fn entitlement_id(resource: &ResourceId, slug: &str) -> String {
    format!("{}:{}:{}", resource.resource_type, resource.resource, slug)
}

/// `{entitlement_id}:{principal_type}:{principal}`
pub fn grant_id(entitlement_id: &str, principal: &ResourceId) -> String {
    format!(
        "{}:{}:{}",
        entitlement_id, principal.resource_type, principal.resource
    )
}

/// Split an entitlement id into its resource and slug. Exactly three
/// `:`-separated parts are accepted.
pub fn parse_entitlement_id(id: &str) -> RbacResult<(ResourceId, String)> {
    let parts: Vec<&str> = id.split(':').collect();
    match parts.as_slice() {
        [resource_type, resource, slug]
            if !resource_type.is_empty() && !resource.is_empty() && !slug.is_empty() =>
        {
            Ok((ResourceId::new(*resource_type, *resource), slug.to_string()))
        }
        _ => Err(RbacError::InvalidId { id: id.to_string() }),
    }
}

/// Upper-case the first letter of every word.
pub fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split "First Last Name" into ("First", "Last Name").
pub fn split_full_name(full_name: &str) -> (String, String) {
    match full_name.trim().split_once(' ') {
        Some((first, last)) => (first.to_string(), last.trim().to_string()),
        None => (full_name.trim().to_string(), String::new()),
    }
}
