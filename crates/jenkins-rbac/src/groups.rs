//! Group identities implied by role assignments.

use std::collections::HashSet;

use crate::types::{GroupIdentity, PrincipalType, RoleRecord};

/// Synthetic group standing for every authenticated user.
pub const AUTHENTICATED_GROUP: &str = "authenticated";

/// Every GROUP sid in catalog order, first occurrence wins, followed by
/// [`AUTHENTICATED_GROUP`].
pub fn derive_groups(records: &[RoleRecord]) -> Vec<GroupIdentity> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut groups = Vec::new();

    let group_sids = records
        .iter()
        .flat_map(|record| record.assignments.iter())
        .filter(|assignment| assignment.principal_type == PrincipalType::Group)
        .map(|assignment| assignment.sid.as_str());

    for sid in group_sids {
        // A role may list the synthetic group explicitly; it still goes last.
        if sid == AUTHENTICATED_GROUP {
            continue;
        }
        if seen.insert(sid) {
            groups.push(GroupIdentity { id: sid.to_string() });
        }
    }

    groups.push(GroupIdentity {
        id: AUTHENTICATED_GROUP.to_string(),
    });
    groups
}
