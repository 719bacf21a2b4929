//! Role membership lookups over one catalog snapshot.

use crate::types::{GrantEdge, RoleAssignment, RoleRecord};

/// Read-only view answering "does principal P hold role R".
///
/// Every record named R counts, whichever namespace it came from.
#[derive(Debug, Clone, Copy)]
pub struct MembershipIndex<'a> {
    records: &'a [RoleRecord],
}

impl<'a> MembershipIndex<'a> {
    pub fn new(records: &'a [RoleRecord]) -> Self {
        Self { records }
    }

    /// Assignments of every record named `role_name`, in catalog order.
    pub fn assignments_of(
        &self,
        role_name: &'a str,
    ) -> impl Iterator<Item = &'a RoleAssignment> + 'a {
        let records: &'a [RoleRecord] = self.records;
        records
            .iter()
            .filter(move |record| record.role_name == role_name)
            .flat_map(|record| record.assignments.iter())
    }

    /// Matches on sid alone; the principal type is not part of the key.
    pub fn holds(&self, role_name: &str, sid: &str) -> bool {
        self.records
            .iter()
            .filter(|record| record.role_name == role_name)
            .any(|record| record.assignments.iter().any(|a| a.sid == sid))
    }

    /// Grant edges of `role_name`; duplicates pass through.
    pub fn edges(&self, role_name: &'a str) -> Vec<GrantEdge> {
        self.assignments_of(role_name)
            .map(|assignment| GrantEdge {
                role_name: role_name.to_string(),
                sid: assignment.sid.clone(),
                principal_type: assignment.principal_type.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PrincipalType, RoleNamespace};

    fn catalog() -> Vec<RoleRecord> {
        vec![
            RoleRecord {
                role_name: "reviewer".into(),
                namespace: RoleNamespace::Global,
                assignments: vec![RoleAssignment::new("alice", PrincipalType::User)],
            },
            RoleRecord {
                role_name: "builder".into(),
                namespace: RoleNamespace::Global,
                assignments: vec![RoleAssignment::new("bob", PrincipalType::User)],
            },
            RoleRecord {
                role_name: "reviewer".into(),
                namespace: RoleNamespace::Project,
                assignments: vec![
                    RoleAssignment::new("eng", PrincipalType::Group),
                    RoleAssignment::new("alice", PrincipalType::User),
                ],
            },
        ]
    }

    #[test]
    fn test_holds_searches_every_namespace() {
        let records = catalog();
        let index = MembershipIndex::new(&records);

        assert!(index.holds("reviewer", "alice"));
        assert!(index.holds("reviewer", "eng"));
        assert!(!index.holds("reviewer", "bob"));
        assert!(!index.holds("missing", "alice"));
    }

    #[test]
    fn test_edges_union_keeps_duplicates() {
        let records = catalog();
        let edges = MembershipIndex::new(&records).edges("reviewer");

        let pairs: Vec<_> = edges
            .iter()
            .map(|e| (e.sid.as_str(), e.principal_type.clone()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("alice", PrincipalType::User),
                ("eng", PrincipalType::Group),
                ("alice", PrincipalType::User),
            ]
        );
        assert!(edges.iter().all(|e| e.role_name == "reviewer"));
    }
}
