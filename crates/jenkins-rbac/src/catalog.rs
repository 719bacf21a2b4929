//! Merged view of the global, project and slave role namespaces.

use std::sync::Arc;

use tracing::debug;

use crate::error::RbacResult;
use crate::strategy::RoleStrategyApi;
use crate::types::{RoleNamespace, RoleRecord};

/// Fetches and merges role definitions from every namespace.
pub struct RoleCatalog<A: ?Sized> {
    api: Arc<A>,
}

impl<A: ?Sized> Clone for RoleCatalog<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
        }
    }
}

impl<A: RoleStrategyApi + ?Sized> RoleCatalog<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// All role records: global first, then project, then slave.
    ///
    /// Fail-fast: the first namespace error aborts the fetch and no partial
    /// list is returned.
    pub async fn fetch_all(&self) -> RbacResult<Vec<RoleRecord>> {
        let mut records = Vec::new();
        for namespace in RoleNamespace::ALL {
            let mut batch = self.api.fetch_roles(namespace).await?;
            records.append(&mut batch);
        }
        debug!(roles = records.len(), "role catalog fetched");
        Ok(records)
    }

    pub(crate) fn api(&self) -> &A {
        &self.api
    }
}
