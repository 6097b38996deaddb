//! In-memory [`PermissionStore`] for development and tests.

use async_trait::async_trait;
use dashmap::DashMap;
use permission_registry_sdk::{Permission, PermissionStore, PermissionStoreError};

/// Keeps the latest permission per path and method key.
#[derive(Debug, Default)]
pub struct InMemoryPermissionStore {
    records: DashMap<(String, String), Permission>,
}

impl InMemoryPermissionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored permission for `path` and method key, if any.
    #[must_use]
    pub fn get(&self, path: &str, method_key: &str) -> Option<Permission> {
        self.records
            .get(&(path.to_owned(), method_key.to_owned()))
            .map(|r| r.value().clone())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl PermissionStore for InMemoryPermissionStore {
    async fn put_permission(&self, permission: &Permission) -> Result<bool, PermissionStoreError> {
        self.records.insert(
            (permission.path.clone(), permission.method_key()),
            permission.clone(),
        );
        Ok(true)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn latest_write_wins() {
        let store = InMemoryPermissionStore::new();

        store
            .put_permission(&Permission::new("old", "/a").with_method("get"))
            .await
            .unwrap();
        store
            .put_permission(&Permission::new("new", "/a").with_method("GET"))
            .await
            .unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("/a", "GET").unwrap().name, "new");
        assert!(store.get("/a", "*").is_none());
    }
}
