//! Permission registry service.

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use permission_registry_sdk::{
    ANY_METHOD, HTTP_METHOD_PROPERTY, Permission, PermissionStore, URL_PROPERTY,
};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::error::DomainError;
use super::path::absolute_permission_path;
use super::tree::PermissionTree;

static GLOBAL: OnceLock<Arc<PermissionRegistry>> = OnceLock::new();

/// Path and method indexed permission registry with write-through storage.
///
/// Registration persists to the [`PermissionStore`] first and only then
/// updates the in-memory tree, so a store failure leaves the tree unchanged.
/// Registrations are serialized end to end, so the store and the tree agree
/// on the latest permission for every path and method.
pub struct PermissionRegistry {
    tree: PermissionTree,
    store: Arc<dyn PermissionStore>,
    registration: Mutex<()>,
}

impl PermissionRegistry {
    /// Create a standalone registry.
    #[must_use]
    pub fn new(store: Arc<dyn PermissionStore>) -> Self {
        Self {
            tree: PermissionTree::new(),
            store,
            registration: Mutex::new(()),
        }
    }

    /// Install the process-wide registry, or return it if already installed.
    ///
    /// Only the first call's `store` is used.
    pub fn install(store: Arc<dyn PermissionStore>) -> Arc<Self> {
        let mut installed = false;
        let registry = GLOBAL.get_or_init(|| {
            installed = true;
            Arc::new(Self::new(store))
        });
        if installed {
            info!("permission registry installed");
        } else {
            debug!("permission registry already installed; keeping existing store");
        }
        Arc::clone(registry)
    }

    /// The process-wide registry, if installed.
    #[must_use]
    pub fn instance() -> Option<Arc<Self>> {
        GLOBAL.get().cloned()
    }

    #[must_use]
    pub fn tree(&self) -> &PermissionTree {
        &self.tree
    }

    /// Normalize, persist and index `permission`.
    ///
    /// Returns the store's acknowledgement.
    ///
    /// # Errors
    ///
    /// - `InvalidMethod` if the method is not an HTTP method token
    /// - `Store` if the store write fails; the tree is left untouched
    #[tracing::instrument(skip_all, fields(name = %permission.name, path = %permission.path))]
    pub async fn add_permission(&self, mut permission: Permission) -> Result<bool, DomainError> {
        permission.path = absolute_permission_path(&permission.path);
        validate_method(&permission)?;

        let _registration = self.registration.lock().await;
        let stored = self
            .store
            .put_permission(&permission)
            .await
            .map_err(|source| DomainError::Store {
                name: permission.name.clone(),
                source,
            })?;

        let method = permission.method_key();
        if let Some(previous) = self.tree.add_permission(permission) {
            debug!(%method, replaced = %previous.name, "permission replaced");
        } else {
            debug!(%method, "permission added");
        }
        Ok(stored)
    }

    /// Register `permissions` in order. The first failure aborts the rest.
    ///
    /// Returns whether the store acknowledged every permission.
    ///
    /// # Errors
    ///
    /// The first error from [`Self::add_permission`].
    pub async fn add_permissions(
        &self,
        permissions: impl IntoIterator<Item = Permission>,
    ) -> Result<bool, DomainError> {
        let mut acknowledged = true;
        for permission in permissions {
            acknowledged &= self.add_permission(permission).await?;
        }
        Ok(acknowledged)
    }

    /// Permission governing the request described by a property bag.
    ///
    /// # Errors
    ///
    /// `MissingProperty` if the `URL` property is absent.
    pub fn get_permission(
        &self,
        properties: &BTreeMap<String, String>,
    ) -> Result<Option<Permission>, DomainError> {
        let url = properties
            .get(URL_PROPERTY)
            .ok_or(DomainError::MissingProperty(URL_PROPERTY))?;
        let method = properties.get(HTTP_METHOD_PROPERTY).map(String::as_str);

        Ok(self.find(url, method))
    }

    /// Permission governing `url` for `method`.
    #[must_use]
    pub fn find(&self, url: &str, method: Option<&str>) -> Option<Permission> {
        self.tree.get_permission(url, method)
    }
}

impl std::fmt::Debug for PermissionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionRegistry")
            .field("tree", &self.tree)
            .finish_non_exhaustive()
    }
}

fn validate_method(permission: &Permission) -> Result<(), DomainError> {
    let Some(method) = permission.method.as_deref().map(str::trim) else {
        return Ok(());
    };
    if method.is_empty()
        || method == ANY_METHOD
        || method.bytes().all(|b| b.is_ascii_alphabetic())
    {
        return Ok(());
    }
    Err(DomainError::InvalidMethod {
        name: permission.name.clone(),
        method: method.to_owned(),
    })
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use permission_registry_sdk::PermissionStoreError;

    use super::*;
    use crate::infra::InMemoryPermissionStore;

    /// Store that accepts the first `accept` writes, then fails.
    struct FlakyStore {
        accept: usize,
        writes: AtomicUsize,
    }

    #[async_trait]
    impl PermissionStore for FlakyStore {
        async fn put_permission(&self, _p: &Permission) -> Result<bool, PermissionStoreError> {
            if self.writes.fetch_add(1, Ordering::SeqCst) < self.accept {
                Ok(true)
            } else {
                Err(PermissionStoreError::Unavailable("registry offline".to_owned()))
            }
        }
    }

    fn registry() -> (PermissionRegistry, Arc<InMemoryPermissionStore>) {
        let store = Arc::new(InMemoryPermissionStore::new());
        (PermissionRegistry::new(store.clone()), store)
    }

    fn query(url: Option<&str>, method: Option<&str>) -> BTreeMap<String, String> {
        let mut q = BTreeMap::new();
        if let Some(url) = url {
            q.insert(URL_PROPERTY.to_owned(), url.to_owned());
        }
        if let Some(method) = method {
            q.insert(HTTP_METHOD_PROPERTY.to_owned(), method.to_owned());
        }
        q
    }

    #[tokio::test]
    async fn add_normalizes_and_persists() {
        let (registry, store) = registry();

        let stored = registry
            .add_permission(Permission::new("list", "devices/").with_method("GET"))
            .await
            .unwrap();

        assert!(stored);
        let persisted = store.get("/devices", "GET").unwrap();
        assert_eq!(persisted.path, "/devices");
        let found = registry
            .get_permission(&query(Some("/devices"), Some("GET")))
            .unwrap()
            .unwrap();
        assert_eq!(found.path, "/devices");
    }

    #[tokio::test]
    async fn store_failure_propagates_and_tree_stays_unchanged() {
        let registry = PermissionRegistry::new(Arc::new(FlakyStore {
            accept: 0,
            writes: AtomicUsize::new(0),
        }));

        let result = registry
            .add_permission(Permission::new("list", "/devices"))
            .await;

        assert!(matches!(result, Err(DomainError::Store { .. })));
        assert!(registry.tree().is_empty());
        assert!(registry.find("/devices", None).is_none());
    }

    #[tokio::test]
    async fn add_permissions_stops_at_first_failure() {
        let registry = PermissionRegistry::new(Arc::new(FlakyStore {
            accept: 1,
            writes: AtomicUsize::new(0),
        }));

        let result = registry
            .add_permissions([
                Permission::new("a", "/a"),
                Permission::new("b", "/b"),
                Permission::new("c", "/c"),
            ])
            .await;

        assert!(result.is_err());
        assert!(registry.find("/a", None).is_some());
        assert!(registry.find("/b", None).is_none());
        assert!(registry.find("/c", None).is_none());
    }

    #[tokio::test]
    async fn invalid_method_is_rejected_before_store() {
        let (registry, store) = registry();

        let result = registry
            .add_permission(Permission::new("bad", "/a").with_method("GET /x"))
            .await;

        assert!(matches!(result, Err(DomainError::InvalidMethod { .. })));
        assert!(store.is_empty());
    }

    #[test]
    fn missing_url_is_invalid_query() {
        let (registry, _) = registry();

        let result = registry.get_permission(&query(None, Some("GET")));

        assert!(matches!(
            result,
            Err(DomainError::MissingProperty(URL_PROPERTY))
        ));
    }

    #[tokio::test]
    async fn missing_method_matches_only_wildcard() {
        let (registry, _) = registry();
        registry
            .add_permissions([
                Permission::new("get", "/a").with_method("GET"),
                Permission::new("any", "/b"),
            ])
            .await
            .unwrap();

        assert!(registry.get_permission(&query(Some("/a"), None)).unwrap().is_none());
        assert_eq!(
            registry
                .get_permission(&query(Some("/b"), None))
                .unwrap()
                .map(|p| p.name),
            Some("any".to_owned())
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_registration_and_lookup() {
        let (registry, store) = registry();
        let registry = Arc::new(registry);

        let writers: Vec<_> = (0..4)
            .map(|t| {
                let registry = Arc::clone(&registry);
                tokio::spawn(async move {
                    for i in 0..25 {
                        registry
                            .add_permission(Permission::new(
                                format!("{t}-{i}"),
                                format!("/w{t}/{i}"),
                            ))
                            .await
                            .unwrap();
                    }
                })
            })
            .collect();
        for writer in writers {
            writer.await.unwrap();
        }

        assert_eq!(registry.tree().len(), 100);
        assert_eq!(store.len(), 100);
        assert!(registry.find("/w3/24", Some("DELETE")).is_some());
    }

    /// Records every write, then holds back the acknowledgement of `slow`.
    #[derive(Default)]
    struct LaggingAckStore {
        latest: parking_lot::Mutex<Option<String>>,
        slow_written: tokio::sync::Notify,
    }

    #[async_trait]
    impl PermissionStore for LaggingAckStore {
        async fn put_permission(&self, p: &Permission) -> Result<bool, PermissionStoreError> {
            *self.latest.lock() = Some(p.name.clone());
            if p.name == "slow" {
                self.slow_written.notify_one();
                tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            }
            Ok(true)
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn store_and_tree_agree_when_acknowledgement_lags() {
        let store = Arc::new(LaggingAckStore::default());
        let registry = Arc::new(PermissionRegistry::new(store.clone()));

        let slow = {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move {
                registry
                    .add_permission(Permission::new("slow", "/shared").with_method("GET"))
                    .await
            })
        };
        store.slow_written.notified().await;
        registry
            .add_permission(Permission::new("fast", "/shared").with_method("GET"))
            .await
            .unwrap();
        slow.await.unwrap().unwrap();

        let in_tree = registry.find("/shared", Some("GET")).map(|p| p.name);
        assert_eq!(in_tree, store.latest.lock().clone());
    }

    #[test]
    fn install_returns_single_instance() {
        let first = PermissionRegistry::install(Arc::new(InMemoryPermissionStore::new()));
        let second = PermissionRegistry::install(Arc::new(InMemoryPermissionStore::new()));

        assert!(Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&first, &PermissionRegistry::instance().unwrap()));
    }
}
