//! Public API trait for the permission registry.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::PermissionManagementError;
use crate::models::Permission;

/// Property key carrying the request URL in a lookup query.
pub const URL_PROPERTY: &str = "URL";

/// Property key carrying the HTTP method in a lookup query.
pub const HTTP_METHOD_PROPERTY: &str = "HTTP_METHOD";

/// Registry of permissions indexed by URL path and HTTP method.
///
/// ```ignore
/// let registry = PermissionRegistry::install(store);
/// let manager: Arc<dyn PermissionManager> = Arc::new(PermissionRegistryLocalClient::new(registry));
/// ```
#[async_trait]
pub trait PermissionManager: Send + Sync {
    /// Register a permission.
    ///
    /// The path is normalized to its absolute form before it is stored. Returns
    /// the store's acknowledgement.
    ///
    /// # Errors
    ///
    /// - `Store` if the durable store rejects the write
    /// - `InvalidPermission` if the permission cannot be registered
    async fn add_permission(
        &self,
        permission: Permission,
    ) -> Result<bool, PermissionManagementError>;

    /// Register permissions in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// The first error returned by [`PermissionManager::add_permission`].
    async fn add_permissions(
        &self,
        permissions: Vec<Permission>,
    ) -> Result<bool, PermissionManagementError>;

    /// Permission governing the request described by `properties`.
    ///
    /// Reads [`URL_PROPERTY`] and [`HTTP_METHOD_PROPERTY`]. Without a method
    /// only permissions declared for any method match.
    ///
    /// # Errors
    ///
    /// - `InvalidQuery` if [`URL_PROPERTY`] is missing
    async fn get_permission(
        &self,
        properties: &BTreeMap<String, String>,
    ) -> Result<Option<Permission>, PermissionManagementError>;
}
