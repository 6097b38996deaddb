//! Local (in-process) client for the permission registry.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use permission_registry_sdk::{Permission, PermissionManagementError, PermissionManager};

use super::{DomainError, PermissionRegistry};

/// Local client wrapping the registry.
#[derive(Debug, Clone)]
pub struct PermissionRegistryLocalClient {
    registry: Arc<PermissionRegistry>,
}

impl PermissionRegistryLocalClient {
    #[must_use]
    pub fn new(registry: Arc<PermissionRegistry>) -> Self {
        Self { registry }
    }
}

fn log_and_convert(op: &str, e: DomainError) -> PermissionManagementError {
    tracing::error!(operation = op, error = ?e, "permission_registry call failed");
    e.into()
}

#[async_trait]
impl PermissionManager for PermissionRegistryLocalClient {
    async fn add_permission(
        &self,
        permission: Permission,
    ) -> Result<bool, PermissionManagementError> {
        self.registry
            .add_permission(permission)
            .await
            .map_err(|e| log_and_convert("add_permission", e))
    }

    async fn add_permissions(
        &self,
        permissions: Vec<Permission>,
    ) -> Result<bool, PermissionManagementError> {
        self.registry
            .add_permissions(permissions)
            .await
            .map_err(|e| log_and_convert("add_permissions", e))
    }

    async fn get_permission(
        &self,
        properties: &BTreeMap<String, String>,
    ) -> Result<Option<Permission>, PermissionManagementError> {
        self.registry
            .get_permission(properties)
            .map_err(|e| log_and_convert("get_permission", e))
    }
}
