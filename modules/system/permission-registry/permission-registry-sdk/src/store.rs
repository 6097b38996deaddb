//! Durable storage contract for permissions.

use async_trait::async_trait;

use crate::error::PermissionStoreError;
use crate::models::Permission;

/// External store the registry persists permissions to.
#[async_trait]
pub trait PermissionStore: Send + Sync {
    /// Persist `permission`, returning whether the store accepted it.
    ///
    /// # Errors
    ///
    /// - `Unavailable` if the store cannot be reached
    /// - `Rejected` if the store refuses the record
    async fn put_permission(&self, permission: &Permission) -> Result<bool, PermissionStoreError>;
}
