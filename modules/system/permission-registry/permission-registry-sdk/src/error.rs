//! Error types for the permission registry.

use thiserror::Error;

/// Errors raised by a [`crate::PermissionStore`].
#[derive(Debug, Error)]
pub enum PermissionStoreError {
    /// The store could not be reached.
    #[error("permission store unavailable: {0}")]
    Unavailable(String),

    /// The store refused the record.
    #[error("permission rejected by store: {0}")]
    Rejected(String),
}

/// Errors that can occur when using the permission registry API.
#[derive(Debug, Error)]
pub enum PermissionManagementError {
    /// Persisting the permission failed.
    #[error(transparent)]
    Store(#[from] PermissionStoreError),

    /// The permission cannot be registered.
    #[error("invalid permission: {0}")]
    InvalidPermission(String),

    /// The lookup query is missing a required property.
    #[error("invalid query: {0}")]
    InvalidQuery(String),
}
