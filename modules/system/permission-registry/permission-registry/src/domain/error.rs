//! Domain errors for the permission registry.

use permission_registry_sdk::{PermissionManagementError, PermissionStoreError};

/// Internal domain errors.
#[derive(thiserror::Error, Debug)]
pub enum DomainError {
    #[error("failed to persist permission '{name}'")]
    Store {
        name: String,
        #[source]
        source: PermissionStoreError,
    },

    #[error("invalid method '{method}' for permission '{name}'")]
    InvalidMethod { name: String, method: String },

    #[error("missing query property '{0}'")]
    MissingProperty(&'static str),
}

impl From<DomainError> for PermissionManagementError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Store { source, .. } => Self::Store(source),
            e @ DomainError::InvalidMethod { .. } => Self::InvalidPermission(e.to_string()),
            e @ DomainError::MissingProperty(_) => Self::InvalidQuery(e.to_string()),
        }
    }
}
