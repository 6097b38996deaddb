//! Permission Registry Module
//!
//! Indexes declared permissions by URL path and HTTP method so the permission
//! governing a request can be located quickly. Registrations are written
//! through to a [`permission_registry_sdk::PermissionStore`].
//!
//! Provides the `PermissionManager` implementation
//! [`PermissionRegistryLocalClient`] for in-process consumers.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod domain;
pub mod infra;

pub use domain::{
    DomainError, PermissionRegistry, PermissionRegistryLocalClient, PermissionTree,
    absolute_permission_path,
};
pub use infra::InMemoryPermissionStore;
