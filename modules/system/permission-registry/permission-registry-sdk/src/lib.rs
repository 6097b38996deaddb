//! Permission Registry SDK
//!
//! This crate provides the public contract of the permission registry:
//!
//! - [`PermissionManager`] - register permissions and look up the one governing a request
//! - [`PermissionStore`] - durable storage the registry writes through to
//! - [`Permission`] - a permission declared for a URL pattern and HTTP method
//! - [`PermissionManagementError`], [`PermissionStoreError`] - error types
//!
//! ## Usage
//!
//! ```ignore
//! use permission_registry_sdk::{HTTP_METHOD_PROPERTY, URL_PROPERTY};
//!
//! let manager: Arc<dyn PermissionManager> = registry_client();
//! manager
//!     .add_permission(Permission::new("list devices", "/devices").with_method("GET"))
//!     .await?;
//!
//! let query = BTreeMap::from([
//!     (URL_PROPERTY.to_owned(), "/devices".to_owned()),
//!     (HTTP_METHOD_PROPERTY.to_owned(), "GET".to_owned()),
//! ]);
//! let governing = manager.get_permission(&query).await?;
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod error;
pub mod models;
pub mod store;

// Re-export main types at crate root
pub use api::{HTTP_METHOD_PROPERTY, PermissionManager, URL_PROPERTY};
pub use error::{PermissionManagementError, PermissionStoreError};
pub use models::{ANY_METHOD, Permission, method_key};
pub use store::PermissionStore;
