//! Domain layer for the permission registry.

pub mod error;
pub mod local_client;
pub mod path;
pub mod service;
pub mod tree;

pub use error::DomainError;
pub use local_client::PermissionRegistryLocalClient;
pub use path::absolute_permission_path;
pub use service::PermissionRegistry;
pub use tree::PermissionTree;
