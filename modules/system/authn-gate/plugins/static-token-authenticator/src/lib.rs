#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Static token authenticator
//!
//! Authenticates `Authorization: Bearer <token>` requests against a token
//! table from configuration. Meant for development and testing.
//!
//! ## Modes
//!
//! - **`accept_all`** (default): Accepts any non-empty token and returns the configured
//!   default identity.
//!
//! - **`static_tokens`**: Maps specific tokens to specific identities. Useful for E2E tests
//!   with distinct users and tenants.
//!
//! ## Configuration
//!
//! ```yaml
//! static_token:
//!   name: static-token
//!   mode: static_tokens
//!   default_identity:
//!     username: admin
//!     tenant_id: -1234
//!     tenant_domain: carbon.super
//!   tokens:
//!     - token: alice-token
//!       identity:
//!         username: alice
//!         tenant_id: 7
//!         tenant_domain: acme.com
//!     - token: service-token
//!       identity:
//!         username: svc
//!         tenant_id: ~
//! ```
//!
//! An identity with `tenant_id: ~` authenticates without a tenant scope.

pub mod config;
pub mod domain;
pub mod plugin;

pub use config::{AuthnMode, IdentityConfig, StaticTokenConfig, TokenMapping};
pub use domain::Service;
pub use plugin::StaticTokenPlugin;
