//! `AuthN` Gate SDK
//!
//! This crate provides the public contract of the authentication gate:
//!
//! - [`Authenticator`] - capability trait implemented by authenticator plugins
//! - [`AuthenticationInfo`] - per-request authentication outcome
//! - [`AuthenticationStatus`] - closed set of outcomes
//! - [`AuthenticatorError`] - unexpected authenticator faults
//!
//! ## Usage
//!
//! ```ignore
//! use authn_gate_sdk::{AuthenticationInfo, Authenticator, AuthenticatorError};
//!
//! struct HeaderAuthenticator;
//!
//! #[async_trait::async_trait]
//! impl Authenticator for HeaderAuthenticator {
//!     fn name(&self) -> &str { "header" }
//!
//!     fn can_handle(&self, request: &http::request::Parts) -> bool {
//!         request.headers.contains_key("x-user")
//!     }
//!
//!     async fn authenticate(
//!         &self,
//!         request: &http::request::Parts,
//!     ) -> Result<AuthenticationInfo, AuthenticatorError> {
//!         Ok(AuthenticationInfo::success())
//!     }
//! }
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod error;
pub mod models;

// Re-export main types at crate root
pub use api::Authenticator;
pub use error::AuthenticatorError;
pub use models::{AuthenticationInfo, AuthenticationStatus};
