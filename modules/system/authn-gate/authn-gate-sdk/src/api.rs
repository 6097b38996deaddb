//! Authenticator capability trait.
//!
//! The gate selects one authenticator per request (first registered one
//! whose [`Authenticator::can_handle`] accepts it) and consumes the returned
//! [`AuthenticationInfo`] exactly once.

use async_trait::async_trait;
use http::request::Parts;

use crate::error::AuthenticatorError;
use crate::models::AuthenticationInfo;

/// Capability contract of an authenticator implementation.
///
/// Rejected credentials are reported as data
/// ([`AuthenticationInfo::failure`]), never as an `Err`.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Stable name used in logs.
    fn name(&self) -> &str;

    /// Whether this authenticator understands the credentials carried by the request.
    fn can_handle(&self, request: &Parts) -> bool;

    /// Authenticate the request.
    ///
    /// May block on an external identity check; the gate imposes no timeout.
    ///
    /// # Errors
    ///
    /// - `ServiceUnavailable` if a backing identity service cannot be reached
    /// - `Internal` for any other unexpected fault
    async fn authenticate(
        &self,
        request: &Parts,
    ) -> Result<AuthenticationInfo, AuthenticatorError>;
}
