//! Error types for authenticator implementations.

use thiserror::Error;

/// Unexpected faults raised by an authenticator.
///
/// These are fatal for the request and propagate out of the gate.
#[derive(Debug, Error)]
pub enum AuthenticatorError {
    /// A backing identity service could not be reached.
    #[error("identity service unavailable: {0}")]
    ServiceUnavailable(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}
