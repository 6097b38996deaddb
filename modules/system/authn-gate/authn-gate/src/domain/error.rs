//! Errors escaping the gate.
//!
//! Rule-chain outcomes and rejected credentials are answered with a response
//! and never show up here.

use authn_gate_sdk::AuthenticatorError;

#[derive(thiserror::Error, Debug)]
pub enum GateError<E> {
    #[error("authenticator '{authenticator}' failed")]
    Authenticator {
        authenticator: String,
        #[source]
        source: AuthenticatorError,
    },

    #[error("downstream pipeline failed")]
    Next(#[source] E),
}
