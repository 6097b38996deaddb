//! `Authenticator` implementation backed by the token table.

use async_trait::async_trait;
use authn_gate_sdk::{AuthenticationInfo, Authenticator, AuthenticatorError};
use http::header::AUTHORIZATION;
use http::request::Parts;

use super::service::Service;

const BEARER_PREFIX: &str = "Bearer ";

/// Token carried by an `Authorization: Bearer` header, if any.
#[must_use]
pub fn bearer_token(request: &Parts) -> Option<&str> {
    let value = request.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_at_checked(BEARER_PREFIX.len())?;
    scheme
        .eq_ignore_ascii_case(BEARER_PREFIX)
        .then(|| token.trim())
}

#[async_trait]
impl Authenticator for Service {
    fn name(&self) -> &str {
        Service::name(self)
    }

    fn can_handle(&self, request: &Parts) -> bool {
        bearer_token(request).is_some()
    }

    async fn authenticate(&self, request: &Parts) -> Result<AuthenticationInfo, AuthenticatorError> {
        let token = bearer_token(request).unwrap_or_default();
        Ok(self.authenticate_token(token).unwrap_or_else(|| {
            tracing::debug!(authenticator = Service::name(self), "bearer token rejected");
            AuthenticationInfo::failure("invalid token")
        }))
    }
}
