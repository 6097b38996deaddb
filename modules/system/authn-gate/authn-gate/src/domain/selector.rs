//! Authenticator dispatch.

use std::fmt;
use std::sync::Arc;

use authn_gate_sdk::Authenticator;
use http::request::Parts;

/// Ordered set of authenticators; the first one that can handle a request wins.
#[derive(Clone, Default)]
pub struct AuthenticatorSelector {
    authenticators: Vec<Arc<dyn Authenticator>>,
}

impl AuthenticatorSelector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.register(authenticator);
        self
    }

    pub fn register(&mut self, authenticator: Arc<dyn Authenticator>) {
        tracing::debug!(authenticator = authenticator.name(), "authenticator registered");
        self.authenticators.push(authenticator);
    }

    #[must_use]
    pub fn select(&self, request: &Parts) -> Option<&Arc<dyn Authenticator>> {
        self.authenticators.iter().find(|a| a.can_handle(request))
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.authenticators.iter().map(|a| a.name()).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.authenticators.is_empty()
    }
}

impl fmt::Debug for AuthenticatorSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticatorSelector")
            .field("authenticators", &self.names())
            .finish()
    }
}
