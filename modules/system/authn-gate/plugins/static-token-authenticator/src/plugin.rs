//! Static token authenticator plugin wiring.

use std::sync::Arc;

use tracing::info;

use crate::config::{AuthnMode, StaticTokenConfig};
use crate::domain::Service;

/// Builds the static token authenticator from configuration.
///
/// The returned service implements `authn_gate_sdk::Authenticator` and is
/// registered with the gate's `AuthenticatorSelector` by the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticTokenPlugin;

impl StaticTokenPlugin {
    #[must_use]
    pub fn init(cfg: &StaticTokenConfig) -> Arc<Service> {
        info!("Initializing static token authenticator");

        if cfg.mode == AuthnMode::AcceptAll {
            tracing::warn!(
                "Static token authenticator is running in `accept_all` mode; \
                 all bearer tokens will be accepted with a hardcoded identity. \
                 Do NOT use this mode in production."
            );
        }

        info!(
            name = %cfg.name,
            mode = ?cfg.mode,
            token_count = cfg.tokens.len(),
            "Loaded plugin configuration"
        );

        Arc::new(Service::from_config(cfg))
    }
}
