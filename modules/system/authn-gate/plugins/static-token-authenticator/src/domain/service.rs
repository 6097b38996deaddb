//! Token table lookup for the static token authenticator.

use std::collections::HashMap;
use std::fmt;

use authn_gate_sdk::AuthenticationInfo;
use gatekeeper_security::TenantContext;

use crate::config::{AuthnMode, IdentityConfig, StaticTokenConfig};

/// Static token authentication service.
///
/// Provides token-to-identity mapping based on configuration mode:
/// - `accept_all`: Any non-empty token maps to the default identity
/// - `static_tokens`: Specific tokens map to specific identities
pub struct Service {
    name: String,
    mode: AuthnMode,
    default_identity: IdentityConfig,
    token_map: HashMap<String, IdentityConfig>,
}

impl Service {
    /// Create a service from plugin configuration.
    #[must_use]
    pub fn from_config(cfg: &StaticTokenConfig) -> Self {
        let token_map: HashMap<String, IdentityConfig> = cfg
            .tokens
            .iter()
            .map(|m| (m.token.clone(), m.identity.clone()))
            .collect();

        Self {
            name: cfg.name.clone(),
            mode: cfg.mode,
            default_identity: cfg.default_identity.clone(),
            token_map,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Authenticate a bearer token.
    ///
    /// Returns `None` if the token is empty or, in `static_tokens` mode, not
    /// recognized.
    #[must_use]
    pub fn authenticate_token(&self, bearer_token: &str) -> Option<AuthenticationInfo> {
        if bearer_token.is_empty() {
            return None;
        }

        let identity = match self.mode {
            AuthnMode::AcceptAll => &self.default_identity,
            AuthnMode::StaticTokens => self.token_map.get(bearer_token)?,
        };

        Some(build_info(identity))
    }
}

fn build_info(identity: &IdentityConfig) -> AuthenticationInfo {
    match identity.tenant_id {
        Some(tenant_id) => AuthenticationInfo::success().with_tenant(
            TenantContext::builder()
                .tenant_id(tenant_id)
                .tenant_domain(&identity.tenant_domain)
                .username(&identity.username)
                .build(),
        ),
        None => AuthenticationInfo::success(),
    }
}

impl fmt::Debug for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Service")
            .field("name", &self.name)
            .field("mode", &self.mode)
            .field("default_identity", &self.default_identity)
            .field("token_count", &self.token_map.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use authn_gate_sdk::AuthenticationStatus;
    use gatekeeper_security::constants::{NO_TENANT_ID, SUPER_TENANT_DOMAIN, SUPER_TENANT_ID};

    use super::*;
    use crate::config::TokenMapping;

    fn default_config() -> StaticTokenConfig {
        StaticTokenConfig::default()
    }

    fn static_config() -> StaticTokenConfig {
        StaticTokenConfig {
            mode: AuthnMode::StaticTokens,
            tokens: vec![
                TokenMapping {
                    token: "token-user-a".to_owned(),
                    identity: IdentityConfig {
                        username: "alice".to_owned(),
                        tenant_id: Some(7),
                        tenant_domain: "acme.com".to_owned(),
                    },
                },
                TokenMapping {
                    token: "token-service".to_owned(),
                    identity: IdentityConfig {
                        username: "svc".to_owned(),
                        tenant_id: None,
                        tenant_domain: String::new(),
                    },
                },
            ],
            ..default_config()
        }
    }

    #[test]
    fn accept_all_mode_returns_default_identity() {
        let service = Service::from_config(&default_config());

        let info = service.authenticate_token("any-token-value").unwrap();

        assert_eq!(info.status(), AuthenticationStatus::Success);
        let tenant = info.tenant().unwrap();
        assert_eq!(tenant.tenant_id(), SUPER_TENANT_ID);
        assert_eq!(tenant.tenant_domain(), SUPER_TENANT_DOMAIN);
        assert_eq!(tenant.username(), "admin");
    }

    #[test]
    fn accept_all_mode_rejects_empty_token() {
        let service = Service::from_config(&default_config());

        assert!(service.authenticate_token("").is_none());
    }

    #[test]
    fn static_tokens_mode_returns_mapped_identity() {
        let service = Service::from_config(&static_config());

        let info = service.authenticate_token("token-user-a").unwrap();

        let tenant = info.tenant().unwrap();
        assert_eq!(tenant.tenant_id(), 7);
        assert_eq!(tenant.tenant_domain(), "acme.com");
        assert_eq!(tenant.username(), "alice");
    }

    #[test]
    fn identity_without_tenant_yields_tenantless_info() {
        let service = Service::from_config(&static_config());

        let info = service.authenticate_token("token-service").unwrap();

        assert_eq!(info.status(), AuthenticationStatus::Success);
        assert!(info.tenant().is_none());
        assert_eq!(info.tenant_id(), NO_TENANT_ID);
    }

    #[test]
    fn static_tokens_mode_rejects_unknown_token() {
        let service = Service::from_config(&static_config());

        assert!(service.authenticate_token("unknown-token").is_none());
        assert!(service.authenticate_token("").is_none());
    }

    #[test]
    fn debug_hides_token_values() {
        let service = Service::from_config(&static_config());

        let rendered = format!("{service:?}");

        assert!(rendered.contains("token_count: 2"));
        assert!(!rendered.contains("token-user-a"));
    }
}
