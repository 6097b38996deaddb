//! Configuration for the static token authenticator.

use gatekeeper_security::constants::{SUPER_TENANT_DOMAIN, SUPER_TENANT_ID};
use serde::{Deserialize, Serialize};

/// Plugin configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticTokenConfig {
    /// Authenticator name reported to the gate.
    pub name: String,

    /// Authentication mode.
    pub mode: AuthnMode,

    /// Default identity returned in `accept_all` mode.
    pub default_identity: IdentityConfig,

    /// Static token-to-identity mappings for `static_tokens` mode.
    pub tokens: Vec<TokenMapping>,
}

impl Default for StaticTokenConfig {
    fn default() -> Self {
        Self {
            name: "static-token".to_owned(),
            mode: AuthnMode::AcceptAll,
            default_identity: IdentityConfig::default(),
            tokens: Vec::new(),
        }
    }
}

/// Authentication mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthnMode {
    /// Accept any non-empty token and return the default identity.
    #[default]
    AcceptAll,
    /// Map specific tokens to specific identities.
    StaticTokens,
}

/// Identity returned for an accepted token.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct IdentityConfig {
    pub username: String,

    /// Tenant to scope the request to; `None` authenticates without a tenant.
    pub tenant_id: Option<i32>,

    pub tenant_domain: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_owned(),
            tenant_id: Some(SUPER_TENANT_ID),
            tenant_domain: SUPER_TENANT_DOMAIN.to_owned(),
        }
    }
}

/// Maps a static token to a specific identity.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TokenMapping {
    /// The bearer token value to match.
    pub token: String,
    /// The identity to return when this token is presented.
    pub identity: IdentityConfig,
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn defaults_accept_all_as_super_tenant() {
        let cfg: StaticTokenConfig = serde_json::from_value(serde_json::json!({})).unwrap();

        assert_eq!(cfg.mode, AuthnMode::AcceptAll);
        assert_eq!(cfg.name, "static-token");
        assert_eq!(cfg.default_identity.tenant_id, Some(SUPER_TENANT_ID));
        assert!(cfg.tokens.is_empty());
    }

    #[test]
    fn null_tenant_id_means_no_tenant() {
        let cfg: StaticTokenConfig = serde_json::from_value(serde_json::json!({
            "mode": "static_tokens",
            "tokens": [
                { "token": "svc", "identity": { "username": "svc", "tenant_id": null } }
            ]
        }))
        .unwrap();

        assert_eq!(cfg.mode, AuthnMode::StaticTokens);
        assert_eq!(cfg.tokens[0].identity.tenant_id, None);
        assert_eq!(cfg.tokens[0].identity.tenant_domain, SUPER_TENANT_DOMAIN);
    }

    #[test]
    fn token_mapping_requires_identity() {
        let result: Result<StaticTokenConfig, _> = serde_json::from_value(serde_json::json!({
            "tokens": [{ "token": "t" }]
        }));

        assert!(result.is_err());
    }
}
