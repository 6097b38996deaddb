use serde::{Deserialize, Serialize};

fn default_skipped_contexts() -> Vec<String> {
    vec!["carbon".to_owned(), "services".to_owned()]
}

/// Authentication gate configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GateConfig {
    /// Context names that never go through authentication (compared case-insensitively).
    pub skipped_contexts: Vec<String>,

    /// Parameters applied to requests that match no deployment.
    pub root: DeploymentConfig,

    /// Mounted deployments, matched by longest context-path prefix.
    pub deployments: Vec<DeploymentConfig>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            skipped_contexts: default_skipped_contexts(),
            root: DeploymentConfig::default(),
            deployments: Vec::new(),
        }
    }
}

/// Per-deployment authentication parameters.
///
/// List parameters are raw comma-separated strings; their parsing rules are
/// part of the gate's contract (see `domain::rules`).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeploymentConfig {
    /// Mount point, e.g. `/app`. Empty for the root deployment.
    pub context_path: String,

    /// Unset or `false` lets every non-admin request through unauthenticated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_authentication: Option<bool>,

    /// Admin services always authenticate, whatever `require_authentication` says.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_admin_service: Option<bool>,

    /// Comma-separated request URIs exempt from authentication.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bypass_uris: Option<String>,

    /// Comma-separated endpoint suffixes, relative to `context_path`, exempt from authentication.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub non_secured_endpoints: Option<String>,
}

impl DeploymentConfig {
    #[must_use]
    pub fn new(context_path: &str) -> Self {
        Self {
            context_path: context_path.to_owned(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn require_authentication(mut self, required: bool) -> Self {
        self.require_authentication = Some(required);
        self
    }

    #[must_use]
    pub fn admin_service(mut self, is_admin: bool) -> Self {
        self.is_admin_service = Some(is_admin);
        self
    }

    #[must_use]
    pub fn bypass_uris(mut self, uris: &str) -> Self {
        self.bypass_uris = Some(uris.to_owned());
        self
    }

    #[must_use]
    pub fn non_secured_endpoints(mut self, endpoints: &str) -> Self {
        self.non_secured_endpoints = Some(endpoints.to_owned());
        self
    }
}
