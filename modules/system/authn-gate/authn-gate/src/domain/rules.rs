//! Ordered skip rules evaluated before any authenticator runs.
//!
//! Precedence: context skip, then the admin-service / auth-disabled rule, then
//! the explicit bypass list. The first rule that matches lets the request
//! through unauthenticated.

use crate::config::DeploymentConfig;
use crate::domain::endpoint_cache::NonSecuredEndpointCache;

/// The rule that exempted a request from authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipRule {
    /// The request targets a reserved internal context.
    ContextSkipped,
    /// Authentication is off for the deployment or the endpoint is non-secured.
    AuthenticationDisabled,
    /// The request URI is on the deployment's bypass list.
    BypassUri,
}

impl SkipRule {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ContextSkipped => "context-skip",
            Self::AuthenticationDisabled => "auth-disabled",
            Self::BypassUri => "bypass-uri",
        }
    }
}

/// Request data the rules look at.
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    pub uri_path: &'a str,
    pub deployment: &'a DeploymentConfig,
}

/// Shared state the rules consult.
#[derive(Debug, Clone, Copy)]
pub struct RuleEnv<'a> {
    pub skipped_contexts: &'a [String],
    pub endpoint_cache: &'a NonSecuredEndpointCache,
}

type Rule = fn(&RuleInput<'_>, &RuleEnv<'_>) -> bool;

const RULE_CHAIN: [(SkipRule, Rule); 3] = [
    (SkipRule::ContextSkipped, context_skip_rule),
    (SkipRule::AuthenticationDisabled, auth_disabled_rule),
    (SkipRule::BypassUri, bypass_uri_rule),
];

fn context_skip_rule(input: &RuleInput<'_>, env: &RuleEnv<'_>) -> bool {
    is_context_skipped(
        input.uri_path,
        &input.deployment.context_path,
        env.skipped_contexts,
    )
}

fn auth_disabled_rule(input: &RuleInput<'_>, env: &RuleEnv<'_>) -> bool {
    !is_admin_service(input.deployment)
        && is_authentication_disabled(input.uri_path, input.deployment, env.endpoint_cache)
}

fn bypass_uri_rule(input: &RuleInput<'_>, _env: &RuleEnv<'_>) -> bool {
    matches_bypass_uri(input.uri_path, input.deployment.bypass_uris.as_deref())
}

/// First rule exempting the request, if any.
#[must_use]
pub fn evaluate(input: &RuleInput<'_>, env: &RuleEnv<'_>) -> Option<SkipRule> {
    RULE_CHAIN
        .iter()
        .find(|(_, rule)| rule(input, env))
        .map(|(skip, _)| *skip)
}

/// Whether the request targets one of the reserved contexts.
///
/// The context name is the deployment's context path without its leading
/// `/`; for the root deployment it is the first segment of the URI. A bare
/// `/` request is always skipped.
#[must_use]
pub fn is_context_skipped(uri_path: &str, context_path: &str, skipped: &[String]) -> bool {
    let context = context_path.trim_start_matches('/');
    let context = if context.is_empty() {
        if uri_path == "/" {
            return true;
        }
        match uri_path.split('/').find(|s| !s.is_empty()) {
            Some(first) => first,
            None => return false,
        }
    } else {
        context
    };

    skipped.iter().any(|s| s.eq_ignore_ascii_case(context))
}

#[must_use]
pub fn is_admin_service(deployment: &DeploymentConfig) -> bool {
    deployment.is_admin_service.unwrap_or(false)
}

/// Whether the deployment lets `uri_path` through without authentication.
#[must_use]
pub fn is_authentication_disabled(
    uri_path: &str,
    deployment: &DeploymentConfig,
    endpoint_cache: &NonSecuredEndpointCache,
) -> bool {
    !deployment.require_authentication.unwrap_or(false)
        || endpoint_cache.is_non_secured(
            uri_path,
            &deployment.context_path,
            deployment.non_secured_endpoints.as_deref(),
        )
}

/// Exact match of `uri_path` against a comma-separated bypass list.
///
/// Each entry has `\n` and `\r` removed and surrounding whitespace trimmed.
#[must_use]
pub fn matches_bypass_uri(uri_path: &str, bypass_uris: Option<&str>) -> bool {
    let Some(list) = bypass_uris.filter(|l| !l.is_empty()) else {
        return false;
    };

    list.split(',').any(|entry| {
        let entry = entry.replace(['\n', '\r'], "");
        entry.trim() == uri_path
    })
}
