//! The per-request authentication pipeline.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use authn_gate_sdk::{AuthenticationInfo, AuthenticationStatus};
use axum::http::Request;
use axum::response::Response;
use gatekeeper_security::constants::NO_TENANT_ID;
use gatekeeper_security::{TenantFlow, TracingTenantFlow, run_in_tenant_scope};

use crate::config::GateConfig;
use crate::domain::deployment::Deployments;
use crate::domain::endpoint_cache::NonSecuredEndpointCache;
use crate::domain::error::GateError;
use crate::domain::rules::{self, RuleEnv, RuleInput, SkipRule};
use crate::domain::selector::AuthenticatorSelector;
use crate::problem;

/// Rejection detail when no authenticator can handle the request.
pub const NO_AUTHENTICATOR_MESSAGE: &str =
    "Failed to load an appropriate authenticator to authenticate the request";

/// Rejection detail when an authenticator fails a request without a reason.
pub const AUTHORIZATION_FAILED_MESSAGE: &str = "Failed to authorize incoming request";

/// Authentication gate run once per inbound request.
///
/// For each request:
/// 1. Evaluates the skip rules; a match forwards the request untouched
/// 2. Selects an authenticator; none means 401
/// 3. Authenticates and, when a tenant is returned, enters its tenant scope
/// 4. Forwards on `Success` / `Continue`, answers 401 on `Failure`
pub struct RequestGate {
    deployments: Deployments,
    skipped_contexts: Vec<String>,
    selector: AuthenticatorSelector,
    endpoint_cache: Arc<NonSecuredEndpointCache>,
    tenant_flow: Arc<dyn TenantFlow>,
}

impl RequestGate {
    #[must_use]
    pub fn new(
        config: &GateConfig,
        selector: AuthenticatorSelector,
        endpoint_cache: Arc<NonSecuredEndpointCache>,
    ) -> Self {
        Self {
            deployments: Deployments::from_config(config),
            skipped_contexts: config.skipped_contexts.clone(),
            selector,
            endpoint_cache,
            tenant_flow: Arc::new(TracingTenantFlow),
        }
    }

    #[must_use]
    pub fn with_tenant_flow(mut self, tenant_flow: Arc<dyn TenantFlow>) -> Self {
        self.tenant_flow = tenant_flow;
        self
    }

    #[must_use]
    pub fn endpoint_cache(&self) -> &Arc<NonSecuredEndpointCache> {
        &self.endpoint_cache
    }

    #[must_use]
    pub fn selector(&self) -> &AuthenticatorSelector {
        &self.selector
    }

    /// Skip rule exempting `uri_path` from authentication, if any.
    pub fn evaluate_skip(&self, uri_path: &str) -> Option<SkipRule> {
        let deployment = self.deployments.resolve(uri_path);
        rules::evaluate(
            &RuleInput {
                uri_path,
                deployment,
            },
            &RuleEnv {
                skipped_contexts: &self.skipped_contexts,
                endpoint_cache: &self.endpoint_cache,
            },
        )
    }

    /// Run the gate for `request`, calling `next` when the request may proceed.
    ///
    /// Rejections are returned as `Ok` 401 responses.
    ///
    /// # Errors
    ///
    /// - `Authenticator` if the selected authenticator faults
    /// - `Next` if the continuation fails; the tenant scope is already torn down
    #[tracing::instrument(skip_all, fields(method = %request.method(), uri = %request.uri().path()))]
    pub async fn handle<B, F, Fut, E>(
        &self,
        request: Request<B>,
        next: F,
    ) -> Result<Response, GateError<E>>
    where
        F: FnOnce(Request<B>) -> Fut,
        Fut: Future<Output = Result<Response, E>>,
    {
        if let Some(rule) = self.evaluate_skip(request.uri().path()) {
            tracing::debug!(rule = rule.name(), "authentication skipped");
            return next(request).await.map_err(GateError::Next);
        }

        let (mut parts, body) = request.into_parts();

        let Some(authenticator) = self.selector.select(&parts) else {
            tracing::warn!("{NO_AUTHENTICATOR_MESSAGE}");
            return Ok(problem::unauthorized(NO_AUTHENTICATOR_MESSAGE, None));
        };

        let info = authenticator.authenticate(&parts).await.map_err(|source| {
            tracing::error!(
                authenticator = authenticator.name(),
                error = %source,
                "authenticator failed"
            );
            GateError::Authenticator {
                authenticator: authenticator.name().to_owned(),
                source,
            }
        })?;

        // A tenant carrying NO_TENANT_ID runs unscoped.
        match info.tenant().filter(|t| t.tenant_id() != NO_TENANT_ID) {
            Some(tenant) => {
                parts.extensions.insert(tenant.clone());
                let request = Request::from_parts(parts, body);
                run_in_tenant_scope(
                    Arc::clone(&self.tenant_flow),
                    tenant.clone(),
                    dispatch(request, &info, next),
                )
                .await
            }
            None => dispatch(Request::from_parts(parts, body), &info, next).await,
        }
    }
}

async fn dispatch<B, F, Fut, E>(
    request: Request<B>,
    info: &AuthenticationInfo,
    next: F,
) -> Result<Response, GateError<E>>
where
    F: FnOnce(Request<B>) -> Fut,
    Fut: Future<Output = Result<Response, E>>,
{
    match info.status() {
        AuthenticationStatus::Success | AuthenticationStatus::Continue => {
            next(request).await.map_err(GateError::Next)
        }
        AuthenticationStatus::Failure => {
            let challenge = info.message().filter(|m| !m.is_empty());
            let message = challenge.unwrap_or(AUTHORIZATION_FAILED_MESSAGE);
            tracing::error!(tenant_id = info.tenant_id(), "{message}");
            Ok(problem::unauthorized(message, challenge))
        }
    }
}

impl fmt::Debug for RequestGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestGate")
            .field("deployments", &self.deployments)
            .field("skipped_contexts", &self.skipped_contexts)
            .field("selector", &self.selector)
            .field("endpoint_cache", &self.endpoint_cache)
            .finish_non_exhaustive()
    }
}
