//! axum adapter for [`RequestGate`].

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::{GateError, RequestGate};
use crate::problem;

/// Shared state for the authentication middleware.
#[derive(Clone, Debug)]
pub struct GateState {
    pub gate: Arc<RequestGate>,
}

impl GateState {
    #[must_use]
    pub fn new(gate: Arc<RequestGate>) -> Self {
        Self { gate }
    }
}

/// Authentication middleware, installed with `axum::middleware::from_fn_with_state`.
///
/// Authenticator faults are answered with a 500 Problem response.
pub async fn authn_gate_middleware(
    State(state): State<GateState>,
    req: Request,
    next: Next,
) -> Response {
    let outcome = state
        .gate
        .handle(req, move |req| async move {
            Ok::<_, Infallible>(next.run(req).await)
        })
        .await;

    match outcome {
        Ok(response) => response,
        Err(GateError::Authenticator { .. }) => problem::authentication_fault(),
        Err(GateError::Next(never)) => match never {},
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use async_trait::async_trait;
    use authn_gate_sdk::{AuthenticationInfo, Authenticator, AuthenticatorError};
    use axum::Router;
    use axum::body::Body;
    use axum::http::StatusCode;
    use axum::middleware::from_fn_with_state;
    use http::request::Parts;
    use tower::ServiceExt;
    use tracing_test::traced_test;

    use super::*;
    use crate::config::{DeploymentConfig, GateConfig};
    use crate::domain::{AuthenticatorSelector, NonSecuredEndpointCache};

    struct UnreachableIdp;

    #[async_trait]
    impl Authenticator for UnreachableIdp {
        fn name(&self) -> &str {
            "unreachable"
        }

        fn can_handle(&self, _request: &Parts) -> bool {
            true
        }

        async fn authenticate(
            &self,
            _request: &Parts,
        ) -> Result<AuthenticationInfo, AuthenticatorError> {
            Err(AuthenticatorError::ServiceUnavailable("idp down".to_owned()))
        }
    }

    #[tokio::test]
    #[traced_test]
    async fn authenticator_fault_is_logged_once() {
        let config = GateConfig {
            deployments: vec![DeploymentConfig::new("/app").require_authentication(true)],
            ..GateConfig::default()
        };
        let gate = RequestGate::new(
            &config,
            AuthenticatorSelector::new().with_authenticator(Arc::new(UnreachableIdp)),
            Arc::new(NonSecuredEndpointCache::new()),
        );
        let router = Router::new()
            .fallback(|| async { "unreachable" })
            .layer(from_fn_with_state(
                GateState::new(Arc::new(gate)),
                authn_gate_middleware,
            ));

        let response = router
            .oneshot(Request::builder().uri("/app/x").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        logs_assert(|lines: &[&str]| {
            match lines.iter().filter(|line| line.contains("ERROR")).count() {
                1 => Ok(()),
                n => Err(format!("expected one error line, got {n}")),
            }
        });
    }
}
