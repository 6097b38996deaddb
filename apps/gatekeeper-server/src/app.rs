//! HTTP surface of the gatekeeper host.

use std::sync::Arc;

use anyhow::{Context, Result};
use authn_gate::problem::Problem;
use authn_gate::{
    AuthenticatorSelector, GateState, NonSecuredEndpointCache, RequestGate, authn_gate_middleware,
};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::middleware::from_fn_with_state;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use gatekeeper_security::TenantContext;
use permission_registry::{PermissionRegistry, PermissionRegistryLocalClient};
use permission_registry_sdk::PermissionManager;
use serde::{Deserialize, Serialize};
use static_token_authenticator::StaticTokenPlugin;
use tracing::info;

use crate::config::AppConfig;

/// Shared state for the host's handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub registry: Arc<PermissionRegistry>,
}

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    pub url: String,
    pub method: Option<String>,
}

#[derive(Debug, Serialize)]
struct WhoAmI {
    tenant: Option<TenantContext>,
}

/// Build the router: registers configured permissions, assembles the gate
/// and wraps every route in the authentication middleware.
///
/// # Errors
///
/// Returns an error if a configured permission cannot be registered.
pub async fn build_router(config: &AppConfig, registry: Arc<PermissionRegistry>) -> Result<Router> {
    let manager = PermissionRegistryLocalClient::new(Arc::clone(&registry));
    manager
        .add_permissions(config.permissions.clone())
        .await
        .context("failed to register configured permissions")?;
    info!(count = registry.tree().len(), "permissions registered");

    let mut selector = AuthenticatorSelector::new();
    if let Some(static_token) = &config.static_token {
        selector.register(StaticTokenPlugin::init(static_token));
    }
    if selector.is_empty() {
        tracing::warn!("no authenticators configured; secured requests will be rejected");
    } else {
        info!(authenticators = ?selector.names(), "authenticators registered");
    }

    let gate = RequestGate::new(
        &config.gate,
        selector,
        Arc::new(NonSecuredEndpointCache::new()),
    );

    Ok(Router::new()
        .route("/permissions/lookup", get(lookup_permission))
        .fallback(whoami)
        .with_state(AppState { registry })
        .layer(from_fn_with_state(
            GateState::new(Arc::new(gate)),
            authn_gate_middleware,
        )))
}

/// `GET /permissions/lookup?url=..&method=..`
async fn lookup_permission(
    State(state): State<AppState>,
    Query(query): Query<LookupQuery>,
) -> Response {
    match state.registry.find(&query.url, query.method.as_deref()) {
        Some(permission) => Json(permission).into_response(),
        None => Problem::new(
            StatusCode::NOT_FOUND,
            "Not Found",
            format!("no permission governs {}", query.url),
        )
        .into_response(),
    }
}

/// Echo of the tenant the request runs under.
async fn whoami() -> Json<WhoAmI> {
    Json(WhoAmI {
        tenant: TenantContext::current(),
    })
}
