//! Tenant-scoped execution.
//!
//! A tenant scope binds a [`TenantContext`] to the running task and brackets
//! it with [`TenantFlow::start`] / [`TenantFlow::end`]. The end hook runs from
//! a drop guard, so it fires exactly once however the wrapped future finishes:
//! normal completion, an `Err` result, a panic, or the future being dropped.

use std::future::Future;
use std::sync::Arc;

use crate::context::TenantContext;

tokio::task_local! {
    static CURRENT_TENANT: TenantContext;
}

pub(crate) fn current_tenant() -> Option<TenantContext> {
    CURRENT_TENANT.try_with(Clone::clone).ok()
}

/// Hooks invoked when a tenant scope is entered and left.
pub trait TenantFlow: Send + Sync {
    fn start(&self, tenant: &TenantContext);

    fn end(&self, tenant: &TenantContext);
}

/// Default flow: records scope boundaries as trace events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingTenantFlow;

impl TenantFlow for TracingTenantFlow {
    fn start(&self, tenant: &TenantContext) {
        tracing::trace!(
            tenant_id = tenant.tenant_id(),
            tenant_domain = tenant.tenant_domain(),
            "tenant flow started"
        );
    }

    fn end(&self, tenant: &TenantContext) {
        tracing::trace!(tenant_id = tenant.tenant_id(), "tenant flow ended");
    }
}

/// Calls [`TenantFlow::end`] when dropped.
#[must_use = "the tenant flow ends as soon as the guard is dropped"]
pub struct TenantFlowGuard {
    flow: Arc<dyn TenantFlow>,
    tenant: TenantContext,
}

impl TenantFlowGuard {
    pub fn start(flow: Arc<dyn TenantFlow>, tenant: TenantContext) -> Self {
        flow.start(&tenant);
        Self { flow, tenant }
    }
}

impl Drop for TenantFlowGuard {
    fn drop(&mut self) {
        self.flow.end(&self.tenant);
    }
}

/// Run `fut` with `tenant` bound as the current task's tenant.
pub async fn run_in_tenant_scope<F>(
    flow: Arc<dyn TenantFlow>,
    tenant: TenantContext,
    fut: F,
) -> F::Output
where
    F: Future,
{
    let _guard = TenantFlowGuard::start(flow, tenant.clone());
    CURRENT_TENANT.scope(tenant, fut).await
}
