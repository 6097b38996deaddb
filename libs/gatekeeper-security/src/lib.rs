#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Tenant context shared by the gatekeeper crates.
//!
//! - [`TenantContext`] - identity of the tenant a request executes under
//! - [`TenantFlow`] - start/end hooks observed around every tenant scope
//! - [`run_in_tenant_scope`] - runs a future with the tenant bound to the task

pub mod constants;
pub mod context;
pub mod flow;

pub use context::{TenantContext, TenantContextBuilder};
pub use flow::{TenantFlow, TenantFlowGuard, TracingTenantFlow, run_in_tenant_scope};
