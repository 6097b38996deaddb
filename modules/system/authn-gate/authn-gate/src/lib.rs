//! Request authentication gate.
//!
//! Decides per inbound request whether authentication is skipped, picks an
//! authenticator, enforces its verdict and runs the rest of the pipeline in
//! the authenticated tenant's scope.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;
pub mod middleware;
pub mod problem;

pub use config::{DeploymentConfig, GateConfig};
pub use domain::{
    AuthenticatorSelector, GateError, NonSecuredEndpointCache, RequestGate, SkipRule,
};
pub use middleware::{GateState, authn_gate_middleware};
