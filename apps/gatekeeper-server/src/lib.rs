//! Gatekeeper host application.
//!
//! Wires the authentication gate, the static token authenticator and the
//! permission registry into an axum server.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod app;
pub mod config;
pub mod logging;
pub mod shutdown;

pub use app::{AppState, build_router};
pub use config::{AppConfig, LogFormat, LoggingConfig, ServerConfig};
