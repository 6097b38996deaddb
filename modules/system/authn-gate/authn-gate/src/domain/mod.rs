pub mod deployment;
pub mod endpoint_cache;
pub mod error;
pub mod gate;
pub mod rules;
pub mod selector;

pub use deployment::Deployments;
pub use endpoint_cache::NonSecuredEndpointCache;
pub use error::GateError;
pub use gate::{AUTHORIZATION_FAILED_MESSAGE, NO_AUTHENTICATOR_MESSAGE, RequestGate};
pub use rules::SkipRule;
pub use selector::AuthenticatorSelector;
