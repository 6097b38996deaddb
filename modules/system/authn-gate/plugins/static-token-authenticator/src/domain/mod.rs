mod authenticator;
pub mod service;

pub use authenticator::bearer_token;
pub use service::Service;
