//! Domain models for the authentication gate.

use gatekeeper_security::TenantContext;
use gatekeeper_security::constants::NO_TENANT_ID;

/// Outcome of authenticating a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthenticationStatus {
    /// Credentials verified; forward the request.
    Success,
    /// Authenticator defers the decision; forward the request.
    Continue,
    /// Credentials rejected; the gate answers 401.
    Failure,
}

/// Result produced by an authenticator for a single request.
///
/// When `tenant` is present the downstream pipeline runs inside a tenant
/// scope. Absence corresponds to tenant id [`NO_TENANT_ID`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationInfo {
    status: AuthenticationStatus,
    tenant: Option<TenantContext>,
    message: Option<String>,
}

impl AuthenticationInfo {
    #[must_use]
    pub fn success() -> Self {
        Self::with_status(AuthenticationStatus::Success)
    }

    #[must_use]
    pub fn proceed() -> Self {
        Self::with_status(AuthenticationStatus::Continue)
    }

    /// Failure carrying a reason that is surfaced to the client.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::with_status(AuthenticationStatus::Failure)
        }
    }

    /// Failure without a reason; the gate uses its generic message.
    #[must_use]
    pub fn failure_without_message() -> Self {
        Self::with_status(AuthenticationStatus::Failure)
    }

    fn with_status(status: AuthenticationStatus) -> Self {
        Self {
            status,
            tenant: None,
            message: None,
        }
    }

    #[must_use]
    pub fn with_tenant(mut self, tenant: TenantContext) -> Self {
        self.tenant = Some(tenant);
        self
    }

    #[must_use]
    pub fn status(&self) -> AuthenticationStatus {
        self.status
    }

    #[must_use]
    pub fn tenant(&self) -> Option<&TenantContext> {
        self.tenant.as_ref()
    }

    /// Tenant id, or [`NO_TENANT_ID`] when no tenant scope is required.
    #[must_use]
    pub fn tenant_id(&self) -> i32 {
        self.tenant
            .as_ref()
            .map_or(NO_TENANT_ID, TenantContext::tenant_id)
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
