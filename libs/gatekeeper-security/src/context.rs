use crate::constants::NO_TENANT_ID;

/// `TenantContext` identifies the tenant a request executes under.
///
/// Produced by an authenticator and bound to the request task for the
/// duration of the downstream pipeline (see [`crate::run_in_tenant_scope`]).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TenantContext {
    tenant_id: i32,
    tenant_domain: String,
    username: String,
}

impl TenantContext {
    /// Create a new `TenantContext` builder
    #[must_use]
    pub fn builder() -> TenantContextBuilder {
        TenantContextBuilder::default()
    }

    #[must_use]
    pub fn tenant_id(&self) -> i32 {
        self.tenant_id
    }

    #[must_use]
    pub fn tenant_domain(&self) -> &str {
        &self.tenant_domain
    }

    /// Name of the authenticated user inside the tenant.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The tenant bound to the current task, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        crate::flow::current_tenant()
    }
}

#[derive(Default)]
pub struct TenantContextBuilder {
    tenant_id: Option<i32>,
    tenant_domain: Option<String>,
    username: Option<String>,
}

impl TenantContextBuilder {
    #[must_use]
    pub fn tenant_id(mut self, tenant_id: i32) -> Self {
        self.tenant_id = Some(tenant_id);
        self
    }

    #[must_use]
    pub fn tenant_domain(mut self, tenant_domain: &str) -> Self {
        self.tenant_domain = Some(tenant_domain.to_owned());
        self
    }

    #[must_use]
    pub fn username(mut self, username: &str) -> Self {
        self.username = Some(username.to_owned());
        self
    }

    #[must_use]
    pub fn build(self) -> TenantContext {
        TenantContext {
            tenant_id: self.tenant_id.unwrap_or(NO_TENANT_ID),
            tenant_domain: self.tenant_domain.unwrap_or_default(),
            username: self.username.unwrap_or_default(),
        }
    }
}
