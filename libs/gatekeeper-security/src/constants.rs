/// Tenant id meaning "no tenant context required".
pub const NO_TENANT_ID: i32 = -1;

/// Tenant id of the host's own tenant.
pub const SUPER_TENANT_ID: i32 = -1234;

/// Domain of the host's own tenant.
pub const SUPER_TENANT_DOMAIN: &str = "carbon.super";
