// Error codes logged alongside API failures

pub mod validation {
    pub const MISSING_AUTHORIZATION_CODE: &str = "VALIDATION_1001";
}

pub mod provider {
    pub const PROVIDER_REJECTED: &str = "OAUTH_2001";
    pub const UPSTREAM_FAILURE: &str = "OAUTH_2002";
}

pub mod account {
    pub const CREATION_FAILED: &str = "ACCOUNT_3001";
    pub const REGISTRY_UPSERT_FAILED: &str = "ACCOUNT_3002";
    pub const SESSION_UNAVAILABLE: &str = "ACCOUNT_3003";
}

pub mod internal {
    pub const UNEXPECTED: &str = "INTERNAL_5000";
    pub const UNREADABLE_BODY: &str = "INTERNAL_5001";
}
