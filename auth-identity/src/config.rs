use crate::error::{IdentityError, Result};
use crate::models::DerivedCredentials;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use url::Url;

/// Connection settings for the Supabase project backing local accounts
#[derive(Debug)]
pub struct StoreConfig {
    pub base_url: Url,
    pub service_role_key: SecretString,
    /// Applied to every request made to the store
    pub timeout: Duration,
    /// Registry table that mirrors created accounts
    pub users_table: String,
}

impl StoreConfig {
    pub fn new(base_url: &str, service_role_key: SecretString) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| IdentityError::InvalidStoreUrl(format!("{}: {}", base_url, e)))?;

        if base_url.cannot_be_a_base() {
            return Err(IdentityError::InvalidStoreUrl(base_url.to_string()));
        }

        Ok(Self {
            base_url,
            service_role_key,
            timeout: Duration::from_secs(10),
            users_table: "users".to_string(),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve an API path (e.g. `auth/v1/token`) against the project URL
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let mut base = self.base_url.clone();
        // Without a trailing slash `join` would drop the last path segment
        if !base.path().ends_with('/') {
            let path_with_slash = format!("{}/", base.path());
            base.set_path(&path_with_slash);
        }
        base.join(path.trim_start_matches('/'))
            .map_err(|e| IdentityError::InvalidStoreUrl(format!("{}: {}", path, e)))
    }
}

/// Rules for deriving the deterministic credentials of a linked account
#[derive(Debug)]
pub struct CredentialPolicy {
    /// Prefix shared by the email local part and the password, e.g. `line`
    pub provider_prefix: String,
    /// Domain of the synthetic account email
    pub email_domain: String,
    /// Shared secret mixed into the password (the LINE channel secret)
    pub shared_secret: SecretString,
}

/// Number of leading shared-secret characters mixed into derived passwords
pub const SECRET_PREFIX_CHARS: usize = 8;

impl CredentialPolicy {
    pub fn new(
        provider_prefix: impl Into<String>,
        email_domain: impl Into<String>,
        shared_secret: SecretString,
    ) -> Self {
        Self {
            provider_prefix: provider_prefix.into(),
            email_domain: email_domain.into(),
            shared_secret,
        }
    }

    /// Derive `<prefix>_<id>@<domain>` and `<prefix>_<id>_<secret[..8]>`
    pub fn derive(&self, external_user_id: &str) -> DerivedCredentials {
        let secret_prefix: String = self
            .shared_secret
            .expose_secret()
            .chars()
            .take(SECRET_PREFIX_CHARS)
            .collect();

        DerivedCredentials {
            email: format!("{}_{}@{}", self.provider_prefix, external_user_id, self.email_domain),
            password: SecretString::new(format!(
                "{}_{}_{}",
                self.provider_prefix, external_user_id, secret_prefix
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(secret: &str) -> CredentialPolicy {
        CredentialPolicy::new("line", "baanpool-ops.app", SecretString::new(secret.to_string()))
    }

    #[test]
    fn derivation_is_deterministic() {
        let policy = policy("0123456789abcdef");
        let first = policy.derive("U123");
        let second = policy.derive("U123");

        assert_eq!(first.email, "line_U123@baanpool-ops.app");
        assert_eq!(first.email, second.email);
        assert_eq!(first.password.expose_secret(), "line_U123_01234567");
        assert_eq!(first.password.expose_secret(), second.password.expose_secret());
    }

    #[test]
    fn distinct_users_get_distinct_credentials() {
        let policy = policy("0123456789abcdef");
        let alice = policy.derive("U123");
        let bob = policy.derive("U456");

        assert_ne!(alice.email, bob.email);
        assert_ne!(alice.password.expose_secret(), bob.password.expose_secret());
    }

    #[test]
    fn short_secret_is_used_whole() {
        let derived = policy("abc").derive("U1");
        assert_eq!(derived.password.expose_secret(), "line_U1_abc");
    }

    #[test]
    fn endpoint_keeps_project_path() {
        let config = StoreConfig::new(
            "https://proxy.example.com/project",
            SecretString::new("key".to_string()),
        )
        .unwrap();
        assert_eq!(
            config.endpoint("/auth/v1/token").unwrap().as_str(),
            "https://proxy.example.com/project/auth/v1/token"
        );

        let config = StoreConfig::new("https://abc.supabase.co", SecretString::new("key".to_string())).unwrap();
        assert_eq!(
            config.endpoint("rest/v1/users").unwrap().as_str(),
            "https://abc.supabase.co/rest/v1/users"
        );
    }

    #[test]
    fn rejects_invalid_store_url() {
        let result = StoreConfig::new("not a url", SecretString::new("key".to_string()));
        assert!(matches!(result, Err(IdentityError::InvalidStoreUrl(_))));
    }
}
