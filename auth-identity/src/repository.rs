use crate::{config::StoreConfig, error::*, models::*};
use async_trait::async_trait;
use reqwest::{Client as HttpClient, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};

/// Operations consumed from the backing identity store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Password sign-in; returns a fresh session for the account
    async fn sign_in_with_password(&self, email: &str, password: &SecretString) -> Result<Session>;

    /// Create an account through the admin API
    async fn create_user(&self, account: &NewAccount) -> Result<CreatedAccount>;

    /// Insert or update a row of the user registry table
    async fn upsert_user_row(&self, row: &RegistryRow) -> Result<()>;
}

/// [`AccountStore`] backed by the Supabase auth (GoTrue) and REST (PostgREST) APIs
pub struct SupabaseAccountStore {
    config: StoreConfig,
    http_client: HttpClient,
}

impl SupabaseAccountStore {
    pub fn new(config: StoreConfig) -> Result<Self> {
        let http_client = HttpClient::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(config, http_client))
    }

    /// Reuse an existing client; its timeout replaces [`StoreConfig::timeout`]
    pub fn with_client(config: StoreConfig, http_client: HttpClient) -> Self {
        Self { config, http_client }
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        let key = self.config.service_role_key.expose_secret();
        builder.header("apikey", key.as_str()).bearer_auth(key)
    }

    async fn failure(response: Response) -> (StatusCode, String) {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        let message = serde_json::from_str::<StoreErrorBody>(&body)
            .ok()
            .and_then(StoreErrorBody::into_message)
            .unwrap_or_else(|| {
                let fallback = status.canonical_reason().unwrap_or("request failed");
                error_common::sanitize_message(&body, fallback)
            });

        (status, message)
    }
}

#[async_trait]
impl AccountStore for SupabaseAccountStore {
    async fn sign_in_with_password(&self, email: &str, password: &SecretString) -> Result<Session> {
        let url = self.config.endpoint("auth/v1/token")?;
        let grant = PasswordGrant {
            email,
            password: password.expose_secret(),
        };

        let response = self
            .authorized(self.http_client.post(url))
            .query(&[("grant_type", "password")])
            .json(&grant)
            .send()
            .await?;

        if response.status().is_success() {
            let body = response.text().await?;
            return Ok(serde_json::from_str(&body)?);
        }

        let (status, message) = Self::failure(response).await;
        if status.is_client_error() {
            Err(IdentityError::SignInRejected(message))
        } else {
            Err(IdentityError::StoreStatus {
                status: status.as_u16(),
                message,
            })
        }
    }

    async fn create_user(&self, account: &NewAccount) -> Result<CreatedAccount> {
        let url = self.config.endpoint("auth/v1/admin/users")?;

        let response = self
            .authorized(self.http_client.post(url))
            .json(&CreateUserBody::from(account))
            .send()
            .await?;

        if response.status().is_success() {
            let body = response.text().await?;
            return Ok(serde_json::from_str(&body)?);
        }

        let (status, message) = Self::failure(response).await;
        Err(IdentityError::StoreStatus {
            status: status.as_u16(),
            message,
        })
    }

    async fn upsert_user_row(&self, row: &RegistryRow) -> Result<()> {
        let url = self
            .config
            .endpoint(&format!("rest/v1/{}", self.config.users_table))?;

        let response = self
            .authorized(self.http_client.post(url))
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(row)
            .send()
            .await?;

        if response.status().is_success() {
            return Ok(());
        }

        let (status, message) = Self::failure(response).await;
        Err(IdentityError::StoreStatus {
            status: status.as_u16(),
            message,
        })
    }
}
