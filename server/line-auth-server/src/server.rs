use crate::{config::AppConfig, services::LoginExchange};
use auth_identity::{AccountResolver, SupabaseAccountStore};
use auth_oauth::LineClient;
use error_common::{Result, ServiceError};
use std::sync::Arc;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub login: Arc<LoginExchange>,
}

impl AppState {
    /// Wire the LINE client and the Supabase store from configuration
    pub fn new(config: AppConfig) -> Result<Self> {
        let line = Arc::new(
            LineClient::new(config.provider_config()?)
                .map_err(|e| ServiceError::ConfigError(format!("LINE client: {}", e)))?,
        );

        let store = SupabaseAccountStore::new(config.store_config()?)
            .map_err(|e| ServiceError::ConfigError(format!("Account store client: {}", e)))?;
        let accounts = AccountResolver::new(
            Arc::new(store),
            config.credential_policy(),
            config.default_user_role.clone(),
        );

        let login = LoginExchange::new(line.clone(), line, accounts);
        Ok(Self::with_login(config, login))
    }

    /// State around an already assembled login pipeline
    pub fn with_login(config: AppConfig, login: LoginExchange) -> Self {
        Self {
            config: Arc::new(config),
            login: Arc::new(login),
        }
    }
}
