use auth_identity::{AccountProfile, AccountResolver, IdentityError, Session};
use auth_oauth::{AuthorizationGrant, ExternalProfile, OAuthError, ProfileFetcher, TokenExchanger};
use axum::http::StatusCode;
use error_common::codes;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument};

/// Failure taxonomy of a login attempt
#[derive(Error, Debug)]
pub enum LoginError {
    /// The request itself is unusable; nothing was sent upstream
    #[error("{0}")]
    InvalidRequest(String),

    /// The provider refused the authorization code
    #[error("{0}")]
    ProviderRejected(String),

    /// The account store refused to create the account
    #[error("{0}")]
    AccountCreationFailed(String),

    #[error("{message}")]
    Internal { code: &'static str, message: String },
}

impl LoginError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            LoginError::InvalidRequest(_)
            | LoginError::ProviderRejected(_)
            | LoginError::AccountCreationFailed(_) => StatusCode::BAD_REQUEST,
            LoginError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable code logged with the failure
    pub fn code(&self) -> &'static str {
        match self {
            LoginError::InvalidRequest(_) => codes::validation::MISSING_AUTHORIZATION_CODE,
            LoginError::ProviderRejected(_) => codes::provider::PROVIDER_REJECTED,
            LoginError::AccountCreationFailed(_) => codes::account::CREATION_FAILED,
            LoginError::Internal { code, .. } => *code,
        }
    }
}

impl From<OAuthError> for LoginError {
    fn from(err: OAuthError) -> Self {
        match err {
            OAuthError::ProviderRejected { description, .. } => LoginError::ProviderRejected(description),
            other => LoginError::Internal {
                code: codes::provider::UPSTREAM_FAILURE,
                message: other.to_string(),
            },
        }
    }
}

impl From<IdentityError> for LoginError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::AccountCreationFailed(message) => LoginError::AccountCreationFailed(message),
            IdentityError::SessionUnavailable(message) => LoginError::Internal {
                code: codes::account::SESSION_UNAVAILABLE,
                message: format!("Session unavailable after account creation: {}", message),
            },
            other => LoginError::Internal {
                code: codes::internal::UNEXPECTED,
                message: other.to_string(),
            },
        }
    }
}

/// Result of a successful login
#[derive(Debug, Clone, PartialEq)]
pub struct LoginOutcome {
    pub session: Session,
    pub profile: ExternalProfile,
    pub account_created: bool,
}

/// Code exchange, profile fetch and account resolution, strictly in that order
pub struct LoginExchange {
    tokens: Arc<dyn TokenExchanger>,
    profiles: Arc<dyn ProfileFetcher>,
    accounts: AccountResolver,
}

impl LoginExchange {
    pub fn new(
        tokens: Arc<dyn TokenExchanger>,
        profiles: Arc<dyn ProfileFetcher>,
        accounts: AccountResolver,
    ) -> Self {
        Self {
            tokens,
            profiles,
            accounts,
        }
    }

    #[instrument(skip_all, fields(has_redirect_uri = redirect_uri.is_some()))]
    pub async fn exchange(
        &self,
        code: Option<&str>,
        redirect_uri: Option<&str>,
    ) -> Result<LoginOutcome, LoginError> {
        let code = code
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .ok_or_else(|| LoginError::InvalidRequest("Missing authorization code".to_string()))?;

        let grant = AuthorizationGrant {
            code: code.to_string(),
            redirect_uri: redirect_uri
                .map(str::trim)
                .filter(|uri| !uri.is_empty())
                .map(str::to_string),
        };

        let token = self.tokens.exchange_code(&grant).await?;
        let profile = self.profiles.fetch_profile(&token.access_token).await?;

        let resolved = self.accounts.resolve(&AccountProfile::from(&profile)).await?;

        info!(
            account_created = resolved.created,
            account_id = resolved.session.user_id().unwrap_or("unknown"),
            "LINE login completed"
        );

        Ok(LoginOutcome {
            session: resolved.session,
            profile,
            account_created: resolved.created,
        })
    }
}
