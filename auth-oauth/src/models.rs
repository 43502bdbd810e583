use crate::error::{OAuthError, Result};
use auth_identity::AccountProfile;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Authorization code handed back to the client by the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationGrant {
    pub code: String,
    /// Must equal the redirect URI used in the authorization request
    pub redirect_uri: Option<String>,
}

/// Form body of the token endpoint request
#[derive(Debug, Serialize)]
pub struct TokenRequest<'a> {
    pub grant_type: &'static str,
    pub code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<&'a str>,
    pub client_id: &'a str,
    pub client_secret: &'a str,
}

/// Token endpoint response; success and error share one shape
#[derive(Debug, Default, Deserialize)]
pub struct ProviderTokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

impl ProviderTokenResponse {
    /// Classify the response. An `error` field wins over any token present.
    pub fn into_grant(self) -> Result<TokenGrant> {
        if let Some(error) = self.error {
            let description = self
                .error_description
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| error.clone());
            return Err(OAuthError::ProviderRejected { error, description });
        }

        match self.access_token {
            Some(token) if !token.is_empty() => Ok(TokenGrant {
                access_token: SecretString::new(token),
                expires_in: self.expires_in,
                scope: self.scope,
            }),
            _ => Err(OAuthError::MissingAccessToken),
        }
    }
}

/// Provider access token obtained from a successful exchange
#[derive(Debug)]
pub struct TokenGrant {
    pub access_token: SecretString,
    pub expires_in: Option<u64>,
    pub scope: Option<String>,
}

/// LINE profile as returned by `GET /v2/profile`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalProfile {
    pub user_id: String,
    #[serde(default)]
    pub display_name: String,
    pub picture_url: Option<String>,
}

impl From<&ExternalProfile> for AccountProfile {
    fn from(profile: &ExternalProfile) -> Self {
        Self {
            external_user_id: profile.user_id.clone(),
            display_name: profile.display_name.clone(),
            picture_url: profile.picture_url.clone(),
            provider: crate::provider::PROVIDER_TAG.to_string(),
        }
    }
}
