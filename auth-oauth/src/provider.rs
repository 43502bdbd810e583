use crate::error::{OAuthError, Result};
use secrecy::SecretString;
use std::time::Duration;
use url::Url;

/// Provider tag recorded in account metadata and used as the credential prefix
pub const PROVIDER_TAG: &str = "line";

pub const DEFAULT_TOKEN_URL: &str = "https://api.line.me/oauth2/v2.1/token";
pub const DEFAULT_PROFILE_URL: &str = "https://api.line.me/v2/profile";

/// LINE Login channel settings
#[derive(Debug)]
pub struct LineProviderConfig {
    pub channel_id: String,
    pub channel_secret: SecretString,
    pub token_url: Url,
    pub profile_url: Url,
    /// Sent when the client omits `redirect_uri`
    pub default_redirect_uri: Option<String>,
    /// Applied to every provider request
    pub timeout: Duration,
}

impl LineProviderConfig {
    pub fn new(channel_id: impl Into<String>, channel_secret: SecretString) -> Result<Self> {
        Ok(Self {
            channel_id: channel_id.into(),
            channel_secret,
            token_url: parse_endpoint(DEFAULT_TOKEN_URL)?,
            profile_url: parse_endpoint(DEFAULT_PROFILE_URL)?,
            default_redirect_uri: None,
            timeout: Duration::from_secs(10),
        })
    }

    /// Override both provider endpoints
    pub fn with_endpoints(mut self, token_url: &str, profile_url: &str) -> Result<Self> {
        self.token_url = parse_endpoint(token_url)?;
        self.profile_url = parse_endpoint(profile_url)?;
        Ok(self)
    }

    pub fn with_default_redirect_uri(mut self, redirect_uri: Option<String>) -> Self {
        self.default_redirect_uri = redirect_uri.filter(|uri| !uri.trim().is_empty());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn parse_endpoint(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| OAuthError::InvalidEndpoint(format!("{}: {}", raw, e)))
}
