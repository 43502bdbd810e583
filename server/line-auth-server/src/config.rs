use auth_identity::{CredentialPolicy, StoreConfig};
use auth_oauth::{LineProviderConfig, DEFAULT_PROFILE_URL, DEFAULT_TOKEN_URL, PROVIDER_TAG};
use clap::Parser;
use error_common::{Result, ServiceError};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use url::Url;

/// LINE login exchange server
#[derive(Parser, Debug)]
#[command(name = "line-auth-server")]
#[command(about = "Exchanges LINE Login authorization codes for Supabase sessions")]
#[command(version)]
pub struct Args {
    /// Server bind address
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Supabase project URL
    #[arg(long, env = "SUPABASE_URL")]
    pub supabase_url: String,

    /// Supabase service role key
    #[arg(long, env = "SUPABASE_SERVICE_ROLE_KEY", hide_env_values = true)]
    pub supabase_service_role_key: String,

    /// LINE Login channel id
    #[arg(long, env = "LINE_CHANNEL_ID")]
    pub line_channel_id: String,

    /// LINE Login channel secret
    #[arg(long, env = "LINE_CHANNEL_SECRET", hide_env_values = true)]
    pub line_channel_secret: String,

    /// Redirect URI sent when a request does not carry one
    #[arg(long, env = "LINE_REDIRECT_URI")]
    pub line_redirect_uri: Option<String>,

    #[arg(long, env = "LINE_TOKEN_URL", default_value = DEFAULT_TOKEN_URL)]
    pub line_token_url: String,

    #[arg(long, env = "LINE_PROFILE_URL", default_value = DEFAULT_PROFILE_URL)]
    pub line_profile_url: String,

    /// Domain of the synthetic account emails
    #[arg(long, env = "ACCOUNT_EMAIL_DOMAIN", default_value = "baanpool-ops.app")]
    pub account_email_domain: String,

    /// Role written to the users table for new accounts
    #[arg(long, env = "DEFAULT_USER_ROLE", default_value = "technician")]
    pub default_user_role: String,

    /// Timeout in seconds for every provider and store request
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value_t = 10)]
    pub upstream_timeout_secs: u64,

    /// Comma separated CORS origins; any origin when empty
    #[arg(long, env = "CORS_ALLOWED_ORIGINS", value_delimiter = ',')]
    pub cors_allowed_origins: Vec<String>,

    /// Deployment environment (development selects pretty logs)
    #[arg(long, env = "APP_ENV", default_value = "development")]
    pub app_env: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Validated process configuration, loaded once at startup
#[derive(Debug)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub supabase_url: Url,
    pub supabase_service_role_key: SecretString,
    pub line_channel_id: String,
    pub line_channel_secret: SecretString,
    pub line_redirect_uri: Option<String>,
    pub line_token_url: Url,
    pub line_profile_url: Url,
    pub account_email_domain: String,
    pub default_user_role: String,
    pub upstream_timeout: Duration,
    pub cors_allowed_origins: Vec<String>,
    pub environment: String,
}

impl AppConfig {
    pub fn from_args(args: Args) -> Result<Self> {
        if args.upstream_timeout_secs == 0 {
            return Err(ServiceError::ConfigError(
                "UPSTREAM_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            supabase_url: parse_url("SUPABASE_URL", &args.supabase_url)?,
            supabase_service_role_key: SecretString::new(require(
                "SUPABASE_SERVICE_ROLE_KEY",
                args.supabase_service_role_key,
            )?),
            line_channel_id: require("LINE_CHANNEL_ID", args.line_channel_id)?,
            line_channel_secret: SecretString::new(require("LINE_CHANNEL_SECRET", args.line_channel_secret)?),
            line_redirect_uri: args.line_redirect_uri.filter(|uri| !uri.trim().is_empty()),
            line_token_url: parse_url("LINE_TOKEN_URL", &args.line_token_url)?,
            line_profile_url: parse_url("LINE_PROFILE_URL", &args.line_profile_url)?,
            account_email_domain: require("ACCOUNT_EMAIL_DOMAIN", args.account_email_domain)?,
            default_user_role: require("DEFAULT_USER_ROLE", args.default_user_role)?,
            upstream_timeout: Duration::from_secs(args.upstream_timeout_secs),
            cors_allowed_origins: args
                .cors_allowed_origins
                .into_iter()
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
            environment: args.app_env,
            host: args.host,
            port: args.port,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn store_config(&self) -> Result<StoreConfig> {
        let config = StoreConfig::new(
            self.supabase_url.as_str(),
            SecretString::new(self.supabase_service_role_key.expose_secret().clone()),
        )
        .map_err(|e| ServiceError::ConfigError(e.to_string()))?;

        Ok(config.with_timeout(self.upstream_timeout))
    }

    pub fn provider_config(&self) -> Result<LineProviderConfig> {
        let config = LineProviderConfig::new(
            self.line_channel_id.clone(),
            SecretString::new(self.line_channel_secret.expose_secret().clone()),
        )
        .and_then(|config| {
            config.with_endpoints(self.line_token_url.as_str(), self.line_profile_url.as_str())
        })
        .map_err(|e| ServiceError::ConfigError(e.to_string()))?;

        Ok(config
            .with_default_redirect_uri(self.line_redirect_uri.clone())
            .with_timeout(self.upstream_timeout))
    }

    /// Derivation rules keyed on the channel secret
    pub fn credential_policy(&self) -> CredentialPolicy {
        CredentialPolicy::new(
            PROVIDER_TAG,
            self.account_email_domain.clone(),
            SecretString::new(self.line_channel_secret.expose_secret().clone()),
        )
    }
}

fn require(name: &str, value: String) -> Result<String> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(ServiceError::ConfigError(format!("{} must not be empty", name)));
    }
    Ok(value)
}

fn parse_url(name: &str, value: &str) -> Result<Url> {
    Url::parse(value.trim()).map_err(|e| ServiceError::ConfigError(format!("{} is not a valid URL: {}", name, e)))
}
