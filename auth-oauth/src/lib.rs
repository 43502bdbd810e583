//! LINE Login client.
//!
//! Covers the two provider calls of the login flow: redeeming an
//! authorization code at the token endpoint and reading the profile of the
//! user the resulting access token belongs to. Both are exposed as traits
//! ([`TokenExchanger`], [`ProfileFetcher`]) so the login orchestration can be
//! driven by fakes in tests; [`LineClient`] implements them over HTTPS.
//!
//! # Example
//!
//! ```rust,no_run
//! use auth_oauth::{AuthorizationGrant, LineClient, LineProviderConfig, ProfileFetcher, TokenExchanger};
//! use secrecy::SecretString;
//!
//! # async fn run() -> auth_oauth::Result<()> {
//! let config = LineProviderConfig::new("1650000000", SecretString::new("channel-secret".to_string()))?;
//! let client = LineClient::new(config)?;
//!
//! let grant = AuthorizationGrant {
//!     code: "authorization-code".to_string(),
//!     redirect_uri: Some("https://app.example/callback".to_string()),
//! };
//! let token = client.exchange_code(&grant).await?;
//! let profile = client.fetch_profile(&token.access_token).await?;
//! println!("{} ({})", profile.display_name, profile.user_id);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod models;
pub mod provider;

pub use client::*;
pub use error::*;
pub use models::*;
pub use provider::*;
