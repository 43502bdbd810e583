//! Local account resolution for externally authenticated users.
//!
//! An external identity (a LINE user) is mapped onto an email/password account
//! in the Supabase identity store. The credentials are derived deterministically
//! from the external user id, so the same user always lands on the same account:
//! - [`CredentialPolicy`] derives the synthetic email and password
//! - [`AccountStore`] abstracts the store's sign-in, admin and REST endpoints
//! - [`AccountResolver`] signs in, or creates and registers the account on first login
//!
//! # Example
//!
//! ```rust,no_run
//! use auth_identity::{AccountProfile, AccountResolver, CredentialPolicy, StoreConfig, SupabaseAccountStore};
//! use secrecy::SecretString;
//! use std::sync::Arc;
//!
//! # async fn run() -> auth_identity::Result<()> {
//! let config = StoreConfig::new(
//!     "https://project.supabase.co",
//!     SecretString::new("service-role-key".to_string()),
//! )?;
//! let store = Arc::new(SupabaseAccountStore::new(config)?);
//! let policy = CredentialPolicy::new(
//!     "line",
//!     "baanpool-ops.app",
//!     SecretString::new("channel-secret".to_string()),
//! );
//! let resolver = AccountResolver::new(store, policy, "technician");
//!
//! let profile = AccountProfile {
//!     external_user_id: "U123".to_string(),
//!     display_name: "Alice".to_string(),
//!     picture_url: None,
//!     provider: "line".to_string(),
//! };
//! let resolved = resolver.resolve(&profile).await?;
//! println!("created: {}", resolved.created);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod service;

pub use config::*;
pub use error::*;
pub use models::*;
pub use repository::*;
pub use service::*;
