//! Tracing setup with automatic redaction of credentials and PII
//!
//! The login flow handles several values that must never reach a log file:
//! the LINE authorization code, the provider access token, the derived
//! account password (which embeds part of the channel secret), the Supabase
//! service key, and derived account emails (which embed the LINE user id).
//!
//! # Key Features
//!
//! - **Environment aware output**: colored lines in development, JSON elsewhere
//! - **Field redaction**: development output runs every field through [`PiiRedactor`]
//! - **Explicit redaction**: [`redact`] for upstream messages logged in any format
//! - **Hash-based correlation**: redacted emails keep a short stable hash
//!
//! # Example
//!
//! ```rust,no_run
//! use logger_redacted::{init_tracing, redact, LoggerConfig};
//!
//! fn main() -> Result<(), error_common::ServiceError> {
//!     init_tracing(&LoggerConfig::for_environment("development", false))?;
//!
//!     tracing::warn!(
//!         detail = %redact("Invalid login credentials for line_U42@baanpool-ops.app"),
//!         "Account store rejected sign-in"
//!     );
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod formatters;
pub mod redactor;

pub use config::*;
pub use formatters::*;
pub use redactor::*;

use error_common::{Result, ServiceError};
use lazy_static::lazy_static;
use std::sync::Arc;
use tracing_subscriber::{
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

lazy_static! {
    static ref DEFAULT_REDACTOR: PiiRedactor = PiiRedactor::new(RedactionConfig::default());
}

/// Redact `text` with the default configuration
pub fn redact(text: &str) -> String {
    DEFAULT_REDACTOR.redact(text)
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over [`LoggerConfig::default_directive`].
pub fn init_tracing(config: &LoggerConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_directive()));

    let installed = match config.format {
        LogFormat::Pretty => {
            let use_colors = std::env::var("NO_COLOR").is_err() && atty::is(atty::Stream::Stdout);
            colored::control::set_override(use_colors);

            let redactor = config
                .redaction_enabled
                .then(|| Arc::new(PiiRedactor::new(RedactionConfig::default())));

            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_ansi(use_colors)
                        .event_format(ColoredFormatter::new())
                        .fmt_fields(RedactedFields::new(redactor)),
                )
                .try_init()
        }
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(false)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false),
            )
            .try_init(),
    };

    installed.map_err(|e| ServiceError::ConfigError(format!("Failed to install tracing subscriber: {}", e)))
}
