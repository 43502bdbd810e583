//! Common error handling utilities for the LINE login service
//!
//! Shared by every crate in the workspace:
//!
//! - **ServiceError**: process-level failures (configuration, bind, serve)
//! - **Error codes**: stable identifiers logged next to each API failure
//! - **Sanitization**: bounding upstream messages before they reach a client
//!
//! # Example
//!
//! ```rust
//! use error_common::{codes, sanitize_message, ServiceError};
//!
//! fn require(name: &str, value: &str) -> Result<(), ServiceError> {
//!     if value.trim().is_empty() {
//!         return Err(ServiceError::ConfigError(format!("{name} must not be empty")));
//!     }
//!     Ok(())
//! }
//!
//! assert!(require("LINE_CHANNEL_ID", "").is_err());
//! assert_eq!(codes::validation::MISSING_AUTHORIZATION_CODE, "VALIDATION_1001");
//! assert_eq!(sanitize_message("   ", "fallback"), "fallback");
//! ```

pub mod codes;
pub mod sanitization;
pub mod types;

pub use codes::*;
pub use sanitization::*;
pub use types::*;
