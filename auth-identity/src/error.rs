use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdentityError {
    /// The store refused the derived credentials (unknown account, wrong password, ...)
    #[error("Sign-in rejected: {0}")]
    SignInRejected(String),

    /// Neither sign-in nor account creation succeeded
    #[error("{0}")]
    AccountCreationFailed(String),

    /// The account was created but no session could be obtained for it
    #[error("Session unavailable after account creation: {0}")]
    SessionUnavailable(String),

    /// Non-success response from the store that is not a credential rejection
    #[error("Account store returned HTTP {status}: {message}")]
    StoreStatus { status: u16, message: String },

    #[error("Invalid account store URL: {0}")]
    InvalidStoreUrl(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, IdentityError>;
