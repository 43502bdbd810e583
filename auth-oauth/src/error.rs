use thiserror::Error;

#[derive(Error, Debug)]
pub enum OAuthError {
    /// The token endpoint answered with an OAuth error object
    #[error("{description}")]
    ProviderRejected { error: String, description: String },

    /// Token response carried neither an access token nor an error
    #[error("Token response did not contain an access token")]
    MissingAccessToken,

    #[error("Profile endpoint returned HTTP {status}: {body}")]
    ProfileStatus { status: u16, body: String },

    #[error("Profile response did not contain a user id")]
    MissingUserId,

    #[error("Invalid provider endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl OAuthError {
    /// True when the provider itself refused the grant
    pub fn is_rejection(&self) -> bool {
        matches!(self, OAuthError::ProviderRejected { .. })
    }
}

pub type Result<T> = std::result::Result<T, OAuthError>;
