use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Profile data the account store keeps for a linked external identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountProfile {
    pub external_user_id: String,
    pub display_name: String,
    pub picture_url: Option<String>,
    /// Provider tag written into the account metadata, e.g. `line`
    pub provider: String,
}

/// Email/password pair addressing the local account of one external user.
///
/// Both values are pure functions of the external user id and the
/// [`CredentialPolicy`](crate::config::CredentialPolicy), so every login of
/// the same user addresses the same account.
#[derive(Debug)]
pub struct DerivedCredentials {
    pub email: String,
    pub password: SecretString,
}

/// Body of `POST /auth/v1/token?grant_type=password`
#[derive(Debug, Serialize)]
pub struct PasswordGrant<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Session issued by the account store, relayed verbatim to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub user: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
}

impl Session {
    /// Account id of the session's user, when the store included one
    pub fn user_id(&self) -> Option<&str> {
        self.user.get("id").and_then(serde_json::Value::as_str)
    }
}

/// Metadata attached to an account on creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserMetadata {
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub line_user_id: String,
    pub provider: String,
}

impl From<&AccountProfile> for UserMetadata {
    fn from(profile: &AccountProfile) -> Self {
        Self {
            full_name: profile.display_name.clone(),
            avatar_url: profile.picture_url.clone(),
            line_user_id: profile.external_user_id.clone(),
            provider: profile.provider.clone(),
        }
    }
}

/// Account creation request sent to the admin API
#[derive(Debug)]
pub struct NewAccount {
    pub email: String,
    pub password: SecretString,
    pub email_confirm: bool,
    pub user_metadata: UserMetadata,
}

/// Wire form of [`NewAccount`]
#[derive(Debug, Serialize)]
pub(crate) struct CreateUserBody<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub email_confirm: bool,
    pub user_metadata: &'a UserMetadata,
}

impl<'a> From<&'a NewAccount> for CreateUserBody<'a> {
    fn from(account: &'a NewAccount) -> Self {
        Self {
            email: &account.email,
            password: account.password.expose_secret(),
            email_confirm: account.email_confirm,
            user_metadata: &account.user_metadata,
        }
    }
}

/// Account returned by the admin API after creation
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedAccount {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Row written to the `users` registry table after first login
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistryRow {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: String,
}

/// Outcome of find-or-create
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAccount {
    pub session: Session,
    /// True when this login created the account
    pub created: bool,
}

/// Error payloads the store returns.
///
/// GoTrue and PostgREST use different keys depending on the endpoint and
/// version, so every known key is accepted.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct StoreErrorBody {
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl StoreErrorBody {
    /// Most descriptive message in the body
    pub fn into_message(self) -> Option<String> {
        self.msg
            .or(self.message)
            .or(self.error_description)
            .or(self.error)
            .filter(|m| !m.trim().is_empty())
    }
}
