use crate::{error::ApiError, server::AppState, services::LoginOutcome};
use axum::{body::Bytes, extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body posted by the LINE redirect page
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct LineAuthRequest {
    /// Authorization code from the LINE redirect
    #[serde(default)]
    #[schema(example = "m5vQKXp0Dk4RdGN1Bf3q")]
    pub code: Option<String>,

    /// Redirect URI used for the authorization request
    #[serde(default)]
    #[schema(example = "https://ops.baanpool.app/auth/line/callback")]
    pub redirect_uri: Option<String>,
}

/// Copy of the LINE profile the session was issued for
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineProfileView {
    pub display_name: String,
    pub picture_url: Option<String>,
    pub user_id: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LineAuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// User record as issued by the account store
    #[schema(value_type = Object)]
    pub user: serde_json::Value,
    pub line_profile: LineProfileView,
}

impl From<LoginOutcome> for LineAuthResponse {
    fn from(outcome: LoginOutcome) -> Self {
        Self {
            access_token: outcome.session.access_token,
            refresh_token: outcome.session.refresh_token,
            user: outcome.session.user,
            line_profile: LineProfileView {
                display_name: outcome.profile.display_name,
                picture_url: outcome.profile.picture_url,
                user_id: outcome.profile.user_id,
            },
        }
    }
}

/// Exchange a LINE authorization code for an account session
///
/// The body is read as JSON whatever `Content-Type` the caller sends.
#[utoipa::path(
    post,
    path = "/api/v1/auth/line/callback",
    request_body = LineAuthRequest,
    responses(
        (status = 200, description = "Session issued for the LINE user", body = LineAuthResponse),
        (status = 400, description = "Missing code, provider rejection or account creation failure", body = crate::error::ApiErrorResponse),
        (status = 500, description = "Unreadable body, upstream or internal failure", body = crate::error::ApiErrorResponse)
    ),
    tag = "authentication"
)]
pub async fn line_callback(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<LineAuthResponse>, ApiError> {
    let request: LineAuthRequest = serde_json::from_slice(&body)?;

    let outcome = state
        .login
        .exchange(request.code.as_deref(), request.redirect_uri.as_deref())
        .await?;

    Ok(Json(LineAuthResponse::from(outcome)))
}
