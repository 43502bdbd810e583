use crate::{error::*, models::*, provider::LineProviderConfig};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument, warn};

/// Redeems authorization codes at the provider's token endpoint
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenExchanger: Send + Sync {
    async fn exchange_code(&self, grant: &AuthorizationGrant) -> Result<TokenGrant>;
}

/// Reads the profile of the user an access token was issued for
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileFetcher: Send + Sync {
    async fn fetch_profile(&self, access_token: &SecretString) -> Result<ExternalProfile>;
}

/// LINE Login v2.1 client
pub struct LineClient {
    config: LineProviderConfig,
    http_client: HttpClient,
}

impl LineClient {
    pub fn new(config: LineProviderConfig) -> Result<Self> {
        let http_client = HttpClient::builder().timeout(config.timeout).build()?;
        Ok(Self { config, http_client })
    }

    pub fn config(&self) -> &LineProviderConfig {
        &self.config
    }
}

#[async_trait]
impl TokenExchanger for LineClient {
    #[instrument(skip_all)]
    async fn exchange_code(&self, grant: &AuthorizationGrant) -> Result<TokenGrant> {
        let redirect_uri = grant
            .redirect_uri
            .as_deref()
            .or(self.config.default_redirect_uri.as_deref());

        let form = TokenRequest {
            grant_type: "authorization_code",
            code: &grant.code,
            redirect_uri,
            client_id: &self.config.channel_id,
            client_secret: self.config.channel_secret.expose_secret(),
        };

        let response = self
            .http_client
            .post(self.config.token_url.clone())
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), "Token endpoint responded");

        // LINE reports grant errors in the body, so the status alone is not decisive
        let parsed: ProviderTokenResponse = serde_json::from_str(&body)?;
        parsed.into_grant().map_err(|err| {
            if let OAuthError::ProviderRejected { error, .. } = &err {
                warn!(status = status.as_u16(), error = %error, "Provider rejected authorization code");
            }
            err
        })
    }
}

#[async_trait]
impl ProfileFetcher for LineClient {
    #[instrument(skip_all)]
    async fn fetch_profile(&self, access_token: &SecretString) -> Result<ExternalProfile> {
        let response = self
            .http_client
            .get(self.config.profile_url.clone())
            .bearer_auth(access_token.expose_secret())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let fallback = status.canonical_reason().unwrap_or("request failed");
            return Err(OAuthError::ProfileStatus {
                status: status.as_u16(),
                body: error_common::sanitize_message(&body, fallback),
            });
        }

        let profile: ExternalProfile = response.json().await?;
        if profile.user_id.trim().is_empty() {
            return Err(OAuthError::MissingUserId);
        }

        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::Form,
        http::{HeaderMap, StatusCode},
        routing::{get, post},
        Json, Router,
    };
    use serde_json::json;
    use std::collections::HashMap;

    async fn spawn_provider(router: Router, default_redirect: Option<&str>) -> LineClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let config = LineProviderConfig::new("1650000000", SecretString::new("0123456789abcdef".to_string()))
            .unwrap()
            .with_endpoints(
                &format!("http://{}/oauth2/v2.1/token", addr),
                &format!("http://{}/v2/profile", addr),
            )
            .unwrap()
            .with_default_redirect_uri(default_redirect.map(str::to_string));
        LineClient::new(config).unwrap()
    }

    fn grant(redirect_uri: Option<&str>) -> AuthorizationGrant {
        AuthorizationGrant {
            code: "auth-code".to_string(),
            redirect_uri: redirect_uri.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn exchange_posts_form_with_channel_credentials() {
        let router = Router::new().route(
            "/oauth2/v2.1/token",
            post(|Form(form): Form<HashMap<String, String>>| async move {
                assert_eq!(form["grant_type"], "authorization_code");
                assert_eq!(form["code"], "auth-code");
                assert_eq!(form["redirect_uri"], "https://app.example/cb");
                assert_eq!(form["client_id"], "1650000000");
                assert_eq!(form["client_secret"], "0123456789abcdef");
                Json(json!({"access_token": "line-at", "token_type": "Bearer", "expires_in": 2592000}))
            }),
        );
        let client = spawn_provider(router, None).await;

        let token = client.exchange_code(&grant(Some("https://app.example/cb"))).await.unwrap();

        assert_eq!(token.access_token.expose_secret(), "line-at");
        assert_eq!(token.expires_in, Some(2_592_000));
    }

    #[tokio::test]
    async fn exchange_falls_back_to_configured_redirect() {
        let router = Router::new().route(
            "/oauth2/v2.1/token",
            post(|Form(form): Form<HashMap<String, String>>| async move {
                assert_eq!(form.get("redirect_uri").map(String::as_str), Some("https://default.example/cb"));
                Json(json!({"access_token": "line-at"}))
            }),
        );
        let client = spawn_provider(router, Some("https://default.example/cb")).await;

        client.exchange_code(&grant(None)).await.unwrap();
    }

    #[tokio::test]
    async fn exchange_omits_redirect_when_unknown() {
        let router = Router::new().route(
            "/oauth2/v2.1/token",
            post(|Form(form): Form<HashMap<String, String>>| async move {
                assert!(!form.contains_key("redirect_uri"));
                Json(json!({"access_token": "line-at"}))
            }),
        );
        let client = spawn_provider(router, None).await;

        client.exchange_code(&grant(None)).await.unwrap();
    }

    #[tokio::test]
    async fn exchange_reports_provider_rejection() {
        let router = Router::new().route(
            "/oauth2/v2.1/token",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"error": "invalid_grant", "error_description": "invalid authorization code"})),
                )
            }),
        );
        let client = spawn_provider(router, None).await;

        let err = client.exchange_code(&grant(None)).await.unwrap_err();

        assert!(err.is_rejection());
        assert_eq!(err.to_string(), "invalid authorization code");
    }

    #[tokio::test]
    async fn exchange_with_non_json_body_is_an_error() {
        let router = Router::new().route(
            "/oauth2/v2.1/token",
            post(|| async { (StatusCode::BAD_GATEWAY, "<html>bad gateway</html>") }),
        );
        let client = spawn_provider(router, None).await;

        let err = client.exchange_code(&grant(None)).await.unwrap_err();

        assert!(matches!(err, OAuthError::JsonError(_)));
        assert!(!err.is_rejection());
    }

    #[tokio::test]
    async fn profile_is_fetched_with_bearer_token() {
        let router = Router::new().route(
            "/v2/profile",
            get(|headers: HeaderMap| async move {
                let auth = headers.get("authorization").and_then(|v| v.to_str().ok());
                assert_eq!(auth, Some("Bearer line-at"));
                Json(json!({"userId": "U123", "displayName": "Alice", "pictureUrl": "http://x/u123.png"}))
            }),
        );
        let client = spawn_provider(router, None).await;

        let profile = client
            .fetch_profile(&SecretString::new("line-at".to_string()))
            .await
            .unwrap();

        assert_eq!(profile.user_id, "U123");
        assert_eq!(profile.display_name, "Alice");
        assert_eq!(profile.picture_url.as_deref(), Some("http://x/u123.png"));
    }

    #[tokio::test]
    async fn profile_error_status_is_reported() {
        let router = Router::new().route(
            "/v2/profile",
            get(|| async { (StatusCode::UNAUTHORIZED, Json(json!({"message": "invalid token"}))) }),
        );
        let client = spawn_provider(router, None).await;

        let err = client
            .fetch_profile(&SecretString::new("expired".to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, OAuthError::ProfileStatus { status: 401, .. }));
    }

    #[tokio::test]
    async fn profile_without_user_id_is_rejected() {
        let router = Router::new().route(
            "/v2/profile",
            get(|| async { Json(json!({"userId": "", "displayName": "Ghost"})) }),
        );
        let client = spawn_provider(router, None).await;

        let err = client
            .fetch_profile(&SecretString::new("line-at".to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, OAuthError::MissingUserId));
    }
}
