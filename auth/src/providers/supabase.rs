//! Hosted Supabase auth provider.
//!
//! Thin HTTPS client for the provider's auth REST surface (GoTrue). Every
//! request carries the project anon key; the provider does all credential
//! verification, email delivery, and OAuth brokering.

use crate::config::AuthConfig;
use crate::error::{AuthError, Result};
use crate::providers::AuthProvider;
use crate::session_feed::{SessionChanges, SessionFeed};
use crate::state::{OAuthProvider, Session, UserId, UserProfile};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// Auth provider backed by a hosted Supabase project.
///
/// Sessions live in memory for the lifetime of the provider; successful
/// sign-ins and sign-outs are published to the session feed, where the
/// controller picks them up. There is no token storage, so
/// [`current_session`](AuthProvider::current_session) only restores sessions
/// established by this process; after a restart the user signs in again.
#[derive(Clone, Debug)]
pub struct SupabaseProvider {
    /// HTTP client for making requests.
    http_client: Client,

    /// Project URL and anon key.
    config: AuthConfig,

    /// Feed all session changes are published to.
    feed: Arc<SessionFeed>,
}

/// Token response from a successful password grant.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    token_type: String,
    expires_in: i64,
    refresh_token: String,
    user: TokenUser,
}

#[derive(Debug, Deserialize)]
struct TokenUser {
    id: Uuid,
    email: Option<String>,
}

/// Error body shape.
///
/// The provider is inconsistent about which field carries the message, so
/// all three known spellings are accepted.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
}

impl SupabaseProvider {
    /// Create a provider for the configured project.
    #[must_use]
    pub fn new(config: AuthConfig) -> Self {
        Self {
            http_client: Client::new(),
            config,
            feed: Arc::new(SessionFeed::new()),
        }
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.config.endpoint_url)
    }

    /// Extract the human-readable message from a failed response.
    ///
    /// The message is displayed verbatim, so the provider's own text (e.g.
    /// "Invalid login credentials") must survive intact.
    async fn error_from_response(response: reqwest::Response) -> AuthError {
        let status = response.status();
        let fallback = format!("Request failed with status {status}");

        let Ok(body) = response.json::<ErrorBody>().await else {
            return AuthError::provider(fallback);
        };

        let message = body
            .error_description
            .or(body.msg)
            .or(body.message)
            .unwrap_or(fallback);

        AuthError::provider(message)
    }

    fn session_from_token(token: TokenResponse) -> Session {
        Session {
            access_token: token.access_token,
            token_type: token.token_type,
            refresh_token: token.refresh_token,
            expires_at: chrono::Utc::now() + chrono::Duration::seconds(token.expires_in),
            user: UserProfile {
                id: UserId(token.user.id),
                email: token.user.email.unwrap_or_default(),
            },
        }
    }
}

impl AuthProvider for SupabaseProvider {
    async fn current_session(&self) -> Result<Option<Session>> {
        // No token persistence, so restoration only sees what this process
        // already established.
        Ok(self.feed.current().session)
    }

    fn subscribe(&self) -> SessionChanges {
        self.feed.subscribe()
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<()> {
        let response = self
            .http_client
            .post(self.auth_url("token?grant_type=password"))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&self.config.anon_key)
            .json(&serde_json::json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let token: TokenResponse = response.json().await?;
        self.feed.publish(Some(Self::session_from_token(token)));

        Ok(())
    }

    async fn sign_up_with_password(
        &self,
        email: &str,
        password: &str,
        redirect_to: &str,
    ) -> Result<()> {
        let response = self
            .http_client
            .post(self.auth_url("signup"))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&self.config.anon_key)
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                "email_redirect_to": redirect_to,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        // Confirmation is pending; no session until the email link is used.
        Ok(())
    }

    async fn request_password_reset(&self, email: &str, redirect_to: &str) -> Result<()> {
        let response = self
            .http_client
            .post(self.auth_url("recover"))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&self.config.anon_key)
            .json(&serde_json::json!({
                "email": email,
                "redirect_to": redirect_to,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        Ok(())
    }

    async fn sign_in_with_oauth(
        &self,
        provider: OAuthProvider,
        redirect_to: &str,
    ) -> Result<String> {
        // The authorize endpoint is a browser redirect, not an API call;
        // building the URL locally is all that happens here.
        let query = serde_urlencoded::to_string([
            ("provider", provider.as_str()),
            ("redirect_to", redirect_to),
        ])
        .map_err(|e| AuthError::provider(format!("Failed to build URL: {e}")))?;

        Ok(format!("{}?{query}", self.auth_url("authorize")))
    }

    async fn sign_out(&self) -> Result<()> {
        let access_token = self
            .feed
            .current()
            .session
            .map(|session| session.access_token);

        if let Some(token) = access_token {
            let response = self
                .http_client
                .post(self.auth_url("logout"))
                .header("apikey", &self.config.anon_key)
                .bearer_auth(&token)
                .send()
                .await?;

            if !response.status().is_success() {
                return Err(Self::error_from_response(response).await);
            }
        }

        self.feed.publish(None);
        Ok(())
    }
}
