//! OAuth2 authorization-code flow with PKCE, run server-side on behalf of the
//! browser session.

use reqwest::{Client, Url};
use secrecy::SecretString;
use serde::Deserialize;
use service_core::error::AppError;
use service_core::observability::TracedClientExt;
use thiserror::Error;

use crate::config::OAuthSettings;
use crate::services::metrics;
use crate::services::session_storage::{SessionStorage, ACCESS_TOKEN_KEY, CODE_VERIFIER_KEY};
use crate::utils::pkce;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authorization denied by provider: {error}")]
    AuthorizationDenied {
        error: String,
        description: Option<String>,
    },

    #[error("Token Exchange error: {status}")]
    TokenExchange { status: u16 },

    #[error("Token endpoint unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Invalid token response: {0}")]
    InvalidTokenResponse(String),

    #[error("Invalid authorization endpoint: {0}")]
    InvalidAuthorizeUrl(String),

    #[error(transparent)]
    Storage(#[from] AppError),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Storage(inner) => inner,
            AuthError::InvalidAuthorizeUrl(msg) => AppError::ConfigError(anyhow::anyhow!(msg)),
            AuthError::AuthorizationDenied { .. } | AuthError::InvalidTokenResponse(_) => {
                AppError::Unauthorized(anyhow::anyhow!(err.to_string()))
            }
            AuthError::TokenExchange { .. } | AuthError::Transport(_) => {
                AppError::BadGateway(err.to_string())
            }
        }
    }
}

/// Query parameters delivered to the redirect URI.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

pub struct AuthHandshake {
    client: Client,
    settings: OAuthSettings,
}

impl AuthHandshake {
    pub fn new(settings: OAuthSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    /// Start a login attempt: store a fresh verifier (replacing any unconsumed
    /// one) and return the authorization URL to navigate to.
    #[tracing::instrument(skip_all)]
    pub async fn begin_login<S: SessionStorage + ?Sized>(&self, storage: &S) -> Result<Url, AuthError> {
        let code_verifier = pkce::generate_code_verifier();
        let challenge = pkce::code_challenge(&code_verifier);
        let url = self.authorization_url(&challenge)?;

        storage.set_item(CODE_VERIFIER_KEY, &code_verifier).await?;

        tracing::info!("Redirecting to authorization endpoint");
        Ok(url)
    }

    pub fn authorization_url(&self, code_challenge: &str) -> Result<Url, AuthError> {
        Url::parse_with_params(
            &self.settings.authorize_url,
            &[
                ("client_id", self.settings.client_id.as_str()),
                ("response_type", "code"),
                ("redirect_uri", self.settings.redirect_uri.as_str()),
                ("scope", self.settings.scopes.as_str()),
                ("code_challenge", code_challenge),
                ("code_challenge_method", pkce::CHALLENGE_METHOD),
            ],
        )
        .map_err(|e| AuthError::InvalidAuthorizeUrl(format!("{}: {}", self.settings.authorize_url, e)))
    }

    /// Finish a login attempt from the callback query.
    ///
    /// Returns `Ok(None)` without any network call when the code or the stored
    /// verifier is missing (reloaded callback, no prior `begin_login`). Once
    /// both are present the verifier is removed before the exchange, so it is
    /// never reusable, whatever the exchange outcome.
    #[tracing::instrument(skip_all)]
    pub async fn complete_login<S: SessionStorage + ?Sized>(
        &self,
        storage: &S,
        callback: &CallbackParams,
    ) -> Result<Option<SecretString>, AuthError> {
        if let Some(error) = &callback.error {
            storage.remove_item(CODE_VERIFIER_KEY).await?;
            tracing::warn!(
                error = %error,
                description = callback.error_description.as_deref().unwrap_or(""),
                "Authorization provider returned an error"
            );
            metrics::record_token_exchange("denied");
            return Err(AuthError::AuthorizationDenied {
                error: error.clone(),
                description: callback.error_description.clone(),
            });
        }

        let Some(code) = callback.code.as_deref().filter(|code| !code.is_empty()) else {
            tracing::info!("Callback without authorization code");
            return Ok(None);
        };

        let Some(code_verifier) = storage.remove_item(CODE_VERIFIER_KEY).await? else {
            tracing::warn!("Missing code verifier for authorization code");
            return Ok(None);
        };

        let response = self
            .client
            .traced_post(&self.settings.token_url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("client_id", self.settings.client_id.as_str()),
                ("code", code),
                ("redirect_uri", self.settings.redirect_uri.as_str()),
                ("code_verifier", code_verifier.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to reach token endpoint");
                metrics::record_token_exchange("transport_error");
                AuthError::Transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let err_body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %err_body, "Token exchange rejected");
            metrics::record_token_exchange("rejected");
            return Err(AuthError::TokenExchange {
                status: status.as_u16(),
            });
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to parse token response");
            metrics::record_token_exchange("invalid_response");
            AuthError::InvalidTokenResponse(e.to_string())
        })?;

        storage.set_item(ACCESS_TOKEN_KEY, &token.access_token).await?;

        tracing::info!("Token exchange completed");
        metrics::record_token_exchange("success");
        Ok(Some(SecretString::new(token.access_token)))
    }

    pub async fn current_token<S: SessionStorage + ?Sized>(
        &self,
        storage: &S,
    ) -> Result<Option<SecretString>, AuthError> {
        Ok(storage.get_item(ACCESS_TOKEN_KEY).await?.map(SecretString::new))
    }

    pub async fn logout<S: SessionStorage + ?Sized>(&self, storage: &S) -> Result<(), AuthError> {
        if storage.remove_item(ACCESS_TOKEN_KEY).await?.is_some() {
            tracing::info!("Access token cleared");
        }
        Ok(())
    }
}
