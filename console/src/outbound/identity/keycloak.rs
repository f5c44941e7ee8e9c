//! Keycloak realm adapter for the authorization-code flow with PKCE.
//!
//! Endpoints live under `{base}/realms/{realm}/protocol/openid-connect/`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

use super::dto::{OAuthErrorDto, TokenResponseDto};
use crate::domain::ports::{IdentityError, IdentityProvider, TokenGrant};

/// Failure building the adapter.
#[derive(Debug, thiserror::Error)]
pub enum KeycloakSetupError {
    /// The base URL and realm do not form valid endpoint URLs.
    #[error("invalid identity provider URL: {0}")]
    Url(#[from] url::ParseError),
    /// The HTTP client could not be built.
    #[error("failed to build identity HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Keycloak OpenID Connect client for one realm and public client id.
pub struct KeycloakIdentityProvider {
    client: Client,
    client_id: String,
    auth_endpoint: Url,
    token_endpoint: Url,
    logout_endpoint: Url,
}

impl KeycloakIdentityProvider {
    /// Build the adapter for `realm` at `base` (for example
    /// `http://localhost:8080`).
    ///
    /// # Errors
    /// Returns [`KeycloakSetupError`] when the endpoint URLs are invalid or
    /// the HTTP client cannot be built.
    pub fn new(
        base: &Url,
        realm: &str,
        client_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, KeycloakSetupError> {
        let mut root = base.clone();
        if !root.path().ends_with('/') {
            let path = format!("{}/", root.path());
            root.set_path(&path);
        }
        let protocol = root.join(&format!("realms/{realm}/protocol/openid-connect/"))?;
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            client_id: client_id.into(),
            auth_endpoint: protocol.join("auth")?,
            token_endpoint: protocol.join("token")?,
            logout_endpoint: protocol.join("logout")?,
        })
    }

    async fn token_request(&self, form: &[(&str, &str)]) -> Result<TokenGrant, IdentityError> {
        let response = self
            .client
            .post(self.token_endpoint.clone())
            .form(form)
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        let dto: TokenResponseDto = serde_json::from_slice(&body)
            .map_err(|err| IdentityError::decode(format!("invalid token response: {err}")))?;
        Ok(dto.into())
    }
}

#[async_trait]
impl IdentityProvider for KeycloakIdentityProvider {
    fn authorization_url(&self, state: &str, code_challenge: &str, redirect_uri: &Url) -> Url {
        let mut url = self.auth_endpoint.clone();
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", redirect_uri.as_str())
            .append_pair("scope", "openid")
            .append_pair("state", state)
            .append_pair("code_challenge", code_challenge)
            .append_pair("code_challenge_method", "S256");
        url
    }

    async fn exchange_code(
        &self,
        code: &str,
        code_verifier: &str,
        redirect_uri: &Url,
    ) -> Result<TokenGrant, IdentityError> {
        debug!("exchanging authorization code");
        self.token_request(&[
            ("grant_type", "authorization_code"),
            ("client_id", &self.client_id),
            ("code", code),
            ("redirect_uri", redirect_uri.as_str()),
            ("code_verifier", code_verifier),
        ])
        .await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenGrant, IdentityError> {
        debug!("refreshing access token");
        self.token_request(&[
            ("grant_type", "refresh_token"),
            ("client_id", &self.client_id),
            ("refresh_token", refresh_token),
        ])
        .await
    }

    fn end_session_url<'a>(
        &self,
        id_token_hint: Option<&'a str>,
        post_logout_redirect: &Url,
    ) -> Url {
        let mut url = self.logout_endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("client_id", &self.client_id)
                .append_pair("post_logout_redirect_uri", post_logout_redirect.as_str());
            if let Some(hint) = id_token_hint {
                query.append_pair("id_token_hint", hint);
            }
        }
        url
    }
}

fn map_transport_error(error: reqwest::Error) -> IdentityError {
    if error.is_timeout() {
        IdentityError::timeout(error.to_string())
    } else {
        IdentityError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> IdentityError {
    let detail = serde_json::from_slice::<OAuthErrorDto>(body)
        .map(|err| err.summary())
        .unwrap_or_default();
    let message = if detail.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        detail
    };
    if status.is_client_error() {
        IdentityError::rejected(status.as_u16(), message)
    } else {
        IdentityError::transport(message)
    }
}
