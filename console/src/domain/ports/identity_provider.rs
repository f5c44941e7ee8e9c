//! Port abstraction for the OpenID Connect identity provider.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use super::define_port_error;

define_port_error! {
    /// Failure talking to the identity provider.
    pub enum IdentityError {
        /// The provider could not be reached.
        Transport { message: String } => "identity provider unreachable: {message}",
        /// The provider did not answer in time.
        Timeout { message: String } => "identity provider timed out: {message}",
        /// The provider rejected the grant.
        Rejected { status: u16, message: String } =>
            "identity provider rejected the grant (status {status}): {message}",
        /// The token response or its claims were malformed.
        Decode { message: String } => "identity response could not be decoded: {message}",
    }
}

/// Tokens returned by a successful grant.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenGrant {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub id_token: Option<String>,
    pub expires_in: Duration,
}

impl std::fmt::Debug for TokenGrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenGrant")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .field("id_token", &self.id_token.as_ref().map(|_| "<redacted>"))
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// OpenID Connect operations the console needs from the identity provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Authorization endpoint URL for a PKCE S256 code flow.
    fn authorization_url(&self, state: &str, code_challenge: &str, redirect_uri: &Url) -> Url;

    /// Exchange an authorization code for tokens.
    async fn exchange_code(
        &self,
        code: &str,
        code_verifier: &str,
        redirect_uri: &Url,
    ) -> Result<TokenGrant, IdentityError>;

    /// Renew tokens through the refresh-token grant.
    async fn refresh(&self, refresh_token: &str) -> Result<TokenGrant, IdentityError>;

    /// End-session URL returning the browser to `post_logout_redirect`.
    fn end_session_url<'a>(
        &self,
        id_token_hint: Option<&'a str>,
        post_logout_redirect: &Url,
    ) -> Url;
}
