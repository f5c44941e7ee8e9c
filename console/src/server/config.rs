//! Console settings loaded via OrthoConfig.
//!
//! Every value can come from the command line, `CONSOLE_*` environment
//! variables or a configuration file. Unset values fall back to a local
//! development setup.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::auth::RefreshPolicy;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5173";
const DEFAULT_PUBLIC_URL: &str = "http://localhost:5173/";
const DEFAULT_API_BASE_URL: &str = "http://localhost:8085/api/";
const DEFAULT_IDENTITY_BASE_URL: &str = "http://localhost:8080/";
const DEFAULT_REALM: &str = "tfm-bandas";
const DEFAULT_CLIENT_ID: &str = "frontend-local";

/// A configured value that cannot be used.
#[derive(Debug, thiserror::Error)]
#[error("invalid {name} '{value}': {reason}")]
pub struct SettingsError {
    name: &'static str,
    value: String,
    reason: String,
}

impl SettingsError {
    fn new(name: &'static str, value: &str, reason: impl ToString) -> Self {
        Self {
            name,
            value: value.to_owned(),
            reason: reason.to_string(),
        }
    }
}

/// Console runtime configuration.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CONSOLE")]
pub struct ConsoleSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Public base URL of the console, used for the login callback.
    pub public_url: Option<String>,
    /// Base URL of the backend REST API.
    pub api_base_url: Option<String>,
    /// Base URL of the Keycloak server.
    pub identity_base_url: Option<String>,
    /// Keycloak realm.
    pub realm: Option<String>,
    /// Public OpenID Connect client id.
    pub client_id: Option<String>,
    /// Seconds between token refresh checks.
    #[ortho_config(default = 20)]
    pub refresh_interval_secs: u64,
    /// Renew tokens expiring within this many seconds.
    #[ortho_config(default = 30)]
    pub min_validity_secs: u64,
    /// Timeout for backend and identity requests, in seconds.
    #[ortho_config(default = 10)]
    pub request_timeout_secs: u64,
}

impl ConsoleSettings {
    /// # Errors
    /// Returns [`SettingsError`] when the address does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse()
            .map_err(|err| SettingsError::new("bind address", raw, err))
    }

    /// # Errors
    /// Returns [`SettingsError`] when the URL does not parse.
    pub fn public_url(&self) -> Result<Url, SettingsError> {
        directory_url(
            "public URL",
            self.public_url.as_deref().unwrap_or(DEFAULT_PUBLIC_URL),
        )
    }

    /// # Errors
    /// Returns [`SettingsError`] when the URL does not parse.
    pub fn api_base_url(&self) -> Result<Url, SettingsError> {
        directory_url(
            "API base URL",
            self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL),
        )
    }

    /// # Errors
    /// Returns [`SettingsError`] when the URL does not parse.
    pub fn identity_base_url(&self) -> Result<Url, SettingsError> {
        directory_url(
            "identity base URL",
            self.identity_base_url
                .as_deref()
                .unwrap_or(DEFAULT_IDENTITY_BASE_URL),
        )
    }

    #[must_use]
    pub fn realm(&self) -> &str {
        self.realm.as_deref().unwrap_or(DEFAULT_REALM)
    }

    #[must_use]
    pub fn client_id(&self) -> &str {
        self.client_id.as_deref().unwrap_or(DEFAULT_CLIENT_ID)
    }

    #[must_use]
    pub fn refresh_policy(&self) -> RefreshPolicy {
        RefreshPolicy::new(
            Duration::from_secs(self.refresh_interval_secs),
            Duration::from_secs(self.min_validity_secs),
        )
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Parse `raw` as a base URL that relative paths extend rather than replace.
fn directory_url(name: &'static str, raw: &str) -> Result<Url, SettingsError> {
    let mut url = Url::parse(raw).map_err(|err| SettingsError::new(name, raw, err))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
