//! Builds the HTTP state from settings: backend and identity adapters.

use std::sync::Arc;

use crate::domain::auth::SharedClock;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::backend_api::BackendApiClient;
use crate::outbound::identity::KeycloakIdentityProvider;

use super::ConsoleSettings;

fn startup_error(what: &str, err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("{what}: {err}"))
}

/// Wire the REST and Keycloak adapters into an [`HttpState`].
///
/// # Errors
/// Returns [`std::io::Error`] when a URL setting is invalid or an HTTP
/// client cannot be built.
pub fn build_http_state(
    settings: &ConsoleSettings,
    clock: SharedClock,
) -> std::io::Result<HttpState> {
    let timeout = settings.request_timeout();
    let api_base = settings
        .api_base_url()
        .map_err(|err| startup_error("backend settings", err))?;
    let backend = Arc::new(
        BackendApiClient::new(api_base, timeout)
            .map_err(|err| startup_error("backend client", err))?,
    );
    let identity_base = settings
        .identity_base_url()
        .map_err(|err| startup_error("identity settings", err))?;
    let identity = KeycloakIdentityProvider::new(
        &identity_base,
        settings.realm(),
        settings.client_id(),
        timeout,
    )
    .map_err(|err| startup_error("identity provider", err))?;
    let public_url = settings
        .public_url()
        .map_err(|err| startup_error("public URL", err))?;

    HttpState::new(
        HttpStatePorts {
            users: backend.clone(),
            roles: backend.clone(),
            instruments: backend,
            identity: Arc::new(identity),
        },
        clock,
        settings.refresh_policy(),
        &public_url,
    )
    .map_err(|err| startup_error("callback URL", err))
}
