//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` so they depend only on the domain
//! services and ports, never on concrete adapters.

use std::sync::Arc;

use url::Url;

use super::console_sessions::{ConsoleSession, ConsoleSessions};
use crate::domain::auth::{AuthSession, RefreshPolicy, SharedClock};
use crate::domain::ports::{IdentityProvider, InstrumentsApi, RolesApi, UsersApi};
use crate::domain::{InstrumentsConsole, UsersConsole};

const CALLBACK_PATH: &str = "auth/callback";
const LOGIN_PATH: &str = "login";

/// Parameter object bundling the driven ports.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub users: Arc<dyn UsersApi>,
    pub roles: Arc<dyn RolesApi>,
    pub instruments: Arc<dyn InstrumentsApi>,
    pub identity: Arc<dyn IdentityProvider>,
}

/// Dependency bundle for HTTP handlers.
pub struct HttpState {
    pub users: UsersConsole,
    pub instruments: InstrumentsConsole,
    pub identity: Arc<dyn IdentityProvider>,
    pub sessions: ConsoleSessions,
    clock: SharedClock,
    refresh: RefreshPolicy,
    callback_url: Url,
    logged_out_url: Url,
}

impl HttpState {
    /// Build the state for a console reachable at `public_url`.
    ///
    /// # Errors
    /// Returns [`url::ParseError`] if the callback or login URLs cannot be
    /// derived from `public_url`.
    pub fn new(
        ports: HttpStatePorts,
        clock: SharedClock,
        refresh: RefreshPolicy,
        public_url: &Url,
    ) -> Result<Self, url::ParseError> {
        let HttpStatePorts {
            users,
            roles,
            instruments,
            identity,
        } = ports;
        Ok(Self {
            users: UsersConsole::new(users, roles),
            instruments: InstrumentsConsole::new(instruments),
            identity,
            sessions: ConsoleSessions::new(),
            clock,
            refresh,
            callback_url: public_url.join(CALLBACK_PATH)?,
            logged_out_url: public_url.join(LOGIN_PATH)?,
        })
    }

    /// Redirect URI registered with the identity provider.
    #[must_use]
    pub const fn callback_url(&self) -> &Url {
        &self.callback_url
    }

    /// Where the provider sends the browser after logout.
    #[must_use]
    pub const fn logged_out_url(&self) -> &Url {
        &self.logged_out_url
    }

    /// A new, still resolving console session.
    #[must_use]
    pub fn new_console_session(&self) -> Arc<ConsoleSession> {
        Arc::new(ConsoleSession::new(AuthSession::new(
            Arc::clone(&self.identity),
            Arc::clone(&self.clock),
            self.refresh,
        )))
    }
}
