//! Cookie session helpers.
//!
//! The cookie carries only two things: the id of the console session held
//! in [`ConsoleSessions`](super::console_sessions::ConsoleSessions) and,
//! between `/login` and `/auth/callback`, the pending login attempt.

use actix_session::{Session, SessionExt};
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use serde::{Deserialize, Serialize};
use std::future::{Ready, ready};
use tracing::warn;

use super::console_sessions::ConsoleSessionId;
use crate::domain::Error;

pub(crate) const CONSOLE_SESSION_KEY: &str = "console_session";
pub(crate) const LOGIN_ATTEMPT_KEY: &str = "login_attempt";

/// PKCE values and return path remembered across the provider redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginAttempt {
    pub state: String,
    pub code_verifier: String,
    pub return_to: Option<String>,
}

/// Newtype wrapper that exposes console-specific session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Bind the cookie to a console session.
    pub fn persist_console_session(&self, id: ConsoleSessionId) -> Result<(), Error> {
        self.0
            .insert(CONSOLE_SESSION_KEY, id)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Console session bound to the cookie. Unreadable values count as absent.
    pub fn console_session_id(&self) -> Option<ConsoleSessionId> {
        match self.0.get::<ConsoleSessionId>(CONSOLE_SESSION_KEY) {
            Ok(id) => id,
            Err(error) => {
                warn!(%error, "invalid console session id in cookie");
                None
            }
        }
    }

    /// Remember a login attempt until the provider redirects back.
    pub fn persist_login_attempt(&self, attempt: &LoginAttempt) -> Result<(), Error> {
        self.0
            .insert(LOGIN_ATTEMPT_KEY, attempt)
            .map_err(|error| Error::internal(format!("failed to persist login attempt: {error}")))
    }

    /// Remove and return the pending login attempt. Each attempt is usable
    /// once.
    pub fn take_login_attempt(&self) -> Option<LoginAttempt> {
        let attempt = match self.0.get::<LoginAttempt>(LOGIN_ATTEMPT_KEY) {
            Ok(attempt) => attempt,
            Err(error) => {
                warn!(%error, "invalid login attempt in cookie");
                None
            }
        };
        self.0.remove(LOGIN_ATTEMPT_KEY);
        attempt
    }

    /// Drop everything stored in the cookie.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self::new(req.get_session())))
    }
}
