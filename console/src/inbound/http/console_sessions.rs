//! Per-browser console state held on the server.
//!
//! Each logged-in browser owns one [`ConsoleSession`]: its [`AuthSession`]
//! and the state of every list page. The cookie stores only the
//! [`ConsoleSessionId`].

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex as AsyncMutex, OnceCell};
use tracing::debug;
use uuid::Uuid;

use crate::domain::Role;
use crate::domain::auth::{AuthSession, AuthStatus};
use crate::domain::listing::instruments::InstrumentsPage;
use crate::domain::listing::users::UsersPage;

/// Opaque key of a console session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConsoleSessionId(Uuid);

impl ConsoleSessionId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for ConsoleSessionId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for ConsoleSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Authentication plus page state of one browser.
pub struct ConsoleSession {
    auth: AuthSession,
    users: AsyncMutex<UsersPage>,
    instruments: AsyncMutex<InstrumentsPage>,
    roles: OnceCell<Vec<Role>>,
}

impl ConsoleSession {
    /// Fresh page state around `auth`.
    #[must_use]
    pub fn new(auth: AuthSession) -> Self {
        Self {
            auth,
            users: AsyncMutex::new(UsersPage::default()),
            instruments: AsyncMutex::new(InstrumentsPage::default()),
            roles: OnceCell::new(),
        }
    }

    /// Authentication state of this browser.
    #[must_use]
    pub const fn auth(&self) -> &AuthSession {
        &self.auth
    }

    /// Users page state.
    #[must_use]
    pub const fn users(&self) -> &AsyncMutex<UsersPage> {
        &self.users
    }

    /// Instruments page state.
    #[must_use]
    pub const fn instruments(&self) -> &AsyncMutex<InstrumentsPage> {
        &self.instruments
    }

    /// Roles for the users filter, loaded on first use only.
    pub async fn roles<F, Fut>(&self, load: F) -> &[Role]
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Vec<Role>>,
    {
        self.roles.get_or_init(load).await
    }
}

/// Registry of live console sessions.
#[derive(Default)]
pub struct ConsoleSessions {
    sessions: Mutex<HashMap<ConsoleSessionId, Arc<ConsoleSession>>>,
}

impl ConsoleSessions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn map(&self) -> std::sync::MutexGuard<'_, HashMap<ConsoleSessionId, Arc<ConsoleSession>>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register `session` under a fresh id.
    ///
    /// Sessions that have already demoted themselves are pruned first.
    pub fn insert(&self, session: Arc<ConsoleSession>) -> ConsoleSessionId {
        let id = ConsoleSessionId::generate();
        let mut map = self.map();
        map.retain(|_, existing| existing.auth().status() != AuthStatus::Unauthenticated);
        map.insert(id, session);
        debug!(session = %id, live = map.len(), "console session registered");
        id
    }

    /// Live session registered under `id`.
    #[must_use]
    pub fn get(&self, id: ConsoleSessionId) -> Option<Arc<ConsoleSession>> {
        self.map().get(&id).cloned()
    }

    /// Remove `id`, tearing its authentication down. Returns the removed
    /// session.
    pub fn remove(&self, id: ConsoleSessionId) -> Option<Arc<ConsoleSession>> {
        let removed = self.map().remove(&id);
        if let Some(session) = &removed {
            session.auth().teardown();
        }
        removed
    }

    /// Number of registered sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
