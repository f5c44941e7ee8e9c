//! Per-browser authentication session with a cancellable refresh task.

use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use chrono::TimeDelta;
use mockable::Clock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};
use url::Url;

use super::{BearerToken, TokenSet};
use crate::domain::ports::IdentityProvider;

/// Wall clock shared with the refresh task.
pub type SharedClock = Arc<dyn Clock + Send + Sync>;

/// Resolution state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    /// The authorization code is still being exchanged.
    Resolving,
    /// Tokens are held and current.
    Authenticated,
    /// No usable tokens; the guard redirects to login.
    Unauthenticated,
}

/// When and how eagerly the access token is renewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshPolicy {
    interval: Duration,
    min_validity: Duration,
}

impl RefreshPolicy {
    const MIN_INTERVAL: Duration = Duration::from_secs(1);

    /// Check every `interval`, renewing tokens that expire within
    /// `min_validity`. Intervals below one second are raised to one second.
    #[must_use]
    pub fn new(interval: Duration, min_validity: Duration) -> Self {
        Self {
            interval: interval.max(Self::MIN_INTERVAL),
            min_validity,
        }
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub const fn min_validity(&self) -> Duration {
        self.min_validity
    }
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self::new(Duration::from_secs(20), Duration::from_secs(30))
    }
}

/// Result of one refresh check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The session is not authenticated.
    Inactive,
    /// The token is still valid for longer than the minimum validity.
    NotNeeded,
    /// New tokens were stored.
    Refreshed,
    /// Renewal failed and the session was signed out.
    Failed,
}

struct AuthState {
    status: AuthStatus,
    tokens: Option<TokenSet>,
}

struct Shared {
    provider: Arc<dyn IdentityProvider>,
    clock: SharedClock,
    policy: RefreshPolicy,
    state: RwLock<AuthState>,
}

impl Shared {
    fn read(&self) -> RwLockReadGuard<'_, AuthState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, AuthState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn demote(&self) {
        let mut state = self.write();
        state.status = AuthStatus::Unauthenticated;
        state.tokens = None;
    }

    async fn refresh_if_needed(&self) -> RefreshOutcome {
        let refresh_token = {
            let state = self.read();
            let Some(tokens) = state.tokens.as_ref() else {
                return RefreshOutcome::Inactive;
            };
            if state.status != AuthStatus::Authenticated {
                return RefreshOutcome::Inactive;
            }
            let min_validity =
                TimeDelta::from_std(self.policy.min_validity).unwrap_or(TimeDelta::MAX);
            if !tokens.expires_within(self.clock.utc(), min_validity) {
                return RefreshOutcome::NotNeeded;
            }
            tokens.refresh().cloned()
        };

        let Some(refresh_token) = refresh_token else {
            warn!("access token expiring without a refresh token; signing out");
            self.demote();
            return RefreshOutcome::Failed;
        };

        let renewed = self
            .provider
            .refresh(refresh_token.expose())
            .await
            .and_then(|grant| TokenSet::from_grant(grant, self.clock.utc()));

        match renewed {
            Ok(fresh) => {
                let mut state = self.write();
                if state.status != AuthStatus::Authenticated {
                    return RefreshOutcome::Inactive;
                }
                let merged = match state.tokens.as_ref() {
                    Some(previous) => fresh.inherit_from(previous),
                    None => fresh,
                };
                debug!(expires_at = %merged.expires_at(), "access token refreshed");
                state.tokens = Some(merged);
                RefreshOutcome::Refreshed
            }
            Err(err) => {
                warn!(error = %err, error_kind = err.kind(), "token refresh failed; signing out");
                self.demote();
                RefreshOutcome::Failed
            }
        }
    }
}

async fn run_refresher(shared: Arc<Shared>) {
    let mut ticker = tokio::time::interval(shared.policy.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker.tick().await;
    loop {
        ticker.tick().await;
        match shared.refresh_if_needed().await {
            RefreshOutcome::Inactive | RefreshOutcome::Failed => break,
            RefreshOutcome::NotNeeded | RefreshOutcome::Refreshed => {}
        }
    }
    debug!("token refresh task stopped");
}

/// Authentication state of one browser session.
///
/// Created when the identity provider redirects back with an authorization
/// code, torn down on logout. Dropping the session aborts its refresh task.
pub struct AuthSession {
    shared: Arc<Shared>,
    refresher: Mutex<Option<JoinHandle<()>>>,
}

impl AuthSession {
    /// A session that is still resolving.
    #[must_use]
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        clock: SharedClock,
        policy: RefreshPolicy,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                provider,
                clock,
                policy,
                state: RwLock::new(AuthState {
                    status: AuthStatus::Resolving,
                    tokens: None,
                }),
            }),
            refresher: Mutex::new(None),
        }
    }

    /// Exchange the authorization code and resolve the session.
    ///
    /// On success the refresh task is started. Must run inside a Tokio
    /// runtime.
    pub async fn complete_login(
        &self,
        code: &str,
        code_verifier: &str,
        redirect_uri: &Url,
    ) -> AuthStatus {
        let outcome = self
            .shared
            .provider
            .exchange_code(code, code_verifier, redirect_uri)
            .await
            .and_then(|grant| TokenSet::from_grant(grant, self.shared.clock.utc()));
        match outcome {
            Ok(tokens) => {
                info!(
                    user = tokens.claims().display_name().unwrap_or("unknown"),
                    "session authenticated"
                );
                {
                    let mut state = self.shared.write();
                    state.status = AuthStatus::Authenticated;
                    state.tokens = Some(tokens);
                }
                self.start_refresher();
                AuthStatus::Authenticated
            }
            Err(err) => {
                warn!(error = %err, error_kind = err.kind(), "authorization code exchange failed");
                self.shared.demote();
                AuthStatus::Unauthenticated
            }
        }
    }

    fn start_refresher(&self) {
        let handle = tokio::spawn(run_refresher(Arc::clone(&self.shared)));
        let mut slot = self.refresher.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = slot.replace(handle) {
            previous.abort();
        }
    }

    fn stop_refresher(&self) {
        let mut slot = self.refresher.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = slot.take() {
            handle.abort();
        }
    }

    /// Whether the refresh task is still scheduled.
    #[must_use]
    pub fn is_refreshing(&self) -> bool {
        self.refresher
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    #[must_use]
    pub fn status(&self) -> AuthStatus {
        self.shared.read().status
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.status() == AuthStatus::Authenticated
    }

    /// Current access token, if authenticated.
    #[must_use]
    pub fn bearer(&self) -> Option<BearerToken> {
        let state = self.shared.read();
        if state.status != AuthStatus::Authenticated {
            return None;
        }
        state.tokens.as_ref().map(|tokens| tokens.access().clone())
    }

    /// `preferred_username`, else `email`.
    #[must_use]
    pub fn display_name(&self) -> Option<String> {
        self.shared
            .read()
            .tokens
            .as_ref()
            .and_then(|tokens| tokens.claims().display_name().map(str::to_owned))
    }

    /// Whether the realm roles include `role`.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.shared
            .read()
            .tokens
            .as_ref()
            .is_some_and(|tokens| tokens.claims().has_role(role))
    }

    /// Run one refresh check immediately.
    pub async fn refresh_now(&self) -> RefreshOutcome {
        self.shared.refresh_if_needed().await
    }

    /// Stop refreshing, drop the tokens and return the id token for the
    /// end-session hint.
    pub fn teardown(&self) -> Option<BearerToken> {
        self.stop_refresher();
        let mut state = self.shared.write();
        state.status = AuthStatus::Unauthenticated;
        state
            .tokens
            .take()
            .and_then(|tokens| tokens.id_token().cloned())
    }
}

impl Drop for AuthSession {
    fn drop(&mut self) {
        self.stop_refresher();
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
