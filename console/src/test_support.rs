//! Test doubles shared by unit tests and the integration suites.
//!
//! Compiled for `cfg(test)` and behind the `test-support` feature.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use mockable::Clock;
use serde_json::{Value, json};
use url::Url;

use crate::domain::ports::{IdentityError, IdentityProvider, TokenGrant};

/// Clock whose time only moves when told to.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) += TimeDelta::seconds(seconds);
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Encode `payload` as an HS256 JWT signed with a throwaway key.
///
/// # Panics
/// Panics if the payload cannot be serialised.
#[must_use]
pub fn token_with(payload: &Value) -> String {
    match encode(
        &Header::default(),
        payload,
        &EncodingKey::from_secret(b"test-only"),
    ) {
        Ok(token) => token,
        Err(err) => panic!("encode test token: {err}"),
    }
}

/// Access token carrying a username, realm roles and an `exp` claim.
#[must_use]
pub fn access_token(username: &str, roles: &[&str], exp: i64) -> String {
    token_with(&json!({
        "preferred_username": username,
        "email": format!("{username}@banda.test"),
        "realm_access": { "roles": roles },
        "exp": exp,
    }))
}

/// Handle that turns refresh rejection on for a
/// [`FixtureIdentityProvider`] after it has been handed off.
#[derive(Clone, Default)]
pub struct RefreshSwitch {
    failing: Arc<AtomicBool>,
    rejected: Arc<AtomicUsize>,
}

impl RefreshSwitch {
    /// Reject every refresh from now on.
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    /// Refreshes rejected so far.
    #[must_use]
    pub fn rejected(&self) -> usize {
        self.rejected.load(Ordering::SeqCst)
    }
}

/// Identity provider that accepts a single authorization code and issues
/// tokens for a fixed user.
pub struct FixtureIdentityProvider {
    base: Url,
    code: String,
    username: String,
    roles: Vec<String>,
    lifetime: Duration,
    refresh: RefreshSwitch,
    exchanged: Arc<Mutex<Vec<String>>>,
}

impl FixtureIdentityProvider {
    /// Accept `code` and issue tokens for `username` with `roles`.
    ///
    /// # Panics
    /// Never in practice; the base URL is a literal.
    #[must_use]
    pub fn new(code: &str, username: &str, roles: &[&str]) -> Self {
        let base = match Url::parse("http://idp.test/realms/banda/protocol/openid-connect/") {
            Ok(url) => url,
            Err(err) => panic!("fixture url: {err}"),
        };
        Self {
            base,
            code: code.to_owned(),
            username: username.to_owned(),
            roles: roles.iter().map(|r| (*r).to_owned()).collect(),
            lifetime: Duration::from_secs(3_600),
            refresh: RefreshSwitch::default(),
            exchanged: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Issue tokens that expire after `lifetime`.
    #[must_use]
    pub fn short_lived(mut self, lifetime: Duration) -> Self {
        self.lifetime = lifetime;
        self
    }

    /// Switch controlling whether refreshes succeed.
    #[must_use]
    pub fn refresh_switch(&self) -> RefreshSwitch {
        self.refresh.clone()
    }

    /// Code verifiers seen by [`IdentityProvider::exchange_code`].
    #[must_use]
    pub fn exchanged_verifiers(&self) -> Vec<String> {
        self.exchanged
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn grant(&self) -> TokenGrant {
        let roles: Vec<&str> = self.roles.iter().map(String::as_str).collect();
        let lifetime = TimeDelta::from_std(self.lifetime).unwrap_or(TimeDelta::hours(1));
        let exp = (Utc::now() + lifetime).timestamp();
        TokenGrant {
            access_token: access_token(&self.username, &roles, exp),
            refresh_token: Some("fixture-refresh".to_owned()),
            id_token: Some("fixture-id".to_owned()),
            expires_in: self.lifetime,
        }
    }

    fn endpoint(&self, name: &str) -> Url {
        self.base.join(name).unwrap_or_else(|_| self.base.clone())
    }
}

#[async_trait]
impl IdentityProvider for FixtureIdentityProvider {
    fn authorization_url(&self, state: &str, code_challenge: &str, redirect_uri: &Url) -> Url {
        let mut url = self.endpoint("auth");
        url.query_pairs_mut()
            .append_pair("state", state)
            .append_pair("code_challenge", code_challenge)
            .append_pair("redirect_uri", redirect_uri.as_str());
        url
    }

    async fn exchange_code(
        &self,
        code: &str,
        code_verifier: &str,
        _redirect_uri: &Url,
    ) -> Result<TokenGrant, IdentityError> {
        self.exchanged
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(code_verifier.to_owned());
        if code == self.code {
            Ok(self.grant())
        } else {
            Err(IdentityError::rejected(400_u16, "invalid_grant"))
        }
    }

    async fn refresh(&self, _refresh_token: &str) -> Result<TokenGrant, IdentityError> {
        if self.refresh.failing.load(Ordering::SeqCst) {
            self.refresh.rejected.fetch_add(1, Ordering::SeqCst);
            return Err(IdentityError::rejected(400_u16, "invalid_grant"));
        }
        Ok(self.grant())
    }

    fn end_session_url<'a>(
        &self,
        id_token_hint: Option<&'a str>,
        post_logout_redirect: &Url,
    ) -> Url {
        let mut url = self.endpoint("logout");
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("post_logout_redirect_uri", post_logout_redirect.as_str());
            if let Some(hint) = id_token_hint {
                query.append_pair("id_token_hint", hint);
            }
        }
        url
    }
}
