//! Bearer and refresh tokens held by an authenticated session.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use zeroize::Zeroizing;

use super::Claims;
use crate::domain::ports::{IdentityError, TokenGrant};

/// Opaque bearer credential. Its buffer is wiped on drop and it never
/// appears in debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(Zeroizing<String>);

impl BearerToken {
    /// Wrap a raw token.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(Zeroizing::new(raw.into()))
    }

    /// Raw token text, for building request headers.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

/// Tokens of an authenticated session together with the access-token claims.
#[derive(Debug, Clone)]
pub struct TokenSet {
    access: BearerToken,
    refresh: Option<BearerToken>,
    id_token: Option<BearerToken>,
    expires_at: DateTime<Utc>,
    claims: Claims,
}

impl TokenSet {
    /// Build a token set from a grant received at `now`.
    ///
    /// Expiry comes from the `exp` claim when present, otherwise from the
    /// grant's `expires_in`.
    ///
    /// # Errors
    /// Returns [`IdentityError::Decode`] when the access token carries no
    /// readable claims.
    pub fn from_grant(grant: TokenGrant, now: DateTime<Utc>) -> Result<Self, IdentityError> {
        let claims = Claims::decode(&grant.access_token)?;
        let expires_at = claims
            .expires_at()
            .or_else(|| {
                TimeDelta::from_std(grant.expires_in)
                    .ok()
                    .and_then(|delta| now.checked_add_signed(delta))
            })
            .unwrap_or(now);
        Ok(Self {
            access: BearerToken::new(grant.access_token),
            refresh: grant.refresh_token.map(BearerToken::new),
            id_token: grant.id_token.map(BearerToken::new),
            expires_at,
            claims,
        })
    }

    pub const fn access(&self) -> &BearerToken {
        &self.access
    }

    pub const fn refresh(&self) -> Option<&BearerToken> {
        self.refresh.as_ref()
    }

    pub const fn id_token(&self) -> Option<&BearerToken> {
        self.id_token.as_ref()
    }

    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub const fn claims(&self) -> &Claims {
        &self.claims
    }

    /// Whether the access token expires within `min_validity` of `now`.
    #[must_use]
    pub fn expires_within(&self, now: DateTime<Utc>, min_validity: TimeDelta) -> bool {
        self.expires_at - now <= min_validity
    }

    /// Keep the previous refresh and id tokens when a refresh grant omits them.
    #[must_use]
    pub fn inherit_from(mut self, previous: &Self) -> Self {
        if self.refresh.is_none() {
            self.refresh.clone_from(&previous.refresh);
        }
        if self.id_token.is_none() {
            self.id_token.clone_from(&previous.id_token);
        }
        self
    }
}
