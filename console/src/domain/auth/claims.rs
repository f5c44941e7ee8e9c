//! Access-token claims read by the console.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;

use crate::domain::ports::IdentityError;

/// Realm-level role assignments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RealmAccess {
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Subset of the access-token payload the console relies on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub preferred_username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub realm_access: RealmAccess,
    #[serde(default)]
    pub exp: Option<i64>,
}

impl Claims {
    /// Read the payload of a token straight from the token endpoint.
    ///
    /// The signature is not checked here; the backend verifies every token
    /// it receives.
    ///
    /// # Errors
    /// Returns [`IdentityError::Decode`] when the token is not a JWT or its
    /// payload does not deserialise.
    pub fn decode(token: &str) -> Result<Self, IdentityError> {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();
        decode::<Self>(token, &DecodingKey::from_secret(&[]), &validation)
            .map(|data| data.claims)
            .map_err(|err| IdentityError::decode(err.to_string()))
    }

    /// `preferred_username`, falling back to `email`.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.preferred_username
            .as_deref()
            .filter(|name| !name.is_empty())
            .or_else(|| self.email.as_deref().filter(|mail| !mail.is_empty()))
    }

    /// Whether the realm roles include `role`.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.realm_access.roles.iter().any(|r| r == role)
    }

    /// Expiry instant from the `exp` claim.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::test_support::{access_token, token_with};

    #[test]
    fn reads_roles_and_username() {
        let claims = Claims::decode(&access_token("marta", &["ADMIN", "MUSICIAN"], 1_700_000_000))
            .expect("claims");
        assert_eq!(claims.display_name(), Some("marta"));
        assert!(claims.has_role("ADMIN"));
        assert!(!claims.has_role("admin"));
        assert_eq!(claims.expires_at().map(|t| t.timestamp()), Some(1_700_000_000));
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let claims =
            Claims::decode(&token_with(&json!({ "email": "pepe@banda.test" }))).expect("claims");
        assert_eq!(claims.display_name(), Some("pepe@banda.test"));
        assert!(claims.realm_access.roles.is_empty());
    }

    #[test]
    fn rejects_non_jwt_input() {
        let err = Claims::decode("not-a-token").expect_err("must fail");
        assert!(matches!(err, IdentityError::Decode { .. }));
    }
}
