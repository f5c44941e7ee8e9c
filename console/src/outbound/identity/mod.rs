//! OpenID Connect identity provider adapters.

mod dto;
mod keycloak;

pub use keycloak::{KeycloakIdentityProvider, KeycloakSetupError};
