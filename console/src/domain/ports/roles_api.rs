//! Port for listing realm roles.

use async_trait::async_trait;

use super::ApiError;
use crate::domain::Role;
use crate::domain::auth::BearerToken;

/// Read access to `GET /roles`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RolesApi: Send + Sync {
    /// List every role known to the backend.
    async fn list_roles(&self, token: &BearerToken) -> Result<Vec<Role>, ApiError>;
}
