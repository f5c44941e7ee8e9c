//! Port for the users REST resource.

use async_trait::async_trait;
use pagination::PageResponse;

use super::ApiError;
use crate::domain::auth::BearerToken;
use crate::domain::listing::ListQuery;
use crate::domain::{User, UserId, UserUpdate, Version};

/// Committed user search filters. `None` means the filter is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSearch {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub second_last_name: Option<String>,
    pub email: Option<String>,
    pub active: Option<bool>,
    pub role_name: Option<String>,
    pub instrument_id: Option<i64>,
}

impl UserSearch {
    /// Whether no filter is committed, selecting `GET /users` over the
    /// search endpoint.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Backend operations on users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersApi: Send + Sync {
    /// `GET /users` (no filters).
    async fn list(
        &self,
        token: &BearerToken,
        query: &ListQuery<UserSearch>,
    ) -> Result<PageResponse<User>, ApiError>;

    /// `GET /users/search`.
    async fn search(
        &self,
        token: &BearerToken,
        query: &ListQuery<UserSearch>,
    ) -> Result<PageResponse<User>, ApiError>;

    /// `GET /users/{id}`.
    async fn get(&self, token: &BearerToken, id: UserId) -> Result<User, ApiError>;

    /// `PUT /users/{id}` with `If-Match`.
    async fn update(
        &self,
        token: &BearerToken,
        id: UserId,
        version: Version,
        update: &UserUpdate,
    ) -> Result<User, ApiError>;

    /// `DELETE /users/{id}` with `If-Match`.
    async fn delete(&self, token: &BearerToken, id: UserId, version: Version)
    -> Result<(), ApiError>;

    /// `PUT /users/{id}/enable`. `None` when the backend sent no body.
    async fn enable(
        &self,
        token: &BearerToken,
        id: UserId,
        version: Version,
    ) -> Result<Option<User>, ApiError>;

    /// `PUT /users/{id}/disable`. `None` when the backend sent no body.
    async fn disable(
        &self,
        token: &BearerToken,
        id: UserId,
        version: Version,
    ) -> Result<Option<User>, ApiError>;
}
