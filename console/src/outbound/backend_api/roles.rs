//! `RolesApi` over `/roles`.

use async_trait::async_trait;
use reqwest::Method;

use super::client::{BackendApiClient, send_json};
use super::dto::RoleDto;
use crate::domain::Role;
use crate::domain::auth::BearerToken;
use crate::domain::ports::{ApiError, RolesApi};

#[async_trait]
impl RolesApi for BackendApiClient {
    async fn list_roles(&self, token: &BearerToken) -> Result<Vec<Role>, ApiError> {
        let url = self.endpoint("roles")?;
        let roles: Vec<RoleDto> = send_json(self.request(Method::GET, url, token)).await?;
        Ok(roles.into_iter().map(Role::from).collect())
    }
}
