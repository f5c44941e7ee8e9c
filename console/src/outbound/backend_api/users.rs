//! `UsersApi` over `/users`.

use async_trait::async_trait;
use pagination::PageResponse;
use reqwest::Method;

use super::client::{
    BackendApiClient, into_domain_page, list_url, send_empty, send_json, send_optional_json,
};
use super::dto::{UserDto, UserUpdateDto};
use crate::domain::auth::BearerToken;
use crate::domain::listing::ListQuery;
use crate::domain::ports::{ApiError, UserSearch, UsersApi};
use crate::domain::{User, UserId, UserUpdate, Version};

fn search_filters(search: &UserSearch) -> [(&'static str, Option<String>); 8] {
    [
        ("username", search.username.clone()),
        ("firstName", search.first_name.clone()),
        ("lastName", search.last_name.clone()),
        ("secondLastName", search.second_last_name.clone()),
        ("email", search.email.clone()),
        ("active", search.active.map(|flag| flag.to_string())),
        ("roleName", search.role_name.clone()),
        ("instrumentId", search.instrument_id.map(|id| id.to_string())),
    ]
}

impl BackendApiClient {
    async fn users_page(
        &self,
        path: &str,
        token: &BearerToken,
        query: &ListQuery<UserSearch>,
    ) -> Result<PageResponse<User>, ApiError> {
        let url = list_url(self.endpoint(path)?, query, &search_filters(&query.search));
        let page: PageResponse<UserDto> = send_json(self.request(Method::GET, url, token)).await?;
        Ok(into_domain_page(page))
    }

    async fn toggle_user(
        &self,
        token: &BearerToken,
        id: UserId,
        version: Version,
        action: &str,
    ) -> Result<Option<User>, ApiError> {
        let url = self.endpoint(&format!("users/{id}/{action}"))?;
        let body: Option<UserDto> =
            send_optional_json(self.conditional(Method::PUT, url, token, version)).await?;
        Ok(body.map(User::from))
    }
}

#[async_trait]
impl UsersApi for BackendApiClient {
    async fn list(
        &self,
        token: &BearerToken,
        query: &ListQuery<UserSearch>,
    ) -> Result<PageResponse<User>, ApiError> {
        self.users_page("users", token, query).await
    }

    async fn search(
        &self,
        token: &BearerToken,
        query: &ListQuery<UserSearch>,
    ) -> Result<PageResponse<User>, ApiError> {
        self.users_page("users/search", token, query).await
    }

    async fn get(&self, token: &BearerToken, id: UserId) -> Result<User, ApiError> {
        let url = self.endpoint(&format!("users/{id}"))?;
        let dto: UserDto = send_json(self.request(Method::GET, url, token)).await?;
        Ok(dto.into())
    }

    async fn update(
        &self,
        token: &BearerToken,
        id: UserId,
        version: Version,
        update: &UserUpdate,
    ) -> Result<User, ApiError> {
        let url = self.endpoint(&format!("users/{id}"))?;
        let request = self
            .conditional(Method::PUT, url, token, version)
            .json(&UserUpdateDto::from(update));
        let dto: UserDto = send_json(request).await?;
        Ok(dto.into())
    }

    async fn delete(
        &self,
        token: &BearerToken,
        id: UserId,
        version: Version,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("users/{id}"))?;
        send_empty(self.conditional(Method::DELETE, url, token, version)).await
    }

    async fn enable(
        &self,
        token: &BearerToken,
        id: UserId,
        version: Version,
    ) -> Result<Option<User>, ApiError> {
        self.toggle_user(token, id, version, "enable").await
    }

    async fn disable(
        &self,
        token: &BearerToken,
        id: UserId,
        version: Version,
    ) -> Result<Option<User>, ApiError> {
        self.toggle_user(token, id, version, "disable").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_name_backend_parameters() {
        let search = UserSearch {
            active: Some(true),
            role_name: Some("ADMIN".into()),
            ..UserSearch::default()
        };
        let present: Vec<(&str, String)> = search_filters(&search)
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| (name, v)))
            .collect();
        assert_eq!(
            present,
            [("active", "true".to_owned()), ("roleName", "ADMIN".to_owned())]
        );
    }
}
