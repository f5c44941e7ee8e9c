//! Shared request plumbing for the backend adapter.

use std::time::Duration;

use pagination::{PageResponse, append_page_query};
use reqwest::header::{ACCEPT, AUTHORIZATION, IF_MATCH};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::domain::Version;
use crate::domain::auth::BearerToken;
use crate::domain::listing::ListQuery;
use crate::domain::ports::{ApiError, PRECONDITION_STATUSES};

/// Backend REST client rooted at the API base URL (for example
/// `http://localhost:8085/api/`).
#[derive(Clone)]
pub struct BackendApiClient {
    client: Client,
    base: Url,
}

impl BackendApiClient {
    /// Build a client with an explicit request timeout.
    ///
    /// # Errors
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(mut base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    /// Base URL every endpoint is resolved against.
    #[must_use]
    pub const fn base(&self) -> &Url {
        &self.base
    }

    pub(super) fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|err| ApiError::transport(format!("invalid endpoint {path}: {err}")))
    }

    pub(super) fn request(&self, method: Method, url: Url, token: &BearerToken) -> RequestBuilder {
        debug!(%method, %url, "backend request");
        self.client
            .request(method, url)
            .header(AUTHORIZATION, format!("Bearer {}", token.expose()))
            .header(ACCEPT, "application/json")
    }

    pub(super) fn conditional(
        &self,
        method: Method,
        url: Url,
        token: &BearerToken,
        version: Version,
    ) -> RequestBuilder {
        self.request(method, url, token)
            .header(IF_MATCH, version.if_match())
    }
}

/// Send and decode a JSON body.
pub(super) async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
    let body = send(request).await?;
    decode(&body)
}

/// Send and decode a JSON body that may be absent.
pub(super) async fn send_optional_json<T: DeserializeOwned>(
    request: RequestBuilder,
) -> Result<Option<T>, ApiError> {
    let body = send(request).await?;
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    decode(&body).map(Some)
}

/// Send and ignore any body.
pub(super) async fn send_empty(request: RequestBuilder) -> Result<(), ApiError> {
    send(request).await.map(drop)
}

async fn send(request: RequestBuilder) -> Result<Vec<u8>, ApiError> {
    let response = request.send().await.map_err(map_transport_error)?;
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(map_status_error(status, body.as_ref()));
    }
    Ok(body.to_vec())
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body)
        .map_err(|err| ApiError::decode(format!("invalid JSON payload: {err}")))
}

/// Append page, size, sort and the non-empty filters to `url`.
pub(super) fn list_url<S>(
    mut url: Url,
    query: &ListQuery<S>,
    filters: &[(&str, Option<String>)],
) -> Url {
    append_page_query(&mut url, &query.page, &query.sort);
    {
        let mut pairs = url.query_pairs_mut();
        for (name, value) in filters {
            if let Some(value) = value {
                pairs.append_pair(name, value);
            }
        }
    }
    url
}

/// Map a page of DTOs into domain records.
pub(super) fn into_domain_page<D, T: From<D>>(page: PageResponse<D>) -> PageResponse<T> {
    page.map(T::from)
}

pub(super) fn map_transport_error(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::timeout(error.to_string())
    } else {
        ApiError::transport(error.to_string())
    }
}

pub(super) fn map_status_error(status: StatusCode, body: &[u8]) -> ApiError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        preview
    };
    match status {
        StatusCode::UNAUTHORIZED => ApiError::unauthorized(message),
        StatusCode::FORBIDDEN => ApiError::forbidden(message),
        StatusCode::NOT_FOUND => ApiError::not_found(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => ApiError::timeout(message),
        _ if PRECONDITION_STATUSES.contains(&status.as_u16()) => {
            ApiError::precondition_failed(status.as_u16(), message)
        }
        _ => ApiError::status(status.as_u16(), message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
