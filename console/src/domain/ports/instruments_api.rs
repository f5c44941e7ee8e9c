//! Port for the instruments REST resource.

use async_trait::async_trait;
use pagination::PageResponse;

use super::ApiError;
use crate::domain::auth::BearerToken;
use crate::domain::listing::ListQuery;
use crate::domain::{Instrument, InstrumentDraft, InstrumentId, Version};

/// Committed instrument search filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstrumentSearch {
    pub instrument_name: Option<String>,
    pub voice: Option<String>,
}

/// Backend operations on instruments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InstrumentsApi: Send + Sync {
    /// `GET /instruments/search`.
    async fn search(
        &self,
        token: &BearerToken,
        query: &ListQuery<InstrumentSearch>,
    ) -> Result<PageResponse<Instrument>, ApiError>;

    /// `POST /instruments`.
    async fn create(
        &self,
        token: &BearerToken,
        draft: &InstrumentDraft,
    ) -> Result<Instrument, ApiError>;

    /// `PUT /instruments/{id}` with `If-Match`.
    async fn update(
        &self,
        token: &BearerToken,
        id: InstrumentId,
        version: Version,
        draft: &InstrumentDraft,
    ) -> Result<Instrument, ApiError>;

    /// `DELETE /instruments/{id}` with `If-Match`.
    async fn delete(
        &self,
        token: &BearerToken,
        id: InstrumentId,
        version: Version,
    ) -> Result<(), ApiError>;
}
