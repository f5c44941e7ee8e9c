//! `InstrumentsApi` over `/instruments`.

use async_trait::async_trait;
use pagination::PageResponse;
use reqwest::Method;

use super::client::{BackendApiClient, into_domain_page, list_url, send_empty, send_json};
use super::dto::{InstrumentDto, InstrumentRequestDto};
use crate::domain::auth::BearerToken;
use crate::domain::listing::ListQuery;
use crate::domain::ports::{ApiError, InstrumentSearch, InstrumentsApi};
use crate::domain::{Instrument, InstrumentDraft, InstrumentId, Version};

#[async_trait]
impl InstrumentsApi for BackendApiClient {
    async fn search(
        &self,
        token: &BearerToken,
        query: &ListQuery<InstrumentSearch>,
    ) -> Result<PageResponse<Instrument>, ApiError> {
        let filters = [
            ("instrumentName", query.search.instrument_name.clone()),
            ("voice", query.search.voice.clone()),
        ];
        let url = list_url(self.endpoint("instruments/search")?, query, &filters);
        let page: PageResponse<InstrumentDto> =
            send_json(self.request(Method::GET, url, token)).await?;
        Ok(into_domain_page(page))
    }

    async fn create(
        &self,
        token: &BearerToken,
        draft: &InstrumentDraft,
    ) -> Result<Instrument, ApiError> {
        let url = self.endpoint("instruments")?;
        let request = self
            .request(Method::POST, url, token)
            .json(&InstrumentRequestDto::from(draft));
        let dto: InstrumentDto = send_json(request).await?;
        Ok(dto.into())
    }

    async fn update(
        &self,
        token: &BearerToken,
        id: InstrumentId,
        version: Version,
        draft: &InstrumentDraft,
    ) -> Result<Instrument, ApiError> {
        let url = self.endpoint(&format!("instruments/{id}"))?;
        let request = self
            .conditional(Method::PUT, url, token, version)
            .json(&InstrumentRequestDto::from(draft));
        let dto: InstrumentDto = send_json(request).await?;
        Ok(dto.into())
    }

    async fn delete(
        &self,
        token: &BearerToken,
        id: InstrumentId,
        version: Version,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("instruments/{id}"))?;
        send_empty(self.conditional(Method::DELETE, url, token, version)).await
    }
}
