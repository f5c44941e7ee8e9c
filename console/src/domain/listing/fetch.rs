//! Generation-guarded fetch orchestration.

use std::future::Future;

use pagination::PageResponse;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::{ListPage, ListQuery, ListSpec};
use crate::domain::ports::ApiError;

/// Result of [`refresh_page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Nothing changed since the last fetch.
    Skipped,
    /// The response was applied to the page.
    Applied,
    /// A newer fetch superseded this one; the response was dropped.
    Discarded,
}

/// Fetch the page's committed parameters if they changed.
///
/// The page lock is released while `fetch` runs so concurrent requests can
/// proceed; the generation check on completion keeps a slow, superseded
/// response from overwriting a newer one.
pub async fn refresh_page<L, F, Fut>(page: &Mutex<ListPage<L>>, fetch: F) -> FetchOutcome
where
    L: ListSpec,
    F: FnOnce(ListQuery<L::Search>) -> Fut,
    Fut: Future<Output = Result<PageResponse<L::Entity>, ApiError>>,
{
    let ticket = {
        let mut state = page.lock().await;
        if !state.needs_fetch() {
            return FetchOutcome::Skipped;
        }
        state.begin_fetch()
    };
    let generation = ticket.generation();
    let result = fetch(ticket.into_query()).await;
    if let Err(err) = &result {
        warn!(error = %err, error_kind = err.kind(), generation, "list fetch failed");
    }
    if page.lock().await.complete_fetch(generation, result) {
        FetchOutcome::Applied
    } else {
        debug!(generation, "list response superseded");
        FetchOutcome::Discarded
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pagination::PageResponse;
    use tokio::sync::oneshot;

    use super::*;
    use crate::domain::listing::instruments::{InstrumentSortField, InstrumentsList};
    use crate::domain::{Instrument, InstrumentId, Version};

    fn instrument(id: i64, name: &str) -> Instrument {
        Instrument {
            id: InstrumentId::new(id),
            version: Version::new(0),
            instrument_name: name.to_owned(),
            voice: "Primera".to_owned(),
        }
    }

    fn page_of(rows: Vec<Instrument>) -> PageResponse<Instrument> {
        PageResponse {
            total_elements: rows.len() as u64,
            total_pages: 1,
            content: rows,
            ..PageResponse::empty(10)
        }
    }

    #[tokio::test]
    async fn skips_when_nothing_changed() {
        let page = Mutex::new(ListPage::<InstrumentsList>::default());
        let first = refresh_page(&page, |_| async { Ok(page_of(vec![])) }).await;
        assert_eq!(first, FetchOutcome::Applied);
        let second = refresh_page(&page, |_| async {
            Err(ApiError::transport("must not be called"))
        })
        .await;
        assert_eq!(second, FetchOutcome::Skipped);
    }

    #[tokio::test]
    async fn slow_stale_response_never_overwrites_newer_one() {
        let page = Arc::new(Mutex::new(ListPage::<InstrumentsList>::default()));
        let (release_slow, slow_gate) = oneshot::channel::<()>();

        let slow_page = Arc::clone(&page);
        let slow = tokio::spawn(async move {
            refresh_page(&slow_page, |_| async move {
                slow_gate.await.ok();
                Ok(page_of(vec![instrument(1, "Stale")]))
            })
            .await
        });
        tokio::task::yield_now().await;
        while !page.lock().await.is_loading() {
            tokio::task::yield_now().await;
        }

        page.lock().await.toggle_sort(InstrumentSortField::Voice);
        let fast = refresh_page(&page, |query| async move {
            assert_eq!(query.sort.len(), 1);
            Ok(page_of(vec![instrument(2, "Fresh")]))
        })
        .await;
        assert_eq!(fast, FetchOutcome::Applied);

        release_slow.send(()).ok();
        let outcome = slow.await.expect("slow fetch task");
        assert_eq!(outcome, FetchOutcome::Discarded);

        let state = page.lock().await;
        let names: Vec<&str> = state.rows().iter().map(|i| i.instrument_name.as_str()).collect();
        assert_eq!(names, ["Fresh"]);
        assert!(!state.is_loading());
    }
}
