//! Instruments page service.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::domain::auth::BearerToken;
use crate::domain::listing::instruments::InstrumentsPage;
use crate::domain::listing::{
    FetchOutcome, MutationKind, MutationOutcome, ViewMode, refresh_page,
};
use crate::domain::ports::InstrumentsApi;
use crate::domain::{InstrumentDraft, InstrumentId};

/// Instruments page operations.
#[derive(Clone)]
pub struct InstrumentsConsole {
    instruments: Arc<dyn InstrumentsApi>,
}

impl InstrumentsConsole {
    /// Drive the instruments page against `instruments`.
    pub fn new(instruments: Arc<dyn InstrumentsApi>) -> Self {
        Self { instruments }
    }

    /// Fetch the committed page if anything changed.
    pub async fn refresh(&self, page: &Mutex<InstrumentsPage>, token: &BearerToken) -> FetchOutcome {
        refresh_page(page, |query| async move {
            self.instruments.search(token, &query).await
        })
        .await
    }

    /// Save the open create or edit form.
    pub async fn save(
        &self,
        page: &Mutex<InstrumentsPage>,
        token: &BearerToken,
        draft: InstrumentDraft,
    ) -> MutationOutcome {
        let (target, clean) = {
            let mut state = page.lock().await;
            state.set_draft(draft.clone());
            let target = match state.mode() {
                ViewMode::Create { .. } => None,
                ViewMode::Edit { entity, .. } => Some((entity.id, entity.version)),
                ViewMode::List | ViewMode::Detail { .. } => return MutationOutcome::Missing,
            };
            match draft.validated() {
                Ok(clean) => (target, clean),
                Err(err) => {
                    state.reject_draft(err.to_string());
                    return MutationOutcome::Invalid;
                }
            }
        };

        let Some((id, version)) = target else {
            return match self.instruments.create(token, &clean).await {
                Ok(created) => {
                    info!(instrument_id = %created.id, "instrument created");
                    page.lock().await.apply_created();
                    MutationOutcome::Applied
                }
                Err(err) => {
                    warn!(error = %err, "instrument create failed");
                    page.lock().await.fail_mutation(MutationKind::Create, &err);
                    MutationOutcome::Failed
                }
            };
        };

        match self.instruments.update(token, id, version, &clean).await {
            Ok(updated) => {
                info!(instrument_id = %id, version = %updated.version, "instrument updated");
                page.lock().await.apply_updated(updated);
                MutationOutcome::Applied
            }
            Err(err) => {
                warn!(instrument_id = %id, error = %err, "instrument update failed");
                page.lock().await.fail_mutation(MutationKind::Update, &err);
                MutationOutcome::Failed
            }
        }
    }

    /// Delete a listed instrument, removing it locally without a reload.
    pub async fn delete(
        &self,
        page: &Mutex<InstrumentsPage>,
        token: &BearerToken,
        id: InstrumentId,
    ) -> MutationOutcome {
        let Some(version) = page.lock().await.entity(id).map(|i| i.version) else {
            return MutationOutcome::Missing;
        };
        match self.instruments.delete(token, id, version).await {
            Ok(()) => {
                info!(instrument_id = %id, "instrument deleted");
                page.lock().await.apply_deleted(id);
                MutationOutcome::Applied
            }
            Err(err) => {
                warn!(instrument_id = %id, error = %err, "instrument delete failed");
                page.lock().await.fail_mutation(MutationKind::Delete, &err);
                MutationOutcome::Failed
            }
        }
    }
}
