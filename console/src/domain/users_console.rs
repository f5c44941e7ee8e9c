//! Users page service: drives the users list page through the backend ports.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::domain::auth::BearerToken;
use crate::domain::listing::users::UsersPage;
use crate::domain::listing::{FetchOutcome, MutationKind, MutationOutcome, refresh_page};
use crate::domain::ports::{ApiError, RolesApi, UsersApi};
use crate::domain::{Role, User, UserDraft, UserId};

/// Users page operations.
#[derive(Clone)]
pub struct UsersConsole {
    users: Arc<dyn UsersApi>,
    roles: Arc<dyn RolesApi>,
}

impl UsersConsole {
    /// Drive the users page against the given backend ports.
    pub fn new(users: Arc<dyn UsersApi>, roles: Arc<dyn RolesApi>) -> Self {
        Self { users, roles }
    }

    /// Fetch the committed page if anything changed. Uses `GET /users`
    /// without filters and `GET /users/search` otherwise.
    pub async fn refresh(&self, page: &Mutex<UsersPage>, token: &BearerToken) -> FetchOutcome {
        refresh_page(page, |query| async move {
            if query.search.is_empty() {
                self.users.list(token, &query).await
            } else {
                self.users.search(token, &query).await
            }
        })
        .await
    }

    /// Roles for the filter selector; empty when loading fails.
    pub async fn load_roles(&self, token: &BearerToken) -> Vec<Role> {
        match self.roles.list_roles(token).await {
            Ok(roles) => roles,
            Err(err) => {
                warn!(error = %err, "failed to load roles");
                Vec::new()
            }
        }
    }

    /// Save the open edit form.
    pub async fn save_edit(
        &self,
        page: &Mutex<UsersPage>,
        token: &BearerToken,
        draft: UserDraft,
    ) -> MutationOutcome {
        let (id, version, update) = {
            let mut state = page.lock().await;
            state.set_draft(draft.clone());
            let Some((id, version)) = state.editing().map(|user| (user.id, user.version)) else {
                return MutationOutcome::Missing;
            };
            match draft.to_update() {
                Ok(update) => (id, version, update),
                Err(err) => {
                    state.reject_draft(err.to_string());
                    return MutationOutcome::Invalid;
                }
            }
        };
        match self.users.update(token, id, version, &update).await {
            Ok(user) => {
                info!(user_id = %id, version = %user.version, "user updated");
                page.lock().await.apply_updated(user);
                MutationOutcome::Applied
            }
            Err(err) => Self::fail(page, MutationKind::Update, id, &err).await,
        }
    }

    /// Delete a listed user.
    pub async fn delete(
        &self,
        page: &Mutex<UsersPage>,
        token: &BearerToken,
        id: UserId,
    ) -> MutationOutcome {
        let Some(version) = page.lock().await.entity(id).map(|user| user.version) else {
            return MutationOutcome::Missing;
        };
        match self.users.delete(token, id, version).await {
            Ok(()) => {
                info!(user_id = %id, "user deleted");
                page.lock().await.apply_deleted(id);
                MutationOutcome::Applied
            }
            Err(err) => Self::fail(page, MutationKind::Delete, id, &err).await,
        }
    }

    /// Enable an inactive user or disable an active one.
    pub async fn toggle_active(
        &self,
        page: &Mutex<UsersPage>,
        token: &BearerToken,
        id: UserId,
    ) -> MutationOutcome {
        let Some((version, active)) = page
            .lock()
            .await
            .entity(id)
            .map(|user| (user.version, user.active))
        else {
            return MutationOutcome::Missing;
        };
        let toggled = if active {
            self.users.disable(token, id, version).await
        } else {
            self.users.enable(token, id, version).await
        };
        match self.refreshed_after_toggle(token, id, toggled).await {
            Ok(user) => {
                info!(user_id = %id, active = user.active, "user active flag changed");
                page.lock().await.apply_replaced(user);
                MutationOutcome::Applied
            }
            Err(err) => Self::fail(page, MutationKind::Toggle, id, &err).await,
        }
    }

    async fn refreshed_after_toggle(
        &self,
        token: &BearerToken,
        id: UserId,
        toggled: Result<Option<User>, ApiError>,
    ) -> Result<User, ApiError> {
        match toggled? {
            Some(user) => Ok(user),
            None => self.users.get(token, id).await,
        }
    }

    async fn fail(
        page: &Mutex<UsersPage>,
        kind: MutationKind,
        id: UserId,
        err: &ApiError,
    ) -> MutationOutcome {
        warn!(user_id = %id, error = %err, error_kind = err.kind(), ?kind, "user mutation failed");
        page.lock().await.fail_mutation(kind, err);
        MutationOutcome::Failed
    }
}

#[cfg(test)]
#[path = "users_console_tests.rs"]
mod tests;
