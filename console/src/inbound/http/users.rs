//! Users list, detail and edit handlers under `/admin/users`.

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;

use super::error::PageResult;
use super::guard::{Admin, Authenticated};
use super::list_actions::{self, ConfirmForm, SizeForm};
use super::see_other;
use super::state::HttpState;
use super::view::confirmation_page;
use super::view::users::{USERS_PATH, delete_prompt, toggle_prompt, users_body};
use crate::domain::listing::users::{ActiveFilter, UserFilters, UsersList};
use crate::domain::{UserDraft, UserId};

/// Users search form.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UserFiltersForm {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub second_last_name: String,
    pub email: String,
    pub active: String,
    pub role_name: String,
}

impl From<UserFiltersForm> for UserFilters {
    fn from(form: UserFiltersForm) -> Self {
        Self {
            username: form.username,
            first_name: form.first_name,
            last_name: form.last_name,
            second_last_name: form.second_last_name,
            email: form.email,
            active: ActiveFilter::parse(&form.active),
            role_name: form.role_name,
        }
    }
}

/// User edit form.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UserDraftForm {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub second_last_name: String,
    pub birth_date: String,
    pub band_join_date: String,
    pub phone: String,
    pub notes: String,
    pub profile_picture_url: String,
}

impl From<UserDraftForm> for UserDraft {
    fn from(form: UserDraftForm) -> Self {
        Self {
            email: form.email,
            first_name: form.first_name,
            last_name: form.last_name,
            second_last_name: form.second_last_name,
            birth_date: form.birth_date,
            band_join_date: form.band_join_date,
            phone: form.phone,
            notes: form.notes,
            profile_picture_url: form.profile_picture_url,
        }
    }
}

/// Users list, refreshed whenever the committed parameters changed.
#[get("/admin/users")]
pub async fn list(state: web::Data<HttpState>, Admin(visitor): Admin) -> PageResult<HttpResponse> {
    let token = visitor.bearer()?;
    let console = visitor.session();
    state.users.refresh(console.users(), &token).await;
    let roles = console.roles(|| state.users.load_roles(&token)).await;
    let page = console.users().lock().await;
    Ok(visitor.render("Usuarios", &users_body(&page, roles)))
}

#[post("/admin/users/search")]
pub async fn search(Admin(visitor): Admin, form: web::Form<UserFiltersForm>) -> HttpResponse {
    let mut page = visitor.session().users().lock().await;
    page.set_filters(form.into_inner().into());
    page.submit_search();
    see_other(USERS_PATH)
}

#[post("/admin/users/sort/{field}")]
pub async fn sort(Admin(visitor): Admin, field: web::Path<String>) -> PageResult<HttpResponse> {
    list_actions::sort::<UsersList>(visitor.session().users(), &field, USERS_PATH).await
}

#[post("/admin/users/page/{page}")]
pub async fn go_to_page(Admin(visitor): Admin, target: web::Path<u32>) -> HttpResponse {
    list_actions::go_to::<UsersList>(visitor.session().users(), *target, USERS_PATH).await
}

#[post("/admin/users/size")]
pub async fn resize(Admin(visitor): Admin, form: web::Form<SizeForm>) -> PageResult<HttpResponse> {
    list_actions::resize::<UsersList>(visitor.session().users(), form, USERS_PATH).await
}

#[post("/admin/users/cancel")]
pub async fn cancel(Admin(visitor): Admin) -> HttpResponse {
    list_actions::cancel::<UsersList>(visitor.session().users(), USERS_PATH).await
}

#[post("/admin/users/{id}/view")]
pub async fn view(Admin(visitor): Admin, id: web::Path<i64>) -> HttpResponse {
    visitor
        .session()
        .users()
        .lock()
        .await
        .open_detail(UserId::new(*id));
    see_other(USERS_PATH)
}

#[post("/admin/users/{id}/edit")]
pub async fn edit(Admin(visitor): Admin, id: web::Path<i64>) -> HttpResponse {
    visitor
        .session()
        .users()
        .lock()
        .await
        .open_edit(UserId::new(*id));
    see_other(USERS_PATH)
}

#[post("/admin/users/save")]
pub async fn save(
    state: web::Data<HttpState>,
    Admin(visitor): Admin,
    form: web::Form<UserDraftForm>,
) -> PageResult<HttpResponse> {
    let token = visitor.bearer()?;
    state
        .users
        .save_edit(visitor.session().users(), &token, form.into_inner().into())
        .await;
    Ok(see_other(USERS_PATH))
}

/// Enable or disable a user after confirmation.
#[post("/admin/users/{id}/toggle-active")]
pub async fn toggle_active(
    state: web::Data<HttpState>,
    Admin(visitor): Admin,
    id: web::Path<i64>,
    form: web::Form<ConfirmForm>,
) -> PageResult<HttpResponse> {
    let id = UserId::new(*id);
    if !form.confirmed() {
        let prompt = visitor.session().users().lock().await.entity(id).map(toggle_prompt);
        return Ok(match prompt {
            Some(prompt) => confirm(&visitor, &prompt, &format!("{USERS_PATH}/{id}/toggle-active")),
            None => see_other(USERS_PATH),
        });
    }
    let token = visitor.bearer()?;
    state
        .users
        .toggle_active(visitor.session().users(), &token, id)
        .await;
    Ok(see_other(USERS_PATH))
}

/// Delete a user after confirmation.
#[post("/admin/users/{id}/delete")]
pub async fn delete(
    state: web::Data<HttpState>,
    Admin(visitor): Admin,
    id: web::Path<i64>,
    form: web::Form<ConfirmForm>,
) -> PageResult<HttpResponse> {
    let id = UserId::new(*id);
    if !form.confirmed() {
        let prompt = visitor.session().users().lock().await.entity(id).map(delete_prompt);
        return Ok(match prompt {
            Some(prompt) => confirm(&visitor, &prompt, &format!("{USERS_PATH}/{id}/delete")),
            None => see_other(USERS_PATH),
        });
    }
    let token = visitor.bearer()?;
    state.users.delete(visitor.session().users(), &token, id).await;
    Ok(see_other(USERS_PATH))
}

fn confirm(visitor: &Authenticated, prompt: &str, action: &str) -> HttpResponse {
    visitor.render("Confirmar", &confirmation_page(prompt, action, USERS_PATH))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
