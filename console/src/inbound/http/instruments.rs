//! Instruments list, create and edit handlers under `/admin/instruments`.

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;

use super::error::PageResult;
use super::guard::Admin;
use super::list_actions::{self, ConfirmForm, SizeForm};
use super::see_other;
use super::state::HttpState;
use super::view::confirmation_page;
use super::view::instruments::{INSTRUMENTS_PATH, delete_prompt, instruments_body};
use crate::domain::listing::instruments::{InstrumentFilters, InstrumentsList};
use crate::domain::{InstrumentDraft, InstrumentId};

/// Instrument fields, used both for the search and the create/edit form.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct InstrumentForm {
    pub instrument_name: String,
    pub voice: String,
}

impl From<InstrumentForm> for InstrumentFilters {
    fn from(form: InstrumentForm) -> Self {
        Self {
            instrument_name: form.instrument_name,
            voice: form.voice,
        }
    }
}

impl From<InstrumentForm> for InstrumentDraft {
    fn from(form: InstrumentForm) -> Self {
        Self {
            instrument_name: form.instrument_name,
            voice: form.voice,
        }
    }
}

#[get("/admin/instruments")]
pub async fn list(state: web::Data<HttpState>, Admin(visitor): Admin) -> PageResult<HttpResponse> {
    let token = visitor.bearer()?;
    let page = visitor.session().instruments();
    state.instruments.refresh(page, &token).await;
    let page = page.lock().await;
    Ok(visitor.render("Instrumentos", &instruments_body(&page)))
}

#[post("/admin/instruments/search")]
pub async fn search(Admin(visitor): Admin, form: web::Form<InstrumentForm>) -> HttpResponse {
    let mut page = visitor.session().instruments().lock().await;
    page.set_filters(form.into_inner().into());
    page.submit_search();
    see_other(INSTRUMENTS_PATH)
}

#[post("/admin/instruments/sort/{field}")]
pub async fn sort(Admin(visitor): Admin, field: web::Path<String>) -> PageResult<HttpResponse> {
    list_actions::sort::<InstrumentsList>(visitor.session().instruments(), &field, INSTRUMENTS_PATH)
        .await
}

#[post("/admin/instruments/page/{page}")]
pub async fn go_to_page(Admin(visitor): Admin, target: web::Path<u32>) -> HttpResponse {
    list_actions::go_to::<InstrumentsList>(visitor.session().instruments(), *target, INSTRUMENTS_PATH)
        .await
}

#[post("/admin/instruments/size")]
pub async fn resize(Admin(visitor): Admin, form: web::Form<SizeForm>) -> PageResult<HttpResponse> {
    list_actions::resize::<InstrumentsList>(visitor.session().instruments(), form, INSTRUMENTS_PATH)
        .await
}

#[post("/admin/instruments/cancel")]
pub async fn cancel(Admin(visitor): Admin) -> HttpResponse {
    list_actions::cancel::<InstrumentsList>(visitor.session().instruments(), INSTRUMENTS_PATH).await
}

#[post("/admin/instruments/new")]
pub async fn open_create(Admin(visitor): Admin) -> HttpResponse {
    visitor.session().instruments().lock().await.open_create();
    see_other(INSTRUMENTS_PATH)
}

#[post("/admin/instruments/{id}/edit")]
pub async fn edit(Admin(visitor): Admin, id: web::Path<i64>) -> HttpResponse {
    visitor
        .session()
        .instruments()
        .lock()
        .await
        .open_edit(InstrumentId::new(*id));
    see_other(INSTRUMENTS_PATH)
}

/// Save the open create or edit form.
#[post("/admin/instruments/save")]
pub async fn save(
    state: web::Data<HttpState>,
    Admin(visitor): Admin,
    form: web::Form<InstrumentForm>,
) -> PageResult<HttpResponse> {
    let token = visitor.bearer()?;
    state
        .instruments
        .save(visitor.session().instruments(), &token, form.into_inner().into())
        .await;
    Ok(see_other(INSTRUMENTS_PATH))
}

/// Delete an instrument after confirmation.
#[post("/admin/instruments/{id}/delete")]
pub async fn delete(
    state: web::Data<HttpState>,
    Admin(visitor): Admin,
    id: web::Path<i64>,
    form: web::Form<ConfirmForm>,
) -> PageResult<HttpResponse> {
    let id = InstrumentId::new(*id);
    if !form.confirmed() {
        let prompt = visitor
            .session()
            .instruments()
            .lock()
            .await
            .entity(id)
            .map(delete_prompt);
        return Ok(match prompt {
            Some(prompt) => visitor.render(
                "Confirmar",
                &confirmation_page(
                    &prompt,
                    &format!("{INSTRUMENTS_PATH}/{id}/delete"),
                    INSTRUMENTS_PATH,
                ),
            ),
            None => see_other(INSTRUMENTS_PATH),
        });
    }
    let token = visitor.bearer()?;
    state
        .instruments
        .delete(visitor.session().instruments(), &token, id)
        .await;
    Ok(see_other(INSTRUMENTS_PATH))
}

#[cfg(test)]
#[path = "instruments_tests.rs"]
mod tests;
