//! Form handling shared by every list page.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tokio::sync::Mutex;

use super::error::PageResult;
use super::see_other;
use crate::domain::Error;
use crate::domain::listing::{ListPage, ListSpec, SortField};

/// Page size selector form.
#[derive(Debug, Deserialize)]
pub struct SizeForm {
    pub size: u32,
}

/// Confirmation flag posted by the confirmation page.
#[derive(Debug, Default, Deserialize)]
pub struct ConfirmForm {
    #[serde(default)]
    pub confirm: Option<String>,
}

impl ConfirmForm {
    #[must_use]
    pub fn confirmed(&self) -> bool {
        self.confirm.as_deref() == Some("true")
    }
}

/// Toggle the sort column named `raw` and return to `base`.
pub async fn sort<L: ListSpec>(
    page: &Mutex<ListPage<L>>,
    raw: &str,
    base: &str,
) -> PageResult<HttpResponse> {
    let field = L::Sort::parse(raw)
        .ok_or_else(|| Error::invalid_request(format!("columna de orden desconocida: {raw}")))?;
    page.lock().await.toggle_sort(field);
    Ok(see_other(base))
}

/// Jump to page `target` (clamped) and return to `base`.
pub async fn go_to<L: ListSpec>(
    page: &Mutex<ListPage<L>>,
    target: u32,
    base: &str,
) -> HttpResponse {
    page.lock().await.go_to_page(target);
    see_other(base)
}

/// Change the page size and return to `base`.
pub async fn resize<L: ListSpec>(
    page: &Mutex<ListPage<L>>,
    form: web::Form<SizeForm>,
    base: &str,
) -> PageResult<HttpResponse> {
    page.lock()
        .await
        .set_page_size(form.size)
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    Ok(see_other(base))
}

/// Close any form or detail view and return to `base`.
pub async fn cancel<L: ListSpec>(page: &Mutex<ListPage<L>>, base: &str) -> HttpResponse {
    page.lock().await.cancel();
    see_other(base)
}
