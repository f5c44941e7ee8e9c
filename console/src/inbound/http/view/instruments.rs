//! Instruments page markup.

use super::forms::{notice_banner, text_input};
use super::{pagination_bar, table};
use crate::domain::listing::ViewMode;
use crate::domain::listing::instruments::{InstrumentFilters, InstrumentSortField, InstrumentsPage};
use crate::domain::table::{Column, RowAction, Table};
use crate::domain::{Instrument, InstrumentDraft};

/// Base path of the instruments page and its actions.
pub const INSTRUMENTS_PATH: &str = "/admin/instruments";

/// Column set of the instruments table.
#[must_use]
pub fn instruments_table() -> Table<Instrument, InstrumentSortField> {
    Table::new(vec![
        Column::text("instrumentName", "Nombre", |i: &Instrument| {
            i.instrument_name.clone()
        })
        .sortable(InstrumentSortField::InstrumentName),
        Column::text("voice", "Voz", |i: &Instrument| i.voice.clone())
            .sortable(InstrumentSortField::Voice),
        Column::actions("actions", "Acciones", |i: &Instrument| {
            vec![
                RowAction::post("Editar", format!("{INSTRUMENTS_PATH}/{}/edit", i.id)),
                RowAction::danger("Borrar", format!("{INSTRUMENTS_PATH}/{}/delete", i.id)),
            ]
        })
        .width("10rem"),
    ])
}

/// Main content of the instruments page for its current mode.
#[must_use]
pub fn instruments_body(page: &InstrumentsPage) -> String {
    let mut out = notice_banner(page.notice());
    match page.mode() {
        ViewMode::Create { draft } => out.push_str(&draft_form("Nuevo instrumento", draft)),
        ViewMode::Edit { draft, .. } => out.push_str(&draft_form("Editar instrumento", draft)),
        ViewMode::List | ViewMode::Detail { .. } => {
            out.push_str(&format!(
                "<form method=\"post\" action=\"{INSTRUMENTS_PATH}/new\">\
<button type=\"submit\">Nuevo instrumento</button></form>"
            ));
        }
    }
    out.push_str(&filters_form(page.filters()));
    let view = instruments_table().render(page.rows(), Some(page.sort()));
    out.push_str(&table(&view, INSTRUMENTS_PATH));
    out.push_str(&pagination_bar(&page.pagination(), INSTRUMENTS_PATH));
    out
}

fn filters_form(filters: &InstrumentFilters) -> String {
    format!(
        "<form method=\"post\" action=\"{INSTRUMENTS_PATH}/search\"><fieldset><legend>Buscar</legend>{}{}\
<button type=\"submit\">Buscar</button></fieldset></form>",
        text_input("Nombre", "instrument_name", &filters.instrument_name, "text"),
        text_input("Voz", "voice", &filters.voice, "text"),
    )
}

fn draft_form(title: &str, draft: &InstrumentDraft) -> String {
    format!(
        "<section><h2>{title}</h2><form method=\"post\" action=\"{INSTRUMENTS_PATH}/save\">{}{}\
<button type=\"submit\">Guardar</button></form>\
<form class=\"inline\" method=\"post\" action=\"{INSTRUMENTS_PATH}/cancel\">\
<button type=\"submit\">Cancelar</button></form></section>",
        text_input("Nombre", "instrument_name", &draft.instrument_name, "text"),
        text_input("Voz", "voice", &draft.voice, "text"),
    )
}

/// Confirmation prompt before deleting `instrument`.
#[must_use]
pub fn delete_prompt(instrument: &Instrument) -> String {
    format!(
        "¿Seguro que quieres borrar el instrumento \"{}\" ({})?",
        instrument.instrument_name, instrument.voice
    )
}
