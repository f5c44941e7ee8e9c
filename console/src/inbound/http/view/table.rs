//! HTML rendering of a [`TableView`].

use super::Escaped;
use crate::domain::listing::SortField;
use crate::domain::table::{ActionStyle, Cell, TableBody, TableView};

/// Render `view`. Sortable headers post to `{base}/sort/{field}`.
#[must_use]
pub fn table<F: SortField>(view: &TableView<F>, base: &str) -> String {
    let mut out = String::from("<table><thead><tr>");
    for header in &view.headers {
        let width = header
            .width
            .map_or_else(String::new, |w| format!(" style=\"width:{}\"", Escaped(w)));
        match header.sort_field {
            Some(field) => {
                out.push_str(&format!(
                    "<th{width}><form class=\"inline\" method=\"post\" action=\"{base}/sort/{}\">\
<button type=\"submit\">{}{}</button></form></th>",
                    field.as_str(),
                    Escaped(header.label),
                    header.marker,
                ));
            }
            None => {
                out.push_str(&format!("<th{width}>{}</th>", Escaped(header.label)));
            }
        }
    }
    out.push_str("</tr></thead><tbody>");
    match &view.body {
        TableBody::Empty { colspan, message } => {
            out.push_str(&format!(
                "<tr><td colspan=\"{colspan}\">{}</td></tr>",
                Escaped(message)
            ));
        }
        TableBody::Rows(rows) => {
            for row in rows {
                out.push_str("<tr>");
                for cell in row {
                    out.push_str("<td>");
                    render_cell(&mut out, cell);
                    out.push_str("</td>");
                }
                out.push_str("</tr>");
            }
        }
    }
    out.push_str("</tbody></table>");
    out
}

fn render_cell(out: &mut String, cell: &Cell) {
    match cell {
        Cell::Text(text) => {
            out.push_str(&Escaped(text).to_string());
        }
        Cell::Actions(actions) => {
            for action in actions {
                let class = match action.style {
                    ActionStyle::Post => "",
                    ActionStyle::Danger => " class=\"danger\"",
                };
                out.push_str(&format!(
                    "<form class=\"inline\" method=\"post\" action=\"{}\">\
<button type=\"submit\"{class}>{}</button></form>",
                    Escaped(&action.target),
                    Escaped(&action.label),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pagination::SortDirection;

    use super::*;
    use crate::domain::listing::SortState;
    use crate::domain::listing::instruments::InstrumentSortField;
    use crate::domain::table::{Column, RowAction, Table};

    fn columns() -> Table<(String, i64), InstrumentSortField> {
        Table::new(vec![
            Column::text("name", "Nombre", |row: &(String, i64)| row.0.clone())
                .sortable(InstrumentSortField::InstrumentName),
            Column::actions("actions", "Acciones", |row: &(String, i64)| {
                vec![RowAction::danger("Borrar", format!("/x/{}/delete", row.1))]
            })
            .width("8rem"),
        ])
    }

    #[test]
    fn sortable_headers_post_their_field() {
        let sort = SortState::by(InstrumentSortField::InstrumentName, SortDirection::Desc);
        let html = table(
            &columns().render(&[("Tuba".into(), 1)], Some(&sort)),
            "/admin/instruments",
        );
        assert!(html.contains("action=\"/admin/instruments/sort/instrumentName\""));
        assert!(html.contains("Nombre ▼"));
        assert!(html.contains("<th style=\"width:8rem\">Acciones</th>"));
        assert!(html.contains("action=\"/x/1/delete\""));
    }

    #[test]
    fn cells_are_escaped() {
        let html = table(
            &columns().render(&[("<i>Oboe</i>".into(), 2)], None),
            "/admin/instruments",
        );
        assert!(html.contains("&lt;i&gt;Oboe&lt;/i&gt;"));
        assert!(!html.contains("/sort/"));
    }

    #[test]
    fn empty_tables_span_every_column() {
        let html = table(&columns().render(&[], None), "/admin/instruments");
        assert!(html.contains("<td colspan=\"2\">No hay datos para los filtros actuales.</td>"));
    }
}
