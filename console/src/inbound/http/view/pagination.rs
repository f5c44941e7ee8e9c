//! HTML rendering of the pagination control.

use pagination::PaginationBar;

/// Render `bar`. Navigation posts to `{base}/page/{n}`, the size selector
/// to `{base}/size`.
#[must_use]
pub fn pagination_bar(bar: &PaginationBar, base: &str) -> String {
    let mut out = format!(
        "<div class=\"pagination\"><span>{}</span> <span>{}</span> ",
        bar.range_label(),
        bar.page_label()
    );
    nav_button(&mut out, base, "Anterior", bar.previous_page());
    nav_button(&mut out, base, "Siguiente", bar.next_page());
    out.push_str(&format!(
        "<form class=\"inline\" method=\"post\" action=\"{base}/size\">\
<label>Filas por página <select name=\"size\">"
    ));
    for &size in bar.size_options() {
        let selected = if size == bar.page_size() {
            " selected"
        } else {
            ""
        };
        out.push_str(&format!("<option value=\"{size}\"{selected}>{size}</option>"));
    }
    out.push_str("</select></label> <button type=\"submit\">Aplicar</button></form></div>");
    out
}

fn nav_button(out: &mut String, base: &str, label: &str, target: Option<u32>) {
    match target {
        Some(page) => {
            out.push_str(&format!(
                "<form class=\"inline\" method=\"post\" action=\"{base}/page/{page}\">\
<button type=\"submit\">{label}</button></form> "
            ));
        }
        None => {
            out.push_str(&format!("<button type=\"button\" disabled>{label}</button> "));
        }
    }
}
