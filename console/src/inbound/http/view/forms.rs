//! Shared form fragments: notices, inputs and confirmation pages.

use super::Escaped;
use crate::domain::listing::{Notice, NoticeKind};

/// Banner for the page notice, if any.
#[must_use]
pub fn notice_banner(notice: Option<&Notice>) -> String {
    notice.map_or_else(String::new, |notice| {
        let role = match notice.kind() {
            NoticeKind::Invalid => "status",
            NoticeKind::LoadFailed | NoticeKind::Conflict | NoticeKind::Failed => "alert",
        };
        format!(
            "<div class=\"notice\" role=\"{role}\">{}</div>",
            Escaped(notice.message())
        )
    })
}

/// Labelled text input.
pub(super) fn text_input(label: &str, name: &str, value: &str, kind: &str) -> String {
    format!(
        "<p><label>{} <input type=\"{kind}\" name=\"{name}\" value=\"{}\"></label></p>",
        Escaped(label),
        Escaped(value)
    )
}

/// Confirmation step for a destructive action: re-posts to `action` with
/// `confirm=true`, or returns to `cancel`.
#[must_use]
pub fn confirmation_page(prompt: &str, action: &str, cancel: &str) -> String {
    format!(
        "<p>{}</p><form class=\"inline\" method=\"post\" action=\"{}\">\
<input type=\"hidden\" name=\"confirm\" value=\"true\">\
<button type=\"submit\" class=\"danger\">Confirmar</button></form> \
<a href=\"{}\">Cancelar</a>",
        Escaped(prompt),
        Escaped(action),
        Escaped(cancel)
    )
}
