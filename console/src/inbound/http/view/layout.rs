//! Page shell: document skeleton, header and sidebar.

use super::Escaped;
use crate::domain::guard::LOADING_MESSAGE;
use crate::domain::navigation::MENU;

const BRAND: &str = "Gestión de Banda";

const STYLE: &str = "body{font-family:sans-serif;margin:0}\
header{display:flex;justify-content:space-between;align-items:center;\
padding:.5rem 1rem;background:#1f2937;color:#fff}\
.shell{display:flex;min-height:calc(100vh - 3rem)}\
nav{width:14rem;padding:1rem;background:#f3f4f6}\
nav h3{font-size:.8rem;text-transform:uppercase;color:#6b7280}\
nav a{display:block;padding:.25rem .5rem;color:#111;text-decoration:none}\
nav a.active{background:#dbeafe;font-weight:bold}\
main{flex:1;padding:1rem}\
table{border-collapse:collapse;width:100%}\
th,td{border-bottom:1px solid #e5e7eb;padding:.4rem;text-align:left}\
form.inline{display:inline}\
.notice{padding:.5rem;margin-bottom:1rem;border:1px solid #f59e0b;background:#fffbeb}\
.danger{color:#b91c1c}";

/// Per-request values the shell needs.
#[derive(Debug, Clone, Copy)]
pub struct Chrome<'a> {
    pub display_name: Option<&'a str>,
    pub current_path: &'a str,
}

/// Minimal HTML document without navigation.
#[must_use]
pub fn bare_page(title: &str, body: &str) -> String {
    document(title, "", body)
}

fn document(title: &str, head_extra: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html lang=\"es\"><head><meta charset=\"utf-8\">\
<title>{title} · {BRAND}</title>{head_extra}<style>{STYLE}</style></head>\
<body>{body}</body></html>",
        title = Escaped(title),
    )
}

/// Full page with header, sidebar and `body` as main content.
#[must_use]
pub fn page(title: &str, chrome: &Chrome<'_>, body: &str) -> String {
    let user = chrome.display_name.unwrap_or("");
    let mut shell = format!(
        "<header><strong>{BRAND}</strong><span>{user} \
<form class=\"inline\" method=\"post\" action=\"/logout\">\
<button type=\"submit\">Cerrar sesión</button></form></span></header>\
<div class=\"shell\"><nav>",
        user = Escaped(user),
    );
    for section in MENU {
        shell.push_str(&format!("<h3>{}</h3>", Escaped(section.title)));
        for link in section.links {
            let class = if link.is_active(chrome.current_path) {
                " class=\"active\""
            } else {
                ""
            };
            shell.push_str(&format!(
                "<a href=\"{}\"{class}>{}</a>",
                link.path,
                Escaped(link.label)
            ));
        }
    }
    shell.push_str(&format!("</nav><main><h1>{}</h1>{body}</main></div>", Escaped(title)));
    document(title, "", &shell)
}

/// Placeholder shown while the session resolves. Re-polls every second.
#[must_use]
pub fn loading_page(path: &str) -> String {
    let refresh = format!(
        "<meta http-equiv=\"refresh\" content=\"1;url={}\">",
        Escaped(path)
    );
    document(
        "Cargando",
        &refresh,
        &format!("<main><p>{LOADING_MESSAGE}</p></main>"),
    )
}

/// Login landing page. Submitting it starts the identity provider redirect.
#[must_use]
pub fn login_page(from: Option<&str>, failed: bool) -> String {
    let hidden = from.map_or_else(String::new, |from| {
        format!(
            "<input type=\"hidden\" name=\"from\" value=\"{}\">",
            Escaped(from)
        )
    });
    let notice = if failed {
        "<div class=\"notice\">No se pudo iniciar sesión. Inténtalo de nuevo.</div>"
    } else {
        ""
    };
    bare_page(
        "Acceso",
        &format!(
            "<main><h1>{BRAND}</h1>{notice}<form method=\"post\" action=\"/login\">{hidden}\
<button type=\"submit\">Iniciar sesión</button></form></main>"
        ),
    )
}

/// Error page body with optional trace id for support requests.
#[must_use]
pub fn error_page(status: u16, message: &str, trace_id: Option<&str>) -> String {
    let trace = trace_id.map_or_else(String::new, |id| {
        format!("<p><small>Referencia: {}</small></p>", Escaped(id))
    });
    bare_page(
        "Error",
        &format!(
            "<main><h1>Error {status}</h1><p>{}</p>{trace}<p><a href=\"/dashboard\">Volver</a></p></main>",
            Escaped(message)
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_link_is_highlighted() {
        let html = page(
            "Usuarios",
            &Chrome {
                display_name: Some("ana"),
                current_path: "/admin/users",
            },
            "",
        );
        assert!(html.contains("<a href=\"/admin/users\" class=\"active\">Usuarios</a>"));
        assert!(html.contains("<a href=\"/admin/instruments\">Instrumentos</a>"));
        assert!(html.contains("ana"));
    }

    #[test]
    fn display_name_is_escaped() {
        let html = page(
            "Dashboard",
            &Chrome {
                display_name: Some("<script>"),
                current_path: "/dashboard",
            },
            "",
        );
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn login_page_carries_the_return_path() {
        let html = login_page(Some("/admin/users?x=1&y=2"), false);
        assert!(html.contains("value=\"/admin/users?x=1&amp;y=2\""));
    }

    #[test]
    fn loading_page_polls_the_requested_path() {
        let html = loading_page("/dashboard");
        assert!(html.contains("content=\"1;url=/dashboard\""));
        assert!(html.contains(LOADING_MESSAGE));
    }
}
