//! Server-rendered HTML fragments.
//!
//! Views are plain functions returning `String`. Every dynamic value goes
//! through [`Escaped`] before it reaches the markup.

mod forms;
pub mod instruments;
mod layout;
mod pagination;
mod table;
pub mod users;

use std::fmt;

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::{CACHE_CONTROL, ContentType};

pub use forms::{confirmation_page, notice_banner};
pub use layout::{Chrome, bare_page, error_page, loading_page, login_page, page};
pub use pagination::pagination_bar;
pub use table::table;

/// HTML-escaping display adapter.
///
/// ```
/// use console::inbound::http::view::Escaped;
///
/// assert_eq!(Escaped("<b>\"Tom\" & 'Jerry'</b>").to_string(),
///            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Escaped<'a>(pub &'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rest = self.0;
        while let Some(index) = rest.find(['&', '<', '>', '"', '\'']) {
            f.write_str(&rest[..index])?;
            let entity = match rest.as_bytes()[index] {
                b'&' => "&amp;",
                b'<' => "&lt;",
                b'>' => "&gt;",
                b'"' => "&quot;",
                _ => "&#39;",
            };
            f.write_str(entity)?;
            rest = &rest[index + 1..];
        }
        f.write_str(rest)
    }
}

/// Wrap rendered markup in an uncached HTML response.
#[must_use]
pub fn html(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::html())
        .insert_header((CACHE_CONTROL, "no-store"))
        .body(body)
}
