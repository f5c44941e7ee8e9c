//! HTTP inbound adapter serving the console pages.

pub mod auth;
pub mod console_sessions;
pub mod error;
pub mod guard;
pub mod health;
pub mod instruments;
mod list_actions;
pub mod pages;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod view;

use actix_web::HttpResponse;
use actix_web::http::header::LOCATION;

pub use error::PageResult;

/// `303 See Other` to `location`, the post/redirect/get answer of every
/// form post.
pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, location))
        .finish()
}
