//! Request guards for protected pages.
//!
//! [`Authenticated`] admits any signed-in visitor; [`Admin`] additionally
//! requires the `ADMIN` realm role. Rejections render the loading
//! placeholder, redirect to login, or show the no-permission view.

use std::fmt;
use std::future::{Ready, ready};
use std::sync::Arc;

use actix_session::SessionExt;
use actix_web::http::header::LOCATION;
use actix_web::http::{Method, StatusCode};
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload, web};
use tracing::debug;

use super::console_sessions::ConsoleSession;
use super::session::SessionContext;
use super::state::HttpState;
use super::view::{Chrome, html, loading_page, page};
use crate::domain::Error;
use crate::domain::auth::BearerToken;
use crate::domain::guard::{GuardDecision, NO_PERMISSION_MESSAGE, decide};
use crate::domain::role::ROLE_ADMIN;

/// Why a guard refused the request.
#[derive(Debug)]
pub enum GuardRejection {
    /// The session is still resolving.
    Loading { path: String },
    /// No usable session; go to login.
    Login { location: String },
    /// Signed in without the required role.
    Forbidden {
        display_name: Option<String>,
        path: String,
    },
    /// The guard itself failed.
    Internal(Error),
}

impl fmt::Display for GuardRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading { path } => write!(f, "session resolving for {path}"),
            Self::Login { location } => write!(f, "login required: {location}"),
            Self::Forbidden { path, .. } => write!(f, "missing role for {path}"),
            Self::Internal(error) => write!(f, "guard failed: {error}"),
        }
    }
}

impl ResponseError for GuardRejection {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Loading { .. } => StatusCode::OK,
            Self::Login { .. } => StatusCode::SEE_OTHER,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::Internal(error) => error.status_code(),
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::Loading { path } => html(StatusCode::OK, loading_page(path)),
            Self::Login { location } => HttpResponse::SeeOther()
                .insert_header((LOCATION, location.as_str()))
                .finish(),
            Self::Forbidden { display_name, path } => {
                let chrome = Chrome {
                    display_name: display_name.as_deref(),
                    current_path: path,
                };
                let body = format!("<p>{NO_PERMISSION_MESSAGE}</p>");
                html(StatusCode::FORBIDDEN, page("Sin permisos", &chrome, &body))
            }
            Self::Internal(error) => error.error_response(),
        }
    }
}

/// A signed-in visitor and their console session.
pub struct Authenticated {
    session: Arc<ConsoleSession>,
    path: String,
}

impl Authenticated {
    #[must_use]
    pub fn session(&self) -> &ConsoleSession {
        &self.session
    }

    /// Path of the current request.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Header and sidebar values for this visitor.
    #[must_use]
    pub fn chrome<'a>(&'a self, display_name: Option<&'a str>) -> Chrome<'a> {
        Chrome {
            display_name,
            current_path: &self.path,
        }
    }

    /// Current access token for backend calls.
    ///
    /// # Errors
    /// Returns [`Error::unauthorized`] if the session demoted itself after
    /// the guard admitted the request.
    pub fn bearer(&self) -> Result<BearerToken, Error> {
        self.session
            .auth()
            .bearer()
            .ok_or_else(|| Error::unauthorized("La sesión ha caducado"))
    }

    /// Render `body` inside the page shell.
    #[must_use]
    pub fn render(&self, title: &str, body: &str) -> HttpResponse {
        let name = self.session.auth().display_name();
        html(
            StatusCode::OK,
            page(title, &self.chrome(name.as_deref()), body),
        )
    }

    fn from_http(req: &HttpRequest) -> Result<Self, GuardRejection> {
        let state = req
            .app_data::<web::Data<HttpState>>()
            .ok_or_else(|| GuardRejection::Internal(Error::internal("http state not configured")))?;
        let context = SessionContext::new(req.get_session());
        let id = context.console_session_id();
        let session = id.and_then(|id| state.sessions.get(id));
        let requested = return_target(req);
        match decide(session.as_ref().map(|s| s.auth().status()), &requested) {
            GuardDecision::Allow => match session {
                Some(session) => Ok(Self {
                    session,
                    path: req.path().to_owned(),
                }),
                None => Err(GuardRejection::Internal(Error::internal(
                    "allowed request without a session",
                ))),
            },
            GuardDecision::Loading => Err(GuardRejection::Loading { path: requested }),
            GuardDecision::RedirectToLogin { location } => {
                if let Some(id) = id {
                    debug!(session = %id, "discarding unauthenticated console session");
                    state.sessions.remove(id);
                    context.clear();
                }
                Err(GuardRejection::Login { location })
            }
        }
    }
}

/// Where to come back to after login. Form posts return to their page.
fn return_target(req: &HttpRequest) -> String {
    if req.method() == Method::GET {
        return req
            .uri()
            .path_and_query()
            .map_or_else(|| req.path().to_owned(), ToString::to_string);
    }
    let mut target = String::new();
    for segment in req.path().split('/').filter(|s| !s.is_empty()).take(2) {
        target.push('/');
        target.push_str(segment);
    }
    if target.is_empty() {
        target.push('/');
    }
    target
}

impl FromRequest for Authenticated {
    type Error = GuardRejection;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::from_http(req))
    }
}

/// A signed-in visitor holding the `ADMIN` role.
pub struct Admin(pub Authenticated);

impl FromRequest for Admin {
    type Error = GuardRejection;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Authenticated::from_http(req).and_then(|visitor| {
            let auth = visitor.session().auth();
            if auth.has_role(ROLE_ADMIN) {
                Ok(Self(visitor))
            } else {
                Err(GuardRejection::Forbidden {
                    display_name: auth.display_name(),
                    path: visitor.path,
                })
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Method::GET, "/admin/users?page=2", "/admin/users?page=2")]
    #[case(Method::POST, "/admin/users/7/delete", "/admin/users")]
    #[case(Method::POST, "/logout", "/logout")]
    fn return_targets_point_at_pages(
        #[case] method: Method,
        #[case] uri: &str,
        #[case] expected: &str,
    ) {
        let req = TestRequest::default().method(method).uri(uri).to_http_request();
        assert_eq!(return_target(&req), expected);
    }

    #[test]
    fn forbidden_renders_the_no_permission_view() {
        let rejection = GuardRejection::Forbidden {
            display_name: Some("luis".into()),
            path: "/admin/users".into(),
        };
        let response = rejection.error_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn login_rejections_redirect() {
        let rejection = GuardRejection::Login {
            location: "/login?from=%2Fdashboard".into(),
        };
        let response = rejection.error_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(LOCATION).and_then(|v| v.to_str().ok()),
            Some("/login?from=%2Fdashboard")
        );
    }
}
