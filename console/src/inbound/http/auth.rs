//! Login, callback and logout handlers.
//!
//! `/login` starts an authorization-code flow with PKCE. The provider
//! redirects back to `/auth/callback`, which registers a resolving console
//! session and finishes the code exchange in the background. The browser
//! waits on `/auth/landing` until the session resolves.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use tracing::{info, warn};
use url::form_urlencoded;

use super::error::PageResult;
use super::see_other;
use super::guard::Authenticated;
use super::session::{LoginAttempt, SessionContext};
use super::state::HttpState;
use super::view::{html, login_page};
use crate::domain::auth::{code_challenge, generate_state, generate_verifier};
use crate::domain::guard::safe_return_path;
use crate::domain::navigation::landing_path;

const LANDING_PATH: &str = "/auth/landing";

#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    pub from: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    pub from: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// Login page. Already signed-in visitors go straight on.
#[get("/login")]
pub async fn login_form(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<LoginQuery>,
) -> HttpResponse {
    let from = safe_return_path(query.from.as_deref());
    let current = session
        .console_session_id()
        .and_then(|id| state.sessions.get(id));
    if let Some(current) = current.filter(|s| s.auth().is_authenticated()) {
        let auth = current.auth();
        let target = from.unwrap_or_else(|| landing_path(|role| auth.has_role(role)).to_owned());
        return see_other(&target);
    }
    html(
        StatusCode::OK,
        login_page(from.as_deref(), query.error.is_some()),
    )
}

/// Start the provider redirect.
#[post("/login")]
pub async fn start_login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> PageResult<HttpResponse> {
    let attempt = LoginAttempt {
        state: generate_state(),
        code_verifier: generate_verifier(),
        return_to: safe_return_path(form.from.as_deref()),
    };
    session.persist_login_attempt(&attempt)?;
    let url = state.identity.authorization_url(
        &attempt.state,
        &code_challenge(&attempt.code_verifier),
        state.callback_url(),
    );
    Ok(see_other(url.as_str()))
}

/// Provider redirect target.
#[get("/auth/callback")]
pub async fn callback(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<CallbackQuery>,
) -> PageResult<HttpResponse> {
    let attempt = session.take_login_attempt();
    let CallbackQuery {
        code,
        state: returned_state,
        error,
    } = query.into_inner();
    if let Some(error) = error {
        warn!(%error, "identity provider returned an error");
        return Ok(see_other("/login?error=provider"));
    }
    let (Some(attempt), Some(code)) = (attempt, code) else {
        warn!("callback without a pending login attempt or code");
        return Ok(see_other("/login?error=callback"));
    };
    if returned_state.as_deref() != Some(attempt.state.as_str()) {
        warn!("callback state does not match the login attempt");
        return Ok(see_other("/login?error=state"));
    }

    if let Some(previous) = session.console_session_id() {
        state.sessions.remove(previous);
    }
    let console = state.new_console_session();
    let id = state.sessions.insert(Arc::clone(&console));
    session.persist_console_session(id)?;
    info!(session = %id, "login callback accepted");

    let redirect_uri = state.callback_url().clone();
    let verifier = attempt.code_verifier;
    tokio::spawn(async move {
        console
            .auth()
            .complete_login(&code, &verifier, &redirect_uri)
            .await;
    });

    let mut target = String::from(LANDING_PATH);
    if let Some(return_to) = attempt.return_to {
        target.push_str("?from=");
        target.extend(form_urlencoded::byte_serialize(return_to.as_bytes()));
    }
    Ok(see_other(&target))
}

/// Post-login redirect once the session has resolved.
#[get("/auth/landing")]
pub async fn landing(visitor: Authenticated, query: web::Query<LoginQuery>) -> HttpResponse {
    let auth = visitor.session().auth();
    let target = safe_return_path(query.from.as_deref())
        .unwrap_or_else(|| landing_path(|role| auth.has_role(role)).to_owned());
    see_other(&target)
}

/// Tear the session down and leave through the provider's end-session
/// endpoint.
#[post("/logout")]
pub async fn logout(
    state: web::Data<HttpState>,
    session: SessionContext,
    visitor: Authenticated,
) -> HttpResponse {
    let id_token = visitor.session().auth().teardown();
    if let Some(id) = session.console_session_id() {
        state.sessions.remove(id);
    }
    session.clear();
    info!("logged out");
    let url = state.identity.end_session_url(
        id_token.as_ref().map(|token| token.expose()),
        state.logged_out_url(),
    );
    see_other(url.as_str())
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
