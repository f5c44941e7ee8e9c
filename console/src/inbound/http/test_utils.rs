//! Test helpers for inbound HTTP components.

use std::sync::Arc;
use std::time::Duration;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use actix_web::{App, Error, test, web};
use mockable::DefaultClock;
use url::Url;

use super::health::HealthState;
use super::state::{HttpState, HttpStatePorts};
use crate::domain::auth::RefreshPolicy;
use crate::domain::ports::{MockInstrumentsApi, MockRolesApi, MockUsersApi};
use crate::server::{AppDependencies, build_app};
use crate::test_support::FixtureIdentityProvider;

/// Session middleware with a fresh key and an insecure `session` cookie.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Bare app wrapped in [`test_session_middleware`].
pub fn session_test_app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = Error,
        InitError = (),
    >,
> {
    App::new().wrap(test_session_middleware())
}

/// The `session` cookie set by `response`.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Authorization code accepted by [`fixture_identity`].
pub const FIXTURE_CODE: &str = "fixture-code";

/// Identity provider issuing tokens for `username` with `roles`.
pub fn fixture_identity(username: &str, roles: &[&str]) -> FixtureIdentityProvider {
    FixtureIdentityProvider::new(FIXTURE_CODE, username, roles)
}

/// Mocked backend ports for handler tests.
#[derive(Default)]
pub struct MockPorts {
    pub users: MockUsersApi,
    pub roles: MockRolesApi,
    pub instruments: MockInstrumentsApi,
}

/// Handler state over mocked backend ports.
pub fn console_state(ports: MockPorts, identity: FixtureIdentityProvider) -> web::Data<HttpState> {
    console_state_with_policy(ports, identity, RefreshPolicy::default())
}

/// [`console_state`] with a custom token refresh policy.
pub fn console_state_with_policy(
    ports: MockPorts,
    identity: FixtureIdentityProvider,
    policy: RefreshPolicy,
) -> web::Data<HttpState> {
    let MockPorts {
        users,
        roles,
        instruments,
    } = ports;
    let public_url = Url::parse("http://console.test/").expect("public url");
    let state = HttpState::new(
        HttpStatePorts {
            users: Arc::new(users),
            roles: Arc::new(roles),
            instruments: Arc::new(instruments),
            identity: Arc::new(identity),
        },
        Arc::new(DefaultClock),
        policy,
        &public_url,
    )
    .expect("state");
    web::Data::new(state)
}

/// The full console application over `state`, with insecure cookies.
pub fn console_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = Error,
        InitError = (),
    >,
> {
    build_app(AppDependencies {
        health_state: web::Data::new(HealthState::new()),
        http_state: state,
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    })
}

/// `Location` header of a redirect.
pub fn location<B>(response: &ServiceResponse<B>) -> String {
    response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("location header")
        .to_owned()
}

/// Read a response body as text.
pub async fn body_text(response: ServiceResponse) -> String {
    let bytes = test::read_body(response).await;
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

/// Run the login flow against `app` and return the resolved session
/// cookie.
pub async fn sign_in<S>(app: &S) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse, Error = Error>,
{
    let start = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/login")
            .set_form([("from", "")])
            .to_request(),
    )
    .await;
    let pending = session_cookie(&start);
    let authorize = Url::parse(&location(&start)).expect("authorization url");
    let state = authorize
        .query_pairs()
        .find(|(name, _)| name == "state")
        .map(|(_, value)| value.into_owned())
        .expect("state parameter");

    let callback = test::call_service(
        app,
        test::TestRequest::get()
            .uri(&format!("/auth/callback?code={FIXTURE_CODE}&state={state}"))
            .cookie(pending)
            .to_request(),
    )
    .await;
    let cookie = session_cookie(&callback);

    for _ in 0..100 {
        let landing = test::call_service(
            app,
            test::TestRequest::get()
                .uri("/auth/landing")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        if landing.status() == StatusCode::SEE_OTHER {
            return cookie;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("session never resolved");
}
