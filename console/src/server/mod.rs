//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{ConsoleSettings, SettingsError};
pub use state_builders::build_http_state;

use std::net::SocketAddr;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use crate::Trace;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::pages::{
    admin_events, admin_surveys, dashboard, my_events, my_surveys, to_dashboard,
};
use crate::inbound::http::session_config::SessionSettings;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{auth, instruments, users};

/// Cookie and socket settings for the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
}

impl ServerConfig {
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
        }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

/// Everything one worker's [`App`] needs.
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

/// Assemble the console application: session cookie, tracing middleware
/// and every page route.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    // Literal segments (sort, page, size, save) are registered ahead of the
    // `{id}` routes sharing their prefix.
    let user_routes = (
        users::list,
        users::search,
        users::sort,
        users::go_to_page,
        users::resize,
        users::cancel,
        users::save,
        users::view,
        users::edit,
        users::toggle_active,
        users::delete,
    );
    let instrument_routes = (
        instruments::list,
        instruments::search,
        instruments::sort,
        instruments::go_to_page,
        instruments::resize,
        instruments::cancel,
        instruments::open_create,
        instruments::save,
        instruments::edit,
        instruments::delete,
    );

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(session)
        .wrap(Trace)
        .service(ready)
        .service(live)
        .service(auth::login_form)
        .service(auth::start_login)
        .service(auth::callback)
        .service(auth::landing)
        .service(auth::logout)
        .service(dashboard)
        .service(admin_events)
        .service(admin_surveys)
        .service(my_events)
        .service(my_surveys)
        .service(user_routes)
        .service(instrument_routes)
        .route("/", web::get().to(to_dashboard))
        .default_service(web::to(to_dashboard))
}

/// Construct an Actix HTTP server for the console.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
