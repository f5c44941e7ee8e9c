//! In-process stand-in for a Keycloak realm's token endpoint.

use std::net::TcpListener;
use std::sync::{Mutex, PoisonError};

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpResponse, HttpServer, web};
use serde_json::json;
use url::{Url, form_urlencoded};

/// Realm served by the stub.
pub const REALM: &str = "banda";
/// The only authorization code the stub accepts.
pub const VALID_CODE: &str = "good-code";
/// Refresh token issued with every grant.
pub const REFRESH_TOKEN: &str = "refresh-1";

#[derive(Default)]
struct Stub {
    forms: Mutex<Vec<Vec<(String, String)>>>,
}

/// A running stub identity provider.
pub struct StubIdentity {
    base: Url,
    handle: ServerHandle,
    stub: web::Data<Stub>,
}

impl StubIdentity {
    /// Serve the token endpoint on an ephemeral port. Must run inside an
    /// Actix runtime.
    pub fn spawn() -> std::io::Result<Self> {
        let stub = web::Data::new(Stub::default());
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let addr = listener.local_addr()?;
        let data = stub.clone();
        let server = HttpServer::new(move || {
            App::new().app_data(data.clone()).route(
                &format!("/realms/{REALM}/protocol/openid-connect/token"),
                web::post().to(token),
            )
        })
        .disable_signals()
        .workers(1)
        .listen(listener)?
        .run();
        let handle = server.handle();
        actix_web::rt::spawn(server);
        let base = Url::parse(&format!("http://{addr}/")).map_err(std::io::Error::other)?;
        Ok(Self { base, handle, stub })
    }

    /// Server root; realms live below it.
    pub fn base(&self) -> Url {
        self.base.clone()
    }

    /// Form fields of the most recent token request.
    pub fn last_form(&self) -> Vec<(String, String)> {
        self.stub
            .forms
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
            .expect("stub received a token request")
    }

    pub async fn stop(&self) {
        self.handle.stop(true).await;
    }
}

fn grant(access_token: &str) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "access_token": access_token,
        "expires_in": 300,
        "refresh_expires_in": 1800,
        "refresh_token": REFRESH_TOKEN,
        "id_token": "id-1",
        "token_type": "Bearer",
        "scope": "openid profile email"
    }))
}

async fn token(body: web::Bytes, stub: web::Data<Stub>) -> HttpResponse {
    let form: Vec<(String, String)> = form_urlencoded::parse(&body).into_owned().collect();
    stub.forms
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(form.clone());
    let field = |name: &str| {
        form.iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    };
    match (field("grant_type"), field("code"), field("refresh_token")) {
        (Some("authorization_code"), Some(VALID_CODE), _) => grant("access-1"),
        (Some("refresh_token"), _, Some(REFRESH_TOKEN)) => grant("access-2"),
        _ => HttpResponse::BadRequest().json(json!({
            "error": "invalid_grant",
            "error_description": "Code not valid"
        })),
    }
}
