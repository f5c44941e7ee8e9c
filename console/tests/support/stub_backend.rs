//! In-process stand-in for the band backend REST API.
//!
//! Serves a fixed roster of musicians under `/api`, pages and sorts them the
//! way the real backend does, and records every request it receives.

use std::net::TcpListener;
use std::sync::{Mutex, PoisonError};

use actix_web::dev::ServerHandle;
use actix_web::http::Method;
use actix_web::http::header::{AUTHORIZATION, HeaderName, IF_MATCH};
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use serde_json::{Value, json};
use url::{Url, form_urlencoded};

const FIRST_NAMES: [&str; 5] = ["Ana", "Luis", "Marta", "Pablo", "Lucía"];
const CURRENT_VERSION: &str = "W/\"1\"";
const EXPIRED_AUTHORIZATION: &str = "Bearer expired";

/// A request as the stub saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub authorization: Option<String>,
    pub if_match: Option<String>,
}

impl Recorded {
    fn from_request(req: &HttpRequest) -> Self {
        let header = |name: HeaderName| {
            req.headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned)
        };
        Self {
            method: req.method().clone(),
            path: req.path().to_owned(),
            query: form_urlencoded::parse(req.query_string().as_bytes())
                .into_owned()
                .collect(),
            authorization: header(AUTHORIZATION),
            if_match: header(IF_MATCH),
        }
    }

    /// Every value sent for query parameter `name`.
    pub fn values(&self, name: &str) -> Vec<&str> {
        self.query
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .collect()
    }

    fn first(&self, name: &str) -> Option<&str> {
        self.values(name).into_iter().next()
    }
}

struct Stub {
    users: Vec<Value>,
    requests: Mutex<Vec<Recorded>>,
}

/// A running stub backend.
pub struct StubBackend {
    base: Url,
    handle: ServerHandle,
    stub: web::Data<Stub>,
}

impl StubBackend {
    /// Serve `count` musicians on an ephemeral port. Must run inside an
    /// Actix runtime.
    pub fn spawn(count: usize) -> std::io::Result<Self> {
        let stub = web::Data::new(Stub {
            users: (1..=count).map(user).collect(),
            requests: Mutex::new(Vec::new()),
        });
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let addr = listener.local_addr()?;
        let data = stub.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .default_service(web::to(respond))
        })
        .disable_signals()
        .workers(1)
        .listen(listener)?
        .run();
        let handle = server.handle();
        actix_web::rt::spawn(server);
        let base = Url::parse(&format!("http://{addr}/api/")).map_err(std::io::Error::other)?;
        Ok(Self { base, handle, stub })
    }

    /// API base URL, ending in `/api/`.
    pub fn base(&self) -> Url {
        self.base.clone()
    }

    /// Every request received so far.
    pub fn requests(&self) -> Vec<Recorded> {
        self.stub
            .requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent request.
    pub fn last(&self) -> Recorded {
        self.requests().pop().expect("stub received a request")
    }

    pub async fn stop(&self) {
        self.handle.stop(true).await;
    }
}

fn user(n: usize) -> Value {
    json!({
        "id": n,
        "version": 1,
        "username": format!("musico{n:02}"),
        "iamId": format!("iam-{n}"),
        "firstName": FIRST_NAMES[n % FIRST_NAMES.len()],
        "lastName": "Pérez",
        "secondLastName": null,
        "email": format!("musico{n:02}@banda.test"),
        "birthDate": "1990-05-17",
        "bandJoinDate": null,
        "systemSignupDate": "2024-01-02",
        "phone": null,
        "notes": null,
        "profilePictureUrl": null,
        "active": true,
        "roles": ["MUSICIAN"],
        "instruments": []
    })
}

fn page_of(mut rows: Vec<Value>, request: &Recorded) -> Value {
    if let Some((field, direction)) = request.first("sort").and_then(|s| s.split_once(',')) {
        rows.sort_by(|a, b| a[field].as_str().cmp(&b[field].as_str()));
        if direction == "desc" {
            rows.reverse();
        }
    }
    let page: usize = request.first("page").and_then(|p| p.parse().ok()).unwrap_or(0);
    let size: usize = request
        .first("size")
        .and_then(|s| s.parse().ok())
        .unwrap_or(10)
        .max(1);
    let total = rows.len();
    let total_pages = total.div_ceil(size);
    let content: Vec<Value> = rows.into_iter().skip(page * size).take(size).collect();
    json!({
        "content": content,
        "page": page,
        "size": size,
        "totalElements": total,
        "totalPages": total_pages,
        "first": page == 0,
        "last": page + 1 >= total_pages
    })
}

fn find(stub: &Stub, id: &str) -> Option<Value> {
    stub.users
        .iter()
        .find(|user| user["id"].as_u64().map(|n| n.to_string()).as_deref() == Some(id))
        .cloned()
}

fn conditional(request: &Recorded, stub: &Stub, id: &str) -> HttpResponse {
    if find(stub, id).is_none() {
        return HttpResponse::NotFound().finish();
    }
    if request.if_match.as_deref() == Some(CURRENT_VERSION) {
        HttpResponse::NoContent().finish()
    } else {
        HttpResponse::PreconditionFailed().body("version mismatch")
    }
}

async fn respond(req: HttpRequest, stub: web::Data<Stub>) -> HttpResponse {
    let request = Recorded::from_request(&req);
    stub.requests
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(request.clone());
    if request.authorization.as_deref() == Some(EXPIRED_AUTHORIZATION) {
        return HttpResponse::Unauthorized().finish();
    }

    let segments: Vec<&str> = request
        .path
        .trim_start_matches("/api/")
        .split('/')
        .collect();
    match (request.method.as_str(), segments.as_slice()) {
        ("GET", ["users"]) => HttpResponse::Ok().json(page_of(stub.users.clone(), &request)),
        ("GET", ["users", "search"]) => {
            let wanted = request.first("firstName").unwrap_or_default().to_lowercase();
            let rows = stub
                .users
                .iter()
                .filter(|u| {
                    u["firstName"]
                        .as_str()
                        .is_some_and(|name| name.to_lowercase().contains(&wanted))
                })
                .cloned()
                .collect();
            HttpResponse::Ok().json(page_of(rows, &request))
        }
        ("GET", ["users", id]) => match find(&stub, id) {
            Some(mut found) => {
                found["active"] = json!(false);
                found["version"] = json!(2);
                HttpResponse::Ok().json(found)
            }
            None => HttpResponse::NotFound().finish(),
        },
        ("DELETE", ["users", id]) | ("PUT", ["users", id, "enable" | "disable"]) => {
            conditional(&request, &stub, id)
        }
        ("GET", ["roles"]) => HttpResponse::Ok().json(json!([
            { "id": "r-admin", "name": "ADMIN", "description": "Administración" },
            { "id": "r-musician", "name": "MUSICIAN" }
        ])),
        _ => HttpResponse::NotFound().finish(),
    }
}
