//! In-process stub of the ticket backend used by the integration tests.
//!
//! The stub mirrors the backend's reply shapes: JSON `message` on success,
//! JSON `error` on failure, a `SESSION` cookie set by `/login` and cleared by
//! `/logout`, and an empty 400 body for incomplete registrations.

#![allow(dead_code)]

use actix_web::cookie::Cookie;
use actix_web::dev::ServerHandle;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A request as the stub received it
#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub content_type: Option<String>,
    pub session: Option<String>,
    pub body: String,
}

#[derive(Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<Recorded>>>);

impl Recorder {
    pub fn requests(&self) -> Vec<Recorded> {
        self.0.lock().unwrap().clone()
    }

    pub fn last_for(&self, path: &str) -> Option<Recorded> {
        self.requests().into_iter().rev().find(|r| r.path == path)
    }

    fn push(&self, req: &HttpRequest, body: &web::Bytes) -> Recorded {
        let recorded = Recorded {
            path: req.path().to_string(),
            content_type: req
                .headers()
                .get("content-type")
                .and_then(|h| h.to_str().ok())
                .map(|s| s.to_string()),
            session: req.cookie("SESSION").map(|c| c.value().to_string()),
            body: String::from_utf8_lossy(body).into_owned(),
        };
        self.0.lock().unwrap().push(recorded.clone());
        recorded
    }
}

pub struct StubBackend {
    pub base_url: String,
    pub recorder: Recorder,
    handle: ServerHandle,
}

impl StubBackend {
    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

fn form_value(body: &str, key: &str) -> String {
    url::form_urlencoded::parse(body.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
        .unwrap_or_default()
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized()
        .json(json!({ "error": "Unauthorized: Full authentication is required" }))
}

async fn login(req: HttpRequest, body: web::Bytes, recorder: web::Data<Recorder>) -> HttpResponse {
    let recorded = recorder.push(&req, &body);
    let username = form_value(&recorded.body, "username");
    let password = form_value(&recorded.body, "password");

    if password == "wrong" {
        return HttpResponse::Unauthorized().json(json!({ "error": "invalid credentials" }));
    }

    let reply = match (username.as_str(), password.as_str()) {
        ("ops_lead", _) => json!({ "message": "ok", "role": "ROLE_ENGINEER" }),
        ("field_lead", _) => json!({ "message": "ok", "role": ["ROLE_ENGINEER"] }),
        (_, "as-customer") => json!({ "message": "ok", "role": "CUSTOMER" }),
        _ => json!({ "message": "ok" }),
    };

    HttpResponse::Ok()
        .cookie(Cookie::build("SESSION", username).path("/").finish())
        .json(reply)
}

async fn logout(req: HttpRequest, body: web::Bytes, recorder: web::Data<Recorder>) -> HttpResponse {
    recorder.push(&req, &body);
    let mut removal = Cookie::build("SESSION", "").path("/").finish();
    removal.make_removal();

    HttpResponse::Ok()
        .cookie(removal)
        .json(json!({ "message": "Logged out successfully." }))
}

async fn customers(
    req: HttpRequest,
    body: web::Bytes,
    recorder: web::Data<Recorder>,
) -> HttpResponse {
    let recorded = recorder.push(&req, &body);
    if recorded.session.is_none() {
        return unauthorized();
    }

    let payload: serde_json::Value = serde_json::from_str(&recorded.body).unwrap_or_default();
    let username = payload["username"].as_str().unwrap_or_default();
    let password = payload["password"].as_str().unwrap_or_default();
    if username.trim().is_empty() || password.trim().is_empty() {
        return HttpResponse::BadRequest().finish();
    }

    HttpResponse::Ok().json(json!({ "message": format!("Customer {username} registered") }))
}

async fn tickets(
    req: HttpRequest,
    body: web::Bytes,
    recorder: web::Data<Recorder>,
) -> HttpResponse {
    let recorded = recorder.push(&req, &body);
    if recorded.session.is_none() {
        return unauthorized();
    }

    HttpResponse::Created().json(json!({ "message": "Ticket created" }))
}

async fn broken(req: HttpRequest, body: web::Bytes, recorder: web::Data<Recorder>) -> HttpResponse {
    recorder.push(&req, &body);
    HttpResponse::BadGateway()
        .content_type("text/html")
        .body("<html>Bad Gateway</html>")
}

async fn silent(req: HttpRequest, body: web::Bytes, recorder: web::Data<Recorder>) -> HttpResponse {
    recorder.push(&req, &body);
    HttpResponse::Ok().finish()
}

async fn slow(req: HttpRequest, body: web::Bytes, recorder: web::Data<Recorder>) -> HttpResponse {
    recorder.push(&req, &body);
    actix_web::rt::time::sleep(Duration::from_secs(3)).await;
    HttpResponse::Ok().json(json!({ "message": "too late" }))
}

/// Start the stub on an ephemeral port.
///
/// `{base_url}/broken/` answers every POST with HTML, `{base_url}/silent/`
/// with an empty 200 and `{base_url}/slow/` after three seconds.
pub async fn start() -> StubBackend {
    let recorder = Recorder::default();
    let data = web::Data::new(recorder.clone());

    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .route("/login", web::post().to(login))
            .route("/logout", web::post().to(logout))
            .route("/customers", web::post().to(customers))
            .route("/tickets", web::post().to(tickets))
            .service(web::scope("/broken").default_service(web::to(broken)))
            .service(web::scope("/silent").default_service(web::to(silent)))
            .service(web::scope("/slow").default_service(web::to(slow)))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("Failed to bind stub backend");

    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    StubBackend {
        base_url: format!("http://{addr}"),
        recorder,
        handle,
    }
}

/// A base URL nothing is listening on
pub fn closed_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind spare port");
    let addr = listener.local_addr().expect("Failed to read spare address");
    drop(listener);
    format!("http://{addr}")
}
