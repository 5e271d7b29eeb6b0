// Shared test helpers: an axum stub of the monitor backend bound to 127.0.0.1:0.
#![allow(dead_code)]

use axum::extract::{Form, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const SESSION_COOKIE: &str = "session=ok";

/// Canned bodies served by the stub; raw strings so tests can serve malformed JSON.
pub struct Responses {
    pub bandwidth: String,
    pub ping: String,
    pub uptime: String,
    pub ping_logs: String,
    pub uptime_logs: String,
    pub bandwidth_history: String,
    /// Redirect `/api/*` to `/login` unless the session cookie is present.
    pub require_session: bool,
    pub ping_targets: Vec<String>,
    pub uptime_urls: Vec<String>,
    pub hits: HashMap<&'static str, usize>,
}

impl Default for Responses {
    fn default() -> Self {
        Self {
            bandwidth: r#"{"download": 87.456, "upload": 21.1}"#.into(),
            ping: r#"{"avg_latency": 23.5, "packet_loss": 0.0}"#.into(),
            uptime: r#"{"url": "example.com", "status": "Online"}"#.into(),
            ping_logs: "[]".into(),
            uptime_logs: "[]".into(),
            bandwidth_history: "[]".into(),
            require_session: false,
            ping_targets: vec![],
            uptime_urls: vec![],
            hits: HashMap::new(),
        }
    }
}

#[derive(Clone)]
pub struct StubBackend {
    pub state: Arc<Mutex<Responses>>,
    pub base_url: String,
}

impl StubBackend {
    pub async fn start() -> Self {
        let state = Arc::new(Mutex::new(Responses::default()));
        let app = Router::new()
            .route("/login", post(login))
            .route("/api/simulate_bandwidth", post(simulate_bandwidth))
            .route("/api/ping", post(ping))
            .route("/api/uptime", post(uptime))
            .route("/api/logs/ping", get(ping_logs))
            .route("/api/logs/uptime", get(uptime_logs))
            .route("/api/bandwidth/history", get(bandwidth_history))
            .with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self {
            state,
            base_url: format!("http://{}", addr),
        }
    }

    pub fn set(&self, f: impl FnOnce(&mut Responses)) {
        f(&mut *self.state.lock().unwrap());
    }

    pub fn hits(&self, route: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .hits
            .get(route)
            .copied()
            .unwrap_or(0)
    }

    pub fn ping_targets(&self) -> Vec<String> {
        self.state.lock().unwrap().ping_targets.clone()
    }
}

/// Base URL with nothing listening on it.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

type Shared = Arc<Mutex<Responses>>;

fn json_body(body: String) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

/// Count the hit and return the body, or a login redirect when the session is missing.
fn serve(
    state: &Shared,
    headers: &HeaderMap,
    route: &'static str,
    pick: impl FnOnce(&Responses) -> String,
) -> Response {
    let mut s = state.lock().unwrap();
    *s.hits.entry(route).or_insert(0) += 1;
    let has_session = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|c| c.contains(SESSION_COOKIE));
    if s.require_session && !has_session {
        return (StatusCode::FOUND, [(header::LOCATION, "/login")]).into_response();
    }
    json_body(pick(&*s))
}

async fn login(Form(form): Form<HashMap<String, String>>) -> Response {
    let ok = form.get("username").map(String::as_str) == Some("admin")
        && form.get("password").map(String::as_str) == Some("secret");
    if ok {
        (
            StatusCode::FOUND,
            [
                (header::LOCATION, "/dashboard"),
                (header::SET_COOKIE, "session=ok; Path=/"),
            ],
        )
            .into_response()
    } else {
        (StatusCode::OK, "<html>Invalid credentials.</html>").into_response()
    }
}

async fn simulate_bandwidth(State(state): State<Shared>, headers: HeaderMap) -> Response {
    serve(&state, &headers, "simulate_bandwidth", |r| r.bandwidth.clone())
}

async fn ping(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Response {
    if let Some(target) = body.get("target").and_then(|v| v.as_str()) {
        state.lock().unwrap().ping_targets.push(target.to_string());
    }
    serve(&state, &headers, "ping", |r| r.ping.clone())
}

async fn uptime(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Response {
    if let Some(url) = body.get("url").and_then(|v| v.as_str()) {
        state.lock().unwrap().uptime_urls.push(url.to_string());
    }
    serve(&state, &headers, "uptime", |r| r.uptime.clone())
}

async fn ping_logs(State(state): State<Shared>, headers: HeaderMap) -> Response {
    serve(&state, &headers, "ping_logs", |r| r.ping_logs.clone())
}

async fn uptime_logs(State(state): State<Shared>, headers: HeaderMap) -> Response {
    serve(&state, &headers, "uptime_logs", |r| r.uptime_logs.clone())
}

async fn bandwidth_history(State(state): State<Shared>, headers: HeaderMap) -> Response {
    serve(&state, &headers, "bandwidth_history", |r| {
        r.bandwidth_history.clone()
    })
}
