//! In-process fake docgen service for integration tests.
#![allow(dead_code)]
//!
//! Serves the five routes of the wire contract on an ephemeral port with
//! scripted responses and hit counters, so tests can assert exactly which
//! requests the orchestrator issued.

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use axum::Router;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use serde_json::{Value, json};

/// One scripted reply for `GET /status/{job_id}`.
#[derive(Clone)]
pub enum Scripted {
    /// 200 with this body.
    Ok(Value),
    /// 500 with a detail body, simulating a blip.
    Error,
}

pub struct ServiceState {
    pub statuses: Mutex<VecDeque<Scripted>>,
    pub status_hits: AtomicUsize,
    pub submit_hits: AtomicUsize,
    pub repos_hits: AtomicUsize,
    pub last_submission: Mutex<Option<Value>>,
    /// When set, `POST /start-generation` answers 500.
    pub fail_submission: AtomicBool,
    /// Body for `POST /list-branches`; `None` answers 500.
    pub branches: Mutex<Option<Value>>,
    /// Token expected on `GET /github/repos`.
    pub expected_token: Mutex<Option<String>>,
    /// Body served by `GET /download/{job_id}`.
    pub artifact: Mutex<Vec<u8>>,
}

impl Default for ServiceState {
    fn default() -> Self {
        Self {
            statuses: Mutex::new(VecDeque::new()),
            status_hits: AtomicUsize::new(0),
            submit_hits: AtomicUsize::new(0),
            repos_hits: AtomicUsize::new(0),
            last_submission: Mutex::new(None),
            fail_submission: AtomicBool::new(false),
            branches: Mutex::new(None),
            expected_token: Mutex::new(None),
            artifact: Mutex::new(b"# Repository Documentation\n".to_vec()),
        }
    }
}

pub struct FakeDocgen {
    pub addr: SocketAddr,
    pub state: Arc<ServiceState>,
}

impl FakeDocgen {
    pub async fn spawn(state: ServiceState) -> Self {
        let state = Arc::new(state);
        let app = Router::new()
            .route("/list-branches", post(list_branches))
            .route("/start-generation", post(start_generation))
            .route("/status/{job_id}", get(job_status))
            .route("/download/{job_id}", get(download))
            .route("/github/repos", get(github_repos))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake service");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake service");
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> url::Url {
        url::Url::parse(&format!("http://{}", self.addr)).expect("base url")
    }

    /// Scripts the status sequence; the final entry repeats if polled again.
    pub fn script_statuses(&self, statuses: impl IntoIterator<Item = Scripted>) {
        let mut queue = self.state.statuses.lock().unwrap();
        queue.clear();
        queue.extend(statuses);
    }

    pub fn status_hits(&self) -> usize {
        self.state.status_hits.load(Ordering::SeqCst)
    }

    pub fn submit_hits(&self) -> usize {
        self.state.submit_hits.load(Ordering::SeqCst)
    }
}

pub fn status_ok(status: &str, progress: u8) -> Scripted {
    Scripted::Ok(json!({ "status": status, "progress": progress }))
}

pub fn status_failed(error: &str) -> Scripted {
    Scripted::Ok(json!({ "status": "Failed", "progress": 0, "error": error }))
}

async fn list_branches(State(state): State<Arc<ServiceState>>) -> impl IntoResponse {
    match state.branches.lock().unwrap().clone() {
        Some(body) => (StatusCode::OK, axum::Json(body)),
        None => (
            StatusCode::INTERNAL_SERVER_ERROR,
            axum::Json(json!({ "detail": "could not reach repository" })),
        ),
    }
}

async fn start_generation(
    State(state): State<Arc<ServiceState>>,
    axum::Json(body): axum::Json<Value>,
) -> impl IntoResponse {
    state.submit_hits.fetch_add(1, Ordering::SeqCst);
    *state.last_submission.lock().unwrap() = Some(body);
    if state.fail_submission.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            axum::Json(json!({ "detail": "worker pool exhausted" })),
        );
    }
    (StatusCode::OK, axum::Json(json!({ "job_id": "abc123" })))
}

async fn job_status(
    State(state): State<Arc<ServiceState>>,
    Path(job_id): Path<String>,
) -> impl IntoResponse {
    state.status_hits.fetch_add(1, Ordering::SeqCst);
    if job_id != "abc123" {
        return (
            StatusCode::NOT_FOUND,
            axum::Json(json!({ "detail": "Invalid Job Id" })),
        );
    }

    let mut queue = state.statuses.lock().unwrap();
    let scripted = if queue.len() > 1 {
        queue.pop_front().expect("non-empty script")
    } else {
        queue.front().cloned().unwrap_or(Scripted::Error)
    };
    match scripted {
        Scripted::Ok(body) => (StatusCode::OK, axum::Json(body)),
        Scripted::Error => (
            StatusCode::INTERNAL_SERVER_ERROR,
            axum::Json(json!({ "detail": "status store unavailable" })),
        ),
    }
}

async fn download(
    State(state): State<Arc<ServiceState>>,
    Path(job_id): Path<String>,
) -> impl IntoResponse {
    if job_id != "abc123" {
        return (
            StatusCode::NOT_FOUND,
            json!({ "detail": "Invalid job_id" }).to_string().into_bytes(),
        );
    }
    (StatusCode::OK, state.artifact.lock().unwrap().clone())
}

async fn github_repos(
    State(state): State<Arc<ServiceState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    state.repos_hits.fetch_add(1, Ordering::SeqCst);
    let expected = state.expected_token.lock().unwrap().clone();
    let presented = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    match expected {
        Some(token) if presented.as_deref() == Some(&format!("Bearer {token}")) => (
            StatusCode::OK,
            axum::Json(json!({
                "repos": [
                    { "id": 1, "name": "app", "full_name": "acme/app", "private": false,
                      "html_url": "https://github.com/acme/app" },
                    { "id": 2, "name": "infra", "full_name": "acme/infra", "private": true,
                      "html_url": null }
                ]
            })),
        ),
        _ => (
            StatusCode::UNAUTHORIZED,
            axum::Json(json!({ "detail": "Invalid or missing credentials" })),
        ),
    }
}
