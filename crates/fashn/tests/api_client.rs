//! Integration tests for `FashnApi` against an in-process fake service.
//!
//! Each test spins up an axum router on `127.0.0.1:0` that mimics the
//! `/run` and `/status/{id}` endpoints and records what it received.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use assert_matches::assert_matches;
use atelier_fashn::{
    FashnApi, FashnApiError, JobId, JobPhase, PollPolicy, RemoteStatus, RunRequest,
    TryOnOrchestrator,
};
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

const API_KEY: &str = "fa-test-key";

// ---------------------------------------------------------------------------
// Fake server helpers
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
struct Recorded {
    run_bodies: Arc<Mutex<Vec<Value>>>,
    auth_headers: Arc<Mutex<Vec<String>>>,
    status_calls: Arc<AtomicUsize>,
}

impl Recorded {
    fn record_auth(&self, headers: &HeaderMap) {
        let value = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        self.auth_headers.lock().unwrap().push(value);
    }
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn api(base_url: String) -> FashnApi {
    FashnApi::new(base_url, API_KEY.to_string())
}

fn request() -> RunRequest {
    RunRequest::for_capture("data:image/jpeg;base64,/9j/AAAA", "https://x/garment.png")
}

/// A `/run` endpoint that always answers with `status` and `body`.
fn run_answering(recorded: Recorded, status: StatusCode, body: Value) -> Router {
    Router::new()
        .route(
            "/run",
            post(
                move |State(rec): State<Recorded>, headers: HeaderMap, Json(payload): Json<Value>| {
                    let body = body.clone();
                    async move {
                        rec.record_auth(&headers);
                        rec.run_bodies.lock().unwrap().push(payload);
                        (status, Json(body))
                    }
                },
            ),
        )
        .with_state(recorded)
}

// ---------------------------------------------------------------------------
// Test: POST /run
// ---------------------------------------------------------------------------

#[tokio::test]
async fn run_sends_bearer_token_and_wire_body() {
    let recorded = Recorded::default();
    let base = serve(run_answering(
        recorded.clone(),
        StatusCode::OK,
        json!({ "id": "job1" }),
    ))
    .await;

    let job_id = api(base).start_job(&request()).await.unwrap();

    assert_eq!(job_id, JobId::new("job1"));
    assert_eq!(
        recorded.auth_headers.lock().unwrap().as_slice(),
        [format!("Bearer {API_KEY}")]
    );
    assert_eq!(
        recorded.run_bodies.lock().unwrap()[0],
        json!({
            "model_image": "data:image/jpeg;base64,/9j/AAAA",
            "garment_image": "https://x/garment.png",
            "category": "auto",
            "mode": "performance",
            "num_samples": 1,
            "seed": 42,
        })
    );
}

#[tokio::test]
async fn run_error_payload_on_success_status_is_rejection() {
    let base = serve(run_answering(
        Recorded::default(),
        StatusCode::OK,
        json!({ "id": "", "error": "invalid garment_image" }),
    ))
    .await;

    let err = api(base).start_job(&request()).await.unwrap_err();

    assert_matches!(err, FashnApiError::Rejected(ref msg) if msg == "invalid garment_image");
}

#[tokio::test]
async fn run_error_payload_on_failure_status_is_preferred() {
    let base = serve(run_answering(
        Recorded::default(),
        StatusCode::BAD_REQUEST,
        json!({ "error": "model_image is not a valid image" }),
    ))
    .await;

    let err = api(base).start_job(&request()).await.unwrap_err();

    assert_eq!(err.to_string(), "model_image is not a valid image");
}

#[tokio::test]
async fn run_failure_status_without_payload_reports_status_line() {
    let app = Router::new().route(
        "/run",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded") }),
    );
    let base = serve(app).await;

    let err = api(base).start_job(&request()).await.unwrap_err();

    assert_matches!(
        err,
        FashnApiError::ApiError { status: 500, ref body, .. } if body == "upstream exploded"
    );
    assert_eq!(
        err.to_string(),
        "Failed to start try-on: 500 Internal Server Error"
    );
}

#[tokio::test]
async fn run_without_job_id_is_decode_error() {
    let base = serve(run_answering(
        Recorded::default(),
        StatusCode::OK,
        json!({}),
    ))
    .await;

    let err = api(base).start_job(&request()).await.unwrap_err();

    assert_matches!(err, FashnApiError::Decode(_));
}

// ---------------------------------------------------------------------------
// Test: GET /status/{id}
// ---------------------------------------------------------------------------

#[tokio::test]
async fn status_parses_completed_output() {
    let recorded = Recorded::default();
    let app = Router::new()
        .route(
            "/status/{id}",
            get(
                |State(rec): State<Recorded>, headers: HeaderMap, Path(id): Path<String>| async move {
                    rec.record_auth(&headers);
                    Json(json!({
                        "id": id,
                        "status": "completed",
                        "output": ["https://x/result.png"],
                    }))
                },
            ),
        )
        .with_state(recorded.clone());
    let base = serve(app).await;

    let status = api(base).job_status(&JobId::new("job1")).await.unwrap();

    assert_eq!(status.id, "job1");
    assert_eq!(status.status, RemoteStatus::Completed);
    assert_eq!(status.output, Some(vec!["https://x/result.png".to_string()]));
    assert_eq!(
        recorded.auth_headers.lock().unwrap().as_slice(),
        [format!("Bearer {API_KEY}")]
    );
}

#[tokio::test]
async fn status_failure_reports_status_line() {
    let app = Router::new().route(
        "/status/{id}",
        get(|| async { (StatusCode::NOT_FOUND, "no such job") }),
    );
    let base = serve(app).await;

    let err = api(base).job_status(&JobId::new("gone")).await.unwrap_err();

    assert_eq!(err.to_string(), "Failed to check status: 404 Not Found");
}

#[tokio::test]
async fn status_with_malformed_body_is_request_error() {
    let app = Router::new().route("/status/{id}", get(|| async { "not json" }));
    let base = serve(app).await;

    let err = api(base).job_status(&JobId::new("job1")).await.unwrap_err();

    assert_matches!(err, FashnApiError::Request(_));
}

// ---------------------------------------------------------------------------
// Test: orchestrator end-to-end over HTTP
// ---------------------------------------------------------------------------

async fn scripted_status(State(rec): State<Recorded>, Path(id): Path<String>) -> Response {
    let call = rec.status_calls.fetch_add(1, Ordering::SeqCst);
    let body = match call {
        0 => json!({ "id": id, "status": "in_queue" }),
        1 => json!({ "id": id, "status": "processing" }),
        _ => json!({ "id": id, "status": "completed", "output": ["https://x/result.png"] }),
    };
    Json(body).into_response()
}

#[tokio::test]
async fn orchestrator_runs_job_to_completion_over_http() {
    let recorded = Recorded::default();
    let app = Router::new()
        .route(
            "/run",
            post(|| async { Json(json!({ "id": "job1" })) }),
        )
        .route("/status/{id}", get(scripted_status))
        .with_state(recorded.clone());
    let base = serve(app).await;

    let orch = TryOnOrchestrator::new(
        Arc::new(api(base)),
        PollPolicy {
            interval: Duration::from_millis(5),
            ..Default::default()
        },
    );

    let images = orch
        .start_with_model_image(
            Some("data:image/jpeg;base64,/9j/AAAA"),
            Some("https://x/garment.png"),
        )
        .await
        .unwrap();

    assert_eq!(images, vec!["https://x/result.png".to_string()]);
    assert_eq!(recorded.status_calls.load(Ordering::SeqCst), 3);
    assert_eq!(orch.state().phase(), Some(JobPhase::Completed));
}
