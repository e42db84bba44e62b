use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::Router;
use serde_json::{Value, json};
use tower::ServiceExt;

use healthpro_core::models::artifact::NamingScheme;
use healthpro_core::models::record::AssessmentRecord;
use healthpro_export::error::ExportError;
use healthpro_export::pdf::{DocumentRenderer, RenderJob};
use healthpro_export::pipeline::ReportPipeline;
use healthpro_export::styles::PageOptions;
use healthpro_registry::Registry;
use healthpro_server::state::AppState;
use healthpro_storage::artifacts::ArtifactStore;
use healthpro_storage::records::JsonRecordStore;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

const FAKE_PDF: &[u8] = b"%PDF-1.7\n%fake\n";

#[derive(Default)]
struct FakeRenderer {
    calls: AtomicUsize,
}

impl DocumentRenderer for FakeRenderer {
    fn render_to_file<'a>(&'a self, job: RenderJob<'a>) -> BoxFuture<'a, Result<(), ExportError>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::fs::write(job.dest, FAKE_PDF)
                .await
                .map_err(|e| ExportError::RenderFailure(e.to_string()))
        })
    }
}

struct Harness {
    app: Router,
    renderer: Arc<FakeRenderer>,
    _dir: tempfile::TempDir,
}

fn harness() -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let renderer = Arc::new(FakeRenderer::default());
    let records = JsonRecordStore::from_records(
        [
            json!({
                "session_id": "session_001",
                "assessment_id": "as_hr_02",
                "accuracy": 80,
                "timestamp": "2024-06-14T09:00:00Z"
            }),
            json!({ "session_id": "session_002", "assessment_id": "as_mystery" }),
        ]
        .into_iter()
        .map(|r| AssessmentRecord::try_from(r).unwrap()),
    );
    let pipeline = ReportPipeline::new(
        ArtifactStore::new(dir.path().join("reports")),
        renderer.clone(),
        PageOptions::default(),
        NamingScheme::Session,
    );
    let state = AppState {
        records: Arc::new(records),
        registry: Arc::new(Registry::builtin().unwrap()),
        pipeline: Arc::new(pipeline),
    };
    Harness {
        app: healthpro_server::app(state),
        renderer,
        _dir: dir,
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let headers = res.headers().clone();
    let body = to_bytes(res.into_body(), usize::MAX).await.unwrap().to_vec();
    (status, headers, body)
}

fn generate(session_id: Value) -> Request<Body> {
    Request::post("/api/reports/generate-report")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "session_id": session_id }).to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn health_reports_running() {
    let h = harness();
    let (status, _, body) = send(&h.app, get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["status"], "Server is running");
    assert!(body["timestamp"].as_str().unwrap().parse::<jiff::Timestamp>().is_ok());
}

#[tokio::test]
async fn generate_then_download() {
    let h = harness();

    let (status, _, body) = send(&h.app, generate(json!("session_001"))).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["session_id"], "session_001");
    assert_eq!(body["assessment_id"], "as_hr_02");
    assert_eq!(body["file_name"], "report_session_001.pdf");
    assert_eq!(body["download_url"], "/api/reports/download/report_session_001.pdf");

    let (status, headers, bytes) = send(&h.app, get("/api/reports/download/report_session_001.pdf")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"report_session_001.pdf\""
    );
    assert_eq!(bytes, FAKE_PDF);

    // cached
    let (status, _, _) = send(&h.app, generate(json!("session_001"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(h.renderer.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn generate_requires_session_id() {
    let h = harness();
    for session in [json!(""), json!("   "), Value::Null] {
        let (status, _, body) = send(&h.app, generate(session)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "session_id is required");
    }
}

#[tokio::test]
async fn generate_lookup_misses_are_not_found() {
    let h = harness();

    let (status, _, body) = send(&h.app, generate(json!("session_404"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "Assessment data not found for the given session_id");

    let (status, _, body) = send(&h.app, generate(json!("session_002"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "No configuration found for assessment type: as_mystery");

    assert_eq!(h.renderer.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn download_rejects_unsafe_and_missing_names() {
    let h = harness();

    for uri in [
        "/api/reports/download/notes.pdf",
        "/api/reports/download/report_..%2F..%2Fetc%2Fpasswd.pdf",
        "/api/reports/download/report_x.exe",
    ] {
        let (status, _, _) = send(&h.app, get(uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
    }

    let (status, _, body) = send(&h.app, get("/api/reports/download/report_missing.pdf")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "File not found");
}

#[tokio::test]
async fn sessions_lists_every_record() {
    let h = harness();
    let (status, _, body) = send(&h.app, get("/api/reports/sessions")).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    let sessions = body.as_array().unwrap();
    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions[0]["session_id"], "session_001");
    assert_eq!(sessions[0]["assessment_id"], "as_hr_02");
    assert_eq!(sessions[0]["accuracy"], 80);
    assert_eq!(sessions[1]["assessment_id"], "as_mystery");
    assert_eq!(sessions[1]["accuracy"], Value::Null);
}

#[test]
fn bundled_sample_records_match_builtin_definitions() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data/assessments.json");
    let store = JsonRecordStore::load(&path).unwrap();
    assert_eq!(store.len(), 3);

    let registry = Registry::builtin().unwrap();
    let raw: Vec<Value> = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    for record in raw {
        let id = record["assessment_id"].as_str().unwrap();
        assert!(registry.lookup(id).is_some(), "{id}");
    }
}
