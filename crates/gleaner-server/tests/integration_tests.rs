//! Integration tests for the HTTP server

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use gleaner_llm::{AnyProvider, LlmError, MockProvider};
use gleaner_server::{
    config::ServerConfig,
    handlers::{create_router, AppState, ErrorResponse, HealthCheckResponse},
    wire::{LocateResponse, NoteEnvelope, NoteView},
};
use tower::ServiceExt; // for oneshot

const ANIMALS: &str = "Cats are great. Dogs are loyal and kind. Birds can fly.";

const ONE_NOTE: &str = r#"{"notes": [{
    "content": "Dogs are loyal companions",
    "sentiment": "positive",
    "tags": ["dogs", "loyalty"],
    "exactText": "Dogs are loyal and kind.",
    "textPosition": {"start": 16, "end": 40}
}]}"#;

/// Helper to create test application state around a mock oracle
fn create_test_state(mock: &MockProvider) -> AppState {
    AppState::new(
        AnyProvider::Mock(mock.clone()),
        &ServerConfig::default_test_config(),
    )
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_text(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

/// Payloads of every `data:` line, in order
fn sse_payloads(body: &str) -> Vec<String> {
    body.split("\n\n")
        .filter_map(|frame| frame.strip_prefix("data: "))
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn test_health_check_endpoint() {
    let mock = MockProvider::new(ONE_NOTE);
    let app = create_router(create_test_state(&mock));

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let (status, body) = body_text(app, request).await;
    assert_eq!(status, StatusCode::OK);

    let health: HealthCheckResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.model, "mock");
    assert_eq!(health.saved_notes, 0);
}

#[tokio::test]
async fn test_generate_streams_notes_then_done() {
    let mock = MockProvider::new(ONE_NOTE);
    let app = create_router(create_test_state(&mock));

    let request = post_json(
        "/api/generate",
        serde_json::json!({"text": ANIMALS, "notesPerProject": 1}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "text/event-stream"
    );

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let payloads = sse_payloads(&String::from_utf8(body.to_vec()).unwrap());

    assert_eq!(payloads.len(), 2);
    assert_eq!(payloads[1], "[DONE]");

    let envelope: NoteEnvelope = serde_json::from_str(&payloads[0]).unwrap();
    assert_eq!(envelope.note.content, "Dogs are loyal companions");
    assert_eq!(envelope.note.sentiment, "positive");
    assert_eq!(envelope.note.exact_text, "Dogs are loyal and kind.");
    assert_eq!(envelope.note.text_position.start, 16);
    assert!(envelope.note.id.is_none());
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn test_generate_rejects_missing_text() {
    let mock = MockProvider::new(ONE_NOTE);
    let app = create_router(create_test_state(&mock));

    let (status, body) = body_text(app, post_json("/api/generate", serde_json::json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let error: ErrorResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(error.error, "Text is required");
    assert!(!error.details.is_empty());
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_generate_rejects_zero_notes() {
    let mock = MockProvider::new(ONE_NOTE);
    let app = create_router(create_test_state(&mock));

    let request = post_json(
        "/api/generate",
        serde_json::json!({"text": ANIMALS, "notesPerProject": 0}),
    );
    let (status, _) = body_text(app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_generate_rejects_negative_counts() {
    let mock = MockProvider::new(ONE_NOTE);
    let app = create_router(create_test_state(&mock));

    let request = post_json(
        "/api/generate",
        serde_json::json!({"text": ANIMALS, "notesPerProject": -2}),
    );
    let (status, body) = body_text(app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let error: ErrorResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(error.error, "Invalid request");
}

#[tokio::test]
async fn test_authentication_failure_maps_to_401() {
    let mock = MockProvider::new(ONE_NOTE);
    mock.push_error(LlmError::Authentication("Invalid API key".to_string()));
    let app = create_router(create_test_state(&mock));

    let request = post_json("/api/generate", serde_json::json!({"text": ANIMALS}));
    let (status, body) = body_text(app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let error: ErrorResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(error.category.as_deref(), Some("authentication"));
}

#[tokio::test]
async fn test_rate_limited_run_maps_to_429() {
    let mock = MockProvider::new(ONE_NOTE);
    mock.push_error(LlmError::RateLimitExceeded);
    let app = create_router(create_test_state(&mock));

    let request = post_json("/api/generate", serde_json::json!({"text": ANIMALS}));
    let (status, body) = body_text(app, request).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);

    let error: ErrorResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(error.category.as_deref(), Some("rate_limited"));
}

#[tokio::test]
async fn test_empty_oracle_reply_is_internal_error() {
    let mock = MockProvider::new(r#"{"notes": []}"#);
    let app = create_router(create_test_state(&mock));

    let request = post_json("/api/generate", serde_json::json!({"text": ANIMALS}));
    let (status, body) = body_text(app, request).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let error: ErrorResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(error.error, "Failed to generate notes");
}

#[tokio::test]
async fn test_notes_saved_under_project() {
    let mock = MockProvider::new(ONE_NOTE);
    let state = create_test_state(&mock);

    let request = post_json(
        "/api/generate",
        serde_json::json!({"text": ANIMALS, "notesPerProject": 1, "projectId": "p1"}),
    );
    let (status, body) = body_text(create_router(state.clone()), request).await;
    assert_eq!(status, StatusCode::OK);

    let payloads = sse_payloads(&body);
    let streamed: NoteEnvelope = serde_json::from_str(&payloads[0]).unwrap();
    assert!(streamed.note.id.is_some());
    assert_eq!(streamed.note.project_id.as_deref(), Some("p1"));

    let request = Request::builder()
        .uri("/api/projects/p1/notes")
        .body(Body::empty())
        .unwrap();
    let (status, body) = body_text(create_router(state), request).await;
    assert_eq!(status, StatusCode::OK);

    let listed: Vec<NoteView> = serde_json::from_str(&body).unwrap();
    assert_eq!(listed, vec![streamed.note]);
}

#[tokio::test]
async fn test_blank_project_is_rejected() {
    let mock = MockProvider::new(ONE_NOTE);
    let app = create_router(create_test_state(&mock));

    let request = post_json(
        "/api/generate",
        serde_json::json!({"text": ANIMALS, "projectId": "  "}),
    );
    let (status, _) = body_text(app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_locate_by_exact_quote() {
    let mock = MockProvider::new(ONE_NOTE);
    let app = create_router(create_test_state(&mock));

    let request = post_json(
        "/api/locate",
        serde_json::json!({
            "source": ANIMALS,
            "note": {"content": "Dogs are loyal companions", "exactText": "Dogs are loyal and kind."}
        }),
    );
    let (status, body) = body_text(app, request).await;
    assert_eq!(status, StatusCode::OK);

    let span: LocateResponse = serde_json::from_str(&body).unwrap();
    assert_eq!((span.start, span.end), (16, 40));
    assert_eq!(span.strategy, "exact_quote");
    assert_eq!(span.text, "Dogs are loyal and kind.");
}

#[tokio::test]
async fn test_locate_falls_back_without_match() {
    let mock = MockProvider::new(ONE_NOTE);
    let app = create_router(create_test_state(&mock));

    let request = post_json(
        "/api/locate",
        serde_json::json!({
            "source": "First paragraph.\n\nSecond paragraph.",
            "note": {"content": "nothing like it", "textPosition": {"start": 0, "end": 0}}
        }),
    );
    let (status, body) = body_text(app, request).await;
    assert_eq!(status, StatusCode::OK);

    let span: LocateResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(span.strategy, "fallback");
    assert_eq!(span.text, "First paragraph.");
}
