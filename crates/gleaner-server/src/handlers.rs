//! HTTP request handlers for the server.
//!
//! Streams generated notes over SSE, resolves note spans and serves saved
//! notes, using axum.

use crate::config::ServerConfig;
use crate::wire::{
    GenerateRequest, LocateRequest, LocateResponse, NoteEnvelope, NoteView, StreamError,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive},
        IntoResponse, Json, Response, Sse,
    },
    routing::{get, post},
    Router as AxumRouter,
};
use gleaner_domain::traits::{FailureCategory, LlmProvider, NoteStore};
use gleaner_domain::{NoteDraft, SourceDocument};
use gleaner_extractor::{
    GenerationError, GenerationEvent, InMemoryNoteStore, LlmChunkExtractor, NoteGenerator,
};
use gleaner_llm::AnyProvider;
use gleaner_locator::SpanLocator;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt as _;
use tracing::{info, warn};

/// Generator wired to a runtime-selected provider
pub type Generator = NoteGenerator<LlmChunkExtractor<AnyProvider>>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Note generator
    pub generator: Generator,
    /// Saved notes
    pub store: Arc<Mutex<InMemoryNoteStore>>,
    /// Span locator
    pub locator: Arc<SpanLocator>,
    /// Model behind the generator
    pub model: String,
}

impl AppState {
    /// Wire a provider into fresh state using the configured sections
    pub fn new(provider: AnyProvider, config: &ServerConfig) -> Self {
        let model = provider.model_name().to_string();
        let extractor = LlmChunkExtractor::new(provider, config.extractor.clone());

        Self {
            generator: NoteGenerator::new(extractor, config.extractor.clone()),
            store: Arc::new(Mutex::new(InMemoryNoteStore::new())),
            locator: Arc::new(SpanLocator::with_config(config.locator.clone())),
            model,
        }
    }

    fn store(&self) -> MutexGuard<'_, InMemoryNoteStore> {
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// Model behind the generator
    pub model: String,
    /// Notes saved since start-up
    pub saved_notes: usize,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error headline
    pub error: String,
    /// What to do about it
    pub details: String,
    /// Oracle failure category, when the oracle was at fault
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Unreadable or out-of-range request
    BadRequest(String),
    /// Generation failed before any note was sent
    Generation(GenerationError),
    /// Internal server error
    InternalError(String),
}

impl AppError {
    fn parts(self) -> (StatusCode, ErrorResponse) {
        match self {
            AppError::BadRequest(details) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Invalid request".to_string(),
                    details,
                    category: None,
                },
            ),
            AppError::Generation(e) if e.is_client_error() => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: e.to_string(),
                    details: client_hint(&e).to_string(),
                    category: None,
                },
            ),
            AppError::Generation(e) => {
                let category = e.category();
                let details = match category {
                    Some(c) if c != FailureCategory::Generic => c.guidance().to_string(),
                    _ => e.to_string(),
                };
                (
                    status_for(category),
                    ErrorResponse {
                        error: headline(category).to_string(),
                        details,
                        category: category.map(|c| c.as_str().to_string()),
                    },
                )
            }
            AppError::InternalError(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: "Internal server error".to_string(),
                    details,
                    category: None,
                },
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.parts();
        (status, Json(body)).into_response()
    }
}

impl From<GenerationError> for AppError {
    fn from(e: GenerationError) -> Self {
        AppError::Generation(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// HTTP status for an oracle failure category
pub fn status_for(category: Option<FailureCategory>) -> StatusCode {
    match category {
        Some(FailureCategory::Authentication) => StatusCode::UNAUTHORIZED,
        Some(FailureCategory::RateLimited) => StatusCode::TOO_MANY_REQUESTS,
        Some(FailureCategory::PayloadTooLarge) => StatusCode::PAYLOAD_TOO_LARGE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn headline(category: Option<FailureCategory>) -> &'static str {
    match category {
        Some(FailureCategory::Authentication) => "Authentication error with the language model provider",
        Some(FailureCategory::RateLimited) => "Rate limit exceeded with the language model provider",
        Some(FailureCategory::PayloadTooLarge) => "Text too long for the language model",
        Some(FailureCategory::Unreachable) => "Language model provider unreachable",
        Some(FailureCategory::Generic) | None => "Failed to generate notes",
    }
}

fn client_hint(e: &GenerationError) -> &'static str {
    match e {
        GenerationError::EmptyDocument => "Send the source text in the `text` field",
        GenerationError::TextTooLong { .. } => "Split the text or raise extractor.max_text_length",
        _ => "notesPerProject must be at least 1",
    }
}

/// SSE payload for one generation event
fn sse_event(event: GenerationEvent, state: &AppState, project_id: Option<&str>) -> Event {
    match event {
        GenerationEvent::Note(draft) => {
            let note = note_view(draft, state, project_id);
            json_event(&NoteEnvelope { note })
        }
        GenerationEvent::Done { .. } => Event::default().data("[DONE]"),
        GenerationEvent::Failed(e) => {
            let category = e.category().unwrap_or(FailureCategory::Generic);
            json_event(&StreamError {
                error: e.to_string(),
                category: category.as_str().to_string(),
            })
        }
    }
}

fn json_event<T: Serialize>(payload: &T) -> Event {
    match serde_json::to_string(payload) {
        Ok(json) => Event::default().data(json),
        Err(e) => {
            warn!(error = %e, "Failed to encode SSE payload");
            Event::default().data(r#"{"error":"encoding failed","category":"generic"}"#)
        }
    }
}

/// Save the draft when the request named a project
fn note_view(draft: NoteDraft, state: &AppState, project_id: Option<&str>) -> NoteView {
    let Some(project_id) = project_id else {
        return NoteView::from(&draft);
    };

    let view = NoteView::from(&draft);
    match state.store().save(project_id, draft) {
        Ok(note) => NoteView::from(&note),
        Err(e) => {
            warn!(error = %e, project_id, "Failed to save note, streaming unsaved");
            view
        }
    }
}

/// POST /api/generate - Stream notes for a text as server-sent events
async fn generate_notes(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload?;
    let config = state.generator.config();
    let notes_wanted = request.notes_per_project.unwrap_or(config.default_notes);
    let char_limit = request.note_char_limit.unwrap_or(config.default_char_limit);

    if request
        .project_id
        .as_deref()
        .is_some_and(|p| p.trim().is_empty())
    {
        return Err(AppError::BadRequest("projectId must not be blank".to_string()));
    }

    let doc = SourceDocument::new(request.text);
    state.generator.validate(&doc, notes_wanted)?;

    info!(
        chars = doc.len(),
        notes_wanted,
        char_limit,
        project = request.project_id.as_deref().unwrap_or("-"),
        "Generate request accepted"
    );

    let mut events = state.generator.stream(doc, notes_wanted, char_limit);

    // Nothing is sent before the first note, so a failed run still gets a status code
    let first = match events.recv().await {
        Some(GenerationEvent::Failed(e)) => return Err(e.into()),
        Some(event) => event,
        None => {
            return Err(AppError::InternalError(
                "generation ended without a result".to_string(),
            ))
        }
    };

    let project_id = request.project_id;
    let stream = tokio_stream::once(first)
        .chain(ReceiverStream::new(events))
        .map(move |event| Ok::<_, Infallible>(sse_event(event, &state, project_id.as_deref())));

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()).into_response())
}

/// POST /api/locate - Resolve the source span behind a note
async fn locate_span(
    State(state): State<AppState>,
    payload: Result<Json<LocateRequest>, JsonRejection>,
) -> Result<Json<LocateResponse>, AppError> {
    let Json(request) = payload?;
    let anchor = request.note.into();
    let span = state.locator.locate(&anchor, &request.source);

    Ok(Json(LocateResponse::new(
        span.start,
        span.end,
        span.strategy,
        span.text(&request.source),
    )))
}

/// GET /api/projects/:project_id/notes - Notes saved for a project
async fn list_notes(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<Json<Vec<NoteView>>, AppError> {
    let notes = state
        .store()
        .list(&project_id)
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    Ok(Json(notes.iter().map(NoteView::from).collect()))
}

/// GET /health - Liveness and model information
async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    let saved_notes = state.store().len();

    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        model: state.model.clone(),
        saved_notes,
    })
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    AxumRouter::new()
        .route("/api/generate", post(generate_notes))
        .route("/api/locate", post(locate_span))
        .route("/api/projects/:project_id/notes", get(list_notes))
        .route("/health", get(health_check))
        .with_state(state)
}
