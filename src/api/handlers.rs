//! HTTP request handlers

use super::assets::serve_static;
use super::sse::sse_stream;
use super::types::{AcceptedResponse, ChatRequest, ErrorResponse};
use super::AppState;
use crate::presenter::render_page;
use crate::runtime::HandleError;
use crate::state_machine::ChatView;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(serve_page))
        .route("/assets/*path", get(serve_static))
        .route("/api/state", get(get_state))
        .route("/api/events", get(stream_events))
        .route("/api/chat", post(send_chat))
        .route("/api/chat/clear", post(clear_chat))
        .with_state(state)
}

// ============================================================
// Page
// ============================================================

async fn serve_page(State(state): State<AppState>) -> Html<String> {
    Html(render_page(&state.chat.view()))
}

async fn get_state(State(state): State<AppState>) -> Json<ChatView> {
    Json(state.chat.view())
}

async fn stream_events(State(state): State<AppState>) -> impl IntoResponse {
    sse_stream(state.chat.subscribe())
}

// ============================================================
// Commands
// ============================================================

async fn send_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<(StatusCode, Json<AcceptedResponse>), AppError> {
    if req.user_input.is_empty() {
        return Err(AppError::BadRequest("Message must not be empty".to_string()));
    }

    state.chat.submit(req.user_input).await?;

    Ok((StatusCode::ACCEPTED, Json(AcceptedResponse { accepted: true })))
}

async fn clear_chat(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<AcceptedResponse>), AppError> {
    state.chat.reset().await?;

    Ok((StatusCode::ACCEPTED, Json(AcceptedResponse { accepted: true })))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    Conflict(String),
    Internal(String),
}

impl From<HandleError> for AppError {
    fn from(e: HandleError) -> Self {
        match e {
            HandleError::Rejected(rejection) => AppError::Conflict(rejection.to_string()),
            stopped @ HandleError::RuntimeStopped => AppError::Internal(stopped.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
