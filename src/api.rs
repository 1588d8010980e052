//! REST API Server for the chat assistant
//!
//! Exposes a single chat session to the browser widget

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::display::TranscriptDisplay;
use crate::ledger::{load_snapshot, TransactionSource};
use crate::session::ChatSession;

/// =============================
/// Request Models
/// =============================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChatRequest {
    pub message: String,
}

/// =============================
/// Response Wrapper
/// =============================

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
    pub timestamp: String,
}

impl ApiResponse {
    pub fn success<T: Serialize>(data: T) -> Self {
        Self {
            success: true,
            data: serde_json::to_value(data).ok(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub session: Arc<Mutex<ChatSession>>,
    pub ledger: Arc<dyn TransactionSource>,
}

/// =============================
/// Health Endpoint
/// =============================

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// =============================
/// Chat Endpoints
/// =============================

async fn chat_handler(
    State(state): State<ApiState>,
    Json(req): Json<ChatRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    let mut session = state.session.lock().await;
    let mut display = TranscriptDisplay::new();

    let Some(reply) = session
        .submit(&req.message, state.ledger.as_ref(), &mut display)
        .await
    else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Message must not be empty".into())),
        );
    };

    info!(
        session_id = %session.session_id(),
        "Chat reply sent ({} chars)",
        reply.len()
    );

    (
        StatusCode::OK,
        Json(ApiResponse::success(serde_json::json!({
            "reply": reply,
            "visible": session.is_visible(),
            "messages": display.messages(),
        }))),
    )
}

async fn toggle_handler(State(state): State<ApiState>) -> Json<ApiResponse> {
    let visible = state.session.lock().await.toggle();
    Json(ApiResponse::success(serde_json::json!({ "visible": visible })))
}

async fn history_handler(State(state): State<ApiState>) -> Json<ApiResponse> {
    let session = state.session.lock().await;
    Json(ApiResponse::success(session.history().turns()))
}

async fn preferences_handler(State(state): State<ApiState>) -> Json<ApiResponse> {
    let session = state.session.lock().await;
    Json(ApiResponse::success(session.preferences()))
}

async fn snapshot_handler(State(state): State<ApiState>) -> (StatusCode, Json<ApiResponse>) {
    match load_snapshot(state.ledger.as_ref()).await {
        Ok(snapshot) => (StatusCode::OK, Json(ApiResponse::success(snapshot))),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Snapshot failed: {}", e))),
        ),
    }
}

/// =============================
/// Router
/// =============================

pub fn create_router(session: ChatSession, ledger: Arc<dyn TransactionSource>) -> Router {
    let state = ApiState {
        session: Arc::new(Mutex::new(session)),
        ledger,
    };

    Router::new()
        .route("/health", get(health))
        .route("/api/chat", post(chat_handler))
        .route("/api/chat/toggle", post(toggle_handler))
        .route("/api/chat/history", get(history_handler))
        .route("/api/chat/preferences", get(preferences_handler))
        .route("/api/snapshot", get(snapshot_handler))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(
    session: ChatSession,
    ledger: Arc<dyn TransactionSource>,
    port: u16,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let router = create_router(session, ledger);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("API Server listening on http://0.0.0.0:{}", port);
    info!("Local: http://127.0.0.1:{}", port);

    axum::serve(listener, router).await?;

    Ok(())
}
