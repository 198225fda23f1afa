use crate::responder::{Assistant, AssistantError};
use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

pub const NO_ANSWER_REPLY: &str = "Sorry, I couldn't find an answer to that question.";

/// `/chat` and `/health` with CORS open to every origin.
pub fn router(assistant: Arc<Assistant>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/chat", post(chat))
        .route("/health", get(health))
        .layer(cors)
        .with_state(assistant)
}

pub async fn serve(assistant: Arc<Assistant>, bind: &str) -> Result<()> {
    let app = router(assistant);
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {bind}"))?;
    log::info!("Serving chat API on http://{bind}/chat");
    axum::serve(listener, app).await?;
    Ok(())
}

/// Body text of `{"message": ...}`; anything else reads as empty.
fn message_of(body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_default()
}

pub(crate) async fn chat(
    State(assistant): State<Arc<Assistant>>,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let message = message_of(&body);
    match assistant.respond(&message).await {
        Ok(reply) => (StatusCode::OK, Json(json!({ "response": reply.text }))),
        Err(AssistantError::EmptyMessage) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "No message provided" })),
        ),
        Err(AssistantError::NoAnswer) => {
            (StatusCode::OK, Json(json!({ "response": NO_ANSWER_REPLY })))
        }
        Err(err @ AssistantError::Fallback(_)) => {
            log::error!("Fallback completion failed: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": err.to_string() })),
            )
        }
    }
}

pub(crate) async fn health(State(assistant): State<Arc<Assistant>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "entries": assistant.engine().index().len(),
    }))
}
