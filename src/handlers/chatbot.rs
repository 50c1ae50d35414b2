// src/handlers/chatbot.rs

use axum::{Extension, Json, extract::State, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;

use crate::{
    ai::{ProviderChain, prompt},
    error::AppError,
    utils::jwt::Claims,
};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Stateless health-chat endpoint: one message in, one short reply out.
/// No conversation memory is kept server-side.
pub async fn chat(
    State(ai): State<ProviderChain>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<ChatRequest>,
) -> Result<impl IntoResponse, AppError> {
    let message = payload.message.trim();
    if message.is_empty() {
        return Err(AppError::BadRequest("Message is required".to_string()));
    }

    tracing::debug!("Chat message from user {}", claims.user_id());

    let reply = ai.complete_any(&prompt::chat_prompt(message)).await?;

    Ok(Json(json!({ "reply": reply.trim() })))
}
