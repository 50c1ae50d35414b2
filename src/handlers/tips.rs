// src/handlers/tips.rs

use axum::{Json, extract::State, response::IntoResponse};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    ai::{ProviderChain, extract_tips, prompt},
    error::AppError,
};

/// Safe defaults served when every provider fails or returns nothing.
/// Tips are advisory, so unlike question generation this path never 500s.
const GENERIC_TIPS: [&str; 7] = [
    "Schedule 10-minute movement breaks each hour.",
    "Drink a glass of water with every meal and task.",
    "Aim for 7-9 hours of sleep at consistent times.",
    "Add one vegetable to lunch and dinner.",
    "Do 5 minutes of gentle stretching daily.",
    "Take a 10-minute walk after meals when possible.",
    "Plan tomorrow's meals the night before.",
];

#[derive(Debug, Deserialize)]
pub struct TipsRequest {
    /// The user's answers, forwarded verbatim into the coaching prompt.
    pub answers: Vec<Value>,
}

/// Produces 5-7 short improvement tips from the user's quiz answers.
pub async fn generate_tips(
    State(ai): State<ProviderChain>,
    Json(payload): Json<TipsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let prompt = prompt::tips_prompt(&Value::Array(payload.answers));

    let mut tips = match ai.complete_any(&prompt).await {
        Ok(reply) => extract_tips(&reply),
        Err(err) => {
            tracing::warn!("Tip generation failed, serving generic tips: {}", err);
            Vec::new()
        }
    };

    if tips.is_empty() {
        tips = GENERIC_TIPS.iter().take(5).map(|t| t.to_string()).collect();
    }

    // Final cleanup: trim, ensure terminal punctuation, cap count.
    let tips: Vec<String> = tips
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .map(|t| {
            if t.ends_with(['.', '!', '?']) {
                t
            } else {
                format!("{}.", t)
            }
        })
        .take(7)
        .collect();

    Ok(Json(json!({ "tips": tips })))
}
