// src/handlers/questions.rs

use axum::{Json, extract::Query, extract::State, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;

use crate::{
    ai::{GenerationRequest, ProviderChain},
    error::AppError,
};

/// Query parameters for question generation. All optional.
#[derive(Debug, Deserialize)]
pub struct GenerateParams {
    pub category: Option<String>,
    pub count: Option<i64>,
    pub target: Option<String>,
}

/// Generates a fresh quiz for one health category.
///
/// Questions are transient: nothing is persisted here. The canonical point
/// values travel to the client and come back inside the submission.
pub async fn generate_questions(
    State(ai): State<ProviderChain>,
    Query(params): Query<GenerateParams>,
) -> Result<impl IntoResponse, AppError> {
    let request = GenerationRequest {
        category: params
            .category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| "general".to_string()),
        count: params.count.unwrap_or(5).clamp(1, 20),
        target: params
            .target
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| "general".to_string()),
    };

    tracing::info!(
        "Generating {} {} questions for {}",
        request.count,
        request.category,
        request.target
    );

    let questions = ai.generate_questions(&request).await?;

    Ok(Json(json!({ "questions": questions })))
}
