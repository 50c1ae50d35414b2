// src/handlers/results.rs

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::{PgPool, types::Json as SqlJson};
use validator::Validate;

use crate::{
    error::AppError,
    models::result::{QuizResult, SubmitResultRequest, aggregate_answers},
    utils::jwt::Claims,
};

/// Persists a finished test as one immutable result row.
///
/// The aggregator only sums the point values carried by the submission;
/// they were fixed when the questions were generated and are never
/// re-derived here.
pub async fn submit_result(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<SubmitResultRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let summary = aggregate_answers(&payload.answers);

    let result = sqlx::query_as::<_, QuizResult>(
        r#"
        INSERT INTO results (user_id, category, answers, total_points, max_points, score_out_of_10)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, user_id, category, answers, total_points, max_points, score_out_of_10, created_at
        "#,
    )
    .bind(claims.user_id())
    .bind(&payload.category)
    .bind(SqlJson(&summary.answers))
    .bind(summary.total_points)
    .bind(summary.max_points)
    .bind(summary.score_out_of_10)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to save result: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok((StatusCode::CREATED, Json(result)))
}

/// Fetches one stored result by id.
///
/// Results belong to the submitting user's history; other users get 404.
pub async fn get_result(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query_as::<_, QuizResult>(
        r#"
        SELECT id, user_id, category, answers, total_points, max_points, score_out_of_10, created_at
        FROM results
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("Result not found".to_string()))?;

    if result.user_id != claims.user_id() {
        return Err(AppError::NotFound("Result not found".to_string()));
    }

    Ok(Json(result))
}
