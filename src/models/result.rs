// src/models/result.rs

use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, types::Json};
use validator::Validate;

/// One answered question as stored inside a result.
///
/// The question text and points are copied at submission time so that a
/// stored result stays stable even if generation heuristics change later.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub quiz_id: String,

    /// Question text kept for display in history and exports.
    pub question: String,

    /// The chosen option's `value`, or null when the user skipped it.
    pub selected_answer: Option<String>,

    /// Points obtained for this answer (0 when unanswered).
    pub points: i64,
}

/// Represents the 'results' table in the database.
/// One immutable row per submitted test.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub id: i64,
    pub user_id: i64,
    pub category: String,

    /// Answer snapshots, stored as a JSON array in the database.
    pub answers: Json<Vec<AnswerRecord>>,

    pub total_points: i64,
    pub max_points: i64,
    pub score_out_of_10: i64,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// DTO for submitting a finished test.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResultRequest {
    #[validate(length(min = 1, max = 50))]
    pub category: String,

    pub answers: Vec<SubmittedAnswer>,
}

/// One answer as sent by the client. Everything except the shape itself is
/// tolerated as missing; absent points count as 0, an absent selection is
/// recorded as unanswered.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedAnswer {
    pub quiz_id: Option<String>,
    pub question: Option<String>,
    pub selected_answer: Option<String>,
    pub points: Option<i64>,
}

/// Aggregated totals for one submission, ready to persist.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    pub answers: Vec<AnswerRecord>,
    pub total_points: i64,
    pub max_points: i64,
    pub score_out_of_10: i64,
}

/// Sums submitted answers into a normalized score.
///
/// Trust boundary: points were fixed when the questions were generated and
/// the option was selected; they are summed as given, never re-derived.
/// `max_points` assumes the 0..=3 scale, so it is `answers.len() * 3`, and
/// the final score is `total / max * 10` rounded to the nearest integer
/// (0 when there are no answers).
pub fn aggregate_answers(submitted: &[SubmittedAnswer]) -> ScoreSummary {
    let answers: Vec<AnswerRecord> = submitted
        .iter()
        .map(|a| AnswerRecord {
            quiz_id: a.quiz_id.clone().unwrap_or_default(),
            question: a
                .question
                .clone()
                .unwrap_or_else(|| "Question text missing".to_string()),
            selected_answer: a.selected_answer.clone(),
            points: a.points.unwrap_or(0),
        })
        .collect();

    let total_points: i64 = answers.iter().map(|a| a.points).sum();
    let max_points = answers.len() as i64 * 3;
    let score_out_of_10 = if max_points > 0 {
        ((total_points as f64 / max_points as f64) * 10.0).round() as i64
    } else {
        0
    };

    ScoreSummary {
        answers,
        total_points,
        max_points,
        score_out_of_10,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submitted(points: &[i64]) -> Vec<SubmittedAnswer> {
        points
            .iter()
            .enumerate()
            .map(|(i, p)| SubmittedAnswer {
                quiz_id: Some(format!("q{}", i)),
                question: Some(format!("Question {}", i)),
                selected_answer: Some("Sometimes".to_string()),
                points: Some(*p),
            })
            .collect()
    }

    #[test]
    fn five_answers_normalize_to_six_out_of_ten() {
        let summary = aggregate_answers(&submitted(&[3, 0, 2, 1, 3]));

        assert_eq!(summary.total_points, 9);
        assert_eq!(summary.max_points, 15);
        assert_eq!(summary.score_out_of_10, 6);
    }

    #[test]
    fn empty_submission_scores_zero() {
        let summary = aggregate_answers(&[]);

        assert_eq!(summary.total_points, 0);
        assert_eq!(summary.max_points, 0);
        assert_eq!(summary.score_out_of_10, 0);
    }

    #[test]
    fn missing_points_and_selection_count_as_unanswered() {
        let mut answers = submitted(&[3, 3]);
        answers.push(SubmittedAnswer {
            quiz_id: None,
            question: None,
            selected_answer: None,
            points: None,
        });

        let summary = aggregate_answers(&answers);

        assert_eq!(summary.total_points, 6);
        assert_eq!(summary.max_points, 9);
        // 6/9*10 = 6.67 rounds to 7
        assert_eq!(summary.score_out_of_10, 7);
        assert_eq!(summary.answers[2].points, 0);
        assert_eq!(summary.answers[2].selected_answer, None);
        assert_eq!(summary.answers[2].question, "Question text missing");
    }

    #[test]
    fn score_stays_within_bounds() {
        for n in 1..=20usize {
            let all_best = aggregate_answers(&submitted(&vec![3; n]));
            let all_worst = aggregate_answers(&submitted(&vec![0; n]));

            assert_eq!(all_best.score_out_of_10, 10);
            assert_eq!(all_worst.score_out_of_10, 0);
        }
    }
}
