// src/models/question.rs

use serde::{Deserialize, Serialize};

/// A single answer choice in its canonical shape.
///
/// `value` is the token a client submits back to identify the choice,
/// `text` is the display label. The two are usually identical; the
/// normalizer defaults each from the other when a provider sends only one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub text: String,
    pub value: String,

    /// Healthiness impact of picking this option. Always an integer in
    /// [0, 3]; 3 is the healthiest choice, 0 the least healthy.
    pub points: i64,
}

/// A generated quiz question in its canonical shape.
///
/// Questions are transient: they only live for the duration of a test
/// session on the client. Nothing here is persisted; submitted answers
/// carry copies of the relevant fields instead (see `models::result`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Stable identifier, provider-supplied or freshly generated.
    pub id: String,

    pub question: String,

    /// At least 2 entries, no two sharing the same `value`,
    /// sorted by descending points.
    pub options: Vec<AnswerOption>,

    /// Optional short tag like "sleep" or "stress" the model may attach.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension: Option<String>,
}
