// src/ai/mod.rs
//
// Question generation pipeline: provider chain -> cleaner -> normalizer,
// with the heuristic point assigner invoked by the normalizer as needed.

pub mod cleaner;
pub mod heuristics;
pub mod normalizer;
pub mod prompt;
pub mod providers;

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::config::Config;
use crate::error::AppError;
use crate::models::question::Question;
use providers::{GeminiProvider, OpenAiProvider, TextProvider};

/// Parameters of one generation request. The handler bounds `count`
/// to [1, 20] before the chain sees it.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub category: String,
    pub count: i64,
    pub target: String,
}

/// Why a single provider attempt failed. All variants trigger fallback to
/// the next provider in the chain; none is surfaced to the end user.
#[derive(Debug)]
pub enum AttemptError {
    /// Network, auth, rate limit, or non-2xx reply from the provider.
    Provider(String),

    /// The reply text could not be recovered into an array of records.
    Parse(String),

    /// The reply parsed but normalized down to zero usable questions.
    Empty,
}

impl fmt::Display for AttemptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptError::Provider(msg) => write!(f, "provider error: {}", msg),
            AttemptError::Parse(msg) => write!(f, "parse failure: {}", msg),
            AttemptError::Empty => write!(f, "no usable questions in reply"),
        }
    }
}

impl std::error::Error for AttemptError {}

impl From<reqwest::Error> for AttemptError {
    fn from(err: reqwest::Error) -> Self {
        AttemptError::Provider(err.to_string())
    }
}

/// Ordered list of provider strategies, tried in sequence.
///
/// One attempt per provider, no retries, no speculative parallel dispatch:
/// the secondary only runs after the primary is confirmed failed. Extending
/// to N providers is just a longer list.
#[derive(Clone)]
pub struct ProviderChain {
    providers: Arc<Vec<Box<dyn TextProvider>>>,
}

impl ProviderChain {
    pub fn from_config(config: &Config) -> Self {
        let client = reqwest::Client::new();
        let providers: Vec<Box<dyn TextProvider>> = vec![
            Box::new(OpenAiProvider::new(client.clone(), config)),
            Box::new(GeminiProvider::new(client, config)),
        ];
        Self {
            providers: Arc::new(providers),
        }
    }

    /// Generates a canonical question set, falling back across providers.
    ///
    /// Returns `GenerationFailed` once every provider has failed; there is
    /// no partial result.
    pub async fn generate_questions(
        &self,
        req: &GenerationRequest,
    ) -> Result<Vec<Question>, AppError> {
        let prompt = prompt::questions_prompt(req);

        for provider in self.providers.iter() {
            match self.attempt_questions(provider.as_ref(), &prompt).await {
                Ok(questions) => {
                    tracing::info!(
                        "Generated {} questions via {}",
                        questions.len(),
                        provider.name()
                    );
                    return Ok(questions);
                }
                Err(err) => {
                    tracing::warn!("{} attempt failed: {}", provider.name(), err);
                }
            }
        }

        Err(AppError::GenerationFailed)
    }

    async fn attempt_questions(
        &self,
        provider: &dyn TextProvider,
        prompt: &str,
    ) -> Result<Vec<Question>, AttemptError> {
        let raw = provider.complete(prompt).await?;

        let records = cleaner::extract_records(&raw)
            .map_err(|e| AttemptError::Parse(e.to_string()))?;

        let questions = normalizer::normalize(records);
        if questions.is_empty() {
            return Err(AttemptError::Empty);
        }
        Ok(questions)
    }

    /// Runs one free-text completion through the same ordered chain.
    /// Used by the tips and chat paths.
    pub async fn complete_any(&self, prompt: &str) -> Result<String, AppError> {
        for provider in self.providers.iter() {
            match provider.complete(prompt).await {
                Ok(text) => return Ok(text),
                Err(err) => {
                    tracing::warn!("{} attempt failed: {}", provider.name(), err);
                }
            }
        }
        Err(AppError::GenerationFailed)
    }
}

/// Converts a raw tips reply into a clean list of tip strings: structured
/// array when the model obeyed, line splitting otherwise.
pub fn extract_tips(raw: &str) -> Vec<String> {
    match cleaner::extract_records(raw) {
        Ok(records) => records.iter().map(tip_text).collect(),
        Err(_) => cleaner::split_lines(raw),
    }
}

fn tip_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_tips_prefers_structured_arrays() {
        let raw = r#"```json
["Drink more water", "Sleep 8 hours"]
```"#;
        assert_eq!(
            extract_tips(raw),
            vec!["Drink more water".to_string(), "Sleep 8 hours".to_string()]
        );
    }

    #[test]
    fn extract_tips_falls_back_to_lines() {
        let raw = "- Drink more water\n- Sleep 8 hours\n";
        assert_eq!(
            extract_tips(raw),
            vec!["Drink more water".to_string(), "Sleep 8 hours".to_string()]
        );
    }
}
