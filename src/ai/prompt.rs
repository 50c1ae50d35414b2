// src/ai/prompt.rs
//
// The instruction text sent to generative providers. Both the primary and
// the secondary provider receive the exact same schema contract, so a
// fallback never changes the shape of what comes back.

use super::GenerationRequest;

/// Output schema and scoring polarity rules shared by every question
/// generation call.
const SCHEMA_RULES: &str = r#"
Return ONLY valid JSON (no prose, no code fences).

Schema:
[
  {
    "question": "string",
    "options": [
      { "text": "string", "points": 0|1|2|3 },
      { "text": "string", "points": 0|1|2|3 },
      { "text": "string", "points": 0|1|2|3 },
      { "text": "string", "points": 0|1|2|3 }
    ],
    "dimension": "optional-short-tag-like 'sleep'|'stress'|'hydration'"
  }
]

Scoring rules (VERY IMPORTANT):
- Points reflect HEALTHINESS. Higher = healthier (3 best, 0 worst).
- For POSITIVE behaviors (sleep quality/quantity, hydration, fruit/veg intake, physical activity):
  - Best/healthiest choice -> 3, then 2, 1, 0.
- For NEGATIVE constructs (stress level, pain level, smoking, alcohol frequency, screen time, junk/processed food):
  - Worst choice (e.g., "High", "Severe", "Daily", "Very Often") -> 0
  - Best choice (e.g., "Low", "None", "Never", "Rarely") -> 3

Constraints:
- Exactly 4 concise options per question.
- Keep labels short and clear (e.g., "Never", "Rarely", "Most days", "Always").
- No duplicate options. No explanations. Pure JSON only.
"#;

/// Builds the full question generation instruction for a request.
pub fn questions_prompt(req: &GenerationRequest) -> String {
    format!(
        "Create {} questions to assess a user's {} health, focusing on {}.\n\
         Questions should be practical and answerable by everyday users (no medical diagnostics).\n\
         {}",
        req.count, req.category, req.target, SCHEMA_RULES
    )
}

/// Builds the improvement-tips instruction from the user's answers.
pub fn tips_prompt(answers: &serde_json::Value) -> String {
    format!(
        "You are a certified health coach. Based on the user's quiz answers, \
         produce 5-7 concise improvement tips (max 120 characters each).\n\
         - One sentence per tip, imperative voice.\n\
         - DO NOT include code fences or any prose.\n\
         - Return ONLY a JSON array of strings.\n\n\
         User answers JSON:\n{}",
        serde_json::to_string_pretty(answers).unwrap_or_else(|_| "[]".to_string())
    )
}

/// Builds the stateless health-chat instruction.
pub fn chat_prompt(message: &str) -> String {
    format!(
        "You are a helpful health assistant.\n\
         Always keep responses under 3 short sentences.\n\
         Focus only on health, wellness, diet, exercise, and medical awareness.\n\
         Avoid unrelated topics.\n\
         User: {}",
        message
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn questions_prompt_carries_request_and_contract() {
        let prompt = questions_prompt(&GenerationRequest {
            category: "mental".to_string(),
            count: 7,
            target: "stress recovery".to_string(),
        });

        assert!(prompt.contains("Create 7 questions"));
        assert!(prompt.contains("mental health"));
        assert!(prompt.contains("stress recovery"));
        assert!(prompt.contains(r#""points": 0|1|2|3"#));
        assert!(prompt.contains("Exactly 4 concise options"));
    }
}
