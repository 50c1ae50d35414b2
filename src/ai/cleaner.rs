// src/ai/cleaner.rs
//
// Defensive extraction of structured data from raw model output.
// Providers are asked for pure JSON but routinely wrap it in code fences
// or surround it with prose, so every parse here is best-effort.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::fmt;

static JSON_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)```json\s*").unwrap());
static FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"```").unwrap());
static BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[-*•\d.)]+\s*").unwrap());

/// Raised when no array-shaped structure can be recovered from the text.
/// Local to the pipeline: callers fall back to the next provider instead
/// of surfacing this to the end user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure;

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "response is not structurally recoverable")
    }
}

impl std::error::Error for ParseFailure {}

/// Removes triple-backtick fences (with or without a language tag),
/// keeping only the interior text.
pub fn strip_fences(text: &str) -> String {
    let without_tag = JSON_FENCE.replace_all(text, "");
    FENCE.replace_all(&without_tag, "").trim().to_string()
}

/// Recovers the most plausible JSON array of records from raw model text.
///
/// Attempts, in order, first success wins:
/// 1. the whole (fence-stripped) text as JSON: an array directly, or an
///    object carrying the array under `questions` or `data`;
/// 2. the outermost `[ ... ]` substring, for replies with leading or
///    trailing prose.
pub fn extract_records(text: &str) -> Result<Vec<Value>, ParseFailure> {
    let cleaned = strip_fences(text);

    if let Ok(parsed) = serde_json::from_str::<Value>(&cleaned) {
        if let Some(records) = unwrap_array(&parsed) {
            return Ok(records);
        }
    }

    // Greedy: first '[' to last ']', so nested arrays stay intact.
    if let (Some(start), Some(end)) = (cleaned.find('['), cleaned.rfind(']')) {
        if start < end {
            if let Ok(parsed) = serde_json::from_str::<Value>(&cleaned[start..=end]) {
                if let Some(records) = unwrap_array(&parsed) {
                    return Ok(records);
                }
            }
        }
    }

    Err(ParseFailure)
}

fn unwrap_array(parsed: &Value) -> Option<Vec<Value>> {
    if let Value::Array(items) = parsed {
        return Some(items.clone());
    }
    for field in ["questions", "data"] {
        if let Some(Value::Array(items)) = parsed.get(field) {
            return Some(items.clone());
        }
    }
    None
}

/// Last-resort extraction for the tips path: split into lines, strip
/// leading bullet and numbering markers, drop empties, cap at 8 entries.
///
/// The question pipeline never uses this: it requires structured array
/// output and treats anything less as a `ParseFailure`.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| BULLET.replace(line, "").trim().to_string())
        .filter(|line| !line.is_empty())
        .take(8)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const BARE: &str = r#"[{"question": "How well do you sleep?", "options": ["Great", "Poorly"]}]"#;

    #[test]
    fn parses_bare_array() {
        let records = extract_records(BARE).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["question"], "How well do you sleep?");
    }

    #[test]
    fn fenced_and_prosed_replies_parse_the_same() {
        let bare = extract_records(BARE).unwrap();

        let fenced = format!("```json\n{}\n```", BARE);
        assert_eq!(extract_records(&fenced).unwrap(), bare);

        let fenced_no_tag = format!("```\n{}\n```", BARE);
        assert_eq!(extract_records(&fenced_no_tag).unwrap(), bare);

        let prosed = format!("Here are your questions:\n{}\nHope this helps!", BARE);
        assert_eq!(extract_records(&prosed).unwrap(), bare);
    }

    #[test]
    fn unwraps_questions_and_data_fields() {
        let wrapped = json!({"questions": [{"question": "q1"}]}).to_string();
        assert_eq!(extract_records(&wrapped).unwrap().len(), 1);

        let wrapped = json!({"data": [{"question": "q1"}, {"question": "q2"}]}).to_string();
        assert_eq!(extract_records(&wrapped).unwrap().len(), 2);
    }

    #[test]
    fn rejects_unstructured_text() {
        assert_eq!(extract_records("no json here at all"), Err(ParseFailure));
        assert_eq!(extract_records(""), Err(ParseFailure));
        // An object with no recognized array field is not a question payload.
        assert_eq!(
            extract_records(r#"{"message": "I could not comply"}"#),
            Err(ParseFailure)
        );
    }

    #[test]
    fn split_lines_strips_markers_and_caps() {
        let text = "1. Drink more water\n- Sleep 8 hours\n• Walk daily\n\n  2) Stretch";
        assert_eq!(
            split_lines(text),
            vec!["Drink more water", "Sleep 8 hours", "Walk daily", "Stretch"]
        );

        let many = (0..12).map(|i| format!("- tip {}", i)).collect::<Vec<_>>().join("\n");
        assert_eq!(split_lines(&many).len(), 8);
    }
}
