// src/ai/normalizer.rs
//
// Converts loosely-typed provider records into canonical questions.
// Never errors: unusable records are dropped, missing fields are repaired,
// so one malformed entry cannot sink an otherwise usable question set.

use serde_json::Value;
use uuid::Uuid;

use super::heuristics;
use crate::models::question::{AnswerOption, Question};

/// Option shape before points are settled. Providers send options either
/// as bare labels or as labeled records; both collapse into this.
struct RawOption {
    text: String,
    value: String,
    points: Option<i64>,
}

/// Normalizes an arbitrary parsed payload into the canonical question
/// list, preserving the input order of surviving records.
pub fn normalize(records: Vec<Value>) -> Vec<Question> {
    records.iter().filter_map(normalize_record).collect()
}

fn normalize_record(record: &Value) -> Option<Question> {
    let text = question_text(record)?;

    let mut options: Vec<RawOption> = record
        .get("options")
        .and_then(Value::as_array)
        .map(|raw| raw.iter().filter_map(normalize_option).collect())
        .unwrap_or_default();

    // Canonical invariant: option values are unique within a question.
    let mut seen = Vec::new();
    options.retain(|o| {
        if seen.contains(&o.value) {
            false
        } else {
            seen.push(o.value.clone());
            true
        }
    });

    // Partial trust is not allowed: if the provider scored only some
    // options, its scale cannot be mixed with the heuristic one, so the
    // whole set is re-scored.
    if options.iter().any(|o| o.points.is_none()) {
        let labels: Vec<String> = options.iter().map(|o| o.text.clone()).collect();
        let assigned = heuristics::assign_points(&text, &labels);
        for (option, points) in options.iter_mut().zip(assigned) {
            option.points = Some(points);
        }
    }

    let mut options: Vec<AnswerOption> = options
        .into_iter()
        .map(|o| AnswerOption {
            text: o.text,
            value: o.value,
            points: o.points.unwrap_or(0).clamp(0, 3),
        })
        .collect();

    if options.len() < 2 {
        return None;
    }

    // Presentation convenience only; scoring never depends on order.
    options.sort_by(|a, b| b.points.cmp(&a.points));

    Some(Question {
        id: record_id(record),
        question: text,
        options,
        dimension: record
            .get("dimension")
            .or_else(|| record.get("topic"))
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

fn question_text(record: &Value) -> Option<String> {
    for field in ["question", "questionText", "text"] {
        if let Some(text) = record.get(field).and_then(Value::as_str) {
            let text = text.trim();
            if !text.is_empty() {
                return Some(text.to_string());
            }
        }
    }
    None
}

fn normalize_option(raw: &Value) -> Option<RawOption> {
    match raw {
        Value::String(label) => {
            let label = label.trim();
            if label.is_empty() {
                return None;
            }
            Some(RawOption {
                text: label.to_string(),
                value: label.to_string(),
                points: None,
            })
        }
        Value::Object(map) => {
            let text = map.get("text").and_then(Value::as_str).map(str::trim);
            let value = map.get("value").and_then(Value::as_str).map(str::trim);

            // `text` and `value` default to each other when one is absent.
            let text = text
                .filter(|t| !t.is_empty())
                .or_else(|| value.filter(|v| !v.is_empty()))?
                .to_string();
            let value = value
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| text.clone());

            let points = map
                .get("points")
                .and_then(Value::as_f64)
                .map(|p| (p.round() as i64).clamp(0, 3));

            Some(RawOption { text, value, points })
        }
        _ => None,
    }
}

fn record_id(record: &Value) -> String {
    match record.get("id") {
        Some(Value::String(id)) if !id.trim().is_empty() => id.trim().to_string(),
        Some(Value::Number(id)) => id.to_string(),
        _ => Uuid::new_v4().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn points_of(question: &Question) -> Vec<i64> {
        question.options.iter().map(|o| o.points).collect()
    }

    #[test]
    fn provider_points_are_preserved_unchanged() {
        // The heuristic would score this stress question [3, 2, 0, 0];
        // complete provider points must win instead.
        let records = vec![json!({
            "question": "How often do you feel stressed?",
            "options": [
                {"text": "Never", "points": 2},
                {"text": "Sometimes", "points": 1},
                {"text": "Often", "points": 3},
                {"text": "Always", "points": 0}
            ]
        })];

        let questions = normalize(records);
        assert_eq!(questions.len(), 1);
        // Sorted by descending points.
        assert_eq!(points_of(&questions[0]), vec![3, 2, 1, 0]);
        assert_eq!(questions[0].options[0].text, "Often");
    }

    #[test]
    fn any_missing_points_rescores_the_whole_question() {
        let records = vec![json!({
            "question": "How often do you feel stressed?",
            "options": [
                {"text": "Never", "points": 1},
                {"text": "Sometimes"},
                {"text": "Often", "points": 1},
                {"text": "Always", "points": 1}
            ]
        })];

        let questions = normalize(records);
        // Heuristic output, never a mix: the provider's 1s are discarded.
        // Negative construct tiers give Never=3, Sometimes=2, Often=0,
        // Always=0; sorted descending.
        assert_eq!(points_of(&questions[0]), vec![3, 2, 0, 0]);
        assert_eq!(questions[0].options[0].text, "Never");
    }

    #[test]
    fn bare_string_options_are_lifted_and_scored() {
        let records = vec![json!({
            "question": "How often do you feel stressed?",
            "options": ["Never", "Sometimes", "Often", "Always"]
        })];

        let questions = normalize(records);
        let q = &questions[0];
        assert_eq!(points_of(q), vec![3, 2, 0, 0]);
        for option in &q.options {
            assert_eq!(option.text, option.value);
        }
    }

    #[test]
    fn value_defaults_to_text_and_vice_versa() {
        let records = vec![json!({
            "questionText": "How is your hydration?",
            "options": [
                {"text": "Great", "points": 3},
                {"value": "Fair", "points": 2}
            ]
        })];

        let q = &normalize(records)[0];
        assert_eq!(q.options[0].value, "Great");
        assert_eq!(q.options[1].text, "Fair");
    }

    #[test]
    fn points_are_clamped_and_rounded_into_range() {
        let records = vec![json!({
            "question": "How is your hydration?",
            "options": [
                {"text": "A", "points": 7},
                {"text": "B", "points": -2},
                {"text": "C", "points": 2.6}
            ]
        })];

        let q = &normalize(records)[0];
        assert_eq!(points_of(q), vec![3, 3, 0]);
    }

    #[test]
    fn unusable_records_are_dropped_not_raised() {
        let records = vec![
            json!({"question": "", "options": ["A", "B"]}),
            json!({"options": ["A", "B"]}),
            json!({"question": "Only one usable option", "options": ["A", "", 42]}),
            json!("not even an object"),
            json!({
                "question": "Survivor?",
                "options": [{"text": "Yes", "points": 3}, {"text": "No", "points": 0}]
            }),
        ];

        let questions = normalize(records);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question, "Survivor?");
    }

    #[test]
    fn duplicate_option_values_keep_first() {
        let records = vec![json!({
            "question": "Pick one",
            "options": [
                {"text": "Yes", "value": "y", "points": 3},
                {"text": "Yep", "value": "y", "points": 1},
                {"text": "No", "value": "n", "points": 0}
            ]
        })];

        let q = &normalize(records)[0];
        assert_eq!(q.options.len(), 2);
        assert!(q.options.iter().any(|o| o.text == "Yes"));
        assert!(q.options.iter().all(|o| o.text != "Yep"));
    }

    #[test]
    fn assigns_fresh_ids_and_keeps_provider_ids() {
        let records = vec![
            json!({"id": "q-7", "question": "Kept?", "options": ["A", "B"]}),
            json!({"question": "Generated?", "options": ["A", "B"]}),
        ];

        let questions = normalize(records);
        assert_eq!(questions[0].id, "q-7");
        assert!(!questions[1].id.is_empty());
        assert_ne!(questions[0].id, questions[1].id);
    }

    #[test]
    fn normalization_is_idempotent_on_canonical_output() {
        let records = vec![json!({
            "question": "How often do you feel stressed?",
            "options": ["Never", "Sometimes", "Often", "Always"],
            "dimension": "stress"
        })];

        let first = normalize(records);
        let reparsed: Vec<Value> = first
            .iter()
            .map(|q| serde_json::to_value(q).unwrap())
            .collect();
        let second = normalize(reparsed);

        assert_eq!(first, second);
    }
}
