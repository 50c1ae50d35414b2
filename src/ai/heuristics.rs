// src/ai/heuristics.rs
//
// Fallback scoring used only when the provider forgot to attach points.
// Classifies the question as a positive or negative health construct from
// its wording, then maps each option label onto the 0..=3 scale through
// ordered keyword tiers. Deterministic for identical input.

use once_cell::sync::Lazy;
use regex::Regex;

/// Health dimensions where higher reported intensity is less healthy
/// (stress, pain, smoking, screen time, processed food, ...).
static NEGATIVE_CONSTRUCT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)stress|pain|smok|alcohol|drink|sugar|candy|soda|junk|fast\s*food|screen|sedentary|sitting|anxiety|depress|fatigue|exhaust|insomnia|blood\s*pressure|cholesterol",
    )
    .unwrap()
});

// Negative constructs: lower intensity is healthier.
static NEG_LOW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)none|never|low|rarely|minimal").unwrap());
static NEG_MID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)moderate|sometimes|medium|some").unwrap());
static NEG_HIGH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)often|high|frequent|severe|daily|always").unwrap());

// Positive constructs: explicit best/worst indicators, then common
// mid-tier labels. Checked in order; first match wins.
static POS_BEST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)always|excellent|great|7-9|4-5|often exercise|well-rested|clear|none|never|low|rarely")
        .unwrap()
});
static POS_MID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)most|good|3-4|sometimes|moderate|ok|fair").unwrap());
static POS_LOW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)rarely|1-2|poor|not much").unwrap());
static POS_WORST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<5|0-1|high|severe|daily|frequent").unwrap());

/// Whether higher raw intensity on this question means less healthy.
pub fn is_negative_construct(question_text: &str) -> bool {
    NEGATIVE_CONSTRUCT.is_match(question_text)
}

/// Assigns one point value in [0, 3] per option label.
pub fn assign_points(question_text: &str, labels: &[String]) -> Vec<i64> {
    let negative = is_negative_construct(question_text);
    labels
        .iter()
        .map(|label| {
            if negative {
                score_negative(label)
            } else {
                score_positive(label)
            }
        })
        .collect()
}

fn score_negative(label: &str) -> i64 {
    if NEG_LOW.is_match(label) {
        3
    } else if NEG_MID.is_match(label) {
        2
    } else if NEG_HIGH.is_match(label) {
        0
    } else {
        1 // neutral fallback
    }
}

fn score_positive(label: &str) -> i64 {
    if POS_BEST.is_match(label) {
        3
    } else if POS_MID.is_match(label) {
        2
    } else if POS_LOW.is_match(label) {
        1
    } else if POS_WORST.is_match(label) {
        0
    } else {
        1 // neutral fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn detects_negative_constructs() {
        assert!(is_negative_construct("How often do you feel stressed?"));
        assert!(is_negative_construct("Rate your daily SCREEN time"));
        assert!(is_negative_construct("Do you smoke?"));
        assert!(!is_negative_construct("How many hours do you sleep?"));
        assert!(!is_negative_construct("How often do you eat vegetables?"));
    }

    #[test]
    fn stress_question_scores_by_inverse_intensity() {
        let points = assign_points(
            "How often do you feel stressed?",
            &labels(&["Never", "Sometimes", "Often", "Always"]),
        );
        assert_eq!(points, vec![3, 2, 0, 0]);
    }

    #[test]
    fn positive_question_scores_by_intensity() {
        let points = assign_points(
            "How would you rate your sleep quality?",
            &labels(&["Excellent", "Good", "Poor", "Severe trouble sleeping"]),
        );
        assert_eq!(points, vec![3, 2, 1, 0]);
    }

    #[test]
    fn unknown_labels_fall_back_to_neutral() {
        let points = assign_points(
            "How often do you feel stressed?",
            &labels(&["Banana", "Twice per fortnight"]),
        );
        assert_eq!(points, vec![1, 1]);
    }

    #[test]
    fn assignment_is_deterministic() {
        let text = "How much water do you drink per day?";
        let opts = labels(&["None", "1-2 glasses", "3-4 glasses", "More than 8"]);
        assert_eq!(assign_points(text, &opts), assign_points(text, &opts));
    }

    #[test]
    fn all_points_stay_in_range() {
        let opts = labels(&["Always", "High", "meh", "0-1", "Most days", "Rarely"]);
        for text in ["Stress level?", "Vegetable intake?"] {
            for p in assign_points(text, &opts) {
                assert!((0..=3).contains(&p));
            }
        }
    }
}
