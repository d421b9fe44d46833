//! Validation point extraction.
//!
//! Lines of description + acceptance criteria are lower-cased, trimmed, and
//! matched against per-category indicator substrings. A line may land in
//! several categories. Lines under [`MIN_LINE_CHARS`] are noise.

use casewright_schema::issue::IssueText;
use casewright_schema::validation::{ValidationCategory, ValidationPoints};
use tracing::debug;

/// Shorter (trimmed) lines are skipped.
pub const MIN_LINE_CHARS: usize = 10;

pub fn indicators(category: ValidationCategory) -> &'static [&'static str] {
    match category {
        ValidationCategory::Functional => {
            &["should", "must", "needs to", "will", "verify", "check", "ensure"]
        }
        ValidationCategory::Performance => &[
            "response time",
            "load time",
            "performance",
            "fast",
            "slow",
            "second",
        ],
        ValidationCategory::Usability => {
            &["user friendly", "intuitive", "accessible", "easy to", "clear"]
        }
        ValidationCategory::Security => {
            &["secure", "authenticated", "authorized", "permission", "role"]
        }
        ValidationCategory::Data => &["valid", "invalid", "data", "input", "output", "format"],
        ValidationCategory::Error => &["error", "exception", "fail", "invalid", "incorrect"],
        ValidationCategory::Integration => {
            &["api", "endpoint", "service", "integration", "connect"]
        }
    }
}

/// Capitalizes the first character and guarantees a trailing period.
pub fn clean_sentence(line: &str) -> String {
    let mut chars = line.chars();
    let mut out = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
    };
    if !out.ends_with('.') {
        out.push('.');
    }
    out
}

/// Buckets the lines of `text` into categories.
pub fn extract_validation_points(text: &str) -> ValidationPoints {
    let mut points = ValidationPoints::new();
    let lowered = text.to_lowercase();

    for line in lowered.split('\n') {
        let line = line.trim();
        if line.chars().count() < MIN_LINE_CHARS {
            continue;
        }
        for category in ValidationCategory::ALL {
            if indicators(category).iter().any(|ind| line.contains(ind)) {
                points.insert(category, clean_sentence(line));
            }
        }
    }

    debug!(total = points.total(), "extracted validation points");
    points
}

/// Extraction over an issue's description and acceptance criteria.
pub fn extract_from_issue(issue: &IssueText) -> ValidationPoints {
    extract_validation_points(&issue.validation_text())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_gives_empty_mapping() {
        assert!(extract_validation_points("").is_empty());
        assert!(extract_validation_points("\n\n   \n").is_empty());
    }

    #[test]
    fn short_lines_are_skipped() {
        // 9 chars after trimming
        assert!(extract_validation_points("  must do!  ").is_empty());
        let vp = extract_validation_points("must do it");
        assert_eq!(vp.get(ValidationCategory::Functional), ["Must do it."]);
    }

    #[test]
    fn line_can_land_in_several_categories() {
        let vp = extract_validation_points(
            "API endpoint returns 500 on invalid payload, integration with billing service",
        );
        assert!(vp.has(ValidationCategory::Integration));
        assert!(vp.has(ValidationCategory::Error));
        assert!(vp.has(ValidationCategory::Data));
        assert!(!vp.has(ValidationCategory::Security));
    }

    #[test]
    fn duplicates_within_category_are_suppressed() {
        let vp = extract_validation_points("user must log in\nUSER MUST LOG IN\nuser must log in.");
        assert_eq!(vp.get(ValidationCategory::Functional), ["User must log in."]);
    }

    #[test]
    fn order_of_first_appearance_is_kept() {
        let vp = extract_validation_points("the page must load\nthe form should submit");
        assert_eq!(
            vp.get(ValidationCategory::Functional),
            ["The page must load.", "The form should submit."]
        );
    }

    #[test]
    fn clean_sentence_capitalizes_and_terminates() {
        assert_eq!(clean_sentence("shows an error"), "Shows an error.");
        assert_eq!(clean_sentence("done."), "Done.");
        assert_eq!(clean_sentence(""), ".");
    }

    #[test]
    fn acceptance_criteria_lines_are_separate() {
        let issue = IssueText::new("x", "the login must be secure")
            .with_acceptance_criteria("response time under 2 seconds");
        let vp = extract_from_issue(&issue);
        assert_eq!(vp.get(ValidationCategory::Security), ["The login must be secure."]);
        assert_eq!(
            vp.get(ValidationCategory::Performance),
            ["Response time under 2 seconds."]
        );
    }
}
