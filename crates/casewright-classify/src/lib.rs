//! Text classifier: issue text to [`FeatureType`].
//!
//! Each scored feature type owns a keyword list. A type's score is the number
//! of its keywords found (as substrings) in the lower-cased classification
//! text. Highest score wins; equal scores go to the type listed first in
//! [`FeatureType::RANKED`]. No signal at all yields [`FeatureType::Generic`].

use casewright_schema::issue::{FeatureType, IssueText};
use tracing::debug;

const LOGIN: &[&str] = &["login", "authentication", "credentials", "password"];
const DATA_VALIDATION: &[&str] = &["validation", "verify", "check", "data quality"];
const API_TEST: &[&str] = &["api", "endpoint", "service", "request", "response"];
const UI_TEST: &[&str] = &["ui", "interface", "button", "click", "form"];
const DATABASE_TEST: &[&str] = &["database", "db", "query", "data", "storage"];

/// Keyword list for a feature type. `Generic` has none.
pub fn keywords(feature: FeatureType) -> &'static [&'static str] {
    match feature {
        FeatureType::Login => LOGIN,
        FeatureType::DataValidation => DATA_VALIDATION,
        FeatureType::ApiTest => API_TEST,
        FeatureType::UiTest => UI_TEST,
        FeatureType::DatabaseTest => DATABASE_TEST,
        FeatureType::Generic => &[],
    }
}

/// Outcome of scoring one issue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classification {
    pub feature: FeatureType,
    /// Per-type scores in tie-break order.
    pub scores: Vec<(FeatureType, usize)>,
}

impl Classification {
    /// No keyword matched any type.
    pub fn is_ambiguous(&self) -> bool {
        self.feature == FeatureType::Generic
    }
}

/// Scores every ranked type against already lower-cased text.
pub fn score_text(text: &str) -> Vec<(FeatureType, usize)> {
    FeatureType::RANKED
        .iter()
        .map(|ft| {
            let hits = keywords(*ft).iter().filter(|kw| text.contains(*kw)).count();
            (*ft, hits)
        })
        .collect()
}

pub fn classify_detailed(issue: &IssueText) -> Classification {
    let scores = score_text(&issue.classification_text());

    // strict `>` keeps the earliest type on ties
    let mut best = (FeatureType::Generic, 0usize);
    for (ft, hits) in &scores {
        if *hits > best.1 {
            best = (*ft, *hits);
        }
    }

    debug!(feature = %best.0, score = best.1, ?scores, "classified issue");
    Classification {
        feature: best.0,
        scores,
    }
}

pub fn classify(issue: &IssueText) -> FeatureType {
    classify_detailed(issue).feature
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_summary_is_login() {
        let issue = IssueText::new("User login with email and password", "");
        assert_eq!(classify(&issue), FeatureType::Login);
    }

    #[test]
    fn api_ticket_is_api_test() {
        let issue = IssueText::new(
            "Billing endpoint",
            "API endpoint returns 500 on invalid payload, integration with billing service",
        );
        assert_eq!(classify(&issue), FeatureType::ApiTest);
    }

    #[test]
    fn empty_issue_is_generic() {
        let c = classify_detailed(&IssueText::default());
        assert_eq!(c.feature, FeatureType::Generic);
        assert!(c.is_ambiguous());
        assert!(c.scores.iter().all(|(_, s)| *s == 0));
    }

    #[test]
    fn ties_go_to_earlier_type() {
        // one login keyword, one api keyword
        let issue = IssueText::new("password endpoint", "");
        let c = classify_detailed(&issue);
        assert_eq!(c.scores[0], (FeatureType::Login, 1));
        assert_eq!(c.scores[2], (FeatureType::ApiTest, 1));
        assert_eq!(c.feature, FeatureType::Login);
    }

    #[test]
    fn keyword_counted_once_however_often_it_appears() {
        let scores = score_text("api api api");
        assert_eq!(scores[2], (FeatureType::ApiTest, 1));
    }

    #[test]
    fn labels_and_issue_type_contribute() {
        let issue = IssueText::new("Nightly job", "")
            .with_labels(["database"])
            .with_issue_type("Storage");
        assert_eq!(classify(&issue), FeatureType::DatabaseTest);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let issue = IssueText::new("SUBMIT FORM BUTTON", "");
        assert_eq!(classify(&issue), FeatureType::UiTest);
    }

    #[test]
    fn generic_has_no_keywords() {
        assert!(keywords(FeatureType::Generic).is_empty());
        for ft in FeatureType::RANKED {
            assert!(!keywords(ft).is_empty());
        }
    }
}
