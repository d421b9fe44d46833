//! Property tests for casewright-classify
//!
//! Determinism and no-signal behavior of keyword classification.

use casewright_classify::{classify, classify_detailed, keywords};
use casewright_schema::issue::{FeatureType, IssueText};
use casewright_testkit::proptest::*;
use proptest::prelude::*;

// ============================================================================
// Classification Invariant Tests
// ============================================================================

proptest! {
    /// Classifying the same issue twice gives the same answer
    #[test]
    fn prop_classification_deterministic(issue in strategy_issue_text()) {
        prop_assert_eq!(classify_detailed(&issue), classify_detailed(&issue));
    }

    /// The winning type's score is the maximum score
    #[test]
    fn prop_winner_has_max_score(issue in strategy_issue_text()) {
        let c = classify_detailed(&issue);
        let max = c.scores.iter().map(|(_, s)| *s).max().unwrap_or(0);
        if max == 0 {
            prop_assert_eq!(c.feature, FeatureType::Generic);
        } else {
            let first_max = c.scores.iter().find(|(_, s)| *s == max).map(|(ft, _)| *ft);
            prop_assert_eq!(Some(c.feature), first_max);
        }
    }

    /// Text built from non-keyword words is always generic
    #[test]
    fn prop_keyword_free_text_is_generic(issue in strategy_keyword_free_issue()) {
        prop_assert_eq!(classify(&issue), FeatureType::Generic);
    }

    /// Adding a type's full keyword list to a keyword-free issue selects that type
    #[test]
    fn prop_full_keyword_list_wins(
        base in strategy_keyword_free_issue(),
        ft in prop::sample::select(FeatureType::RANKED.to_vec()),
    ) {
        let mut issue: IssueText = base;
        issue.description = keywords(ft).join(" ");
        let c = classify_detailed(&issue);
        let own = c.scores.iter().find(|(t, _)| *t == ft).map(|(_, s)| *s).unwrap_or(0);
        prop_assert_eq!(own, keywords(ft).len());
        prop_assert_ne!(c.feature, FeatureType::Generic);
    }
}
