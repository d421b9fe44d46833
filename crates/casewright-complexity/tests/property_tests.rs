//! Property tests for casewright-complexity
//!
//! Purity and monotonicity of the complexity estimate.

use casewright_complexity::{breakdown, estimate};
use casewright_extract::extract_from_issue;
use casewright_testkit::proptest::*;
use proptest::prelude::*;

// ============================================================================
// Estimation Invariant Tests
// ============================================================================

proptest! {
    /// Extraction + estimation on identical input yields identical levels
    #[test]
    fn prop_estimate_idempotent(issue in strategy_issue_text()) {
        let first = estimate(&extract_from_issue(&issue), issue.component_count());
        let second = estimate(&extract_from_issue(&issue), issue.component_count());
        prop_assert_eq!(first, second);
    }

    /// More components never lower the level
    #[test]
    fn prop_components_monotonic(issue in strategy_issue_text(), extra in 0usize..6) {
        let vp = extract_from_issue(&issue);
        let n = issue.component_count();
        prop_assert!(estimate(&vp, n) <= estimate(&vp, n + extra));
    }

    /// The score always has the two base points
    #[test]
    fn prop_score_at_least_two(issue in strategy_issue_text()) {
        let b = breakdown(&extract_from_issue(&issue), issue.component_count());
        prop_assert!(b.score() >= 2);
    }
}
