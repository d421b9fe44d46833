//! Property tests for casewright-extract
//!
//! Shape invariants of extracted validation points.

use casewright_extract::{MIN_LINE_CHARS, extract_validation_points};
use casewright_testkit::proptest::*;
use proptest::prelude::*;

// ============================================================================
// Extraction Invariant Tests
// ============================================================================

proptest! {
    /// Every sentence ends with a period, never starts lowercase, and is long enough
    #[test]
    fn prop_sentences_are_clean(text in strategy_ticket_text()) {
        let vp = extract_validation_points(&text);
        for (_, sentences) in vp.iter() {
            prop_assert!(!sentences.is_empty());
            for s in sentences {
                prop_assert!(s.ends_with('.'));
                prop_assert!(!s.starts_with(|c: char| c.is_lowercase()));
                prop_assert!(s.chars().count() >= MIN_LINE_CHARS);
            }
        }
    }

    /// Extraction is a pure function of its input
    #[test]
    fn prop_extraction_deterministic(text in strategy_ticket_text()) {
        prop_assert_eq!(extract_validation_points(&text), extract_validation_points(&text));
    }

    /// No category holds more sentences than the text has lines
    #[test]
    fn prop_bucket_bounded_by_lines(text in strategy_ticket_text()) {
        let lines = text.split('\n').count();
        let vp = extract_validation_points(&text);
        for (_, sentences) in vp.iter() {
            prop_assert!(sentences.len() <= lines);
        }
    }
}
