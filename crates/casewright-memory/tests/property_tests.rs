//! Property tests for casewright-memory
//!
//! Pattern extraction thresholds and store persistence.

use casewright_memory::{MIN_PATTERN_CASES, PatternMemory, extract_pattern};
use casewright_testkit::proptest::*;
use proptest::prelude::*;

// ============================================================================
// Extraction Tests
// ============================================================================

proptest! {
    /// Fewer than three cases never produce a pattern
    #[test]
    fn prop_too_few_cases_no_pattern(cases in prop::collection::vec(strategy_test_case(), 0..MIN_PATTERN_CASES)) {
        prop_assert!(extract_pattern(&cases).is_none());
    }

    /// Three or more cases always produce a valid pattern shaped like one of them
    #[test]
    fn prop_enough_cases_give_pattern(cases in prop::collection::vec(strategy_test_case(), MIN_PATTERN_CASES..10)) {
        let p = extract_pattern(&cases).unwrap();
        prop_assert!(p.validate().is_ok());
        prop_assert!(cases.iter().any(|c| c.steps == p.steps_pattern));
        prop_assert_eq!(p.source_cases, cases.len());
    }
}

// ============================================================================
// Persistence Tests
// ============================================================================

proptest! {
    /// A store survives JSON serialization with ids and steps intact
    #[test]
    fn prop_store_round_trip(patterns in prop::collection::vec(strategy_pattern(), 0..8)) {
        let memory = PatternMemory::new();
        for p in patterns {
            memory.add_pattern(p).unwrap();
        }
        let json = serde_json::to_string(&memory.to_store_file()).unwrap();
        let loaded = PatternMemory::from_store_json(&json).unwrap();

        let before: Vec<_> = memory.all_patterns().into_iter()
            .map(|p| (p.pattern_id, p.feature_type, p.steps_pattern))
            .collect();
        let after: Vec<_> = loaded.all_patterns().into_iter()
            .map(|p| (p.pattern_id, p.feature_type, p.steps_pattern))
            .collect();
        prop_assert_eq!(before, after);
    }
}
