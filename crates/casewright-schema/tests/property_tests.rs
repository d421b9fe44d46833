//! Property tests for casewright-schema
//!
//! Serialization stability and invariant enforcement of the record types.

use casewright_ids::TestCaseId;
use casewright_schema::case::{Priority, TestCase, TestData};
use casewright_schema::issue::FeatureType;
use casewright_schema::validation::{ValidationCategory, ValidationPoints};
use proptest::prelude::*;

fn strategy_category() -> impl Strategy<Value = ValidationCategory> {
    prop::sample::select(ValidationCategory::ALL.to_vec())
}

// ============================================================================
// Priority Tests
// ============================================================================

proptest! {
    /// Any casing and padding of a priority name parses to the same value
    #[test]
    fn prop_priority_case_insensitive(
        name in prop::sample::select(vec!["high", "medium", "low"]),
        upper in prop::collection::vec(any::<bool>(), 6),
        pad in " {0,3}",
    ) {
        let mixed: String = name
            .chars()
            .zip(upper.iter().cycle())
            .map(|(c, u)| if *u { c.to_ascii_uppercase() } else { c })
            .collect();
        let input = format!("{pad}{mixed}{pad}");
        let parsed: Priority = input.parse().unwrap();
        prop_assert_eq!(parsed.to_string().to_lowercase(), name);
    }
}

// ============================================================================
// ValidationPoints Tests
// ============================================================================

proptest! {
    /// Buckets never hold duplicates and never exist empty
    #[test]
    fn prop_points_unique_and_non_empty(
        entries in prop::collection::vec((strategy_category(), "[a-c]{1,2}"), 0..30)
    ) {
        let mut vp = ValidationPoints::new();
        for (cat, s) in &entries {
            vp.insert(*cat, s.clone());
        }
        for (_, sentences) in vp.iter() {
            prop_assert!(!sentences.is_empty());
            let mut sorted = sentences.to_vec();
            sorted.sort();
            sorted.dedup();
            prop_assert_eq!(sorted.len(), sentences.len());
        }
        prop_assert_eq!(vp.is_empty(), entries.is_empty());
    }
}

// ============================================================================
// TestCase Tests
// ============================================================================

proptest! {
    /// A case survives JSON and YAML serialization unchanged
    #[test]
    fn prop_case_serialization_stable(
        name in "[A-Za-z][A-Za-z ]{0,29}",
        steps in prop::collection::vec("(Given|When|Then) [a-z ]{1,20}", 1..6),
        user in "[a-z]{1,10}",
    ) {
        let case = TestCase::new(TestCaseId("QA-1-TC01".into()), name, steps, "It works")
            .unwrap()
            .with_feature(FeatureType::Login)
            .with_test_data(TestData::default().with_input("username", user));
        let json = serde_json::to_string(&case).unwrap();
        let back: TestCase = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(&back, &case);
        let yaml = serde_yaml::to_string(&case).unwrap();
        let back: TestCase = serde_yaml::from_str(&yaml).unwrap();
        prop_assert_eq!(back, case);
    }
}
