//! Proptest strategies for casewright property-based testing

use casewright_ids::TestCaseId;
use casewright_schema::case::{Priority, TestCase, TestData};
use casewright_schema::issue::{FeatureType, IssueText};
use casewright_schema::pattern::{TestCasePattern, ValueType};
use proptest::prelude::*;
use serde_json::Value;
use std::collections::BTreeMap;

/// Words that contain no classifier keyword, even as a substring.
const NEUTRAL_WORDS: &[&str] = &[
    "nightly", "export", "sprint", "calendar", "metrics", "billing", "invoice", "schedule", "team",
    "report", "archive", "monthly",
];

/// Classifier keywords and validation indicators mixed with neutral words.
const SIGNAL_WORDS: &[&str] = &[
    "login", "password", "api", "endpoint", "button", "form", "database", "query", "verify",
    "validation", "must", "should", "error", "invalid", "integration", "secure", "performance",
    "fast", "usability", "intuitive", "accuracy", "correct",
];

const STEP_WORDS: &[&str] = &[
    "I", "the", "page", "open", "submit", "form", "user", "sees", "message", "button", "click",
    "42", "user@example.com", "\"admin\"", "dashboard", "record", "saved",
];

const CATEGORIES: &[&str] = &["positive", "negative", "security", "performance", "edge_case", "validation"];

// ============================================================================
// Issue Strategies
// ============================================================================

fn strategy_word() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        prop::sample::select(NEUTRAL_WORDS),
        prop::sample::select(SIGNAL_WORDS),
    ]
}

fn strategy_line(words: impl Strategy<Value = &'static str>) -> impl Strategy<Value = String> {
    prop::collection::vec(words, 0..10).prop_map(|w| w.join(" "))
}

/// Strategy for multi-line ticket text, including short and blank lines
pub fn strategy_ticket_text() -> impl Strategy<Value = String> {
    prop::collection::vec(strategy_line(strategy_word()), 0..8).prop_map(|lines| lines.join("\n"))
}

fn strategy_key() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[A-Z]{2,4}-[0-9]{1,4}")
}

/// Strategy for arbitrary issues mixing keyword and neutral vocabulary
pub fn strategy_issue_text() -> impl Strategy<Value = IssueText> {
    (
        strategy_key(),
        strategy_line(strategy_word()),
        strategy_ticket_text(),
        strategy_ticket_text(),
        prop::collection::btree_set(prop::sample::select(SIGNAL_WORDS).prop_map(String::from), 0..3),
        prop::collection::vec("[a-z]{3,8}", 0..4),
    )
        .prop_map(|(key, summary, description, ac, labels, components)| IssueText {
            key,
            summary,
            description,
            labels,
            acceptance_criteria: ac,
            issue_type: String::new(),
            components,
        })
}

/// Strategy for issues whose classification text holds no feature keyword
pub fn strategy_keyword_free_issue() -> impl Strategy<Value = IssueText> {
    let neutral = || prop::sample::select(NEUTRAL_WORDS);
    (
        strategy_key(),
        strategy_line(neutral()),
        prop::collection::vec(strategy_line(neutral()), 0..6).prop_map(|l| l.join("\n")),
        prop::collection::btree_set(neutral().prop_map(String::from), 0..3),
        prop::sample::select(vec!["Story", "Task", "Bug", ""]),
        prop::collection::vec("[a-z]{3,8}", 0..3),
    )
        .prop_map(|(key, summary, description, labels, issue_type, components)| IssueText {
            key,
            summary,
            description,
            labels,
            acceptance_criteria: String::new(),
            issue_type: issue_type.to_string(),
            components,
        })
}

// ============================================================================
// Step and Data Strategies
// ============================================================================

/// Strategy for non-blank Gherkin-ish steps
pub fn strategy_step() -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec!["Given", "When", "Then", "And", "Verify"]),
        prop::collection::vec(prop::sample::select(STEP_WORDS), 1..7),
    )
        .prop_map(|(lead, words)| format!("{lead} {}", words.join(" ")))
}

/// Strategy for JSON values of every value-type tag
pub fn strategy_json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        (-1.0e6f64..1.0e6).prop_map(Value::from),
        "[a-z0-9 @.]{0,16}".prop_map(Value::String),
        prop::sample::select(vec!["true", "no", "17", "2.5", "test"]).prop_map(Value::from),
    ];
    leaf.prop_recursive(2, 8, 3, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..3).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..3)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

/// Strategy for test data with a few inputs and validation expectations
pub fn strategy_test_data() -> impl Strategy<Value = TestData> {
    (
        prop::collection::btree_map("[a-z_]{1,10}", strategy_json_value(), 0..5),
        prop::collection::btree_map("[a-z_]{1,10}", strategy_json_value(), 0..3),
    )
        .prop_map(|(inputs, validation)| TestData { inputs, validation })
}

pub fn strategy_value_type() -> impl Strategy<Value = ValueType> {
    prop::sample::select(vec![
        ValueType::Str,
        ValueType::Int,
        ValueType::Float,
        ValueType::Bool,
        ValueType::Dict,
        ValueType::List,
    ])
}

/// Strategy for test-data schemas keyed `inputs.<f>` / `validation.<f>`
pub fn strategy_data_pattern() -> impl Strategy<Value = BTreeMap<String, ValueType>> {
    prop::collection::btree_map(
        prop_oneof!["inputs\\.[a-z_]{1,10}", "validation\\.[a-z_]{1,10}"],
        strategy_value_type(),
        0..6,
    )
}

// ============================================================================
// Case and Pattern Strategies
// ============================================================================

fn strategy_feature() -> impl Strategy<Value = FeatureType> {
    prop::sample::select(
        FeatureType::RANKED
            .into_iter()
            .chain([FeatureType::Generic])
            .collect::<Vec<_>>(),
    )
}

/// Strategy for valid test cases
pub fn strategy_test_case() -> impl Strategy<Value = TestCase> {
    (
        (1usize..100, "[A-Za-z][A-Za-z ]{0,29}", "[A-Za-z ]{0,40}"),
        prop::sample::select(CATEGORIES),
        strategy_feature(),
        prop::sample::select(vec![Priority::Low, Priority::Medium, Priority::High]),
        prop::collection::vec(strategy_step(), 1..8),
        strategy_test_data(),
        prop::collection::vec("[A-Za-z ]{1,20}", 0..3),
        "[A-Za-z][a-z0-9 ]{0,30}",
    )
        .prop_map(
            |((n, name, description), category, feature, priority, steps, test_data, prerequisites, expected)| {
                TestCase {
                    id: TestCaseId::for_issue(None, n),
                    name,
                    description,
                    category: category.to_string(),
                    feature,
                    priority,
                    steps,
                    test_data,
                    prerequisites,
                    expected_result: expected,
                }
            },
        )
}

/// Strategy for valid patterns
pub fn strategy_pattern() -> impl Strategy<Value = TestCasePattern> {
    (
        strategy_feature(),
        prop::collection::vec(strategy_step(), 1..6),
        strategy_data_pattern(),
    )
        .prop_map(|(feature, steps, data)| TestCasePattern::new(feature, steps, data))
}
