//! Heuristic quality scoring for generated test cases.
//!
//! Five metrics in `[0, 1]`, combined by fixed weights:
//! - completeness: optional fields populated
//! - gherkin_structure: Given, When and Then all present
//! - step_specificity: steps carrying concrete values (saturates at two)
//! - actionability: steps that read as actions
//! - data_coverage: input fields (saturates at three)

mod enhance;
mod suggest;

pub use enhance::{default_expected_result, enhance_case, realistic_value};
pub use suggest::{Suggestion, suggest};

use anyhow::Result;
use casewright_ports::QualityAnalyzer;
use casewright_schema::case::TestCase;
use casewright_schema::feedback::QualityReport;
use chrono::NaiveDate;
use std::collections::BTreeMap;

pub const COMPLETENESS: &str = "completeness";
pub const GHERKIN_STRUCTURE: &str = "gherkin_structure";
pub const STEP_SPECIFICITY: &str = "step_specificity";
pub const ACTIONABILITY: &str = "actionability";
pub const DATA_COVERAGE: &str = "data_coverage";

const WEIGHTS: [(&str, f64); 5] = [
    (COMPLETENESS, 0.25),
    (GHERKIN_STRUCTURE, 0.2),
    (STEP_SPECIFICITY, 0.2),
    (ACTIONABILITY, 0.2),
    (DATA_COVERAGE, 0.15),
];

pub(crate) const GHERKIN_KEYWORDS: &[&str] = &["given", "when", "then", "and", "but"];

const ACTION_VERBS: &[&str] = &[
    "click", "enter", "verify", "check", "validate", "submit", "select", "navigate", "open",
    "send", "create", "update", "delete", "query", "insert", "reload", "log",
];

pub(crate) fn first_word(step: &str) -> String {
    step.split_whitespace()
        .next()
        .unwrap_or("")
        .to_ascii_lowercase()
}

pub(crate) fn is_table_row(step: &str) -> bool {
    step.trim_start().starts_with('|')
}

pub(crate) fn has_action_verb(step: &str) -> bool {
    let lower = step.to_lowercase();
    lower
        .split(|c: char| !c.is_alphanumeric())
        .any(|w| ACTION_VERBS.contains(&w))
}

pub(crate) fn is_concrete(step: &str) -> bool {
    is_table_row(step)
        || step.contains("://")
        || step.contains('@')
        || step.contains('"')
        || step.chars().any(|c| c.is_ascii_digit())
}

fn is_actionable(step: &str) -> bool {
    is_table_row(step) || GHERKIN_KEYWORDS.contains(&first_word(step).as_str()) || has_action_verb(step)
}

pub fn metrics(case: &TestCase) -> BTreeMap<String, f64> {
    let optional = [
        !case.description.trim().is_empty(),
        !case.category.trim().is_empty(),
        !case.test_data.is_empty(),
        !case.prerequisites.is_empty(),
    ];
    let completeness = optional.iter().filter(|b| **b).count() as f64 / optional.len() as f64;

    let leads: Vec<String> = case.steps.iter().map(|s| first_word(s)).collect();
    let gherkin = ["given", "when", "then"]
        .iter()
        .filter(|kw| leads.iter().any(|l| l == *kw))
        .count() as f64
        / 3.0;

    let concrete = case.steps.iter().filter(|s| is_concrete(s)).count();
    let specificity = (concrete as f64 / 2.0).min(1.0);

    let actionability = if case.steps.is_empty() {
        0.0
    } else {
        case.steps.iter().filter(|s| is_actionable(s)).count() as f64 / case.steps.len() as f64
    };

    let coverage = (case.test_data.inputs.len() as f64 / 3.0).min(1.0);

    BTreeMap::from([
        (COMPLETENESS.to_string(), completeness),
        (GHERKIN_STRUCTURE.to_string(), gherkin),
        (STEP_SPECIFICITY.to_string(), specificity),
        (ACTIONABILITY.to_string(), actionability),
        (DATA_COVERAGE.to_string(), coverage),
    ])
}

/// Weighted score, rounded to three decimals.
pub fn weighted_score(metrics: &BTreeMap<String, f64>) -> f64 {
    let raw: f64 = WEIGHTS
        .iter()
        .map(|(name, w)| metrics.get(*name).copied().unwrap_or(0.0) * w)
        .sum();
    (raw * 1000.0).round() / 1000.0
}

/// Default [`QualityAnalyzer`]: keyword and shape heuristics, no model calls.
#[derive(Clone, Debug, Default)]
pub struct HeuristicAnalyzer {
    today: Option<NaiveDate>,
}

impl HeuristicAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins the date used when filling `date` fields.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    fn today(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| chrono::Utc::now().date_naive())
    }
}

impl QualityAnalyzer for HeuristicAnalyzer {
    fn analyze(&self, case: &TestCase) -> Result<QualityReport> {
        let m = metrics(case);
        Ok(QualityReport::new(weighted_score(&m), m))
    }

    fn suggest(&self, case: &TestCase, report: &QualityReport) -> Vec<String> {
        suggest(case, &report.metrics)
            .into_iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn enhance(&self, case: &TestCase, suggestions: &[String]) -> Option<TestCase> {
        let parsed: Vec<Suggestion> = suggestions.iter().filter_map(|s| s.parse().ok()).collect();
        if parsed.is_empty() {
            return None;
        }
        Some(enhance_case(case, &parsed, self.today()))
    }
}
