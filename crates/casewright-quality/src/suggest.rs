use crate::{COMPLETENESS, DATA_COVERAGE, STEP_SPECIFICITY, first_word};
use casewright_schema::case::TestCase;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Improvement the heuristics know how to apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suggestion {
    AddStepDetails,
    AddMissingFields,
    ImproveTestData,
    AddAssertions,
}

impl Suggestion {
    fn text(self) -> &'static str {
        match self {
            Suggestion::AddStepDetails => "Add more specific details to steps",
            Suggestion::AddMissingFields => "Add missing fields",
            Suggestion::ImproveTestData => "Improve test data",
            Suggestion::AddAssertions => "Add a Then step asserting the outcome",
        }
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl FromStr for Suggestion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            Suggestion::AddStepDetails,
            Suggestion::AddMissingFields,
            Suggestion::ImproveTestData,
            Suggestion::AddAssertions,
        ]
        .into_iter()
        .find(|sug| sug.text().eq_ignore_ascii_case(s.trim()))
        .ok_or_else(|| format!("unknown suggestion: {s}"))
    }
}

const PLACEHOLDERS: &[&str] = &["test", "example", "placeholder", "xxx", "value"];

pub(crate) fn is_placeholder(value: &serde_json::Value) -> bool {
    value
        .as_str()
        .is_some_and(|s| PLACEHOLDERS.contains(&s.trim().to_lowercase().as_str()))
}

/// Suggestions for a case, in a fixed order.
pub fn suggest(case: &TestCase, metrics: &BTreeMap<String, f64>) -> Vec<Suggestion> {
    let metric = |name: &str| metrics.get(name).copied().unwrap_or(0.0);
    let mut out = Vec::new();

    if metric(STEP_SPECIFICITY) < 0.5 {
        out.push(Suggestion::AddStepDetails);
    }
    if metric(COMPLETENESS) < 1.0 {
        out.push(Suggestion::AddMissingFields);
    }
    let placeholders = case
        .test_data
        .inputs
        .values()
        .chain(case.test_data.validation.values())
        .any(is_placeholder);
    if metric(DATA_COVERAGE) < 0.5 || placeholders {
        out.push(Suggestion::ImproveTestData);
    }
    if !case.steps.iter().any(|s| first_word(s) == "then") {
        out.push(Suggestion::AddAssertions);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics;
    use casewright_ids::TestCaseId;
    use casewright_schema::case::TestData;

    #[test]
    fn text_round_trips() {
        for s in [
            Suggestion::AddStepDetails,
            Suggestion::AddMissingFields,
            Suggestion::ImproveTestData,
            Suggestion::AddAssertions,
        ] {
            assert_eq!(s.to_string().parse::<Suggestion>().unwrap(), s);
        }
        assert!("make it better".parse::<Suggestion>().is_err());
    }

    #[test]
    fn bare_case_gets_every_suggestion() {
        let c = TestCase::new(TestCaseId("TC01".into()), "x", vec!["do it".into()], "ok").unwrap();
        let s = suggest(&c, &metrics(&c));
        assert_eq!(
            s,
            vec![
                Suggestion::AddStepDetails,
                Suggestion::AddMissingFields,
                Suggestion::ImproveTestData,
                Suggestion::AddAssertions
            ]
        );
    }

    #[test]
    fn placeholder_values_trigger_data_suggestion() {
        let c = TestCase::new(TestCaseId("TC01".into()), "x", vec!["Then 1 2".into(), "Then \"3\"".into()], "ok")
            .unwrap()
            .with_description("d")
            .with_category("positive")
            .with_prerequisites(vec!["p".into()])
            .with_test_data(
                TestData::default()
                    .with_input("a", "real")
                    .with_input("b", "real")
                    .with_input("email", " Example "),
            );
        assert_eq!(suggest(&c, &metrics(&c)), vec![Suggestion::ImproveTestData]);
    }
}
