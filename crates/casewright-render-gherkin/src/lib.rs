//! Gherkin feature file renderer.
//!
//! One `Feature` per issue, one `Scenario` per case. Steps that do not open
//! with a Gherkin keyword are written as `*` steps so the file still parses;
//! data table rows are indented under the step before them.

use anyhow::Result;
use casewright_ports::CaseRenderer;
use casewright_schema::case::TestCase;
use std::fmt::Write;

const KEYWORDS: &[&str] = &["Given", "When", "Then", "And", "But", "*"];

#[derive(Clone, Copy, Debug, Default)]
pub struct GherkinRenderer;

impl CaseRenderer for GherkinRenderer {
    fn render_cases(&self, issue_key: &str, cases: &[TestCase]) -> Result<String> {
        let mut out = String::new();
        writeln!(out, "Feature: Test cases for {issue_key}")?;
        for case in cases {
            out.push('\n');
            render_scenario(&mut out, case)?;
        }
        Ok(out)
    }
}

fn render_scenario(out: &mut String, case: &TestCase) -> std::fmt::Result {
    let mut tags = vec![format!("@{}", case.id), format!("@{}", tag(&case.priority.to_string()))];
    if !case.category.trim().is_empty() {
        tags.push(format!("@{}", tag(&case.category)));
    }
    writeln!(out, "  {}", tags.join(" "))?;
    writeln!(out, "  Scenario: {}", one_line(&case.name))?;
    if !case.description.trim().is_empty() {
        writeln!(out, "    # {}", one_line(&case.description))?;
    }
    for step in &case.steps {
        let step = step.trim();
        if step.is_empty() {
            continue;
        }
        if step.starts_with('|') {
            writeln!(out, "      {step}")?;
        } else if starts_with_keyword(step) {
            writeln!(out, "    {}", one_line(step))?;
        } else {
            writeln!(out, "    * {}", one_line(step))?;
        }
    }
    Ok(())
}

fn starts_with_keyword(step: &str) -> bool {
    let first = step.split_whitespace().next().unwrap_or_default();
    KEYWORDS
        .iter()
        .any(|kw| first.eq_ignore_ascii_case(kw))
}

fn tag(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

fn one_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use casewright_ids::TestCaseId;
    use casewright_schema::case::Priority;
    use casewright_testkit::sample_case;

    #[test]
    fn renders_feature_with_scenarios() {
        let login = TestCase::new(
            TestCaseId("QA-7-TC01".into()),
            "Test successful login with valid credentials",
            vec![
                "Given I am on the login page at https://app.example.com/login".into(),
                "When I enter \"qa.user@example.com\" as the username".into(),
                "  | field    | value     |".into(),
                "  | password | Passw0rd! |".into(),
                "And I click the login button".into(),
                "Then I should be redirected to the dashboard".into(),
            ],
            "User is logged in",
        )
        .unwrap()
        .with_category("positive")
        .with_priority(Priority::High)
        .with_description("Valid credentials reach the dashboard");

        let bare = TestCase::new(
            TestCaseId("QA-7-TC02".into()),
            "Test error handling",
            vec!["Verify the error banner\nis shown".into(), "   ".into()],
            "Error shown",
        )
        .unwrap()
        .with_priority(Priority::Medium);

        let out = GherkinRenderer.render_cases("QA-7", &[login, bare]).unwrap();
        insta::assert_snapshot!(out, @r#"
Feature: Test cases for QA-7

  @QA-7-TC01 @high @positive
  Scenario: Test successful login with valid credentials
    # Valid credentials reach the dashboard
    Given I am on the login page at https://app.example.com/login
    When I enter "qa.user@example.com" as the username
      | field    | value     |
      | password | Passw0rd! |
    And I click the login button
    Then I should be redirected to the dashboard

  @QA-7-TC02 @medium
  Scenario: Test error handling
    * Verify the error banner is shown
"#);
    }

    #[test]
    fn empty_batch_is_just_the_feature_line() {
        let out = GherkinRenderer.render_cases("QA-9", &[]).unwrap();
        assert_eq!(out, "Feature: Test cases for QA-9\n");
    }

    #[test]
    fn every_case_gets_a_scenario() {
        let cases = vec![sample_case("TC01"), sample_case("TC02"), sample_case("TC03")];
        let out = GherkinRenderer.render_cases("UNKEYED", &cases).unwrap();
        assert_eq!(out.matches("  Scenario: ").count(), 3);
        assert!(out.contains("@TC02"));
    }
}
