//! Test case synthesis from fixed scenario catalogs.
//!
//! Given a feature type and complexity, every scenario of the matching
//! catalog becomes one [`TestCase`] in declaration order. Performance
//! scenarios are skipped for low-complexity tickets. With a learned pattern
//! the synthesized steps and data are aligned to it.

pub mod catalog;
pub mod fixtures;
pub mod priority;

use casewright_align::{align_steps, align_test_data};
use casewright_ids::TestCaseId;
use casewright_schema::case::{TestCase, TestCaseError};
use casewright_schema::issue::{FeatureType, IssueText};
use casewright_schema::pattern::TestCasePattern;
use casewright_schema::validation::ComplexityLevel;
use casewright_schema::warning::AnalysisWarning;
use catalog::{Scenario, ScenarioKind};
use fixtures::{DescriptionOverrides, render_template};
use tracing::{debug, warn};

pub use catalog::{catalog, catalog_named};
pub use fixtures::FixtureDefaults;
pub use priority::priority_for;

/// Cases plus the recoverable problems met while building them.
#[derive(Clone, Debug, Default)]
pub struct Synthesis {
    pub cases: Vec<TestCase>,
    pub warnings: Vec<AnalysisWarning>,
}

#[derive(Clone, Debug, Default)]
pub struct Synthesizer {
    defaults: FixtureDefaults,
}

impl Synthesizer {
    pub fn new(defaults: FixtureDefaults) -> Self {
        Self { defaults }
    }

    /// Pattern-less synthesis.
    pub fn synthesize(
        &self,
        issue: &IssueText,
        feature: FeatureType,
        complexity: ComplexityLevel,
    ) -> Vec<TestCase> {
        self.synthesize_with_pattern(issue, feature, complexity, None, 0.0)
            .cases
    }

    /// Synthesizes the catalog for `feature`, aligning each case to `pattern`
    /// when one is given. Scenarios that fail to form a valid case are
    /// reported and skipped.
    pub fn synthesize_with_pattern(
        &self,
        issue: &IssueText,
        feature: FeatureType,
        complexity: ComplexityLevel,
        pattern: Option<&TestCasePattern>,
        similarity_threshold: f64,
    ) -> Synthesis {
        let overrides = DescriptionOverrides::parse(&issue.description);
        let mut out = Synthesis::default();

        let scenarios = catalog(feature)
            .iter()
            .filter(|s| !(s.kind == ScenarioKind::Performance && complexity == ComplexityLevel::Low));

        for (index, scenario) in scenarios.enumerate() {
            let id = TestCaseId::for_issue(issue.key.as_deref(), index + 1);
            let mut case = match self.build_case(id.clone(), feature, complexity, scenario, &overrides)
            {
                Ok(case) => case,
                Err(err) => {
                    out.warnings.push(AnalysisWarning::ValidationFailed {
                        case_id: id,
                        reason: err.to_string(),
                    });
                    continue;
                }
            };

            if let Some(p) = pattern {
                case.steps = align_steps(&case.steps, &p.steps_pattern, similarity_threshold);
                let (data, failures) = align_test_data(&case.test_data, &p.test_data_pattern);
                case.test_data = data;
                for f in failures {
                    warn!(case = %case.id, field = %f.field, expected = %f.expected, "coercion failed");
                    out.warnings.push(AnalysisWarning::AlignmentCoercionFailed {
                        case_id: case.id.clone(),
                        field: f.field,
                        expected: f.expected,
                    });
                }
            }
            out.cases.push(case);
        }

        debug!(
            feature = %feature,
            complexity = %complexity,
            cases = out.cases.len(),
            patterned = pattern.is_some(),
            "synthesized cases"
        );
        out
    }

    fn build_case(
        &self,
        id: TestCaseId,
        feature: FeatureType,
        complexity: ComplexityLevel,
        scenario: &Scenario,
        overrides: &DescriptionOverrides,
    ) -> Result<TestCase, TestCaseError> {
        let mut data = fixtures::fixture(feature, scenario.kind, &self.defaults);
        overrides.apply(&mut data);

        let steps: Vec<String> = std::iter::once(catalog::opening_step(feature))
            .chain(scenario.steps.iter().copied())
            .map(|t| render_template(t, &data))
            .collect();

        Ok(TestCase::new(id, scenario.name, steps, scenario.expected_result)?
            .with_description(scenario.description)
            .with_category(scenario.kind.as_str())
            .with_feature(feature)
            .with_priority(priority_for(scenario.kind, complexity))
            .with_test_data(data)
            .with_prerequisites(catalog::prerequisites(feature, scenario.kind)))
    }
}
