use crate::catalog::ScenarioKind;
use casewright_schema::case::Priority;
use casewright_schema::validation::ComplexityLevel;

/// Scenario kind rows, complexity columns.
pub fn priority_for(kind: ScenarioKind, complexity: ComplexityLevel) -> Priority {
    use ComplexityLevel as C;
    use Priority as P;

    let row: [P; 3] = match kind {
        ScenarioKind::Positive => [P::High, P::High, P::High],
        ScenarioKind::Security => [P::Medium, P::High, P::High],
        ScenarioKind::Negative => [P::Medium, P::Medium, P::High],
        ScenarioKind::Validation => [P::Medium, P::Medium, P::High],
        ScenarioKind::Performance => [P::Low, P::Medium, P::High],
        ScenarioKind::EdgeCase => [P::Low, P::Medium, P::Medium],
    };
    match complexity {
        C::Low => row[0],
        C::Medium => row[1],
        C::High => row[2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_is_always_high() {
        for c in [ComplexityLevel::Low, ComplexityLevel::Medium, ComplexityLevel::High] {
            assert_eq!(priority_for(ScenarioKind::Positive, c), Priority::High);
        }
    }

    #[test]
    fn edge_cases_cap_at_medium() {
        assert_eq!(
            priority_for(ScenarioKind::EdgeCase, ComplexityLevel::High),
            Priority::Medium
        );
        assert_eq!(
            priority_for(ScenarioKind::EdgeCase, ComplexityLevel::Low),
            Priority::Low
        );
    }

    #[test]
    fn security_escalates_with_complexity() {
        assert_eq!(
            priority_for(ScenarioKind::Security, ComplexityLevel::Low),
            Priority::Medium
        );
        assert_eq!(
            priority_for(ScenarioKind::Security, ComplexityLevel::Medium),
            Priority::High
        );
    }

    #[test]
    fn priority_never_decreases_with_complexity() {
        for kind in ScenarioKind::ALL {
            let low = priority_for(kind, ComplexityLevel::Low);
            let med = priority_for(kind, ComplexityLevel::Medium);
            let high = priority_for(kind, ComplexityLevel::High);
            assert!(low <= med && med <= high, "{kind:?}");
        }
    }
}
