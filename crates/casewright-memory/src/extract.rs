use casewright_schema::case::TestCase;
use casewright_schema::issue::FeatureType;
use casewright_schema::pattern::{TestCasePattern, ValueType};
use chrono::Utc;
use std::collections::BTreeMap;

/// Fewest accepted cases a pattern may be learned from.
pub const MIN_PATTERN_CASES: usize = 3;

/// Learns a pattern from accepted cases.
///
/// - feature type: the most common among the cases
/// - steps: those of the first case having the most common step count
/// - data: per flat field, the most common value-type tag
///
/// Ties go to whichever was seen first. Fewer than [`MIN_PATTERN_CASES`]
/// cases yield `None`.
pub fn extract_pattern(cases: &[TestCase]) -> Option<TestCasePattern> {
    if cases.len() < MIN_PATTERN_CASES {
        return None;
    }

    let feature = most_common(cases.iter().map(|c| c.feature)).unwrap_or(FeatureType::Generic);
    let step_count = most_common(cases.iter().map(|c| c.steps.len()))?;
    let exemplar = cases.iter().find(|c| c.steps.len() == step_count)?;

    let mut observed: BTreeMap<String, Vec<ValueType>> = BTreeMap::new();
    for case in cases {
        for (field, value) in case.test_data.flatten() {
            observed.entry(field).or_default().push(ValueType::of(&value));
        }
    }
    let data_pattern = observed
        .into_iter()
        .filter_map(|(field, tags)| most_common(tags).map(|t| (field, t)))
        .collect();

    Some(
        TestCasePattern::new(feature, exemplar.steps.clone(), data_pattern)
            .with_created_at(Utc::now())
            .with_source_cases(cases.len()),
    )
}

/// Most frequent item; the earliest seen wins a tie.
fn most_common<T: PartialEq + Copy>(items: impl IntoIterator<Item = T>) -> Option<T> {
    let mut counts: Vec<(T, usize)> = Vec::new();
    for item in items {
        match counts.iter_mut().find(|(seen, _)| *seen == item) {
            Some((_, n)) => *n += 1,
            None => counts.push((item, 1)),
        }
    }
    let mut best: Option<(T, usize)> = None;
    for (item, n) in counts {
        if best.is_none_or(|(_, b)| n > b) {
            best = Some((item, n));
        }
    }
    best.map(|(item, _)| item)
}
