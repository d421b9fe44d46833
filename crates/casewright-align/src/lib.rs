//! Alignment of freshly generated cases with a learned pattern.
//!
//! Steps: walk the generated steps in order with a cursor into the pattern.
//! When a step is similar enough to the pattern step under the cursor, the
//! pattern's phrasing wins and the cursor advances. Concrete values from the
//! generated step (numbers, emails, quoted literals) are carried over.
//!
//! Data: the pattern is the schema. Declared fields are coerced to their tag,
//! undeclared fields are dropped.

mod coerce;

pub use coerce::coerce;

use casewright_schema::case::TestData;
use casewright_schema::pattern::ValueType;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Similarity a step must exceed to merge with a pattern step.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.5;

/// Lower-cased whitespace-separated words.
pub fn word_set(step: &str) -> BTreeSet<String> {
    step.split_whitespace().map(str::to_lowercase).collect()
}

/// Jaccard index of the two steps' word sets. 0.0 when either has no words.
pub fn jaccard(a: &str, b: &str) -> f64 {
    let a = word_set(a);
    let b = word_set(b);
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let inter = a.intersection(&b).count();
    let union = a.union(&b).count();
    inter as f64 / union as f64
}

fn is_concrete(token: &str) -> bool {
    token.chars().any(|c| c.is_ascii_digit())
        || token.contains('@')
        || token.starts_with('\'')
        || token.starts_with('"')
}

/// Pattern phrasing plus the generated step's concrete tokens it lacks.
///
/// Only the pattern's words are excluded; a token repeated in the generated
/// step is appended each time.
pub fn merge_steps(generated: &str, pattern_step: &str) -> String {
    let pattern_words = word_set(pattern_step);
    let mut merged = pattern_step.to_string();
    for token in generated.split_whitespace() {
        if is_concrete(token) && !pattern_words.contains(&token.to_lowercase()) {
            merged.push(' ');
            merged.push_str(token);
        }
    }
    merged
}

/// Aligns `steps` against `pattern`. Output length always equals input length.
pub fn align_steps(steps: &[String], pattern: &[String], threshold: f64) -> Vec<String> {
    let mut cursor = 0;
    let mut aligned = Vec::with_capacity(steps.len());
    for step in steps {
        match pattern.get(cursor) {
            Some(p) if jaccard(step, p) > threshold => {
                aligned.push(merge_steps(step, p));
                cursor += 1;
            }
            _ => aligned.push(step.clone()),
        }
    }
    debug!(steps = steps.len(), merged = cursor, "aligned steps");
    aligned
}

/// A field that could not be read as its declared type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoercionFailure {
    pub field: String,
    pub expected: ValueType,
}

/// Reshapes `data` to the pattern's field schema.
///
/// Missing (or `null`) fields take the tag's zero value silently; fields that
/// exist but cannot be coerced take it too and are reported.
pub fn align_test_data(
    data: &TestData,
    pattern: &BTreeMap<String, ValueType>,
) -> (TestData, Vec<CoercionFailure>) {
    let flat = data.flatten();
    let mut out = BTreeMap::new();
    let mut failures = Vec::new();

    for (field, tag) in pattern {
        let value = match flat.get(field) {
            None | Some(serde_json::Value::Null) => tag.default_value(),
            Some(v) => match coerce(v, *tag) {
                Some(c) => c,
                None => {
                    failures.push(CoercionFailure {
                        field: field.clone(),
                        expected: *tag,
                    });
                    tag.default_value()
                }
            },
        };
        out.insert(field.clone(), value);
    }

    (TestData::from_flat(out), failures)
}
