use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Quality dimension a validation point speaks to. Declaration order is the
/// iteration order everywhere (extraction output, reports).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ValidationCategory {
    Functional,
    Performance,
    Usability,
    Security,
    Data,
    Error,
    Integration,
}

impl ValidationCategory {
    pub const ALL: [ValidationCategory; 7] = [
        ValidationCategory::Functional,
        ValidationCategory::Performance,
        ValidationCategory::Usability,
        ValidationCategory::Security,
        ValidationCategory::Data,
        ValidationCategory::Error,
        ValidationCategory::Integration,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ValidationCategory::Functional => "functional",
            ValidationCategory::Performance => "performance",
            ValidationCategory::Usability => "usability",
            ValidationCategory::Security => "security",
            ValidationCategory::Data => "data",
            ValidationCategory::Error => "error",
            ValidationCategory::Integration => "integration",
        }
    }
}

impl fmt::Display for ValidationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cleaned sentences bucketed by category.
///
/// Only categories holding at least one sentence are present, so an empty
/// input yields an empty mapping. Sentences keep insertion order and are
/// unique within a bucket.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ValidationPoints(BTreeMap<ValidationCategory, Vec<String>>);

impl ValidationPoints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `sentence` under `category`; returns false for a duplicate.
    pub fn insert(&mut self, category: ValidationCategory, sentence: impl Into<String>) -> bool {
        let sentence = sentence.into();
        let bucket = self.0.entry(category).or_default();
        if bucket.contains(&sentence) {
            return false;
        }
        bucket.push(sentence);
        true
    }

    pub fn get(&self, category: ValidationCategory) -> &[String] {
        self.0.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count(&self, category: ValidationCategory) -> usize {
        self.get(category).len()
    }

    pub fn has(&self, category: ValidationCategory) -> bool {
        self.count(category) > 0
    }

    /// Sum of bucket sizes. A line tagged twice counts twice.
    pub fn total(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn categories(&self) -> impl Iterator<Item = ValidationCategory> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ValidationCategory, &[String])> {
        self.0.iter().map(|(c, v)| (*c, v.as_slice()))
    }
}

/// Coarse estimate of testing effort.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComplexityLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for ComplexityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ComplexityLevel::Low => "Low",
            ComplexityLevel::Medium => "Medium",
            ComplexityLevel::High => "High",
        };
        f.write_str(s)
    }
}
