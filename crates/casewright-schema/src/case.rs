use crate::issue::FeatureType;
use casewright_ids::TestCaseId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Reasons a test case record is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TestCaseError {
    #[error("test case {0} has an empty name")]
    EmptyName(TestCaseId),
    #[error("test case {0} has no steps")]
    EmptySteps(TestCaseId),
    #[error("test case {0} has an empty expected result")]
    EmptyExpectedResult(TestCaseId),
    #[error("invalid priority {0:?}: expected High, Medium or Low")]
    InvalidPriority(String),
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        };
        f.write_str(s)
    }
}

/// Accepts any casing and surrounding whitespace (`" high "` is `High`).
impl FromStr for Priority {
    type Err = TestCaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(TestCaseError::InvalidPriority(s.to_string())),
        }
    }
}

/// Structured test data: concrete inputs plus the expectations to check.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct TestData {
    #[serde(default)]
    pub inputs: BTreeMap<String, Value>,
    #[serde(default)]
    pub validation: BTreeMap<String, Value>,
}

/// Prefixes used when test data is addressed as one flat field map.
pub const INPUTS_PREFIX: &str = "inputs.";
pub const VALIDATION_PREFIX: &str = "validation.";

impl TestData {
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty() && self.validation.is_empty()
    }

    pub fn with_input(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.inputs.insert(field.into(), value.into());
        self
    }

    pub fn with_validation(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.validation.insert(field.into(), value.into());
        self
    }

    /// Flat view keyed `inputs.<field>` / `validation.<field>`.
    pub fn flatten(&self) -> BTreeMap<String, Value> {
        let inputs = self
            .inputs
            .iter()
            .map(|(k, v)| (format!("{INPUTS_PREFIX}{k}"), v.clone()));
        let validation = self
            .validation
            .iter()
            .map(|(k, v)| (format!("{VALIDATION_PREFIX}{k}"), v.clone()));
        inputs.chain(validation).collect()
    }

    /// Inverse of [`TestData::flatten`]. Keys without a known prefix are ignored.
    pub fn from_flat(flat: BTreeMap<String, Value>) -> Self {
        let mut data = TestData::default();
        for (key, value) in flat {
            if let Some(field) = key.strip_prefix(INPUTS_PREFIX) {
                data.inputs.insert(field.to_string(), value);
            } else if let Some(field) = key.strip_prefix(VALIDATION_PREFIX) {
                data.validation.insert(field.to_string(), value);
            }
        }
        data
    }
}

/// One generated test case.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TestCase {
    pub id: TestCaseId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Scenario category the case came from (`positive`, `security`, ...).
    pub category: String,
    pub feature: FeatureType,
    pub priority: Priority,
    /// Gherkin-style steps, in order.
    pub steps: Vec<String>,
    #[serde(default)]
    pub test_data: TestData,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    pub expected_result: String,
}

impl TestCase {
    /// Builds a case and rejects it immediately if a required field is empty.
    pub fn new(
        id: TestCaseId,
        name: impl Into<String>,
        steps: Vec<String>,
        expected_result: impl Into<String>,
    ) -> Result<Self, TestCaseError> {
        let case = Self {
            id,
            name: name.into(),
            description: String::new(),
            category: String::new(),
            feature: FeatureType::Generic,
            priority: Priority::Medium,
            steps,
            test_data: TestData::default(),
            prerequisites: Vec::new(),
            expected_result: expected_result.into(),
        };
        case.validate()?;
        Ok(case)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_feature(mut self, feature: FeatureType) -> Self {
        self.feature = feature;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_test_data(mut self, test_data: TestData) -> Self {
        self.test_data = test_data;
        self
    }

    pub fn with_prerequisites(mut self, prerequisites: Vec<String>) -> Self {
        self.prerequisites = prerequisites;
        self
    }

    /// Re-checks the required fields. Fields are public, so anything that
    /// rewrote a case (alignment, enhancement, deserialization) calls this.
    pub fn validate(&self) -> Result<(), TestCaseError> {
        if self.name.trim().is_empty() {
            return Err(TestCaseError::EmptyName(self.id.clone()));
        }
        if self.steps.iter().all(|s| s.trim().is_empty()) {
            return Err(TestCaseError::EmptySteps(self.id.clone()));
        }
        if self.expected_result.trim().is_empty() {
            return Err(TestCaseError::EmptyExpectedResult(self.id.clone()));
        }
        Ok(())
    }
}
