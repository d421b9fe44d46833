use crate::case::{INPUTS_PREFIX, VALIDATION_PREFIX};
use crate::issue::FeatureType;
use casewright_ids::PatternId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// A pattern record that cannot be used at all.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("pattern {0} has no steps")]
    EmptySteps(PatternId),
    #[error("pattern {id} declares field {field:?} outside inputs/validation")]
    UnknownField { id: PatternId, field: String },
    #[error("malformed pattern record: {0}")]
    Malformed(String),
}

/// Value-type tag a pattern declares for one test-data field.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Str,
    Int,
    Float,
    Bool,
    Dict,
    List,
}

impl ValueType {
    /// Tag of an observed JSON value. `null` is treated as a string field.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null | Value::String(_) => ValueType::Str,
            Value::Bool(_) => ValueType::Bool,
            Value::Number(n) if n.is_f64() => ValueType::Float,
            Value::Number(_) => ValueType::Int,
            Value::Array(_) => ValueType::List,
            Value::Object(_) => ValueType::Dict,
        }
    }

    /// Zero value substituted when a field is missing or cannot be coerced.
    pub fn default_value(self) -> Value {
        match self {
            ValueType::Str => Value::String(String::new()),
            ValueType::Int => Value::from(0),
            ValueType::Float => Value::from(0.0),
            ValueType::Bool => Value::Bool(false),
            ValueType::Dict => Value::Object(serde_json::Map::new()),
            ValueType::List => Value::Array(Vec::new()),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::Str => "str",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::Bool => "bool",
            ValueType::Dict => "dict",
            ValueType::List => "list",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Learned template capturing the step and data shape of accepted cases.
///
/// Patterns are immutable once created; a newer pattern for the same feature
/// type supersedes older ones without deleting them.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TestCasePattern {
    pub pattern_id: PatternId,
    pub feature_type: FeatureType,
    pub steps_pattern: Vec<String>,
    /// Flat field name (`inputs.x`, `validation.y`) to value-type tag.
    pub test_data_pattern: BTreeMap<String, ValueType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub source_cases: usize,
}

impl TestCasePattern {
    /// Builds a pattern whose id is derived from its content.
    pub fn new(
        feature_type: FeatureType,
        steps_pattern: Vec<String>,
        test_data_pattern: BTreeMap<String, ValueType>,
    ) -> Self {
        let mut parts: Vec<String> = vec![feature_type.to_string()];
        parts.extend(steps_pattern.iter().cloned());
        parts.extend(
            test_data_pattern
                .iter()
                .map(|(field, tag)| format!("{field}:{tag}")),
        );
        Self {
            pattern_id: PatternId::from_parts(&parts),
            feature_type,
            steps_pattern,
            test_data_pattern,
            created_at: None,
            source_cases: 0,
        }
    }

    pub fn with_created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }

    pub fn with_source_cases(mut self, n: usize) -> Self {
        self.source_cases = n;
        self
    }

    pub fn validate(&self) -> Result<(), PatternError> {
        if self.pattern_id.0.trim().is_empty() {
            return Err(PatternError::Malformed("empty pattern_id".to_string()));
        }
        if self.steps_pattern.is_empty() || self.steps_pattern.iter().all(|s| s.trim().is_empty())
        {
            return Err(PatternError::EmptySteps(self.pattern_id.clone()));
        }
        if let Some(field) = self
            .test_data_pattern
            .keys()
            .find(|f| !f.starts_with(INPUTS_PREFIX) && !f.starts_with(VALIDATION_PREFIX))
        {
            return Err(PatternError::UnknownField {
                id: self.pattern_id.clone(),
                field: field.clone(),
            });
        }
        Ok(())
    }
}

/// On-disk pattern store: `{"patterns": [...]}`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct PatternStoreFile {
    #[serde(default)]
    pub patterns: Vec<TestCasePattern>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn login_pattern() -> TestCasePattern {
        let mut fields = BTreeMap::new();
        fields.insert("inputs.username".to_string(), ValueType::Str);
        TestCasePattern::new(
            FeatureType::Login,
            vec!["Given I am on the login page".into()],
            fields,
        )
    }

    #[test]
    fn value_type_of_json_values() {
        assert_eq!(ValueType::of(&json!("a")), ValueType::Str);
        assert_eq!(ValueType::of(&json!(null)), ValueType::Str);
        assert_eq!(ValueType::of(&json!(3)), ValueType::Int);
        assert_eq!(ValueType::of(&json!(3.5)), ValueType::Float);
        assert_eq!(ValueType::of(&json!(true)), ValueType::Bool);
        assert_eq!(ValueType::of(&json!([1])), ValueType::List);
        assert_eq!(ValueType::of(&json!({"a": 1})), ValueType::Dict);
    }

    #[test]
    fn default_values_match_tags() {
        for tag in [
            ValueType::Str,
            ValueType::Int,
            ValueType::Float,
            ValueType::Bool,
            ValueType::Dict,
            ValueType::List,
        ] {
            assert_eq!(ValueType::of(&tag.default_value()), tag);
        }
    }

    #[test]
    fn value_type_tags_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&ValueType::Dict).unwrap(), "\"dict\"");
        assert!(serde_json::from_str::<ValueType>("\"tuple\"").is_err());
    }

    #[test]
    fn same_content_same_id() {
        assert_eq!(login_pattern().pattern_id, login_pattern().pattern_id);
        let other = TestCasePattern::new(FeatureType::ApiTest, vec!["Given x".into()], BTreeMap::new());
        assert_ne!(login_pattern().pattern_id, other.pattern_id);
    }

    #[test]
    fn validate_accepts_well_formed() {
        assert!(login_pattern().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_steps() {
        let mut p = login_pattern();
        p.steps_pattern.clear();
        assert!(matches!(p.validate(), Err(PatternError::EmptySteps(_))));
    }

    #[test]
    fn validate_rejects_unprefixed_field() {
        let mut p = login_pattern();
        p.test_data_pattern.insert("username".into(), ValueType::Str);
        assert!(matches!(p.validate(), Err(PatternError::UnknownField { .. })));
    }

    #[test]
    fn store_file_minimal_schema_parses() {
        let text = r#"{"patterns":[{"pattern_id":"abc","feature_type":"login",
            "steps_pattern":["Given a"],"test_data_pattern":{"inputs.url":"str"}}]}"#;
        let store: PatternStoreFile = serde_json::from_str(text).unwrap();
        assert_eq!(store.patterns.len(), 1);
        assert_eq!(store.patterns[0].source_cases, 0);
        assert!(store.patterns[0].created_at.is_none());
    }
}
