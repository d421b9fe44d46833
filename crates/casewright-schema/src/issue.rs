use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Free text of one ticket, as handed to the pipeline.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IssueText {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub labels: BTreeSet<String>,
    #[serde(default)]
    pub acceptance_criteria: String,
    /// Tracker issue type ("Story", "Bug", ...). Empty when unknown.
    #[serde(default)]
    pub issue_type: String,
    #[serde(default)]
    pub components: Vec<String>,
}

impl IssueText {
    pub fn new(summary: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_acceptance_criteria(mut self, ac: impl Into<String>) -> Self {
        self.acceptance_criteria = ac.into();
        self
    }

    pub fn with_issue_type(mut self, issue_type: impl Into<String>) -> Self {
        self.issue_type = issue_type.into();
        self
    }

    pub fn with_components<I, S>(mut self, components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.components = components.into_iter().map(Into::into).collect();
        self
    }

    /// Lower-cased text the classifier scores: summary, description, labels
    /// and issue type name joined by spaces.
    pub fn classification_text(&self) -> String {
        let mut parts: Vec<&str> = vec![&self.summary, &self.description];
        parts.extend(self.labels.iter().map(String::as_str));
        parts.push(&self.issue_type);
        parts.join(" ").to_lowercase()
    }

    /// Description followed by acceptance criteria, one block per line group.
    pub fn validation_text(&self) -> String {
        match (self.description.is_empty(), self.acceptance_criteria.is_empty()) {
            (_, true) => self.description.clone(),
            (true, false) => self.acceptance_criteria.clone(),
            (false, false) => format!("{}\n{}", self.description, self.acceptance_criteria),
        }
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Key used in file names and headings; `UNKEYED` when absent.
    pub fn display_key(&self) -> &str {
        self.key.as_deref().filter(|k| !k.is_empty()).unwrap_or("UNKEYED")
    }
}

/// Coarse category of functionality a ticket describes.
///
/// `Generic` is the "no signal" outcome and serializes as `none`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum FeatureType {
    Login,
    DataValidation,
    ApiTest,
    UiTest,
    DatabaseTest,
    #[serde(rename = "none")]
    Generic,
}

impl FeatureType {
    /// Scored types in tie-break order: earlier wins on equal score.
    pub const RANKED: [FeatureType; 5] = [
        FeatureType::Login,
        FeatureType::DataValidation,
        FeatureType::ApiTest,
        FeatureType::UiTest,
        FeatureType::DatabaseTest,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FeatureType::Login => "login",
            FeatureType::DataValidation => "data_validation",
            FeatureType::ApiTest => "api_test",
            FeatureType::UiTest => "ui_test",
            FeatureType::DatabaseTest => "database_test",
            FeatureType::Generic => "none",
        }
    }
}

impl fmt::Display for FeatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "login" => Ok(FeatureType::Login),
            "data_validation" => Ok(FeatureType::DataValidation),
            "api_test" => Ok(FeatureType::ApiTest),
            "ui_test" => Ok(FeatureType::UiTest),
            "database_test" => Ok(FeatureType::DatabaseTest),
            "none" | "generic" => Ok(FeatureType::Generic),
            other => Err(format!("unknown feature type: {other}")),
        }
    }
}
