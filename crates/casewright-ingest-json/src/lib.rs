use anyhow::{Context, Result, ensure};
use casewright_ports::{IssueSource, IssueSourceError};
use casewright_schema::issue::IssueText;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::LazyLock;
use tracing::debug;

static TICKET_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]+-[0-9]+$").expect("ticket id pattern is valid")
});

/// Resolves a bare ticket key or a `/browse/` URL to an upper-cased key.
///
/// The query string is ignored. Anything not shaped like `PROJ-123` yields `None`.
pub fn extract_ticket_id(input: &str) -> Option<String> {
    let path = input.split('?').next().unwrap_or_default();
    let candidate = match path.rsplit_once("/browse/") {
        Some((_, tail)) => tail,
        None => path,
    };
    let candidate = candidate.trim().trim_end_matches('/');
    TICKET_ID
        .is_match(candidate)
        .then(|| candidate.to_uppercase())
}

/// Parses one issue document.
///
/// JIRA REST documents (`{"key", "fields": {...}}`) are read from their
/// `fields`; acceptance criteria come from `customfield_10029`. Documents
/// without `fields` are read as a plain [`IssueText`].
pub fn parse_issue_json(text: &str) -> Result<IssueText> {
    let value: Value = serde_json::from_str(text).context("parse issue json")?;
    ensure!(value.is_object(), "issue document must be a JSON object");

    if value.get("fields").is_some() {
        let rest: RestIssue = serde_json::from_value(value).context("parse JIRA issue fields")?;
        Ok(rest.into_issue())
    } else {
        serde_json::from_value(value).context("parse plain issue document")
    }
}

#[derive(Debug, Deserialize)]
struct RestIssue {
    #[serde(default)]
    key: Option<String>,
    fields: RestFields,
}

#[derive(Debug, Deserialize)]
struct RestFields {
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    labels: Option<Vec<String>>,
    #[serde(default)]
    issuetype: Option<Named>,
    #[serde(default)]
    components: Option<Vec<Named>>,
    #[serde(default)]
    customfield_10029: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct Named {
    #[serde(default)]
    name: String,
}

impl RestIssue {
    fn into_issue(self) -> IssueText {
        let f = self.fields;
        IssueText {
            key: self.key.filter(|k| !k.trim().is_empty()),
            summary: f.summary.unwrap_or_default(),
            description: f.description.unwrap_or_default(),
            labels: f.labels.unwrap_or_default().into_iter().collect(),
            acceptance_criteria: f
                .customfield_10029
                .as_ref()
                .map(criteria_text)
                .unwrap_or_default(),
            issue_type: f.issuetype.map(|t| t.name).unwrap_or_default(),
            components: f
                .components
                .unwrap_or_default()
                .into_iter()
                .map(|c| c.name)
                .filter(|n| !n.is_empty())
                .collect(),
        }
    }
}

/// Acceptance criteria arrive as a string or as a list of strings.
fn criteria_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join("\n"),
        _ => String::new(),
    }
}

/// [`IssueSource`] over a directory of `{TICKET}.json` files.
#[derive(Clone, Debug)]
pub struct JsonIssueSource {
    pub dir: PathBuf,
}

impl JsonIssueSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl IssueSource for JsonIssueSource {
    fn get_issue(&self, ticket_id: &str) -> Result<IssueText, IssueSourceError> {
        let key = extract_ticket_id(ticket_id)
            .ok_or_else(|| IssueSourceError::NotFound(format!("invalid ticket id {ticket_id:?}")))?;
        let path = self.dir.join(format!("{key}.json"));

        let text = std::fs::read_to_string(&path).map_err(|err| {
            let detail = format!("{path:?}: {err}");
            match err.kind() {
                ErrorKind::NotFound => IssueSourceError::NotFound(detail),
                ErrorKind::PermissionDenied => IssueSourceError::Auth(detail),
                _ => IssueSourceError::Transient(detail),
            }
        })?;

        let mut issue = parse_issue_json(&text)
            .map_err(|err| IssueSourceError::Malformed(format!("{path:?}: {err:#}")))?;
        if issue.key.is_none() {
            issue.key = Some(key);
        }
        debug!(issue = issue.display_key(), path = ?path, "loaded issue");
        Ok(issue)
    }
}
