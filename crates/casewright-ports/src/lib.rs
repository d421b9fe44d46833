use anyhow::Result;
use casewright_schema::case::TestCase;
use casewright_schema::feedback::QualityReport;
use casewright_schema::issue::IssueText;
use thiserror::Error;

/// Failure kinds a ticket source reports. Callers decide how to map them.
#[derive(Debug, Error)]
pub enum IssueSourceError {
    #[error("issue not found: {0}")]
    NotFound(String),
    #[error("not authorized to read issue: {0}")]
    Auth(String),
    #[error("transient failure reading issue: {0}")]
    Transient(String),
    #[error("issue payload is malformed: {0}")]
    Malformed(String),
}

/// Ticket system access.
///
/// Adapters live in `casewright-ingest-*` crates.
pub trait IssueSource {
    fn get_issue(&self, ticket_id: &str) -> std::result::Result<IssueText, IssueSourceError>;
}

/// Quality scoring.
///
/// A port so heuristic and model-backed scorers are interchangeable.
pub trait QualityAnalyzer {
    /// Score in `[0, 1]` plus named metrics.
    fn analyze(&self, case: &TestCase) -> Result<QualityReport>;

    /// Human-readable improvement hints for a scored case.
    fn suggest(&self, _case: &TestCase, _report: &QualityReport) -> Vec<String> {
        Vec::new()
    }

    /// Improved copy of `case`, or `None` when the analyzer cannot enhance.
    fn enhance(&self, _case: &TestCase, _suggestions: &[String]) -> Option<TestCase> {
        None
    }
}

/// Rendering.
///
/// Renderers should be pure: input in, text out.
pub trait CaseRenderer {
    fn render_cases(&self, issue_key: &str, cases: &[TestCase]) -> Result<String>;
}
