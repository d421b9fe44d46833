use crate::pattern::ValueType;
use casewright_ids::TestCaseId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Recoverable conditions observed while analyzing one issue.
///
/// None of these abort a batch. They travel with the output so callers can
/// tell a degraded run from a clean one.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisWarning {
    /// No feature keyword matched; the generic catalog was used.
    ClassificationAmbiguous,
    /// No validation point was extracted; complexity defaults low.
    ExtractionEmpty,
    /// No learned pattern exists yet for the feature type.
    PatternNotFound,
    /// A case lacked a required field and was dropped.
    ValidationFailed { case_id: TestCaseId, reason: String },
    /// A test-data field was replaced by its type's zero value.
    AlignmentCoercionFailed {
        case_id: TestCaseId,
        field: String,
        expected: ValueType,
    },
    /// The quality collaborator failed on a case; the case was dropped.
    ScoringFailed { case_id: TestCaseId, reason: String },
}

impl AnalysisWarning {
    /// True for warnings that removed a case from the batch.
    pub fn is_drop(&self) -> bool {
        matches!(
            self,
            AnalysisWarning::ValidationFailed { .. } | AnalysisWarning::ScoringFailed { .. }
        )
    }
}

impl fmt::Display for AnalysisWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisWarning::ClassificationAmbiguous => {
                write!(f, "no feature keywords found; using generic scenarios")
            }
            AnalysisWarning::ExtractionEmpty => write!(f, "no validation points found"),
            AnalysisWarning::PatternNotFound => write!(f, "no learned pattern for this feature"),
            AnalysisWarning::ValidationFailed { case_id, reason } => {
                write!(f, "{case_id} dropped: {reason}")
            }
            AnalysisWarning::AlignmentCoercionFailed {
                case_id,
                field,
                expected,
            } => write!(f, "{case_id}: {field} could not be read as {expected}; defaulted"),
            AnalysisWarning::ScoringFailed { case_id, reason } => {
                write!(f, "{case_id} dropped: scoring failed: {reason}")
            }
        }
    }
}
