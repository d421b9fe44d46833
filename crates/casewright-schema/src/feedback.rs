use casewright_ids::{PatternId, TestCaseId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Score at or above which a case counts as successful.
pub const DEFAULT_SUCCESS_THRESHOLD: f64 = 0.7;

/// Score and metrics the quality collaborator assigns to one case.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct QualityReport {
    pub score: f64,
    pub metrics: BTreeMap<String, f64>,
}

impl QualityReport {
    pub fn new(score: f64, metrics: BTreeMap<String, f64>) -> Self {
        Self {
            score: clamp_unit(score),
            metrics,
        }
    }
}

/// Audit record for one scored case. Append-only.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TestCaseFeedback {
    pub test_case_id: TestCaseId,
    pub timestamp: DateTime<Utc>,
    pub quality_score: f64,
    pub metrics: BTreeMap<String, f64>,
    pub suggestions: Vec<String>,
    pub pattern_used: Option<PatternId>,
    pub is_successful: bool,
}

impl TestCaseFeedback {
    pub fn new(
        test_case_id: TestCaseId,
        report: &QualityReport,
        suggestions: Vec<String>,
        pattern_used: Option<PatternId>,
        timestamp: DateTime<Utc>,
        success_threshold: f64,
    ) -> Self {
        let quality_score = clamp_unit(report.score);
        Self {
            test_case_id,
            timestamp,
            quality_score,
            metrics: report.metrics.clone(),
            suggestions,
            pattern_used,
            is_successful: quality_score >= success_threshold,
        }
    }
}

fn clamp_unit(x: f64) -> f64 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}
