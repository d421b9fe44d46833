//! Orchestration engine for casewright.
//!
//! Drives one issue through classify → extract → estimate → synthesize
//! (aligned to the best stored pattern) → score → enhance, then records
//! feedback and learns a pattern from the batch. Problems with individual
//! cases are isolated: the case is dropped and a warning recorded, the rest
//! of the batch continues. Pattern Memory is touched only once every case of
//! the batch has been scored, learning first and feedback after.

use anyhow::{Context, Result};
use casewright_classify::classify_detailed;
use casewright_complexity::estimate;
use casewright_config::CasewrightConfig;
use casewright_extract::extract_from_issue;
use casewright_ids::{PatternId, RunId, TestCaseId};
use casewright_memory::{PatternMemory, extract_pattern};
use casewright_ports::{IssueSource, QualityAnalyzer};
use casewright_schema::case::TestCase;
use casewright_schema::feedback::{QualityReport, TestCaseFeedback};
use casewright_schema::issue::{FeatureType, IssueText};
use casewright_schema::validation::{ComplexityLevel, ValidationPoints};
use casewright_schema::warning::AnalysisWarning;
use casewright_synth::{Synthesizer, catalog_named};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Everything one analysis produced.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AnalysisReport {
    pub run_id: RunId,
    pub issue_key: Option<String>,
    pub feature_type: FeatureType,
    pub complexity: ComplexityLevel,
    pub validation_points: ValidationPoints,
    /// Pattern the batch was aligned to, if any.
    pub pattern_used: Option<PatternId>,
    pub test_cases: Vec<TestCase>,
    pub scores: BTreeMap<TestCaseId, f64>,
    #[serde(default)]
    pub warnings: Vec<AnalysisWarning>,
    /// Cases removed by validation or scoring failures.
    pub dropped: usize,
    /// Pattern newly stored from this batch.
    pub learned_pattern: Option<PatternId>,
}

impl AnalysisReport {
    pub fn is_empty(&self) -> bool {
        self.test_cases.is_empty()
    }

    pub fn average_score(&self) -> f64 {
        if self.scores.is_empty() {
            return 0.0;
        }
        self.scores.values().sum::<f64>() / self.scores.len() as f64
    }
}

pub struct CaseEngine<'a> {
    config: &'a CasewrightConfig,
    memory: &'a PatternMemory,
    analyzer: &'a dyn QualityAnalyzer,
    synthesizer: Synthesizer,
}

struct Scored {
    case: TestCase,
    report: QualityReport,
    suggestions: Vec<String>,
}

impl<'a> CaseEngine<'a> {
    pub fn new(
        config: &'a CasewrightConfig,
        memory: &'a PatternMemory,
        analyzer: &'a dyn QualityAnalyzer,
    ) -> Self {
        Self {
            config,
            memory,
            analyzer,
            synthesizer: Synthesizer::new(config.defaults.clone()),
        }
    }

    /// Classifies `issue` and runs the full pipeline on it.
    pub fn analyze(&self, issue: &IssueText) -> Result<AnalysisReport> {
        let classification = classify_detailed(issue);
        self.run(issue, classification.feature, classification.is_ambiguous())
    }

    /// Runs the pipeline with the feature type forced to `feature_name`.
    ///
    /// Names without a scenario catalog yield an empty batch, not an error.
    pub fn analyze_as(&self, issue: &IssueText, feature_name: &str) -> Result<AnalysisReport> {
        match catalog_named(feature_name) {
            Some((feature, _)) => self.run(issue, feature, false),
            None => {
                warn!(feature = feature_name, "no scenario catalog; empty batch");
                let points = extract_from_issue(issue);
                Ok(AnalysisReport {
                    run_id: RunId::now("run"),
                    issue_key: issue.key.clone(),
                    feature_type: FeatureType::Generic,
                    complexity: estimate(&points, issue.component_count()),
                    validation_points: points,
                    pattern_used: None,
                    test_cases: Vec::new(),
                    scores: BTreeMap::new(),
                    warnings: Vec::new(),
                    dropped: 0,
                    learned_pattern: None,
                })
            }
        }
    }

    /// Fetches `ticket_id` from `source`, then analyzes it.
    pub fn analyze_source(&self, source: &dyn IssueSource, ticket_id: &str) -> Result<AnalysisReport> {
        let issue = source
            .get_issue(ticket_id)
            .with_context(|| format!("fetch issue {ticket_id}"))?;
        self.analyze(&issue)
    }

    fn run(&self, issue: &IssueText, feature: FeatureType, ambiguous: bool) -> Result<AnalysisReport> {
        let run_id = RunId::now("run");
        let mut warnings = Vec::new();
        if ambiguous {
            warnings.push(AnalysisWarning::ClassificationAmbiguous);
        }

        let points = extract_from_issue(issue);
        if points.is_empty() {
            warnings.push(AnalysisWarning::ExtractionEmpty);
        }
        let complexity = estimate(&points, issue.component_count());

        let pattern = self.memory.get_best_pattern(feature);
        match &pattern {
            Some(p) => p
                .validate()
                .with_context(|| format!("stored pattern {} is malformed", p.pattern_id.short()))?,
            None => warnings.push(AnalysisWarning::PatternNotFound),
        }
        let pattern_used = pattern.as_ref().map(|p| p.pattern_id.clone());

        let synthesis = self.synthesizer.synthesize_with_pattern(
            issue,
            feature,
            complexity,
            pattern.as_ref(),
            self.config.alignment.similarity_threshold,
        );
        warnings.extend(synthesis.warnings);

        let mut kept = Vec::with_capacity(synthesis.cases.len());
        for case in synthesis.cases {
            if let Some(scored) = self.score_case(case, &mut warnings) {
                kept.push(scored);
            }
        }
        let dropped = warnings.iter().filter(|w| w.is_drop()).count();

        // A failed store leaves no feedback behind for this batch.
        let learned_pattern = self.learn(&kept)?;

        let now = Utc::now();
        let threshold = self.config.learning.success_threshold;
        self.memory.add_feedback_batch(kept.iter().map(|s| {
            TestCaseFeedback::new(
                s.case.id.clone(),
                &s.report,
                s.suggestions.clone(),
                pattern_used.clone(),
                now,
                threshold,
            )
        }));

        let scores = kept
            .iter()
            .map(|s| (s.case.id.clone(), s.report.score))
            .collect();
        let test_cases: Vec<TestCase> = kept.into_iter().map(|s| s.case).collect();

        info!(
            run = %run_id,
            issue = issue.display_key(),
            feature = %feature,
            complexity = %complexity,
            cases = test_cases.len(),
            dropped,
            warnings = warnings.len(),
            "analysis complete"
        );

        Ok(AnalysisReport {
            run_id,
            issue_key: issue.key.clone(),
            feature_type: feature,
            complexity,
            validation_points: points,
            pattern_used,
            test_cases,
            scores,
            warnings,
            dropped,
            learned_pattern,
        })
    }

    /// Validates and scores one case, enhancing it once when it scores
    /// below the success threshold. `None` means the case was dropped.
    fn score_case(&self, case: TestCase, warnings: &mut Vec<AnalysisWarning>) -> Option<Scored> {
        if let Err(err) = case.validate() {
            warn!(case = %case.id, error = %err, "dropping invalid case");
            warnings.push(AnalysisWarning::ValidationFailed {
                case_id: case.id,
                reason: err.to_string(),
            });
            return None;
        }

        let report = match self.analyzer.analyze(&case) {
            Ok(report) => report,
            Err(err) => {
                warn!(case = %case.id, error = %err, "dropping case that failed scoring");
                warnings.push(AnalysisWarning::ScoringFailed {
                    case_id: case.id,
                    reason: format!("{err:#}"),
                });
                return None;
            }
        };
        let suggestions = self.analyzer.suggest(&case, &report);
        let scored = Scored {
            case,
            report,
            suggestions,
        };

        if scored.report.score >= self.config.learning.success_threshold
            || scored.suggestions.is_empty()
        {
            return Some(scored);
        }
        Some(self.enhance(scored))
    }

    /// Keeps the enhanced case only if it is still valid and scores no worse.
    fn enhance(&self, scored: Scored) -> Scored {
        let Some(enhanced) = self.analyzer.enhance(&scored.case, &scored.suggestions) else {
            return scored;
        };
        if enhanced.validate().is_err() {
            debug!(case = %scored.case.id, "enhancement produced an invalid case; kept original");
            return scored;
        }
        match self.analyzer.analyze(&enhanced) {
            Ok(report) if report.score >= scored.report.score => {
                debug!(
                    case = %enhanced.id,
                    before = scored.report.score,
                    after = report.score,
                    "enhanced case"
                );
                let suggestions = self.analyzer.suggest(&enhanced, &report);
                Scored {
                    case: enhanced,
                    report,
                    suggestions,
                }
            }
            _ => scored,
        }
    }

    fn learn(&self, kept: &[Scored]) -> Result<Option<PatternId>> {
        let learning = &self.config.learning;
        if !learning.enabled || kept.len() < learning.min_batch_size {
            return Ok(None);
        }
        let accepted: Vec<TestCase> = kept
            .iter()
            .filter(|s| s.report.score >= learning.pattern_quality_threshold)
            .map(|s| s.case.clone())
            .collect();
        let Some(pattern) = extract_pattern(&accepted) else {
            debug!(accepted = accepted.len(), "not enough accepted cases to learn from");
            return Ok(None);
        };
        let id = pattern.pattern_id.clone();
        let stored = self
            .memory
            .add_pattern(pattern)
            .context("store learned pattern")?;
        Ok(stored.then_some(id))
    }
}
