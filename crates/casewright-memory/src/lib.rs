//! Pattern memory.
//!
//! Holds learned [`TestCasePattern`]s and the append-only feedback log. All
//! access goes through one mutex, so a memory can be shared between analysis
//! sessions. Patterns are never edited; the best pattern for a feature type is
//! the one added most recently.

mod extract;

pub use extract::{MIN_PATTERN_CASES, extract_pattern};

use anyhow::{Context, Result};
use casewright_ids::PatternId;
use casewright_schema::case::TestCase;
use casewright_schema::feedback::TestCaseFeedback;
use casewright_schema::issue::FeatureType;
use casewright_schema::pattern::{PatternError, PatternStoreFile, TestCasePattern};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Default)]
struct MemoryState {
    /// Insertion order doubles as recency.
    patterns: Vec<TestCasePattern>,
    feedback: Vec<TestCaseFeedback>,
}

#[derive(Debug, Default)]
pub struct PatternMemory {
    state: Mutex<MemoryState>,
}

/// Aggregate view over the feedback log and stored patterns.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct PatternStats {
    pub total_patterns: usize,
    pub total_feedback: usize,
    pub successful: usize,
    pub success_rate: f64,
    pub average_quality: f64,
    /// Feedback records per pattern that shaped the case.
    pub pattern_usage: BTreeMap<PatternId, usize>,
    pub patterns_by_feature: BTreeMap<FeatureType, usize>,
}

impl PatternMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Memory seeded with `patterns`, in order. Any malformed record rejects
    /// the whole set.
    pub fn from_patterns(patterns: Vec<TestCasePattern>) -> Result<Self, PatternError> {
        let memory = Self::new();
        for p in patterns {
            memory.add_pattern(p)?;
        }
        Ok(memory)
    }

    /// Most recently added pattern for `feature`.
    pub fn get_best_pattern(&self, feature: FeatureType) -> Option<TestCasePattern> {
        let state = self.state.lock();
        state
            .patterns
            .iter()
            .rev()
            .find(|p| p.feature_type == feature)
            .cloned()
    }

    /// Patterns for `feature`, oldest first.
    pub fn patterns(&self, feature: FeatureType) -> Vec<TestCasePattern> {
        let state = self.state.lock();
        state
            .patterns
            .iter()
            .filter(|p| p.feature_type == feature)
            .cloned()
            .collect()
    }

    pub fn all_patterns(&self) -> Vec<TestCasePattern> {
        self.state.lock().patterns.clone()
    }

    pub fn pattern_count(&self) -> usize {
        self.state.lock().patterns.len()
    }

    /// See [`extract_pattern`].
    pub fn extract_pattern(&self, successful_cases: &[TestCase]) -> Option<TestCasePattern> {
        extract_pattern(successful_cases)
    }

    /// Stores `pattern`. Returns `Ok(false)` when a pattern with the same id
    /// is already stored; the stored record is kept but becomes the most
    /// recent one.
    pub fn add_pattern(&self, pattern: TestCasePattern) -> Result<bool, PatternError> {
        pattern.validate()?;
        let mut state = self.state.lock();
        if let Some(pos) = state
            .patterns
            .iter()
            .position(|p| p.pattern_id == pattern.pattern_id)
        {
            let existing = state.patterns.remove(pos);
            debug!(pattern = %existing.pattern_id.short(), "pattern already stored; refreshed");
            state.patterns.push(existing);
            return Ok(false);
        }
        info!(
            pattern = %pattern.pattern_id.short(),
            feature = %pattern.feature_type,
            steps = pattern.steps_pattern.len(),
            "stored pattern"
        );
        state.patterns.push(pattern);
        Ok(true)
    }

    pub fn add_feedback(&self, feedback: TestCaseFeedback) {
        self.state.lock().feedback.push(feedback);
    }

    /// Appends a whole batch under one lock.
    pub fn add_feedback_batch(&self, batch: impl IntoIterator<Item = TestCaseFeedback>) {
        self.state.lock().feedback.extend(batch);
    }

    pub fn feedback(&self) -> Vec<TestCaseFeedback> {
        self.state.lock().feedback.clone()
    }

    pub fn analyze_patterns(&self) -> PatternStats {
        let state = self.state.lock();
        let total_feedback = state.feedback.len();
        let successful = state.feedback.iter().filter(|f| f.is_successful).count();

        let mut pattern_usage: BTreeMap<PatternId, usize> = BTreeMap::new();
        for f in &state.feedback {
            if let Some(id) = &f.pattern_used {
                *pattern_usage.entry(id.clone()).or_default() += 1;
            }
        }
        let mut patterns_by_feature: BTreeMap<FeatureType, usize> = BTreeMap::new();
        for p in &state.patterns {
            *patterns_by_feature.entry(p.feature_type).or_default() += 1;
        }

        let (success_rate, average_quality) = if total_feedback == 0 {
            (0.0, 0.0)
        } else {
            let n = total_feedback as f64;
            let sum: f64 = state.feedback.iter().map(|f| f.quality_score).sum();
            (successful as f64 / n, sum / n)
        };

        PatternStats {
            total_patterns: state.patterns.len(),
            total_feedback,
            successful,
            success_rate,
            average_quality,
            pattern_usage,
            patterns_by_feature,
        }
    }

    pub fn to_store_file(&self) -> PatternStoreFile {
        PatternStoreFile {
            patterns: self.all_patterns(),
        }
    }

    /// Parses a pattern store document.
    pub fn from_store_json(text: &str) -> Result<Self, PatternError> {
        let store: PatternStoreFile =
            serde_json::from_str(text).map_err(|e| PatternError::Malformed(e.to_string()))?;
        Self::from_patterns(store.patterns)
    }

    /// Reads a pattern store. The feedback log always starts empty.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).with_context(|| format!("read {path:?}"))?;
        let memory =
            Self::from_store_json(&text).with_context(|| format!("parse pattern store {path:?}"))?;
        info!(path = %path.display(), patterns = memory.pattern_count(), "loaded pattern store");
        Ok(memory)
    }

    /// Like [`PatternMemory::load`], but a missing file is an empty memory.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::new())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| format!("create {parent:?}"))?;
        }
        let text = serde_json::to_string_pretty(&self.to_store_file())
            .context("serialize pattern store")?;
        std::fs::write(path, text).with_context(|| format!("write {path:?}"))?;
        Ok(())
    }
}
