//! JSON writers for casewright artifacts.
//!
//! Emits pretty-printed case batches and reports (`{KEY}.cases.json`) and
//! line-delimited feedback records (`feedback.jsonl`).

use anyhow::{Context, Result};
use casewright_ports::CaseRenderer;
use casewright_schema::case::TestCase;
use casewright_schema::feedback::TestCaseFeedback;
use serde::Serialize;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// Renders a batch as `{"issue_key": ..., "test_cases": [...]}`.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonRenderer;

#[derive(Serialize)]
struct CaseBatch<'a> {
    issue_key: &'a str,
    test_cases: &'a [TestCase],
}

impl CaseRenderer for JsonRenderer {
    fn render_cases(&self, issue_key: &str, cases: &[TestCase]) -> Result<String> {
        serde_json::to_string_pretty(&CaseBatch {
            issue_key,
            test_cases: cases,
        })
        .context("serialize test cases")
    }
}

/// Writes any report pretty-printed, creating parent directories.
pub fn write_report<T: Serialize>(path: &Path, report: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(report).context("serialize report")?;
    ensure_parent(path)?;
    std::fs::write(path, text).with_context(|| format!("write {path:?}"))?;
    Ok(())
}

/// Appends feedback records, one JSON object per line.
pub fn write_feedback_jsonl(path: &Path, feedback: &[TestCaseFeedback]) -> Result<()> {
    ensure_parent(path)?;
    let mut f = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open {path:?}"))?;
    for record in feedback {
        let line = serde_json::to_string(record).context("serialize feedback")?;
        f.write_all(line.as_bytes())?;
        f.write_all(b"\n")?;
    }
    Ok(())
}

/// Reads a feedback log written by [`write_feedback_jsonl`]. Blank lines are skipped.
pub fn read_feedback_jsonl(path: &Path) -> Result<Vec<TestCaseFeedback>> {
    let f = std::fs::File::open(path).with_context(|| format!("open {path:?}"))?;
    let mut out = Vec::new();
    for (i, line) in BufReader::new(f).lines().enumerate() {
        let line = line.with_context(|| format!("read {path:?}"))?;
        if line.trim().is_empty() {
            continue;
        }
        let record: TestCaseFeedback = serde_json::from_str(&line)
            .with_context(|| format!("parse feedback line {} in {:?}", i + 1, path))?;
        out.push(record);
    }
    Ok(out)
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("create {parent:?}"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use casewright_ids::TestCaseId;
    use casewright_schema::feedback::QualityReport;
    use casewright_testkit::sample_case;
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn feedback(id: &str, score: f64) -> TestCaseFeedback {
        TestCaseFeedback::new(
            TestCaseId(id.into()),
            &QualityReport::new(score, BTreeMap::from([("completeness".to_string(), score)])),
            vec!["Add missing fields".into()],
            None,
            Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap(),
            0.7,
        )
    }

    #[test]
    fn renders_batch_json() {
        let out = JsonRenderer
            .render_cases("QA-1", &[sample_case("QA-1-TC01")])
            .unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["issue_key"], "QA-1");
        assert_eq!(v["test_cases"][0]["id"], "QA-1-TC01");
        let cases: Vec<TestCase> = serde_json::from_value(v["test_cases"].clone()).unwrap();
        assert_eq!(cases, vec![sample_case("QA-1-TC01")]);
    }

    #[test]
    fn report_written_under_new_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("QA-1.cases.json");
        write_report(&path, &vec![sample_case("TC01")]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n  {"));
    }

    #[test]
    fn feedback_jsonl_appends_and_reads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("feedback.jsonl");
        write_feedback_jsonl(&path, &[feedback("TC01", 0.9)]).unwrap();
        write_feedback_jsonl(&path, &[feedback("TC02", 0.4), feedback("TC03", 0.7)]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 3);

        let back = read_feedback_jsonl(&path).unwrap();
        assert_eq!(back.len(), 3);
        assert_eq!(back[1].test_case_id, TestCaseId("TC02".into()));
        assert!(!back[1].is_successful);
        assert!(back[2].is_successful);
    }

    #[test]
    fn bad_feedback_line_names_its_position() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("feedback.jsonl");
        std::fs::write(&path, "\n{oops}\n").unwrap();
        let err = read_feedback_jsonl(&path).unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));
    }
}
