use anyhow::{Context, Result, anyhow};
use casewright_config::{CasewrightConfig, load_config, save_config};
use casewright_engine::{AnalysisReport, CaseEngine};
use casewright_ingest_json::{JsonIssueSource, extract_ticket_id, parse_issue_json};
use casewright_logging::LoggingConfig;
use casewright_memory::PatternMemory;
use casewright_ports::{CaseRenderer, IssueSource};
use casewright_quality::HeuristicAnalyzer;
use casewright_render_gherkin::GherkinRenderer;
use casewright_render_json::{JsonRenderer, read_feedback_jsonl, write_feedback_jsonl};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "casewright")]
#[command(about = "Derive Gherkin test cases from issue tickets.", long_about = None)]
struct Cli {
    /// Config file (.yaml or .json). Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate test cases for one ticket.
    Generate {
        /// Ticket key (QA-101) or a tracker /browse/ URL.
        ticket: String,
        /// Directory holding {KEY}.json issue files.
        #[arg(long)]
        issues_dir: Option<PathBuf>,
        /// Output directory for .feature, .cases.json and feedback.jsonl.
        #[arg(long)]
        out: Option<PathBuf>,
        /// Pattern store to read and update.
        #[arg(long)]
        patterns: Option<PathBuf>,
        /// Don't learn a pattern from this batch.
        #[arg(long)]
        no_learning: bool,
        /// Force a feature type (login, api_test, ...) instead of classifying.
        #[arg(long)]
        feature: Option<String>,
    },

    /// Analyze one issue JSON file and print the report.
    Analyze {
        file: PathBuf,
        /// Pattern store to align against. Never written.
        #[arg(long)]
        patterns: Option<PathBuf>,
    },

    /// Print pattern store statistics.
    Patterns {
        #[arg(long)]
        patterns: Option<PathBuf>,
        /// Feedback log to include in the success statistics.
        #[arg(long)]
        feedback: Option<PathBuf>,
    },

    /// Write a default config file.
    InitConfig { path: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Needs no config, and must work when the environment holds a bad one.
    if let Command::InitConfig { path } = &cli.cmd {
        save_config(path, &CasewrightConfig::default())?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    let config = resolve_config(cli.config.as_deref())?;
    let logging = LoggingConfig::from_settings(&config.logging.level, &config.logging.format)
        .context("logging settings")?;
    casewright_logging::init(&logging);
    run(cli.cmd, config)
}

fn run(cmd: Command, mut config: CasewrightConfig) -> Result<()> {
    match cmd {
        Command::Generate {
            ticket,
            issues_dir,
            out,
            patterns,
            no_learning,
            feature,
        } => {
            if let Some(dir) = issues_dir {
                config.issues_dir = dir;
            }
            if let Some(dir) = out {
                config.output_dir = dir;
            }
            if patterns.is_some() {
                config.pattern_store = patterns;
            }
            if no_learning {
                config.learning.enabled = false;
            }
            generate(&config, &ticket, feature.as_deref())
        }
        Command::Analyze { file, patterns } => {
            let store = patterns.or_else(|| config.pattern_store.clone());
            let memory = load_memory(store.as_deref())?;
            let text = std::fs::read_to_string(&file).with_context(|| format!("read {file:?}"))?;
            let issue = parse_issue_json(&text).with_context(|| format!("parse issue {file:?}"))?;

            let analyzer = HeuristicAnalyzer::new();
            let engine = CaseEngine::new(&config, &memory, &analyzer);
            let report = engine.analyze(&issue)?;
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("serialize report")?
            );
            Ok(())
        }
        Command::Patterns { patterns, feedback } => {
            let store = patterns
                .or_else(|| config.pattern_store.clone())
                .ok_or_else(|| anyhow!("no pattern store: pass --patterns or set pattern_store"))?;
            let memory = PatternMemory::load_or_default(&store)?;
            if let Some(path) = feedback {
                memory.add_feedback_batch(read_feedback_jsonl(&path)?);
            }
            let stats = memory.analyze_patterns();
            println!(
                "{}",
                serde_json::to_string_pretty(&stats).context("serialize pattern stats")?
            );
            Ok(())
        }
        Command::InitConfig { .. } => Ok(()),
    }
}

/// Defaults, then the config file, then `CASEWRIGHT_*` variables.
fn resolve_config(path: Option<&Path>) -> Result<CasewrightConfig> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => CasewrightConfig::default(),
    };
    config.apply_env(|key| std::env::var(key).ok())?;
    config.validate()?;
    Ok(config)
}

fn load_memory(store: Option<&Path>) -> Result<PatternMemory> {
    match store {
        Some(path) => PatternMemory::load_or_default(path),
        None => Ok(PatternMemory::new()),
    }
}

fn generate(config: &CasewrightConfig, ticket: &str, feature: Option<&str>) -> Result<()> {
    let key = extract_ticket_id(ticket).ok_or_else(|| anyhow!("invalid ticket id {ticket:?}"))?;
    let memory = load_memory(config.pattern_store.as_deref())?;
    let analyzer = HeuristicAnalyzer::new();
    let engine = CaseEngine::new(config, &memory, &analyzer);
    let source = JsonIssueSource::new(config.issues_dir.clone());

    let report = match feature {
        Some(name) => {
            let issue = source
                .get_issue(&key)
                .with_context(|| format!("fetch issue {key}"))?;
            engine.analyze_as(&issue, name)?
        }
        None => engine.analyze_source(&source, &key)?,
    };

    if report.is_empty() {
        warn!(issue = %key, "empty batch");
        println!("no test cases generated for {key}");
        return Ok(());
    }

    write_outputs(&config.output_dir, &key, &report)?;
    write_feedback_jsonl(&config.output_dir.join("feedback.jsonl"), &memory.feedback())?;

    if let Some(store) = &config.pattern_store {
        memory.save(store)?;
        info!(path = %store.display(), patterns = memory.pattern_count(), "saved pattern store");
    }

    println!(
        "Generated {} test cases for {key} ({}, {} complexity, average score {:.3})",
        report.test_cases.len(),
        report.feature_type,
        report.complexity,
        report.average_score()
    );
    if let Some(id) = &report.learned_pattern {
        println!("Learned pattern {}", id.short());
    }
    for warning in &report.warnings {
        println!("warning: {warning}");
    }
    Ok(())
}

fn write_outputs(out: &Path, key: &str, report: &AnalysisReport) -> Result<()> {
    std::fs::create_dir_all(out).with_context(|| format!("create {out:?}"))?;

    let feature = GherkinRenderer.render_cases(key, &report.test_cases)?;
    let feature_path = out.join(format!("{key}.feature"));
    std::fs::write(&feature_path, feature).with_context(|| format!("write {feature_path:?}"))?;

    let cases = JsonRenderer.render_cases(key, &report.test_cases)?;
    let cases_path = out.join(format!("{key}.cases.json"));
    std::fs::write(&cases_path, cases).with_context(|| format!("write {cases_path:?}"))?;

    info!(feature = ?feature_path, cases = ?cases_path, "wrote outputs");
    Ok(())
}
