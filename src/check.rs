//! check command: verify inline code references in documentation
//!
//! Pipeline: discover files, build the source corpus, extract inline code
//! spans from each document, and collect the spans missing from the corpus.

use crate::config::{CheckConfig, ConfigFile};
use crate::corpus::SourceCorpus;
use crate::discover::{discover_docs, discover_sources};
use crate::error::Result;
use crate::extract::extract_references;
use crate::report::{CheckReport, CheckSummary, Outcome, SkipReason};
use crate::validate::find_broken;
use clap::{Args, ValueEnum};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Glob matching documentation files [default: docs/**/*.md]
    #[arg(long, env = "INPUT_DOC-PATH", value_name = "GLOB")]
    pub doc_path: Option<String>,

    /// Root directory of source files [default: src]
    #[arg(long, env = "INPUT_CODE-PATH", value_name = "DIR")]
    pub code_path: Option<String>,

    /// Fail the run when broken references are found (only `true` enables it)
    #[arg(
        long,
        env = "INPUT_FAIL-ON-ERROR",
        value_name = "BOOL",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub fail_on_error: Option<String>,

    /// YAML config file with doc-path, code-path, fail-on-error
    #[arg(short, long, env = "DOCREF_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Report format written to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Log lines only
    Text,
    /// Log lines plus one compact JSON summary on stdout
    Json,
}

/// Run the check command and decide the outcome
pub async fn run_check(args: CheckArgs) -> anyhow::Result<Outcome> {
    let file = match &args.config {
        Some(path) => ConfigFile::load(path).await?,
        None => ConfigFile::default(),
    };

    let config = CheckConfig::resolve(
        args.doc_path.as_deref(),
        args.code_path.as_deref(),
        args.fail_on_error.as_deref(),
        file,
    );
    tracing::debug!(?config, "resolved configuration");

    let report = check(&config).await?;
    report.emit();

    if args.format == OutputFormat::Json {
        println!("{}", serde_json::to_string(&report.to_json())?);
    }

    Ok(report.outcome(config.fail_on_error))
}

/// Run the pipeline once against the filesystem as it is now
pub async fn check(config: &CheckConfig) -> Result<CheckReport> {
    tracing::info!(
        "Scanning documentation files with pattern: {}",
        config.doc_pattern
    );

    let doc_files = discover_docs(&config.doc_pattern)?;
    if doc_files.is_empty() {
        return Ok(CheckReport::Skipped(SkipReason::NoDocs));
    }

    tracing::debug!(pattern = %config.source_pattern(), "discovering source files");
    let source_files = discover_sources(&config.code_path)?;
    if source_files.is_empty() {
        return Ok(CheckReport::Skipped(SkipReason::NoSources));
    }

    let corpus = SourceCorpus::build(&source_files).await?;
    let documents = extract_references(&doc_files).await?;
    let references_checked = documents.iter().map(|d| d.references.len()).sum();
    let broken = find_broken(&corpus, &documents);

    Ok(CheckReport::Completed(CheckSummary {
        doc_files: doc_files.len(),
        source_files: corpus.file_count(),
        references_checked,
        broken,
    }))
}
