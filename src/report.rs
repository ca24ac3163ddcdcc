//! Reporting: log lines, run outcome, and the JSON summary

use crate::validate::BrokenReference;
use chrono::Utc;
use serde::Serialize;

pub const FAILURE_MESSAGE: &str = "Broken references detected in documentation!";

/// Why a run ended before validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NoDocs,
    NoSources,
}

impl SkipReason {
    pub fn message(self) -> &'static str {
        match self {
            SkipReason::NoDocs => "No documentation files found!",
            SkipReason::NoSources => "No source code files found to check references against.",
        }
    }
}

/// Counts and findings of a run that reached validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckSummary {
    pub doc_files: usize,
    pub source_files: usize,
    pub references_checked: usize,
    pub broken: Vec<BrokenReference>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckReport {
    Skipped(SkipReason),
    Completed(CheckSummary),
}

/// Final outcome the entry point branches on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Failed(String),
}

impl CheckReport {
    pub fn broken(&self) -> &[BrokenReference] {
        match self {
            CheckReport::Skipped(_) => &[],
            CheckReport::Completed(summary) => &summary.broken,
        }
    }

    /// Log the report at the severities callers expect
    pub fn emit(&self) {
        match self {
            CheckReport::Skipped(reason) => tracing::warn!("{}", reason.message()),
            CheckReport::Completed(summary) if summary.broken.is_empty() => {
                tracing::info!("No broken documentation references found.");
            }
            CheckReport::Completed(summary) => {
                tracing::error!("Found {} broken references:", summary.broken.len());
                for broken in &summary.broken {
                    tracing::error!("- {} in {}", broken.reference, broken.file.display());
                }
            }
        }
    }

    pub fn outcome(&self, fail_on_error: bool) -> Outcome {
        if fail_on_error && !self.broken().is_empty() {
            Outcome::Failed(FAILURE_MESSAGE.to_string())
        } else {
            Outcome::Passed
        }
    }

    pub fn to_json(&self) -> JsonReport<'_> {
        let (status, reason, summary) = match self {
            CheckReport::Skipped(reason) => ("skipped", Some(*reason), None),
            CheckReport::Completed(s) if s.broken.is_empty() => ("clean", None, Some(s)),
            CheckReport::Completed(s) => ("broken", None, Some(s)),
        };
        JsonReport {
            status,
            reason,
            summary,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Compact JSON line for `--format json`
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<SkipReason>,
    #[serde(flatten)]
    pub summary: Option<&'a CheckSummary>,
    pub timestamp: String,
}
