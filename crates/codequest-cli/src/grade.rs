//! Host-side checks around a run: submission validation and comparing a
//! run's output with a lesson's expected answer.

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::exec::{run_with_config, ExecutionResult, RunConfig};

/// Rejections that happen before the interpreter is invoked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("Code is empty.")]
    Empty,
}

/// Result of checking one submission against an expected answer.
#[derive(Debug, Clone, Serialize)]
pub struct Grade {
    pub result: ExecutionResult,
    pub passed: bool,
    /// Lines as the console panel shows them.
    pub transcript: Vec<String>,
}

pub fn validate_source(src: &str) -> Result<(), SubmissionError> {
    if src.trim().is_empty() {
        return Err(SubmissionError::Empty);
    }
    Ok(())
}

/// Trim each line, drop blank ones, join with newlines.
pub fn clean_output(lines: &[String]) -> String {
    lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Output lines, followed by `Error: <message>` when the run failed.
pub fn transcript(result: &ExecutionResult) -> Vec<String> {
    let mut lines = result.output.clone();
    if let Some(err) = &result.error {
        lines.push(format!("Error: {err}"));
    }
    lines
}

/// Run `src` and compare its cleaned output with `expected`.
pub fn grade(src: &str, expected: &str, config: &RunConfig) -> Result<Grade, SubmissionError> {
    validate_source(src)?;
    let result = run_with_config(src, config);
    let passed = result.is_ok() && clean_output(&result.output) == expected;
    info!(passed, error = result.error.as_deref(), "graded submission");
    Ok(Grade {
        transcript: transcript(&result),
        result,
        passed,
    })
}
