//! Structured error handling and exit codes.

use serde::Serialize;

use crate::duplicates::{DedupError, DedupOutcome};

/// Exit codes for the pathdedup binary.
///
/// - 0: Success (run completed, every planned removal succeeded)
/// - 1: General error (unexpected failure)
/// - 2: Nothing eligible (no path items or compound paths found)
/// - 3: Partial success (run completed, some removals failed)
/// - 4: No document (workspace has no active document)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: run completed without removal failures.
    Success = 0,
    /// General error: An unexpected error occurred.
    GeneralError = 1,
    /// Nothing eligible: no candidate shapes in either phase.
    NothingEligible = 2,
    /// Partial success: run completed but some removals failed.
    PartialSuccess = 3,
    /// No document: the workspace has no active document.
    NoDocument = 4,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "PD000",
            Self::GeneralError => "PD001",
            Self::NothingEligible => "PD002",
            Self::PartialSuccess => "PD003",
            Self::NoDocument => "PD004",
        }
    }

    /// Exit code for an engine result.
    #[must_use]
    pub fn from_outcome(result: &Result<DedupOutcome, DedupError>) -> Self {
        match result {
            Ok(outcome) if outcome.has_failures() => Self::PartialSuccess,
            Ok(_) => Self::Success,
            Err(DedupError::NoDocumentOpen) => Self::NoDocument,
            Err(DedupError::NothingEligible) => Self::NothingEligible,
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "PD001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{err:#}"),
        }
    }
}
