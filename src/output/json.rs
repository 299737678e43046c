//! JSON output formatter for dedup runs.
//!
//! Provides machine-readable JSON output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "document": "poster",
//!   "removed_path_items": 3,
//!   "removed_compound_paths": 1,
//!   "failed_removals": [
//!     { "id": 12, "kind": "path item", "message": "item is locked: #12" }
//!   ],
//!   "message": "Removed 3 duplicate path items, 1 duplicate compound path!",
//!   "exit_code": 3,
//!   "exit_code_name": "PD003",
//!   "phases": {
//!     "compound": { "candidates": 4, "duplicate_groups": 1, "redundant": 1, "empty_geometry": 0 },
//!     "simple": { "candidates": 20, "duplicate_groups": 2, "redundant": 4, "empty_geometry": 1 }
//!   }
//! }
//! ```
//!
//! # Example
//!
//! ```
//! use pathdedup::duplicates::DedupError;
//! use pathdedup::output::json::JsonReport;
//!
//! let report = JsonReport::new(None, &Err(DedupError::NothingEligible));
//! assert_eq!(report.exit_code_name, "PD002");
//! assert!(report.to_json().unwrap().starts_with('{'));
//! ```

use std::io::Write;

use serde::Serialize;

use crate::duplicates::{DedupError, DedupOutcome, PhaseReport};
use crate::error::ExitCode;
use crate::output::report::status_message;

/// A failed removal in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonFailure {
    /// Item id the host refused to remove
    pub id: u64,
    /// "path item" or "compound path"
    pub kind: String,
    /// Host error text
    pub message: String,
}

/// Per-phase statistics in JSON format.
#[derive(Debug, Clone, Default, Serialize)]
pub struct JsonPhase {
    /// Eligible shapes collected
    pub candidates: usize,
    /// Groups with 2+ members
    pub duplicate_groups: usize,
    /// Shapes planned for removal
    pub redundant: usize,
    /// Candidates skipped for lacking geometry
    pub empty_geometry: usize,
    /// Successful removals
    pub removed: usize,
}

impl JsonPhase {
    #[must_use]
    pub fn from_phase(phase: &PhaseReport) -> Self {
        Self {
            candidates: phase.candidates,
            duplicate_groups: phase.stats.duplicate_groups,
            redundant: phase.stats.redundant_shapes,
            empty_geometry: phase.stats.empty_geometry,
            removed: phase.removed,
        }
    }
}

/// Both phases.
#[derive(Debug, Clone, Default, Serialize)]
pub struct JsonPhases {
    pub compound: JsonPhase,
    pub simple: JsonPhase,
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    /// Active document name, absent when no document was open
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    /// Simple duplicates removed
    pub removed_path_items: usize,
    /// Compound duplicates removed
    pub removed_compound_paths: usize,
    /// Removals the host refused
    pub failed_removals: Vec<JsonFailure>,
    /// The same status line the text output prints
    pub message: String,
    /// The exit code number
    pub exit_code: i32,
    /// The machine-readable exit code name (e.g., "PD000")
    pub exit_code_name: String,
    /// Phase statistics, absent when the engine stopped early
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phases: Option<JsonPhases>,
}

impl JsonReport {
    /// Create a report from an engine result.
    #[must_use]
    pub fn new(document: Option<&str>, result: &Result<DedupOutcome, DedupError>) -> Self {
        let exit_code = ExitCode::from_outcome(result);
        let message = status_message(result);
        let document = document.map(str::to_string);

        match result {
            Ok(outcome) => {
                let failed_removals = [&outcome.compound, &outcome.simple]
                    .into_iter()
                    .flat_map(|phase| {
                        phase.failures.iter().map(move |failure| JsonFailure {
                            id: failure.id.0,
                            kind: phase.kind.to_string(),
                            message: failure.message(),
                        })
                    })
                    .collect();

                Self {
                    document,
                    removed_path_items: outcome.removed_simple(),
                    removed_compound_paths: outcome.removed_compound(),
                    failed_removals,
                    message,
                    exit_code: exit_code.as_i32(),
                    exit_code_name: exit_code.code_prefix().to_string(),
                    phases: Some(JsonPhases {
                        compound: JsonPhase::from_phase(&outcome.compound),
                        simple: JsonPhase::from_phase(&outcome.simple),
                    }),
                }
            }
            Err(_) => Self {
                document,
                removed_path_items: 0,
                removed_compound_paths: 0,
                failed_removals: Vec::new(),
                message,
                exit_code: exit_code.as_i32(),
                exit_code_name: exit_code.code_prefix().to_string(),
                phases: None,
            },
        }
    }

    /// Serialize to compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write JSON to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), JsonOutputError> {
        let json = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error during JSON generation: {0}")]
    Io(#[from] std::io::Error),
}
