//! Human-readable run summaries.
//!
//! # Example
//!
//! ```
//! use pathdedup::output::report::format_summary;
//!
//! assert_eq!(
//!     format_summary(1, 0),
//!     "Removed 1 duplicate path item, 0 duplicate compound paths!"
//! );
//! ```

use crate::duplicates::{DedupError, DedupOutcome};

/// Message shown when there is no active document.
pub const NO_DOCUMENT_MESSAGE: &str = "No documents open.";

/// Message shown when neither phase collected a shape.
pub const NOTHING_ELIGIBLE_MESSAGE: &str = "No eligible path items or compound paths found.";

fn plural(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("{count} {one}")
    } else {
        format!("{count} {many}")
    }
}

/// Summary line for a completed run.
#[must_use]
pub fn format_summary(removed_simple: usize, removed_compound: usize) -> String {
    format!(
        "Removed {}, {}!",
        plural(removed_simple, "duplicate path item", "duplicate path items"),
        plural(
            removed_compound,
            "duplicate compound path",
            "duplicate compound paths"
        )
    )
}

/// The single status message for a run result.
#[must_use]
pub fn status_message(result: &Result<DedupOutcome, DedupError>) -> String {
    match result {
        Ok(outcome) => format_summary(outcome.removed_simple(), outcome.removed_compound()),
        Err(DedupError::NoDocumentOpen) => NO_DOCUMENT_MESSAGE.to_string(),
        Err(DedupError::NothingEligible) => NOTHING_ELIGIBLE_MESSAGE.to_string(),
    }
}
